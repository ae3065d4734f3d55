use form_core::{Field, FieldKind, StepForm, StepValidator, ValidationIssue};

pub struct ConfirmForm;

impl StepForm for ConfirmForm {
    fn fields(&self) -> Option<Vec<Field>> {
        Some(vec![Field::new("accept_terms", "I accept the terms of service", FieldKind::Checkbox).required(),
                  Field::new("newsletter", "Send me product news", FieldKind::Checkbox)])
    }

    fn validator(&self) -> Option<StepValidator> {
        Some(StepValidator::new().check(|ctx| {
                                     if ctx.bool_value("accept_terms") == Some(true) {
                                         vec![]
                                     } else {
                                         vec![ValidationIssue::field("accept_terms", "You must accept the terms")]
                                     }
                                 }))
    }
}
