use form_core::step::validation::max_length;
use form_core::{ExtraAction, Field, FieldKind, StepForm, StepValidator, ValidationIssue};

pub struct ProfileForm;

impl StepForm for ProfileForm {
    fn fields(&self) -> Option<Vec<Field>> {
        Some(vec![Field::new("display_name", "Display name", FieldKind::Text).required(),
                  Field::new("birth_date", "Birth date", FieldKind::Date),
                  Field::new("bio", "About you", FieldKind::TextArea)])
    }

    fn extra_actions(&self) -> Vec<ExtraAction> {
        vec![ExtraAction::new("save_later", "Save and continue later")]
    }

    fn validator(&self) -> Option<StepValidator> {
        Some(StepValidator::new().require("display_name", "Pick a display name")
                                 .rule("display_name", max_length(40))
                                 .rule("bio", max_length(500))
                                 .check(|ctx| {
                                     if ctx.is_empty("bio") {
                                         vec![ValidationIssue::field("bio", "Profiles with a bio get more replies").warning()]
                                     } else {
                                         vec![]
                                     }
                                 }))
    }
}
