use form_core::step::validation::{email, max_length, min_length};
use form_core::{Field, FieldKind, StepForm, StepValidator};

pub struct AccountForm;

impl StepForm for AccountForm {
    fn fields(&self) -> Option<Vec<Field>> {
        Some(vec![Field::new("email", "Email", FieldKind::Email).required(),
                  Field::new("password", "Password", FieldKind::Password).required()
                                                                         .help("At least 8 characters")])
    }

    fn validator(&self) -> Option<StepValidator> {
        Some(StepValidator::new().require("email", "Email is required")
                                 .rule("email", email())
                                 .require("password", "Password is required")
                                 .rule("password", min_length(8))
                                 .rule("password", max_length(128)))
    }
}
