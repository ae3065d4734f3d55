use form_core::step::validation::regex;
use form_core::{ExtraAction, Field, FieldKind, StepForm, StepValidator};

pub struct PaymentForm;

impl StepForm for PaymentForm {
    fn fields(&self) -> Option<Vec<Field>> {
        Some(vec![Field::new("card_number", "Card number", FieldKind::Text).help("Leave empty on the free plan"),
                  Field::new("card_holder", "Card holder", FieldKind::Text)])
    }

    fn extra_actions(&self) -> Vec<ExtraAction> {
        vec![ExtraAction::new("pay_later", "Pay later")]
    }

    fn validator(&self) -> Option<StepValidator> {
        Some(StepValidator::new().rule("card_number", regex(r"^\d{12,19}$").expect("static card pattern")))
    }
}
