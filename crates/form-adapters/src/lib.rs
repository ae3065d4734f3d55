//! form-adapters: wizards concretos construidos sobre `form-core`.
//!
//! Por ahora un único wizard de alta de cuenta (`SignupStep`):
//! account -> profile -> plan -> [payment | confirm] -> confirm.
//! `plan` declara dos candidatos; el motor siempre continúa en el primero
//! (`payment`), que por eso admite quedar vacío en el plan gratuito.

pub mod steps;

use form_core::{step_types, StepDefinition, StepRegistry};

use steps::{AccountForm, ConfirmForm, PaymentForm, PlanForm, ProfileForm};

step_types! {
    /// Variantes del wizard de alta.
    pub enum SignupStep {
        Account => "account",
        Profile => "profile",
        Plan => "plan",
        Payment => "payment",
        Confirm => "confirm",
    }
}

/// Registry completo del wizard de alta. `account` es el punto de entrada.
pub fn signup_registry() -> StepRegistry<SignupStep> {
    StepRegistry::new().with(StepDefinition::new(SignupStep::Account, "Create your account").then(SignupStep::Profile),
                             AccountForm)
                       .with(StepDefinition::new(SignupStep::Profile, "Tell us about you").then(SignupStep::Plan),
                             ProfileForm)
                       .with(StepDefinition::new(SignupStep::Plan, "Choose a plan").branch([SignupStep::Payment,
                                                                                           SignupStep::Confirm]),
                             PlanForm)
                       .with(StepDefinition::new(SignupStep::Payment, "Payment details").then(SignupStep::Confirm),
                             PaymentForm)
                       .with(StepDefinition::new(SignupStep::Confirm, "Confirm").final_step(), ConfirmForm)
}
