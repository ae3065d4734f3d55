//! Forms de cada paso del wizard de alta.

mod account;
mod confirm;
mod payment;
mod plan;
mod profile;

pub use account::AccountForm;
pub use confirm::ConfirmForm;
pub use payment::PaymentForm;
pub use plan::{PlanForm, PLANS};
pub use profile::ProfileForm;
