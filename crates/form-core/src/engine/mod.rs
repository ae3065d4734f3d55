//! Motor del wizard.
//!
//! `FormEngine` hace de controlador mínimo sobre un `StepStore`: abre pasos,
//! valida y guarda submits, mueve el puntero de paso actual. `FormStep` es la
//! vista de un record que el render/controlador consume.

mod core;
mod form_step;

pub use self::core::{FormEngine, SubmitOutcome};
pub use form_step::FormStep;
