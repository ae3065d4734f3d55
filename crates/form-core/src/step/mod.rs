//! Definiciones relacionadas a Steps del wizard.
//!
//! Un Step es una página del formulario. Este módulo define:
//! - `StepType`: enum cerrado de variantes (declarado con `step_types!`).
//! - `StepDefinition`: metadata estática (siguientes pasos, final, título).
//! - `StepForm`: campos, acciones extra y validador que consume el render.
//! - `StepRegistry`: tabla variante -> (definición, form).

pub mod definition;
pub mod form;
pub mod kind;
pub mod macros;
pub mod registry;
pub mod validation;

pub use definition::{NextSteps, StepDefinition};
pub use form::{ExtraAction, Field, FieldKind, StepForm};
pub use kind::StepType;
pub use registry::StepRegistry;
pub use validation::{IssueTarget, Severity, StepValidator, ValidationContext, ValidationIssue};
