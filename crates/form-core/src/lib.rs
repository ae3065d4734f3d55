//! form-core: motor de pasos para wizards de formularios multi-página.
//!
//! - `step`: variantes (`StepType`), metadata (`StepDefinition`), forms y
//!   validación, registry.
//! - `record` / `session`: datos persistidos de cada paso y la sesión dueña.
//! - `store`: contrato de storage (`StepStore`) + backend en memoria.
//! - `resolver`: paso siguiente / anterior.
//! - `engine`: `FormEngine` (controlador) y `FormStep` (vista de un paso).
pub mod engine;
pub mod errors;
pub mod hashing;
pub mod record;
pub mod resolver;
pub mod session;
pub mod step;
pub mod store;

pub use engine::{FormEngine, FormStep, SubmitOutcome};
pub use errors::{ConfigurationError, CoreFormError};
pub use record::{StepData, StepRecord};
pub use resolver::SequenceResolver;
pub use session::{LinkConfig, Session, SessionBinding};
pub use step::{ExtraAction, Field, FieldKind, NextSteps, StepDefinition, StepForm, StepRegistry, StepType, StepValidator,
               ValidationIssue};
pub use store::{InMemoryStepStore, StepStore, StoreSnapshot};
