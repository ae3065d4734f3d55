//! Errores del núcleo del wizard.
//!
//! `ConfigurationError` agrupa errores de programación (pasos mal declarados)
//! que deben aflorar de inmediato; el resto son fallos de datos o de storage
//! que el controlador propaga.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigurationError {
    #[error("step '{step}' is not final and declares no next steps")] MissingNextSteps { step: String },
    #[error("step '{step}' does not implement fields()")] FieldsNotImplemented { step: String },
    #[error("step '{step}' is not registered")] UnregisteredStep { step: String },
    #[error("step '{step}' points to unregistered step '{target}'")] UnregisteredTarget { step: String, target: String },
    #[error("registry has no steps")] EmptyRegistry,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CoreFormError {
    #[error("configuration error: {0}")] Configuration(#[from] ConfigurationError),
    #[error("could not restore step data: {0}")] Deserialization(String),
    #[error("could not serialize step data: {0}")] Serialization(String),
    #[error("session not found: {0}")] SessionNotFound(Uuid),
    #[error("step record not found: {0}")] RecordNotFound(i64),
    #[error("record {record} does not belong to session {session}")] SessionMismatch { record: i64, session: Uuid },
    #[error("unknown step type: {0}")] UnknownStepType(String),
    #[error("invalid session token: {0}")] InvalidToken(String),
    #[error("storage: {0}")] Storage(String),
}

impl CoreFormError {
    /// `true` para errores de programación (no recuperables en runtime).
    pub fn is_configuration(&self) -> bool {
        matches!(self, CoreFormError::Configuration(_))
    }
}
