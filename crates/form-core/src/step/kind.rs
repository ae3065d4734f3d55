use std::fmt::Debug;
use std::hash::Hash;

use crate::errors::CoreFormError;

/// Identificador de variante de step.
///
/// Se implementa sobre un enum cerrado (ver `step_types!`). El storage guarda
/// la variante como el string estable de `as_str`.
pub trait StepType: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Todas las variantes, en orden de declaración.
    const ALL: &'static [Self];

    /// Tag estable usado en storage y links.
    fn as_str(&self) -> &'static str;

    /// Inverso de `as_str`.
    fn parse(raw: &str) -> Result<Self, CoreFormError> {
        Self::ALL.iter()
                 .copied()
                 .find(|k| k.as_str() == raw)
                 .ok_or_else(|| CoreFormError::UnknownStepType(raw.to_string()))
    }
}
