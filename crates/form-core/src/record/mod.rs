//! Registros persistidos de steps.
//!
//! Un `StepRecord` es la instancia de una variante dentro de una sesión: el
//! blob serializado de sus campos más el timestamp de última modificación.
//! El único camino de escritura es `FormStep::save_data`.

pub mod data;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::CoreFormError;
use crate::step::StepType;

pub use data::{decode_data, encode_data, StepData};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord<K: StepType> {
    pub id: i64,
    pub session_id: Uuid,
    pub step_type: K,
    pub data: String, // blob JSON (ver `data`)
    pub modified_at: DateTime<Utc>,
}

impl<K: StepType> StepRecord<K> {
    /// Restaura el mapping campo -> valor.
    pub fn load_data(&self) -> Result<StepData, CoreFormError> {
        decode_data(&self.data)
    }
}
