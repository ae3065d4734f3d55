//! Sesiones del wizard: una ejecución del formulario multi-página.
//!
//! Una sesión nace transitoria (sin `hash`) y pasa a persistente cuando el
//! storage le asigna el hash secreto (`StepStore::persist_session`). Sólo
//! entonces los links usan el hash en lugar del id.

pub mod binding;
pub mod link;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::step::StepType;

pub use binding::SessionBinding;
pub use link::LinkConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session<K: StepType> {
    pub id: Uuid,
    pub hash: Option<String>,
    pub current_step: Option<K>,
    pub created_at: DateTime<Utc>,
}

impl<K: StepType> Session<K> {
    pub fn new(id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self { id,
               hash: None,
               current_step: None,
               created_at }
    }

    pub fn is_persistent(&self) -> bool {
        self.hash.is_some()
    }

    /// Token público para reanudar: hash si existe, id en otro caso.
    pub fn token(&self) -> String {
        match &self.hash {
            Some(h) => h.clone(),
            None => self.id.to_string(),
        }
    }
}
