//! Contrato de storage del wizard y backend en memoria.
//!
//! El storage expone create/read/update/query sobre sesiones y records. Las
//! escrituras toman `&mut self`: cada request opera de forma síncrona contra
//! su store (last-write-wins ante submits duplicados).

mod memory;
mod snapshot;

use uuid::Uuid;

use crate::errors::CoreFormError;
use crate::record::StepRecord;
use crate::session::Session;
use crate::step::StepType;

pub use memory::InMemoryStepStore;
pub use snapshot::{RecordSnapshot, SessionSnapshot, StoreSnapshot};

pub trait StepStore<K: StepType> {
    /// Crea una sesión transitoria (sin hash, sin paso actual).
    fn create_session(&mut self) -> Result<Session<K>, CoreFormError>;

    fn get_session(&self, id: Uuid) -> Result<Session<K>, CoreFormError>;

    fn find_session_by_hash(&self, hash: &str) -> Result<Option<Session<K>>, CoreFormError>;

    /// Mueve el puntero de paso actual (`None` = wizard terminado).
    fn set_current_step(&mut self, session_id: Uuid, step: Option<K>) -> Result<(), CoreFormError>;

    /// Asigna el hash secreto si la sesión aún no lo tiene. Idempotente.
    fn persist_session(&mut self, session_id: Uuid) -> Result<Session<K>, CoreFormError>;

    fn create_record(&mut self, session_id: Uuid, step_type: K, blob: String) -> Result<StepRecord<K>, CoreFormError>;

    fn get_record(&self, id: i64) -> Result<StepRecord<K>, CoreFormError>;

    /// Reemplaza el blob y actualiza `modified_at`.
    fn update_record_data(&mut self, id: i64, blob: String) -> Result<StepRecord<K>, CoreFormError>;

    /// Record de esa variante en la sesión (el más reciente si hay varios).
    fn find_record(&self, session_id: Uuid, step_type: K) -> Result<Option<StepRecord<K>>, CoreFormError>;

    /// Todos los records de la sesión, más reciente primero.
    fn list_records(&self, session_id: Uuid) -> Result<Vec<StepRecord<K>>, CoreFormError>;

    /// Resuelve el token de un link. Una sesión persistente sólo se reanuda
    /// por hash; su id deja de ser un token válido.
    fn find_session_by_token(&self, token: &str) -> Result<Session<K>, CoreFormError> {
        if let Ok(id) = Uuid::parse_str(token) {
            let session = self.get_session(id)?;
            if session.is_persistent() {
                return Err(CoreFormError::InvalidToken(token.to_string()));
            }
            return Ok(session);
        }
        self.find_session_by_hash(token)?
            .ok_or_else(|| CoreFormError::InvalidToken(token.to_string()))
    }
}
