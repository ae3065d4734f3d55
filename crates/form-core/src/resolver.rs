//! Resolución de paso siguiente / anterior.
//!
//! - Siguiente: metadata estática del registry. De una lista de candidatos
//!   sólo se toma el primero; el resto se ignora (queda en log).
//! - Anterior: scan lineal de los records de la sesión, más reciente primero;
//!   gana el primer record cuyo siguiente declarado es el paso actual. Si dos
//!   records apuntan al mismo paso, decide el orden de modificación.

use log::{debug, warn};
use uuid::Uuid;

use crate::errors::{ConfigurationError, CoreFormError};
use crate::record::StepRecord;
use crate::step::{NextSteps, StepRegistry, StepType};
use crate::store::StepStore;

pub struct SequenceResolver<'r, K: StepType> {
    registry: &'r StepRegistry<K>,
}

impl<'r, K: StepType> SequenceResolver<'r, K> {
    pub fn new(registry: &'r StepRegistry<K>) -> Self {
        Self { registry }
    }

    /// Variante que sigue a `step`, o `None` si es final.
    pub fn resolve_next(&self, step: K) -> Result<Option<K>, CoreFormError> {
        let def = self.registry.definition(step)?;
        match &def.next_steps {
            Some(NextSteps::Single(next)) => Ok(Some(*next)),
            Some(NextSteps::Branch(candidates)) if !candidates.is_empty() => {
                if candidates.len() > 1 {
                    warn!("step '{}' declares {} candidates; using the first ('{}')",
                          step.as_str(),
                          candidates.len(),
                          candidates[0].as_str());
                }
                Ok(Some(candidates[0]))
            }
            _ if def.is_final => Ok(None),
            _ => Err(ConfigurationError::MissingNextSteps { step: step.as_str().to_string() }.into()),
        }
    }

    /// Record existente del siguiente paso en la misma sesión (re-visita tras
    /// volver atrás).
    pub fn resolve_next_persisted<S: StepStore<K>>(&self,
                                                   store: &S,
                                                   record: &StepRecord<K>)
                                                   -> Result<Option<StepRecord<K>>, CoreFormError> {
        match self.resolve_next(record.step_type)? {
            Some(next) => store.find_record(record.session_id, next),
            None => Ok(None),
        }
    }

    /// Variante previa a `current` dentro de `session_id`.
    pub fn resolve_previous<S: StepStore<K>>(&self,
                                             store: &S,
                                             session_id: Uuid,
                                             current: K)
                                             -> Result<Option<K>, CoreFormError> {
        let records = store.list_records(session_id)?;
        debug!("resolve_previous session={session_id} step={} scanning={}",
               current.as_str(),
               records.len());
        for r in &records {
            if self.resolve_next(r.step_type)? == Some(current) {
                return Ok(Some(r.step_type));
            }
        }
        Ok(None)
    }

    pub fn resolve_previous_persisted<S: StepStore<K>>(&self,
                                                       store: &S,
                                                       record: &StepRecord<K>)
                                                       -> Result<Option<StepRecord<K>>, CoreFormError> {
        match self.resolve_previous(store, record.session_id, record.step_type)? {
            Some(prev) => store.find_record(record.session_id, prev),
            None => Ok(None),
        }
    }
}
