use log::{debug, info};
use uuid::Uuid;

use super::FormStep;
use crate::errors::CoreFormError;
use crate::record::{encode_data, StepData};
use crate::resolver::SequenceResolver;
use crate::session::{LinkConfig, Session, SessionBinding};
use crate::step::{StepRegistry, StepType, ValidationContext, ValidationIssue};
use crate::store::StepStore;

/// Resultado de enviar los datos de un paso.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<K> {
    /// Hay issues de severidad error; nada se guardó.
    Invalid(Vec<ValidationIssue>),
    /// Datos guardados; la sesión apunta a `next`.
    Advanced { next: K, warnings: Vec<ValidationIssue> },
    /// Datos guardados en un paso final; la sesión queda sin paso actual.
    Completed { warnings: Vec<ValidationIssue> },
}

/// Controlador síncrono del wizard sobre un store.
pub struct FormEngine<K: StepType, S: StepStore<K>> {
    store: S,
    registry: StepRegistry<K>,
    links: LinkConfig,
}

impl<K: StepType, S: StepStore<K>> FormEngine<K, S> {
    pub fn new(registry: StepRegistry<K>, store: S) -> Self {
        Self { store,
               registry,
               links: LinkConfig::default() }
    }

    pub fn with_links(mut self, links: LinkConfig) -> Self {
        self.links = links;
        self
    }

    pub fn links(&self) -> &LinkConfig {
        &self.links
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &StepRegistry<K> {
        &self.registry
    }

    /// Crea una sesión nueva posicionada en el primer paso registrado.
    pub fn start(&mut self) -> Result<Session<K>, CoreFormError> {
        let first = self.registry.first_step()?;
        let session = self.store.create_session()?;
        self.store.set_current_step(session.id, Some(first))?;
        info!("session started id={} step={}", session.id, first.as_str());
        self.store.get_session(session.id)
    }

    /// Sesión a partir del token de un link (hash o id).
    pub fn resume(&self, token: &str) -> Result<Session<K>, CoreFormError> {
        self.store.find_session_by_token(token)
    }

    /// Abre `step` en la sesión: reutiliza su record si existe, si no lo crea
    /// vacío.
    pub fn open(&mut self, session_id: Uuid, step: K) -> Result<FormStep<'_, K, S>, CoreFormError> {
        self.registry.definition(step)?;
        let session = self.store.get_session(session_id)?;
        let record = match self.store.find_record(session_id, step)? {
            Some(existing) => existing,
            None => {
                debug!("open: creating record session={session_id} step={}", step.as_str());
                self.store.create_record(session_id, step, encode_data(&StepData::new())?)?
            }
        };
        let binding = SessionBinding::new(session, record)?;
        Ok(FormStep::new(binding, &self.registry, &mut self.store, &self.links))
    }

    /// Paso actual de la sesión; `None` si el wizard terminó.
    pub fn current(&mut self, session_id: Uuid) -> Result<Option<FormStep<'_, K, S>>, CoreFormError> {
        match self.store.get_session(session_id)?.current_step {
            Some(step) => self.open(session_id, step).map(Some),
            None => Ok(None),
        }
    }

    /// Valida, guarda y avanza. El record del paso se crea recién cuando los
    /// datos pasan la validación. El primer submit válido vuelve la sesión
    /// persistente (le asigna hash).
    pub fn submit(&mut self, session_id: Uuid, step: K, data: StepData) -> Result<SubmitOutcome<K>, CoreFormError> {
        self.store.get_session(session_id)?;
        let issues = match self.registry.form(step)?.validator() {
            Some(validator) => validator.validate(&ValidationContext::new(step.as_str(), &data)),
            None => Vec::new(),
        };
        if issues.iter().any(ValidationIssue::is_error) {
            debug!("submit rejected session={session_id} step={} issues={}",
                   step.as_str(),
                   issues.len());
            return Ok(SubmitOutcome::Invalid(issues));
        }
        let (next, warnings) = {
            let mut form = self.open(session_id, step)?;
            form.save_data(&data)?;
            (form.get_next_step()?, issues)
        };
        self.store.persist_session(session_id)?;
        self.store.set_current_step(session_id, next)?;
        match next {
            Some(next) => {
                info!("submit session={session_id} step={} -> {}", step.as_str(), next.as_str());
                Ok(SubmitOutcome::Advanced { next, warnings })
            }
            None => {
                info!("submit session={session_id} step={} completed wizard", step.as_str());
                Ok(SubmitOutcome::Completed { warnings })
            }
        }
    }

    /// Retrocede desde `step` al paso previo según el historial. `None` si no
    /// hay predecesor (el puntero no se mueve).
    pub fn back(&mut self, session_id: Uuid, step: K) -> Result<Option<K>, CoreFormError> {
        self.store.get_session(session_id)?;
        let previous = SequenceResolver::new(&self.registry).resolve_previous(&self.store, session_id, step)?;
        if let Some(prev) = previous {
            self.store.set_current_step(session_id, Some(prev))?;
            info!("back session={session_id} step={} -> {}", step.as_str(), prev.as_str());
        }
        Ok(previous)
    }
}
