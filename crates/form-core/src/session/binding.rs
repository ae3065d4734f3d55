use super::{LinkConfig, Session};
use crate::errors::CoreFormError;
use crate::record::StepRecord;
use crate::step::StepType;

/// Par (sesión, record) verificado: el record pertenece a la sesión.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBinding<K: StepType> {
    session: Session<K>,
    record: StepRecord<K>,
}

impl<K: StepType> SessionBinding<K> {
    pub fn new(session: Session<K>, record: StepRecord<K>) -> Result<Self, CoreFormError> {
        if record.session_id != session.id {
            return Err(CoreFormError::SessionMismatch { record: record.id,
                                                        session: session.id });
        }
        Ok(Self { session, record })
    }

    pub fn session(&self) -> &Session<K> {
        &self.session
    }

    pub fn record(&self) -> &StepRecord<K> {
        &self.record
    }

    pub(crate) fn replace_record(&mut self, record: StepRecord<K>) {
        self.record = record;
    }

    /// `true` sii la variante del record es la apuntada por la sesión.
    pub fn is_current_step(&self) -> bool {
        self.session.current_step == Some(self.record.step_type)
    }

    pub fn link(&self, config: &LinkConfig) -> String {
        config.build(&self.session, self.record.step_type)
    }
}
