use crate::errors::{ConfigurationError, CoreFormError};
use crate::record::{encode_data, StepData, StepRecord};
use crate::resolver::SequenceResolver;
use crate::session::{LinkConfig, Session, SessionBinding};
use crate::step::{ExtraAction, Field, StepRegistry, StepType, StepValidator, ValidationContext, ValidationIssue};
use crate::store::StepStore;

/// Un record de step ligado a su sesión, con acceso al registry y al store.
///
/// Expone al controlador de formulario los campos, el validador, la
/// persistencia de datos y la navegación.
pub struct FormStep<'a, K: StepType, S: StepStore<K>> {
    binding: SessionBinding<K>,
    registry: &'a StepRegistry<K>,
    store: &'a mut S,
    links: &'a LinkConfig,
}

impl<'a, K: StepType, S: StepStore<K>> FormStep<'a, K, S> {
    pub fn new(binding: SessionBinding<K>,
               registry: &'a StepRegistry<K>,
               store: &'a mut S,
               links: &'a LinkConfig)
               -> Self {
        Self { binding,
               registry,
               store,
               links }
    }

    pub fn step_type(&self) -> K {
        self.binding.record().step_type
    }

    pub fn record(&self) -> &StepRecord<K> {
        self.binding.record()
    }

    pub fn session(&self) -> &Session<K> {
        self.binding.session()
    }

    fn resolver(&self) -> SequenceResolver<'a, K> {
        SequenceResolver::new(self.registry)
    }

    pub fn get_fields(&self) -> Result<Vec<Field>, CoreFormError> {
        let step = self.step_type();
        self.registry
            .form(step)?
            .fields()
            .ok_or_else(|| ConfigurationError::FieldsNotImplemented { step: step.as_str().to_string() }.into())
    }

    pub fn get_extra_actions(&self) -> Result<Vec<ExtraAction>, CoreFormError> {
        Ok(self.registry.form(self.step_type())?.extra_actions())
    }

    pub fn get_validator(&self) -> Result<Option<StepValidator>, CoreFormError> {
        Ok(self.registry.form(self.step_type())?.validator())
    }

    pub fn get_title(&self) -> Result<&str, CoreFormError> {
        Ok(self.registry.definition(self.step_type())?.title.as_str())
    }

    pub fn link(&self) -> String {
        self.binding.link(self.links)
    }

    pub fn load_data(&self) -> Result<StepData, CoreFormError> {
        self.binding.record().load_data()
    }

    /// Único camino de escritura del estado del step. Actualiza
    /// `modified_at`.
    pub fn save_data(&mut self, data: &StepData) -> Result<(), CoreFormError> {
        let blob = encode_data(data)?;
        let updated = self.store.update_record_data(self.record().id, blob)?;
        self.binding.replace_record(updated);
        Ok(())
    }

    /// Issues del validador del step; vacío si no tiene validador.
    pub fn validate(&self, data: &StepData) -> Result<Vec<ValidationIssue>, CoreFormError> {
        let issues = match self.get_validator()? {
            Some(validator) => validator.validate(&ValidationContext::new(self.step_type().as_str(), data)),
            None => Vec::new(),
        };
        Ok(issues)
    }

    pub fn get_next_step(&self) -> Result<Option<K>, CoreFormError> {
        self.resolver().resolve_next(self.step_type())
    }

    pub fn get_next_step_from_database(&self) -> Result<Option<StepRecord<K>>, CoreFormError> {
        self.resolver().resolve_next_persisted(&*self.store, self.record())
    }

    pub fn get_previous_step(&self) -> Result<Option<K>, CoreFormError> {
        let record = self.record();
        self.resolver().resolve_previous(&*self.store, record.session_id, record.step_type)
    }

    pub fn get_previous_step_from_database(&self) -> Result<Option<StepRecord<K>>, CoreFormError> {
        self.resolver().resolve_previous_persisted(&*self.store, self.record())
    }

    pub fn is_final_step(&self) -> Result<bool, CoreFormError> {
        Ok(self.registry.definition(self.step_type())?.is_final)
    }

    pub fn is_current_step(&self) -> bool {
        self.binding.is_current_step()
    }
}
