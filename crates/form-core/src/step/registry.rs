//! Registro de variantes: cada `StepType` apunta a su definición inmutable y
//! a su form. El primer paso registrado es el punto de entrada del wizard.

use std::collections::HashMap;

use super::{StepDefinition, StepForm, StepType};
use crate::errors::ConfigurationError;

struct RegistryEntry<K: StepType> {
    definition: StepDefinition<K>,
    form: Box<dyn StepForm>,
}

pub struct StepRegistry<K: StepType> {
    entries: Vec<RegistryEntry<K>>,
    index: HashMap<K, usize>,
}

impl<K: StepType> Default for StepRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StepType> StepRegistry<K> {
    pub fn new() -> Self {
        Self { entries: Vec::new(),
               index: HashMap::new() }
    }

    /// Registra una variante. Registrar dos veces la misma variante
    /// reemplaza la entrada previa conservando su posición.
    pub fn with(mut self, definition: StepDefinition<K>, form: impl StepForm + 'static) -> Self {
        self.register(definition, Box::new(form));
        self
    }

    pub fn register(&mut self, definition: StepDefinition<K>, form: Box<dyn StepForm>) {
        let key = definition.step_type;
        let entry = RegistryEntry { definition, form };
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, step: K) -> bool {
        self.index.contains_key(&step)
    }

    fn entry(&self, step: K) -> Result<&RegistryEntry<K>, ConfigurationError> {
        self.index
            .get(&step)
            .map(|&pos| &self.entries[pos])
            .ok_or_else(|| ConfigurationError::UnregisteredStep { step: step.as_str().to_string() })
    }

    pub fn definition(&self, step: K) -> Result<&StepDefinition<K>, ConfigurationError> {
        self.entry(step).map(|e| &e.definition)
    }

    pub fn form(&self, step: K) -> Result<&dyn StepForm, ConfigurationError> {
        self.entry(step).map(|e| e.form.as_ref())
    }

    /// Primer paso registrado.
    pub fn first_step(&self) -> Result<K, ConfigurationError> {
        self.entries
            .first()
            .map(|e| e.definition.step_type)
            .ok_or(ConfigurationError::EmptyRegistry)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &StepDefinition<K>> {
        self.entries.iter().map(|e| &e.definition)
    }

    /// Reporta, sin fallar, los problemas que la resolución encontraría:
    /// variantes sin registrar, pasos no finales sin siguientes y destinos no
    /// registrados.
    pub fn check(&self) -> Vec<ConfigurationError> {
        let mut problems = Vec::new();
        if self.entries.is_empty() {
            problems.push(ConfigurationError::EmptyRegistry);
        }
        for k in K::ALL {
            if !self.contains(*k) {
                problems.push(ConfigurationError::UnregisteredStep { step: k.as_str().to_string() });
            }
        }
        for def in self.definitions() {
            let targets = def.declared_targets();
            if !def.is_final && targets.is_empty() {
                problems.push(ConfigurationError::MissingNextSteps { step: def.step_type.as_str().to_string() });
            }
            for target in targets {
                if !self.contains(target) {
                    problems.push(ConfigurationError::UnregisteredTarget { step: def.step_type.as_str().to_string(),
                                                                           target: target.as_str().to_string() });
                }
            }
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::step_types! {
        enum Wiz {
            Start => "start",
            Middle => "middle",
            End => "end",
        }
    }

    struct Bare;
    impl StepForm for Bare {}

    #[test]
    fn first_registered_step_is_entry_point() {
        let registry = StepRegistry::new().with(StepDefinition::new(Wiz::Middle, "Middle").then(Wiz::End), Bare)
                                          .with(StepDefinition::new(Wiz::Start, "Start").then(Wiz::Middle), Bare);
        assert_eq!(registry.first_step(), Ok(Wiz::Middle));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let registry = StepRegistry::new().with(StepDefinition::new(Wiz::Start, "Old").then(Wiz::End), Bare)
                                          .with(StepDefinition::new(Wiz::End, "End").final_step(), Bare)
                                          .with(StepDefinition::new(Wiz::Start, "New").then(Wiz::End), Bare);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.definition(Wiz::Start).map(|d| d.title.as_str()), Ok("New"));
        assert_eq!(registry.first_step(), Ok(Wiz::Start));
    }

    #[test]
    fn check_reports_configuration_gaps() {
        let registry = StepRegistry::new().with(StepDefinition::new(Wiz::Start, "Start"), Bare)
                                          .with(StepDefinition::new(Wiz::Middle, "Middle").then(Wiz::End), Bare);
        let problems = registry.check();
        assert!(problems.contains(&ConfigurationError::UnregisteredStep { step: "end".into() }));
        assert!(problems.contains(&ConfigurationError::MissingNextSteps { step: "start".into() }));
        assert!(problems.contains(&ConfigurationError::UnregisteredTarget { step: "middle".into(),
                                                                            target: "end".into() }));
        assert!(StepRegistry::<Wiz>::new().first_step().is_err());
    }
}
