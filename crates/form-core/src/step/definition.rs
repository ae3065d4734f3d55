use super::StepType;

/// Siguientes pasos declarados por una variante.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextSteps<K> {
    /// Flujo lineal.
    Single(K),
    /// Candidatos ordenados. Sólo el primero se usa al resolver.
    Branch(Vec<K>),
}

/// Metadata estática e inmutable de una variante de step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition<K: StepType> {
    pub step_type: K,
    pub title: String,
    pub next_steps: Option<NextSteps<K>>,
    pub is_final: bool,
}

impl<K: StepType> StepDefinition<K> {
    pub fn new(step_type: K, title: impl Into<String>) -> Self {
        Self { step_type,
               title: title.into(),
               next_steps: None,
               is_final: false }
    }

    /// Declara un único siguiente paso.
    pub fn then(mut self, next: K) -> Self {
        self.next_steps = Some(NextSteps::Single(next));
        self
    }

    /// Declara una lista de candidatos.
    pub fn branch(mut self, candidates: impl IntoIterator<Item = K>) -> Self {
        self.next_steps = Some(NextSteps::Branch(candidates.into_iter().collect()));
        self
    }

    /// Marca la variante como terminal.
    pub fn final_step(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Todos los destinos declarados (para chequeos del registry).
    pub fn declared_targets(&self) -> Vec<K> {
        match &self.next_steps {
            Some(NextSteps::Single(k)) => vec![*k],
            Some(NextSteps::Branch(ks)) => ks.clone(),
            None => Vec::new(),
        }
    }
}
