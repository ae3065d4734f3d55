//! Contrato de formulario de un step: lo que el render necesita para
//! dibujar la página. Aquí sólo hay descripciones; el render es externo.

use super::StepValidator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Password,
    Number,
    Date,
    Checkbox,
    Choice(Vec<String>),
}

/// Descripción de un campo del formulario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub help: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self { name: name.into(),
               label: label.into(),
               kind,
               required: false,
               help: None }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }
}

/// Botón adicional (p.ej. "guardar y salir") junto al submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraAction {
    pub name: String,
    pub label: String,
}

impl ExtraAction {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self { name: name.into(), label: label.into() }
    }
}

/// Form de una variante de step.
///
/// `fields` devuelve `None` cuando la variante no lo implementa; el caller lo
/// convierte en `ConfigurationError::FieldsNotImplemented`.
pub trait StepForm: Send + Sync {
    fn fields(&self) -> Option<Vec<Field>> {
        None
    }

    fn extra_actions(&self) -> Vec<ExtraAction> {
        Vec::new()
    }

    /// `None` = el step no valida nada (estado legítimo, no error).
    fn validator(&self) -> Option<StepValidator> {
        None
    }
}
