//! Validación de datos de un step.
//!
//! Un `StepValidator` combina reglas por campo (`FieldRule`) y chequeos
//! libres sobre todo el formulario. Los issues con `Severity::Error` bloquean
//! el submit; los `Warning` sólo se informan.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::record::StepData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueTarget {
    Field(String),
    Step,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub target: IssueTarget,
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    pub fn field(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { target: IssueTarget::Field(name.into()),
               severity: Severity::Error,
               message: message.into() }
    }

    pub fn step(message: impl Into<String>) -> Self {
        Self { target: IssueTarget::Step,
               severity: Severity::Error,
               message: message.into() }
    }

    pub fn warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Vista de sólo lectura de los datos enviados.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    step: &'a str,
    data: &'a StepData,
}

impl<'a> ValidationContext<'a> {
    pub fn new(step: &'a str, data: &'a StepData) -> Self {
        Self { step, data }
    }

    pub fn step(&self) -> &str {
        self.step
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Valor como texto; `""` si falta o es null.
    pub fn text(&self, name: &str) -> String {
        match self.value(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn bool_value(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(Value::as_bool)
    }

    pub fn is_empty(&self, name: &str) -> bool {
        self.text(name).trim().is_empty()
    }
}

pub type FieldRule = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

pub type StepCheck = Box<dyn Fn(&ValidationContext<'_>) -> Vec<ValidationIssue> + Send + Sync>;

pub fn min_length(min: usize) -> FieldRule {
    Box::new(move |value: &str| {
        if value.chars().count() < min {
            Err(format!("Minimum length is {min}"))
        } else {
            Ok(())
        }
    })
}

pub fn max_length(max: usize) -> FieldRule {
    Box::new(move |value: &str| {
        if value.chars().count() > max {
            Err(format!("Maximum length is {max}"))
        } else {
            Ok(())
        }
    })
}

pub fn regex(pattern: &str) -> Result<FieldRule, regex::Error> {
    let re = Regex::new(pattern)?;
    Ok(Box::new(move |value: &str| {
        if re.is_match(value) {
            Ok(())
        } else {
            Err(format!("Value must match pattern: {}", re.as_str()))
        }
    }))
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static email pattern")
});

pub fn email() -> FieldRule {
    Box::new(|value: &str| {
        if EMAIL_RE.is_match(value) {
            Ok(())
        } else {
            Err("Enter a valid email address".to_string())
        }
    })
}

/// Validador de un step.
#[derive(Default)]
pub struct StepValidator {
    required: Vec<(String, String)>,
    rules: Vec<(String, FieldRule)>,
    checks: Vec<StepCheck>,
}

impl StepValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// El campo debe venir con un valor no vacío.
    pub fn require(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.required.push((field.into(), message.into()));
        self
    }

    /// Regla sobre el texto del campo. No se evalúa si el campo está vacío.
    pub fn rule(mut self, field: impl Into<String>, rule: FieldRule) -> Self {
        self.rules.push((field.into(), rule));
        self
    }

    pub fn check(mut self, f: impl Fn(&ValidationContext<'_>) -> Vec<ValidationIssue> + Send + Sync + 'static) -> Self {
        self.checks.push(Box::new(f));
        self
    }

    pub fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (field, message) in &self.required {
            if ctx.is_empty(field) {
                issues.push(ValidationIssue::field(field.clone(), message.clone()));
            }
        }
        for (field, rule) in &self.rules {
            if ctx.is_empty(field) {
                continue;
            }
            if let Err(message) = rule(&ctx.text(field)) {
                issues.push(ValidationIssue::field(field.clone(), message));
            }
        }
        for check in &self.checks {
            issues.extend(check(ctx));
        }
        issues
    }
}

impl std::fmt::Debug for StepValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepValidator")
         .field("required", &self.required)
         .field("rules", &self.rules.len())
         .field("checks", &self.checks.len())
         .finish()
    }
}
