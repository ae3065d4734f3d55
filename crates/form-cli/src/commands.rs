//! Ejecución de los subcomandos sobre un `FormEngine` genérico en el store.
//! La salida se acumula en un `Report` para que el binario decida cómo
//! imprimirla.

use anyhow::Result;
use form_adapters::SignupStep;
use form_core::record::decode_data;
use form_core::step::{IssueTarget, Severity};
use form_core::{ConfigurationError, CoreFormError, FormEngine, Session, StepStore, StepType, SubmitOutcome,
                ValidationIssue};
use tracing::info;
use uuid::Uuid;

use crate::cli::Command;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub lines: Vec<String>,
    /// El submit fue rechazado por validación.
    pub rejected: bool,
}

impl Report {
    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }
}

pub fn execute<S: StepStore<SignupStep>>(engine: &mut FormEngine<SignupStep, S>, command: &Command) -> Result<Report> {
    let mut report = Report::default();
    match command {
        Command::Start => {
            let session = engine.start()?;
            info!("cli start session={}", session.id);
            describe_session(engine, &session, &mut report)?;
        }
        Command::Show(args) => {
            let session = session_for(engine, &args.session)?;
            describe_session(engine, &session, &mut report)?;
            let records = engine.store().list_records(session.id)?;
            report.line(format!("records: {}", records.len()));
            for record in records {
                report.line(format!("  {} #{} {} {}",
                                    record.step_type,
                                    record.id,
                                    record.modified_at.to_rfc3339(),
                                    record.data));
            }
        }
        Command::Submit(args) => {
            let session = session_for(engine, &args.target.session)?;
            let data = decode_data(&args.data)?;
            match engine.submit(session.id, args.target.step, data)? {
                SubmitOutcome::Invalid(issues) => {
                    report.rejected = true;
                    report.line(format!("rejected: {}", args.target.step));
                    issues.iter().for_each(|i| report.line(format_issue(i)));
                }
                SubmitOutcome::Advanced { next, warnings } => {
                    warnings.iter().for_each(|i| report.line(format_issue(i)));
                    let session = engine.store().get_session(session.id)?;
                    report.line(format!("next: {next}"));
                    report.line(format!("link: {}", engine.links().build(&session, next)));
                }
                SubmitOutcome::Completed { warnings } => {
                    warnings.iter().for_each(|i| report.line(format_issue(i)));
                    report.line("completed");
                }
            }
        }
        Command::Back(args) => {
            let session = session_for(engine, &args.session)?;
            match engine.back(session.id, args.step)? {
                Some(previous) => {
                    report.line(format!("back: {previous}"));
                    report.line(format!("link: {}", engine.links().build(&session, previous)));
                }
                None => report.line(format!("no previous step before {}", args.step)),
            }
        }
        Command::Link(args) => {
            let session = session_for(engine, &args.session)?;
            engine.registry().definition(args.step)?;
            report.line(engine.links().build(&session, args.step));
        }
        Command::Resume(args) => {
            let session = engine.resume(&args.token)?;
            describe_session(engine, &session, &mut report)?;
        }
    }
    Ok(report)
}

/// `--session` del operador: el id sigue valiendo aunque la sesión ya tenga
/// hash. Los links públicos (`resume --token`) sólo aceptan el hash.
fn session_for<S: StepStore<SignupStep>>(engine: &FormEngine<SignupStep, S>,
                                         raw: &str)
                                         -> Result<Session<SignupStep>, CoreFormError> {
    match Uuid::parse_str(raw) {
        Ok(id) => engine.store().get_session(id),
        Err(_) => engine.resume(raw),
    }
}

fn describe_session<S: StepStore<SignupStep>>(engine: &FormEngine<SignupStep, S>,
                                              session: &Session<SignupStep>,
                                              report: &mut Report)
                                              -> Result<()> {
    report.line(format!("session: {}", session.id));
    report.line(format!("token: {}", session.token()));
    let Some(step) = session.current_step else {
        report.line("current: (completed)");
        return Ok(());
    };
    let definition = engine.registry().definition(step)?;
    report.line(format!("current: {} ({})", step.as_str(), definition.title));
    report.line(format!("link: {}", engine.links().build(session, step)));
    let form = engine.registry().form(step)?;
    let fields = form.fields()
                     .ok_or_else(|| ConfigurationError::FieldsNotImplemented { step: step.as_str().to_string() })
                     .map_err(CoreFormError::from)?;
    for field in fields {
        let marker = if field.required { "*" } else { "" };
        report.line(format!("  {}{marker} {:?} {}", field.name, field.kind, field.label));
    }
    for action in form.extra_actions() {
        report.line(format!("  [{}] {}", action.name, action.label));
    }
    Ok(())
}

fn format_issue(issue: &ValidationIssue) -> String {
    let level = match issue.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    match &issue.target {
        IssueTarget::Field(name) => format!("{level}: {name}: {}", issue.message),
        IssueTarget::Step => format!("{level}: {}", issue.message),
    }
}

/// Código de salida: 3 datos JSON inválidos, 4 sesión o token desconocido,
/// 5 cualquier otro fallo (configuración, storage, archivo de estado).
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CoreFormError>() {
        Some(CoreFormError::Deserialization(_)) => 3,
        Some(CoreFormError::SessionNotFound(_) | CoreFormError::RecordNotFound(_) | CoreFormError::InvalidToken(_)) => 4,
        _ => 5,
    }
}
