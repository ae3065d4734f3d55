use form_adapters::SignupStep;
use form_core::{CoreFormError, FormEngine, StepData, StepStore, SubmitOutcome};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

/// Resultado del recorrido: la sesión usada y las líneas a mostrar.
#[derive(Debug, Clone)]
pub struct Walkthrough {
    pub session_id: Uuid,
    pub lines: Vec<String>,
}

/// Payloads del recorrido completo del wizard de alta, en orden.
pub fn signup_payloads() -> Vec<(SignupStep, Value)> {
    vec![(SignupStep::Account, json!({ "email": "ana@example.org", "password": "correct horse" })),
         (SignupStep::Profile, json!({ "display_name": "Ana", "bio": "Synthetic chemist" })),
         (SignupStep::Plan, json!({ "plan": "pro" })),
         (SignupStep::Payment, json!({ "card_number": "4111111111111111", "card_holder": "ANA" })),
         (SignupStep::Confirm, json!({ "accept_terms": true }))]
}

/// Recorre el wizard de punta a punta y vuelve un paso atrás desde el final.
pub fn run_walkthrough<S: StepStore<SignupStep>>(engine: &mut FormEngine<SignupStep, S>)
                                                 -> Result<Walkthrough, CoreFormError> {
    let mut out = Vec::new();
    let session = engine.start()?;
    out.push(format!("session {} started at {:?}", session.id, session.current_step));

    for (step, payload) in signup_payloads() {
        let data: StepData = payload.as_object().cloned().unwrap_or_default();
        match engine.submit(session.id, step, data)? {
            SubmitOutcome::Invalid(issues) => {
                out.push(format!("{step}: rejected with {} issue(s)", issues.len()));
                return Ok(Walkthrough { session_id: session.id, lines: out });
            }
            SubmitOutcome::Advanced { next, warnings } => {
                out.push(format!("{step} -> {next} ({} warning(s))", warnings.len()));
            }
            SubmitOutcome::Completed { .. } => out.push(format!("{step} -> completed")),
        }
    }

    let persisted = engine.store().get_session(session.id)?;
    info!("walkthrough finished session={}", persisted.id);
    if let Some(step) = engine.back(session.id, SignupStep::Confirm)? {
        out.push(format!("back from confirm -> {step}"));
        let form = engine.open(session.id, step)?;
        out.push(format!("resume at {}", form.link()));
        if let Some(prev) = form.get_previous_step()? {
            out.push(format!("{step} was reached from {prev}"));
        }
    }
    Ok(Walkthrough { session_id: session.id, lines: out })
}
