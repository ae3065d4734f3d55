use form_adapters::{signup_registry, SignupStep};
use form_core::step::IssueTarget;
use form_core::{FormEngine, InMemoryStepStore, StepData, StepStore, SubmitOutcome};
use serde_json::{json, Value};

fn engine() -> FormEngine<SignupStep, InMemoryStepStore<SignupStep>> {
    FormEngine::new(signup_registry(), InMemoryStepStore::new())
}

fn data(v: Value) -> StepData {
    v.as_object().cloned().expect("object")
}

#[test]
fn registry_is_complete() {
    let registry = signup_registry();
    assert!(registry.check().is_empty());
    assert_eq!(registry.first_step(), Ok(SignupStep::Account));
}

#[test]
fn account_rejects_bad_email_and_short_password() {
    let mut engine = engine();
    let session = engine.start().expect("start");
    let outcome = engine.submit(session.id,
                                SignupStep::Account,
                                data(json!({ "email": "not-an-email", "password": "short" })))
                        .expect("submit");
    let SubmitOutcome::Invalid(issues) = outcome else {
        panic!("expected invalid outcome, got {outcome:?}");
    };
    let fields: Vec<_> = issues.iter().map(|i| i.target.clone()).collect();
    assert_eq!(fields,
               vec![IssueTarget::Field("email".into()), IssueTarget::Field("password".into())]);
}

#[test]
fn plan_always_continues_to_payment() {
    let mut engine = engine();
    let session = engine.start().expect("start");
    engine.submit(session.id,
                  SignupStep::Account,
                  data(json!({ "email": "ana@example.org", "password": "correct horse" })))
          .expect("account");
    let outcome = engine.submit(session.id, SignupStep::Profile, data(json!({ "display_name": "Ana" })))
                        .expect("profile");
    match outcome {
        SubmitOutcome::Advanced { next, warnings } => {
            assert_eq!(next, SignupStep::Plan);
            assert_eq!(warnings.len(), 1);
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    let outcome = engine.submit(session.id, SignupStep::Plan, data(json!({ "plan": "free" }))).expect("plan");
    assert_eq!(outcome, SubmitOutcome::Advanced { next: SignupStep::Payment, warnings: vec![] });
}

#[test]
fn full_signup_completes_and_walks_back() {
    let mut engine = engine();
    let session = engine.start().expect("start");
    let steps = [(SignupStep::Account, json!({ "email": "ana@example.org", "password": "correct horse" })),
                 (SignupStep::Profile, json!({ "display_name": "Ana", "bio": "Chemist" })),
                 (SignupStep::Plan, json!({ "plan": "pro" })),
                 (SignupStep::Payment, json!({ "card_number": "4111111111111111" }))];
    for (step, payload) in steps {
        let outcome = engine.submit(session.id, step, data(payload)).expect("submit");
        assert!(matches!(outcome, SubmitOutcome::Advanced { .. }), "{step} -> {outcome:?}");
    }

    let refused = engine.submit(session.id, SignupStep::Confirm, data(json!({ "accept_terms": false })))
                        .expect("confirm");
    assert!(matches!(refused, SubmitOutcome::Invalid(_)));
    let outcome = engine.submit(session.id, SignupStep::Confirm, data(json!({ "accept_terms": true })))
                        .expect("confirm");
    assert_eq!(outcome, SubmitOutcome::Completed { warnings: vec![] });

    assert_eq!(engine.back(session.id, SignupStep::Confirm).expect("back"), Some(SignupStep::Payment));
    assert_eq!(engine.back(session.id, SignupStep::Payment).expect("back"), Some(SignupStep::Plan));
    assert_eq!(engine.store().list_records(session.id).expect("records").len(), 5);
}

#[test]
fn payment_card_number_must_be_digits_when_present() {
    let mut engine = engine();
    let session = engine.start().expect("start");
    let outcome = engine.submit(session.id, SignupStep::Payment, data(json!({ "card_number": "4111-1111" })))
                        .expect("payment");
    assert!(matches!(outcome, SubmitOutcome::Invalid(ref issues) if issues.len() == 1));
    let outcome = engine.submit(session.id, SignupStep::Payment, StepData::new()).expect("payment");
    assert_eq!(outcome, SubmitOutcome::Advanced { next: SignupStep::Confirm, warnings: vec![] });
}
