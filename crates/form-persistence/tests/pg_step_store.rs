//! Paridad del backend Postgres con el store en memoria (requiere
//! DATABASE_URL; sin él los tests se omiten).


use form_adapters::{signup_registry, SignupStep};
use form_core::{CoreFormError, FormEngine, InMemoryStepStore, StepData, StepStore, SubmitOutcome};
use form_persistence::{PgStepStore, PoolProvider};
use serde_json::json;
use test_support::with_pool;
use uuid::Uuid;

fn pg_store() -> Option<PgStepStore<PoolProvider>> {
    with_pool(|pool| PgStepStore::new(PoolProvider { pool: pool.clone() }))
}

fn listed_ids(store: &PgStepStore<PoolProvider>, session_id: Uuid) -> Vec<i64> {
    StepStore::<SignupStep>::list_records(store, session_id).expect("list")
                                                            .iter()
                                                            .map(|r| r.id)
                                                            .collect()
}

fn data(v: serde_json::Value) -> StepData {
    v.as_object().cloned().expect("object")
}

#[test]
fn session_lifecycle_round_trips() {
    let Some(mut store) = pg_store() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let session: form_core::Session<SignupStep> = store.create_session().expect("create");
    assert!(!session.is_persistent());
    store.set_current_step(session.id, Some(SignupStep::Profile)).expect("pointer");
    let persisted: form_core::Session<SignupStep> = store.persist_session(session.id).expect("persist");
    let again: form_core::Session<SignupStep> = store.persist_session(session.id).expect("persist again");
    assert_eq!(persisted.hash, again.hash);
    assert_eq!(persisted.current_step, Some(SignupStep::Profile));

    let hash = persisted.hash.clone().expect("hash");
    let by_hash: Option<form_core::Session<SignupStep>> = store.find_session_by_hash(&hash).expect("by hash");
    assert_eq!(by_hash.map(|s| s.id), Some(session.id));
    let by_token: form_core::Session<SignupStep> = store.find_session_by_token(&hash).expect("by token");
    assert_eq!(by_token.id, session.id);
}

#[test]
fn records_are_listed_most_recent_first() {
    let Some(mut store) = pg_store() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let session = StepStore::<SignupStep>::create_session(&mut store).expect("create");
    let a = store.create_record(session.id, SignupStep::Account, "{}".into()).expect("a");
    let b = store.create_record(session.id, SignupStep::Profile, "{}".into()).expect("b");
    assert_eq!(listed_ids(&store, session.id), vec![b.id, a.id]);

    let blob = r#"{"email":"ana@example.org"}"#.to_string();
    let a2 = StepStore::<SignupStep>::update_record_data(&mut store, a.id, blob.clone()).expect("update");
    assert_eq!(a2.data, blob);
    assert_eq!(listed_ids(&store, session.id), vec![a.id, b.id]);
    assert_eq!(store.find_record(session.id, SignupStep::Account).expect("find").map(|r| r.id), Some(a.id));
}

#[test]
fn missing_rows_map_to_core_errors() {
    let Some(mut store) = pg_store() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let ghost = Uuid::new_v4();
    assert_eq!(StepStore::<SignupStep>::get_session(&store, ghost), Err(CoreFormError::SessionNotFound(ghost)));
    assert_eq!(StepStore::<SignupStep>::get_record(&store, i64::MAX), Err(CoreFormError::RecordNotFound(i64::MAX)));
    assert_eq!(store.create_record(ghost, SignupStep::Account, "{}".into()),
               Err(CoreFormError::SessionNotFound(ghost)));
}

#[test]
fn engine_walkthrough_matches_in_memory_backend() {
    let Some(store) = pg_store() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let account = data(json!({ "email": "ana@example.org", "password": "correct horse" }));

    let mut pg = FormEngine::new(signup_registry(), store);
    let mut mem = FormEngine::new(signup_registry(), InMemoryStepStore::new());
    let pg_session = pg.start().expect("pg start");
    let mem_session = mem.start().expect("mem start");

    let pg_out = pg.submit(pg_session.id, SignupStep::Account, account.clone()).expect("pg submit");
    let mem_out = mem.submit(mem_session.id, SignupStep::Account, account).expect("mem submit");
    assert_eq!(pg_out, mem_out);
    assert!(matches!(pg_out, SubmitOutcome::Advanced { next: SignupStep::Profile, .. }));

    assert_eq!(pg.back(pg_session.id, SignupStep::Profile).expect("pg back"),
               mem.back(mem_session.id, SignupStep::Profile).expect("mem back"));
}
