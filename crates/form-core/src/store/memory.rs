use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use log::debug;
use uuid::Uuid;

use super::StepStore;
use crate::errors::CoreFormError;
use crate::hashing::new_session_hash;
use crate::record::StepRecord;
use crate::session::Session;
use crate::step::StepType;

/// Backend en memoria. Referencia de comportamiento para el backend Postgres.
///
/// Los timestamps de modificación son estrictamente crecientes dentro del
/// store, así el orden "más reciente primero" no depende de la resolución
/// del reloj.
#[derive(Debug)]
pub struct InMemoryStepStore<K: StepType> {
    pub(super) sessions: HashMap<Uuid, Session<K>>,
    pub(super) records: Vec<StepRecord<K>>,
    pub(super) next_id: i64,
    pub(super) last_ts: Option<DateTime<Utc>>,
}

impl<K: StepType> Default for InMemoryStepStore<K> {
    fn default() -> Self {
        Self { sessions: HashMap::new(),
               records: Vec::new(),
               next_id: 1,
               last_ts: None }
    }
}

impl<K: StepType> InMemoryStepStore<K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_ts {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_ts = Some(ts);
        ts
    }

    fn session_mut(&mut self, id: Uuid) -> Result<&mut Session<K>, CoreFormError> {
        self.sessions.get_mut(&id).ok_or(CoreFormError::SessionNotFound(id))
    }
}

impl<K: StepType> StepStore<K> for InMemoryStepStore<K> {
    fn create_session(&mut self) -> Result<Session<K>, CoreFormError> {
        let ts = self.tick();
        let session = Session::new(Uuid::new_v4(), ts);
        self.sessions.insert(session.id, session.clone());
        debug!("create_session id={}", session.id);
        Ok(session)
    }

    fn get_session(&self, id: Uuid) -> Result<Session<K>, CoreFormError> {
        self.sessions.get(&id).cloned().ok_or(CoreFormError::SessionNotFound(id))
    }

    fn find_session_by_hash(&self, hash: &str) -> Result<Option<Session<K>>, CoreFormError> {
        Ok(self.sessions
               .values()
               .find(|s| s.hash.as_deref() == Some(hash))
               .cloned())
    }

    fn set_current_step(&mut self, session_id: Uuid, step: Option<K>) -> Result<(), CoreFormError> {
        self.session_mut(session_id)?.current_step = step;
        Ok(())
    }

    fn persist_session(&mut self, session_id: Uuid) -> Result<Session<K>, CoreFormError> {
        let session = self.session_mut(session_id)?;
        if session.hash.is_none() {
            session.hash = Some(new_session_hash(session_id));
            debug!("persist_session id={session_id}");
        }
        Ok(session.clone())
    }

    fn create_record(&mut self, session_id: Uuid, step_type: K, blob: String) -> Result<StepRecord<K>, CoreFormError> {
        if !self.sessions.contains_key(&session_id) {
            return Err(CoreFormError::SessionNotFound(session_id));
        }
        let modified_at = self.tick();
        let record = StepRecord { id: self.next_id,
                                  session_id,
                                  step_type,
                                  data: blob,
                                  modified_at };
        self.next_id += 1;
        self.records.push(record.clone());
        debug!("create_record id={} session={session_id} step={}", record.id, step_type.as_str());
        Ok(record)
    }

    fn get_record(&self, id: i64) -> Result<StepRecord<K>, CoreFormError> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(CoreFormError::RecordNotFound(id))
    }

    fn update_record_data(&mut self, id: i64, blob: String) -> Result<StepRecord<K>, CoreFormError> {
        let ts = self.tick();
        let record = self.records
                         .iter_mut()
                         .find(|r| r.id == id)
                         .ok_or(CoreFormError::RecordNotFound(id))?;
        record.data = blob;
        record.modified_at = ts;
        Ok(record.clone())
    }

    fn find_record(&self, session_id: Uuid, step_type: K) -> Result<Option<StepRecord<K>>, CoreFormError> {
        Ok(self.list_records(session_id)?
               .into_iter()
               .find(|r| r.step_type == step_type))
    }

    fn list_records(&self, session_id: Uuid) -> Result<Vec<StepRecord<K>>, CoreFormError> {
        let mut records: Vec<StepRecord<K>> = self.records
                                                  .iter()
                                                  .filter(|r| r.session_id == session_id)
                                                  .cloned()
                                                  .collect();
        records.sort_by(|a, b| b.modified_at.cmp(&a.modified_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::step_types! {
        enum Wiz {
            A => "a",
            B => "b",
        }
    }

    #[test]
    fn records_list_most_recently_modified_first() {
        let mut store = InMemoryStepStore::<Wiz>::new();
        let session = store.create_session().expect("session");
        let a = store.create_record(session.id, Wiz::A, "{}".into()).expect("a");
        let b = store.create_record(session.id, Wiz::B, "{}".into()).expect("b");
        let ids: Vec<i64> = store.list_records(session.id).expect("list").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);

        let a2 = store.update_record_data(a.id, r#"{"x":1}"#.into()).expect("update");
        assert!(a2.modified_at > b.modified_at);
        let ids: Vec<i64> = store.list_records(session.id).expect("list").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn persist_session_assigns_hash_once() {
        let mut store = InMemoryStepStore::<Wiz>::new();
        let session = store.create_session().expect("session");
        assert!(!session.is_persistent());
        let first = store.persist_session(session.id).expect("persist");
        let second = store.persist_session(session.id).expect("persist again");
        assert!(first.is_persistent());
        assert_eq!(first.hash, second.hash);
    }

    #[test]
    fn token_lookup_respects_persistence() {
        let mut store = InMemoryStepStore::<Wiz>::new();
        let session = store.create_session().expect("session");
        let by_id = store.find_session_by_token(&session.id.to_string()).expect("by id");
        assert_eq!(by_id.id, session.id);

        let persisted = store.persist_session(session.id).expect("persist");
        let hash = persisted.hash.clone().expect("hash");
        assert_eq!(store.find_session_by_token(&hash).expect("by hash").id, session.id);
        assert!(matches!(store.find_session_by_token(&session.id.to_string()),
                         Err(CoreFormError::InvalidToken(_))));
        assert!(matches!(store.find_session_by_token("nope"), Err(CoreFormError::InvalidToken(_))));
    }

    #[test]
    fn missing_entities_are_reported() {
        let mut store = InMemoryStepStore::<Wiz>::new();
        let ghost = Uuid::new_v4();
        assert_eq!(store.create_record(ghost, Wiz::A, "{}".into()), Err(CoreFormError::SessionNotFound(ghost)));
        assert_eq!(store.get_record(9), Err(CoreFormError::RecordNotFound(9)));
        assert_eq!(store.set_current_step(ghost, None), Err(CoreFormError::SessionNotFound(ghost)));
    }
}
