//! Snapshot serializable del store en memoria (para persistir en un archivo
//! JSON entre invocaciones de la CLI). Las variantes viajan como su tag.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::InMemoryStepStore;
use crate::errors::CoreFormError;
use crate::record::StepRecord;
use crate::session::Session;
use crate::step::StepType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub hash: Option<String>,
    pub current_step: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordSnapshot {
    pub id: i64,
    pub session_id: Uuid,
    pub step_type: String,
    pub data: String,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub sessions: Vec<SessionSnapshot>,
    pub records: Vec<RecordSnapshot>,
}

impl<K: StepType> InMemoryStepStore<K> {
    pub fn snapshot(&self) -> StoreSnapshot {
        let mut sessions: Vec<SessionSnapshot> =
            self.sessions
                .values()
                .map(|s| SessionSnapshot { id: s.id,
                                           hash: s.hash.clone(),
                                           current_step: s.current_step.map(|k| k.as_str().to_string()),
                                           created_at: s.created_at })
                .collect();
        sessions.sort_by_key(|s| s.created_at);
        let records = self.records
                          .iter()
                          .map(|r| RecordSnapshot { id: r.id,
                                                    session_id: r.session_id,
                                                    step_type: r.step_type.as_str().to_string(),
                                                    data: r.data.clone(),
                                                    modified_at: r.modified_at })
                          .collect();
        StoreSnapshot { sessions, records }
    }

    /// Reconstruye el store. Falla con `UnknownStepType` si el snapshot
    /// menciona variantes que este wizard no declara.
    pub fn restore(snapshot: StoreSnapshot) -> Result<Self, CoreFormError> {
        let mut sessions = HashMap::with_capacity(snapshot.sessions.len());
        let mut last_ts: Option<DateTime<Utc>> = None;
        for s in snapshot.sessions {
            let current_step = s.current_step.as_deref().map(K::parse).transpose()?;
            last_ts = last_ts.max(Some(s.created_at));
            sessions.insert(s.id,
                            Session { id: s.id,
                                      hash: s.hash,
                                      current_step,
                                      created_at: s.created_at });
        }
        let mut records = Vec::with_capacity(snapshot.records.len());
        for r in snapshot.records {
            last_ts = last_ts.max(Some(r.modified_at));
            records.push(StepRecord { id: r.id,
                                      session_id: r.session_id,
                                      step_type: K::parse(&r.step_type)?,
                                      data: r.data,
                                      modified_at: r.modified_at });
        }
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Ok(Self { sessions,
                  records,
                  next_id,
                  last_ts })
    }
}
