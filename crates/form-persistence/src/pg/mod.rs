//! Implementación Postgres (Diesel) del `StepStore` del core.
//!
//! - Paridad 1:1 con `InMemoryStepStore`: mismo orden de records (más
//!   reciente primero, desempate por id descendente), mismos errores de
//!   "no encontrado".
//! - Las variantes de step se guardan como su tag (`StepType::as_str`); un
//!   tag desconocido al leer es `CoreFormError::UnknownStepType`.
//! - Errores transitorios (pool, serialización, desconexiones) se reintentan
//!   con backoff corto.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use log::{debug, warn};
use uuid::Uuid;

use form_core::hashing::new_session_hash;
use form_core::{CoreFormError, Session, StepRecord, StepStore, StepType};

use crate::error::PersistenceError;
use crate::migrations::run_pending_migrations;
use crate::schema::{form_sessions, step_records};

/// Pool r2d2 de conexiones Postgres. Al construirlo con `build_pool` se
/// corren las migraciones pendientes una sola vez.
pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub type PgPooledConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

/// Proveedor abstracto de conexiones (pool real o fake en tests).
pub trait ConnectionProvider: Send + Sync + 'static {
    fn connection(&self) -> Result<PgPooledConnection, PersistenceError>;
}

/// `ConnectionProvider` respaldado por un `PgPool`.
pub struct PoolProvider {
    pub pool: PgPool,
}

impl ConnectionProvider for PoolProvider {
    fn connection(&self) -> Result<PgPooledConnection, PersistenceError> {
        self.pool
            .get()
            .map_err(|e| PersistenceError::TransientIo(format!("pool error: {e}")))
    }
}

/// Fila de `form_sessions`.
#[derive(Queryable, Debug)]
pub struct SessionRow {
    pub id: Uuid,
    pub hash: Option<String>,
    pub current_step: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = form_sessions)]
pub struct NewSessionRow<'a> {
    pub id: &'a Uuid,
    pub created_at: DateTime<Utc>,
}

/// Fila de `step_records`.
#[derive(Queryable, Debug)]
pub struct RecordRow {
    pub id: i64,
    pub session_id: Uuid,
    pub step_type: String,
    pub data: String,
    pub modified_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = step_records)]
pub struct NewRecordRow<'a> {
    pub session_id: &'a Uuid,
    pub step_type: &'a str,
    pub data: &'a str,
    pub modified_at: DateTime<Utc>,
}

/// Determina si un error es transitorio (recomendado reintentar).
fn is_retryable(e: &PersistenceError) -> bool {
    match e {
        PersistenceError::SerializationConflict => true,
        PersistenceError::TransientIo(_) => true,
        // best-effort por texto, sin acoplar a SQLSTATE
        PersistenceError::Unknown(msg) => {
            let m = msg.to_lowercase();
            m.contains("deadlock detected")
            || m.contains("could not serialize access due to concurrent update")
            || m.contains("terminating connection due to administrator command")
            || m.contains("connection closed")
            || m.contains("connection refused")
            || m.contains("timeout")
        }
        _ => false,
    }
}

/// Retry con backoff lineal (15ms, 30ms, 45ms), hasta 3 reintentos.
fn with_retry<F, T>(mut f: F) -> Result<T, PersistenceError>
    where F: FnMut() -> Result<T, PersistenceError>
{
    let mut attempts = 0;
    loop {
        match f() {
            Err(e) if is_retryable(&e) && attempts < 3 => {
                let delay_ms = 15 * ((attempts + 1) as u64);
                warn!("retryable error (attempt {}): {:?} -> sleeping {}ms",
                      attempts + 1,
                      e,
                      delay_ms);
                std::thread::sleep(std::time::Duration::from_millis(delay_ms));
                attempts += 1;
            }
            r => return r,
        }
    }
}

fn session_from_row<K: StepType>(row: SessionRow) -> Result<Session<K>, CoreFormError> {
    let current_step = row.current_step.as_deref().map(K::parse).transpose()?;
    Ok(Session { id: row.id,
                 hash: row.hash,
                 current_step,
                 created_at: row.created_at })
}

fn record_from_row<K: StepType>(row: RecordRow) -> Result<StepRecord<K>, CoreFormError> {
    Ok(StepRecord { id: row.id,
                    session_id: row.session_id,
                    step_type: K::parse(&row.step_type)?,
                    data: row.data,
                    modified_at: row.modified_at })
}

/// `StepStore` sobre Postgres.
pub struct PgStepStore<P: ConnectionProvider> {
    pub provider: P,
}

impl<P: ConnectionProvider> PgStepStore<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn load_session(&self, id: Uuid) -> Result<Option<SessionRow>, PersistenceError> {
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            form_sessions::table.find(id)
                                .first::<SessionRow>(&mut conn)
                                .optional()
                                .map_err(PersistenceError::from)
        })
    }

    fn load_records(&self, session_id: Uuid) -> Result<Vec<RecordRow>, PersistenceError> {
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            step_records::table.filter(step_records::session_id.eq(session_id))
                               .order((step_records::modified_at.desc(), step_records::id.desc()))
                               .load::<RecordRow>(&mut conn)
                               .map_err(PersistenceError::from)
        })
    }
}

impl<K: StepType, P: ConnectionProvider> StepStore<K> for PgStepStore<P> {
    fn create_session(&mut self) -> Result<Session<K>, CoreFormError> {
        let id = Uuid::new_v4();
        let row: SessionRow = with_retry(|| {
            let mut conn = self.provider.connection()?;
            diesel::insert_into(form_sessions::table).values(NewSessionRow { id: &id,
                                                                             created_at: Utc::now() })
                                                     .get_result(&mut conn)
                                                     .map_err(PersistenceError::from)
        })?;
        debug!("create_session id={id}");
        session_from_row(row)
    }

    fn get_session(&self, id: Uuid) -> Result<Session<K>, CoreFormError> {
        match self.load_session(id)? {
            Some(row) => session_from_row(row),
            None => Err(CoreFormError::SessionNotFound(id)),
        }
    }

    fn find_session_by_hash(&self, hash: &str) -> Result<Option<Session<K>>, CoreFormError> {
        let row: Option<SessionRow> = with_retry(|| {
            let mut conn = self.provider.connection()?;
            form_sessions::table.filter(form_sessions::hash.eq(hash))
                                .first(&mut conn)
                                .optional()
                                .map_err(PersistenceError::from)
        })?;
        row.map(session_from_row).transpose()
    }

    fn set_current_step(&mut self, session_id: Uuid, step: Option<K>) -> Result<(), CoreFormError> {
        let tag = step.map(|k| k.as_str());
        let updated = with_retry(|| {
            let mut conn = self.provider.connection()?;
            diesel::update(form_sessions::table.find(session_id)).set(form_sessions::current_step.eq(tag))
                                                                 .execute(&mut conn)
                                                                 .map_err(PersistenceError::from)
        })?;
        if updated == 0 {
            return Err(CoreFormError::SessionNotFound(session_id));
        }
        debug!("set_current_step session={session_id} step={}", tag.unwrap_or("-"));
        Ok(())
    }

    fn persist_session(&mut self, session_id: Uuid) -> Result<Session<K>, CoreFormError> {
        let hash = new_session_hash(session_id);
        // Sólo asigna si aún no hay hash; la lectura posterior devuelve el
        // hash vigente en ambos casos.
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            diesel::update(form_sessions::table.find(session_id).filter(form_sessions::hash.is_null()))
                .set(form_sessions::hash.eq(&hash))
                .execute(&mut conn)
                .map_err(PersistenceError::from)
        })?;
        self.get_session(session_id)
    }

    fn create_record(&mut self, session_id: Uuid, step_type: K, blob: String) -> Result<StepRecord<K>, CoreFormError> {
        let row: RecordRow = with_retry(|| {
            let mut conn = self.provider.connection()?;
            diesel::insert_into(step_records::table).values(NewRecordRow { session_id: &session_id,
                                                                           step_type: step_type.as_str(),
                                                                           data: &blob,
                                                                           modified_at: Utc::now() })
                                                    .get_result(&mut conn)
                                                    .map_err(PersistenceError::from)
        }).map_err(|e| match e {
              PersistenceError::ForeignKeyViolation(_) => CoreFormError::SessionNotFound(session_id),
              other => other.into(),
          })?;
        debug!("create_record id={} session={session_id} step={}", row.id, row.step_type);
        record_from_row(row)
    }

    fn get_record(&self, id: i64) -> Result<StepRecord<K>, CoreFormError> {
        let row: Option<RecordRow> = with_retry(|| {
            let mut conn = self.provider.connection()?;
            step_records::table.find(id)
                               .first(&mut conn)
                               .optional()
                               .map_err(PersistenceError::from)
        })?;
        match row {
            Some(row) => record_from_row(row),
            None => Err(CoreFormError::RecordNotFound(id)),
        }
    }

    fn update_record_data(&mut self, id: i64, blob: String) -> Result<StepRecord<K>, CoreFormError> {
        let row: Option<RecordRow> = with_retry(|| {
            let mut conn = self.provider.connection()?;
            diesel::update(step_records::table.find(id)).set((step_records::data.eq(&blob),
                                                              step_records::modified_at.eq(Utc::now())))
                                                        .get_result(&mut conn)
                                                        .optional()
                                                        .map_err(PersistenceError::from)
        })?;
        match row {
            Some(row) => record_from_row(row),
            None => Err(CoreFormError::RecordNotFound(id)),
        }
    }

    fn find_record(&self, session_id: Uuid, step_type: K) -> Result<Option<StepRecord<K>>, CoreFormError> {
        let row: Option<RecordRow> = with_retry(|| {
            let mut conn = self.provider.connection()?;
            step_records::table.filter(step_records::session_id.eq(session_id))
                               .filter(step_records::step_type.eq(step_type.as_str()))
                               .order((step_records::modified_at.desc(), step_records::id.desc()))
                               .first(&mut conn)
                               .optional()
                               .map_err(PersistenceError::from)
        })?;
        row.map(record_from_row).transpose()
    }

    fn list_records(&self, session_id: Uuid) -> Result<Vec<StepRecord<K>>, CoreFormError> {
        let rows = self.load_records(session_id)?;
        debug!("list_records session={session_id} count={}", rows.len());
        rows.into_iter().map(record_from_row).collect()
    }
}

/// Construye un pool Postgres r2d2 y corre las migraciones pendientes.
///
/// - Tamaños 0 se elevan a 1; si `min_size > max_size` se usa `min = max`.
pub fn build_pool(database_url: &str, min_size: u32, max_size: u32) -> Result<PgPool, PersistenceError> {
    let validated_min = min_size.max(1);
    let validated_max = max_size.max(1);
    if validated_min > validated_max {
        warn!("min_size > max_size ({validated_min} > {validated_max}), ajustando min=max");
    }
    let final_min = validated_min.min(validated_max);
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().min_idle(Some(final_min))
                                    .max_size(validated_max)
                                    .build(manager)
                                    .map_err(|e| PersistenceError::TransientIo(format!("pool build: {e}")))?;
    {
        let mut conn = pool.get()
                           .map_err(|e| PersistenceError::TransientIo(format!("pool get for migrations: {e}")))?;
        run_pending_migrations(&mut conn)?;
    }
    Ok(pool)
}

/// Helper de desarrollo: carga `.env`, lee `DbConfig` y construye un pool ya
/// migrado.
pub fn build_dev_pool_from_env() -> Result<PgPool, PersistenceError> {
    crate::config::init_dotenv();
    let cfg = crate::config::DbConfig::from_env()?;
    build_pool(&cfg.url, cfg.min_connections, cfg.max_connections)
}
