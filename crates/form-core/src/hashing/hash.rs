//! Hash helpers – blake3 en hex, igual para cualquier backend de storage.

use blake3::Hasher;
use uuid::Uuid;

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}

/// Genera el hash secreto con el que una sesión persistente se reanuda por
/// link. Incluye un salt aleatorio: el id de la sesión no basta para
/// reconstruirlo.
pub fn new_session_hash(session_id: Uuid) -> String {
    let salt = Uuid::new_v4();
    hash_str(&format!("{session_id}:{salt}"))
}
