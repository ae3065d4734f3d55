//! Hash helpers para tokens de sesión.

pub mod hash;

pub use hash::{hash_str, new_session_hash};
