//! FormFlow Rust Library
//!
//! Fachada del workspace:
//! - `form_core`: motor de pasos.
//! - `form_persistence`: backend Postgres.
//! - `form_adapters`: wizards concretos.
//!
//! `demo` contiene el recorrido que ejecuta `main.rs`.

pub use form_adapters;
pub use form_core;
pub use form_persistence;

pub mod demo;
