//! form-cli: maneja el wizard de alta desde la terminal.
//!
//! Sin `DATABASE_URL` el store vive en memoria y se guarda entre
//! invocaciones en un archivo JSON (`--state`). Con `DATABASE_URL` se usa
//! `PgStepStore`.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod state;

pub use cli::{Cli, Command};
pub use commands::{execute, Report};
pub use state::StateFile;
