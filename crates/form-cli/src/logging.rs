use tracing_subscriber::EnvFilter;

/// Instala el subscriber `fmt` hacia stderr. `RUST_LOG` manda; si falta se
/// usa `default_level`. Los registros `log` de las librerías entran por el
/// puente `tracing-log`.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Ya instalado (tests): se ignora.
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(std::io::stderr)
                                     .with_target(false)
                                     .try_init();
}
