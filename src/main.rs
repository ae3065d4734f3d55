use form_adapters::signup_registry;
use form_core::{FormEngine, InMemoryStepStore, LinkConfig};
use formflow_rust::demo::run_walkthrough;
use tracing_subscriber::EnvFilter;

fn main() {
    // Cargar .env si existe (RUST_LOG, DATABASE_URL, FORMFLOW_BASE_URL)
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    println!("== Recorrido en memoria ==");
    let mut engine = FormEngine::new(signup_registry(), InMemoryStepStore::new()).with_links(LinkConfig::from_env());
    match run_walkthrough(&mut engine) {
        Ok(walk) => walk.lines.iter().for_each(|l| println!("  {l}")),
        Err(e) => {
            eprintln!("recorrido en memoria falló: {e}");
            std::process::exit(1);
        }
    }

    #[cfg(feature = "pg_demo")]
    run_pg_demo();
}

#[cfg(feature = "pg_demo")]
fn run_pg_demo() {
    use form_persistence::{build_dev_pool_from_env, PgStepStore, PoolProvider};

    println!("== Recorrido en Postgres ==");
    let pool = match build_dev_pool_from_env() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("[pg_demo] pool error: {e}");
            std::process::exit(5);
        }
    };
    let store = PgStepStore::new(PoolProvider { pool });
    let mut engine = FormEngine::new(signup_registry(), store).with_links(LinkConfig::from_env());
    match run_walkthrough(&mut engine) {
        Ok(walk) => walk.lines.iter().for_each(|l| println!("  {l}")),
        Err(e) => {
            eprintln!("[pg_demo] recorrido falló: {e}");
            std::process::exit(5);
        }
    }
}
