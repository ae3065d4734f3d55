use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use form_adapters::signup_registry;
use form_cli::commands::exit_code;
use form_cli::logging::init_logging;
use form_cli::{execute, Cli, Report, StateFile};
use form_core::{FormEngine, LinkConfig};
use form_persistence::{build_dev_pool_from_env, init_dotenv, PgStepStore, PoolProvider};
use tracing::{error, info};

fn main() -> ExitCode {
    // .env puede traer DATABASE_URL y RUST_LOG
    init_dotenv();
    init_logging("warn");
    let cli = Cli::parse();
    match run(&cli) {
        Ok(report) => {
            for line in &report.lines {
                println!("{line}");
            }
            if report.rejected {
                ExitCode::from(4)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("form-cli failed: {e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(cli: &Cli) -> Result<Report> {
    let links = cli.base_url.clone().map(LinkConfig::new).unwrap_or_else(LinkConfig::from_env);
    if std::env::var("DATABASE_URL").is_ok() {
        info!("using postgres backend");
        let pool = build_dev_pool_from_env()?;
        let store = PgStepStore::new(PoolProvider { pool });
        let mut engine = FormEngine::new(signup_registry(), store).with_links(links);
        execute(&mut engine, &cli.command)
    } else {
        let state = StateFile::new(&cli.state);
        info!("using state file {}", state.path().display());
        let mut engine = FormEngine::new(signup_registry(), state.load()?).with_links(links);
        let report = execute(&mut engine, &cli.command)?;
        state.save(engine.store())?;
        Ok(report)
    }
}
