use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use form_adapters::SignupStep;
use form_core::StepType;

#[derive(Debug, Parser)]
#[command(name = "form-cli")]
#[command(about = "Drive the signup wizard against memory or Postgres")]
#[command(version)]
pub struct Cli {
    /// State file used when DATABASE_URL is not set
    #[arg(long, global = true, default_value = "formflow-state.json")]
    pub state: PathBuf,

    /// Base URL for resumable links (overrides FORMFLOW_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start a new session on the first step
    Start,
    /// Print the session, its current step and the saved records
    Show(SessionArgs),
    /// Validate and save a step, then move to the next one
    Submit(SubmitArgs),
    /// Go back to the step that led to the given one
    Back(StepArgs),
    /// Print the resumable link of a step
    Link(StepArgs),
    /// Find a session from a link token (hash or id)
    Resume(ResumeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Session id or hash
    #[arg(long)]
    pub session: String,
}

#[derive(Debug, Clone, Args)]
pub struct StepArgs {
    /// Session id or hash
    #[arg(long)]
    pub session: String,

    /// Step tag (account, profile, plan, payment, confirm)
    #[arg(long, value_parser = parse_step)]
    pub step: SignupStep,
}

#[derive(Debug, Clone, Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub target: StepArgs,

    /// Submitted fields as a JSON object
    #[arg(long)]
    pub data: String,
}

#[derive(Debug, Clone, Args)]
pub struct ResumeArgs {
    #[arg(long)]
    pub token: String,
}

fn parse_step(raw: &str) -> Result<SignupStep, String> {
    SignupStep::parse(raw).map_err(|e| e.to_string())
}
