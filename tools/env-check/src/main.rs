//! Startup preflight — validates the environment a web application would boot with.
//!
//! # Usage
//!
//! ```bash
//! # Check the live environment against every recognised variable
//! cargo run -p env-check
//!
//! # Check a framework-only deployment described by a .env file
//! cargo run -p env-check -- --profile minimal --env-file deploy/.env
//! ```
//!
//! Exits 0 when every field passes, exits 1 when any fail.

use std::path::PathBuf;

use anyhow::{Context, Result};
use appenv_core::source::{ProcessEnv, Snapshot};
use appenv_settings::Loader;
use appenv_settings::loader::evaluate;
use appenv_settings::schema::Profile;
use clap::Parser;
use tracing::info;

mod reporter;

use reporter::Reporter;

#[derive(Parser)]
#[command(about = "Validate application settings from environment variables")]
struct Args {
    /// Which variables are required: full or minimal
    #[arg(long, default_value = "full")]
    profile: Profile,

    /// Read variables from this .env file first; variables already set in the process win
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Print the validated settings as JSON (secrets redacted)
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    appenv_core::tracing::init_tracing();

    if let Some(path) = &args.env_file {
        dotenvy::from_path(path)
            .with_context(|| format!("failed to read env file {}", path.display()))?;
        info!(path = %path.display(), "loaded env file");
    }

    let snapshot = Snapshot::capture(&ProcessEnv, args.profile.fields().map(|spec| spec.name));

    println!(
        "Checking {} setting(s) for profile '{}'",
        args.profile.fields().count(),
        args.profile
    );
    println!();

    let mut reporter = Reporter::new();
    for outcome in evaluate(&snapshot, args.profile) {
        reporter.record(&outcome);
    }
    reporter.print_summary();

    if !reporter.all_passed() {
        std::process::exit(1);
    }

    if args.json {
        let settings = Loader::new(args.profile).load(&snapshot)?;
        println!("{}", serde_json::to_string_pretty(&settings)?);
    }

    Ok(())
}
