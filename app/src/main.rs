#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;
mod env_file;

use command::{
    CheckStrategy, CommandStrategy, InfoStrategy, InitStrategy, RunInput, RunStrategy, StepArgs,
    VersionStrategy,
};

#[derive(Parser)]
#[command(name = "cnf")]
#[command(about = "Fetch the Chuck Norris daily fact into a build variable", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct StepFlags {
    /// URL to fetch; `${NAME}` and `$NAME` are expanded from the environment
    #[arg(short = 'u', long)]
    url: Option<String>,

    /// Pattern the whole response must match; group 1 is the fact
    #[arg(short = 'r', long)]
    regex: Option<String>,

    /// Build variable receiving the fact
    #[arg(short = 'v', long = "var")]
    var_name: Option<String>,
}

impl From<StepFlags> for StepArgs {
    fn from(flags: StepFlags) -> Self {
        Self {
            url: flags.url,
            regex: flags.regex,
            var_name: flags.var_name,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the build step
    Run {
        #[command(flatten)]
        step: StepFlags,

        /// File receiving `NAME=value` lines for later build steps
        #[arg(short = 'e', long, env = "CNF_ENV_FILE")]
        env_file: Option<PathBuf>,
    },
    /// Validate the step settings
    Check {
        #[command(flatten)]
        step: StepFlags,
    },
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout is the build log.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { step, env_file } => {
            RunStrategy
                .execute(RunInput {
                    step: step.into(),
                    env_file,
                })
                .await
        }
        Commands::Check { step } => CheckStrategy.execute(step.into()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
