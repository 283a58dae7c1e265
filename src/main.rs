//! `acl-groups` command line.
//!
//! ```text
//! acl-groups [--config FILE] [--policy-file FILE] resolve --name NAME [--wait-for DUR]
//! ```
//!
//! Prints the resolved group as JSON on stdout. Failures are printed as
//! diagnostics on stderr with a non-zero exit status.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use acl_groups::config::{load_config, ClientConfig};
use acl_groups::diagnostics::Diagnostics;
use acl_groups::lifecycle::signals::cancel_on_ctrl_c;
use acl_groups::observability::logging;
use acl_groups::{read_group, FilePolicyClient, GroupQuery, HttpPolicyClient, PolicyClient, Shutdown};

#[derive(Parser)]
#[command(name = "acl-groups")]
#[command(about = "Resolve tailnet ACL groups to their members", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read the policy from a local JSON file instead of the API.
    #[arg(long)]
    policy_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a group to its members
    Resolve {
        /// Exact group name, e.g. group:eng
        #[arg(long)]
        name: String,

        /// Keep retrying every second for this long (e.g. 30s, 2m)
        #[arg(long)]
        wait_for: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    logging::init(&config.logging)?;

    let shutdown = Shutdown::new();
    tokio::spawn(cancel_on_ctrl_c(shutdown.clone()));

    match cli.command {
        Commands::Resolve { name, wait_for } => {
            let query = GroupQuery { name, wait_for };
            match &cli.policy_file {
                Some(path) => {
                    let client = FilePolicyClient::new(path);
                    resolve(&client, &query, &shutdown).await
                }
                None => {
                    let client = HttpPolicyClient::from_env(&config.api)?;
                    resolve(&client, &query, &shutdown).await
                }
            }
        }
    }
}

async fn resolve<C: PolicyClient>(
    client: &C,
    query: &GroupQuery,
    shutdown: &Shutdown,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match read_group(client, query, shutdown.subscribe()).await {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            for diagnostic in Diagnostics::from(&e).iter() {
                eprintln!("{}", diagnostic);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
