// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cmd::commands::{generate_command, parse_command, register_command, run_command};
use cmd::common::{config_path_with_override, load_pipeline_config};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "logpipe")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Pipeline configuration file (YAML); defaults to $LOGPIPE_CONFIG
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of sample logs into the export bucket
    Generate,
    /// Parse one export object into log metadata
    Parse {
        /// Bucket holding the object; defaults to the configured bucket
        #[arg(short, long)]
        bucket: Option<String>,
        /// Object key
        #[arg(short, long)]
        key: String,
        /// Write the metadata to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Register a metadata file with the catalog
    Register {
        /// File written by `parse --output`
        #[arg(short, long)]
        metadata: PathBuf,
    },
    /// Generate, then parse and register every new export object
    Run {
        /// Number of iterations
        #[arg(short = 'n', long, default_value = "1")]
        iterations: usize,
    },
}

#[allow(clippy::print_stdout)]
fn print_line(line: &str) {
    println!("{line}");
}

#[tokio::main]
async fn main() -> Result<()> {
    diagnostics::init();

    let cli = Cli::parse();
    let config_path = config_path_with_override(cli.config);
    let config = load_pipeline_config(config_path.as_deref())?;

    match cli.command {
        Commands::Generate => generate_command(&config, print_line).await.map(|_| ()),
        Commands::Parse {
            bucket,
            key,
            output,
        } => parse_command(&config, bucket.as_deref(), &key, output.as_deref(), print_line)
            .await
            .map(|_| ()),
        Commands::Register { metadata } => register_command(&config, &metadata, print_line)
            .await
            .map(|_| ()),
        Commands::Run { iterations } => run_command(&config, iterations, print_line)
            .await
            .map(|_| ()),
    }
}
