use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::messages::MessageCatalog;
use crate::sandbox::dir::DirSandbox;
use crate::steps::registry::step_for;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a submission output against a reference output
    Evaluate {
        /// Sandbox directory holding both files
        #[arg(long)]
        box_dir: String,
        /// Name of the submission output file inside the sandbox
        #[arg(long)]
        output: String,
        /// Name of the reference output file inside the sandbox
        #[arg(long)]
        reference: String,
        /// Evaluation step to run
        #[arg(long, default_value = "white-diff")]
        comparator: String,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the builtin message catalog
    Catalog,
}

pub fn run() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            box_dir,
            output,
            reference,
            comparator,
            json,
        } => {
            let catalog = Arc::new(MessageCatalog::builtin());
            let step = step_for(&comparator, catalog)?;
            let sandbox = DirSandbox::new(box_dir)?;
            // Absent output and mismatch are outcomes with exit code 0;
            // a nonzero exit is reserved for "could not judge".
            let outcome = step.evaluate(&sandbox, &output, &reference)?;
            if json {
                println!("{}", serde_json::to_string(&outcome)?);
            } else {
                println!("score: {:.2}", outcome.score);
                println!("text: {}", outcome.text.join(" | "));
            }
        }
        Commands::Catalog => {
            let catalog = MessageCatalog::builtin();
            let mut entries: Vec<_> = catalog.iter().collect();
            entries.sort();
            for (key, template) in entries {
                println!("{key}: {template}");
            }
        }
    }

    Ok(())
}
