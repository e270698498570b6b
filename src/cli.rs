//! Command-line front-end.
//!
//! A thin transport adapter over the engine and store: parse arguments,
//! build one request, print the result as JSON. Each invocation performs
//! at most one execution, so no admission control is needed here.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{EngineConfig, LEGACY_TIMEOUT};
use crate::engine::Engine;
use crate::store::{FsScriptStore, ScriptName, ScriptStore};

#[derive(Parser)]
#[command(author, version, about = "Run untrusted scripts with a bounded lifetime", long_about = None)]
struct Cli {
    /// Directory holding saved scripts
    #[arg(long, default_value = "saved_scripts")]
    scripts_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute code passed on the command line (legacy direct-run path)
    Exec {
        /// Source code to run
        code: String,
        /// Data piped to the child's stdin
        #[arg(long, default_value = "")]
        stdin: String,
        /// Wall-clock deadline in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Run a saved script by name
    Run {
        /// Script name (normalized before lookup)
        name: String,
        /// Data piped to the child's stdin
        #[arg(long, default_value = "")]
        stdin: String,
    },
    /// Save a script under a normalized name
    Save {
        /// Script name; gets a .py suffix if no recognized extension
        name: String,
        /// Read code from this file instead of standard input
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List saved scripts
    List,
    /// Print a saved script's content
    Show {
        /// Script name (normalized before lookup)
        name: String,
    },
}

pub fn run() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let store = FsScriptStore::new(&cli.scripts_dir)?;
    let engine = Engine::new(EngineConfig::default());

    match cli.command {
        Commands::Exec {
            code,
            stdin,
            timeout_ms,
        } => {
            let timeout = timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(LEGACY_TIMEOUT);
            let result = engine.run_inline(&store, &code, &stdin, timeout)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Run { name, stdin } => {
            let result = engine.run_by_reference(&store, &name, &stdin)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Save { name, file } => {
            let name = ScriptName::parse(&name)?;
            let code = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            store.save(&name, &code)?;
            println!("saved {name}");
        }
        Commands::List => {
            for name in store.list()? {
                println!("{name}");
            }
        }
        Commands::Show { name } => {
            let name = ScriptName::parse(&name)?;
            print!("{}", store.read(&name)?);
        }
    }

    Ok(())
}
