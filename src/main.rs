//! Command-line front end for the portfolio terminal.
//!
//! Runs a line-oriented REPL over stdin, or a single line with `-c`.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;
    use std::rc::Rc;
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use clap::Parser;
    use log::info;

    use termfolio::config::ShellConfig;
    use termfolio::core::Shell;
    use termfolio::core::VirtualFs;
    use termfolio::core::storage::{JsonFileStore, KeyValueStore, MemoryStore};

    #[derive(Debug, Parser)]
    #[command(name = "termfolio", version, about = "Portfolio terminal in your terminal")]
    struct Args {
        /// TOML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON filesystem document replacing the stock tree.
        #[arg(long)]
        filesystem: Option<PathBuf>,

        /// Persist history and settings to this JSON file.
        #[arg(long)]
        history_file: Option<PathBuf>,

        /// Reject duplicate command names at registration.
        #[arg(long)]
        strict: bool,

        /// Run one line and exit.
        #[arg(short = 'c', value_name = "LINE")]
        command: Option<String>,
    }

    pub async fn run() -> Result<()> {
        let args = Args::parse();

        let mut config = match &args.config {
            Some(path) => ShellConfig::load(path)?,
            None => ShellConfig::default(),
        };
        if args.strict {
            config.strict_registration = true;
        }
        if args.filesystem.is_some() {
            config.filesystem = args.filesystem.clone();
        }

        let fs = match &config.filesystem {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                VirtualFs::from_json(&json)?
            }
            None => VirtualFs::portfolio()?,
        };
        let store: Rc<dyn KeyValueStore> = match &args.history_file {
            Some(path) => Rc::new(JsonFileStore::open(path)?),
            None => Rc::new(MemoryStore::new()),
        };

        let shell = Shell::new(&config, Arc::new(fs), store)?;

        if let Some(line) = &args.command {
            for line in shell.dispatch(line).await {
                println!("{}", line);
            }
            return Ok(());
        }

        info!("termfolio ready; type 'help' to list commands");
        let stdin = io::stdin();
        let mut input = String::new();
        loop {
            print!("{}$ ", shell.prompt().await);
            io::stdout().flush()?;

            input.clear();
            if stdin.lock().read_line(&mut input)? == 0 {
                break;
            }

            let submission = shell.submit(input.trim_end_matches(['\r', '\n'])).await;
            if submission.cleared {
                // ANSI: clear screen, cursor home
                print!("\x1b[2J\x1b[H");
                continue;
            }
            for line in submission.output.iter().skip(1) {
                if line.is_error() {
                    eprintln!("{}", line);
                } else {
                    println!("{}", line);
                }
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    cli::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
