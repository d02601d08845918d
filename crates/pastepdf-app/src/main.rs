//! Headless entry point.

use clap::{Parser, Subcommand};
use pastepdf_app::{AppResult, Session, load_config, replay, write_export};
use pastepdf_core::{EditorState, UrlImageSource};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pastepdf", about = "Replay PastePDF editing sessions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded session and print its export document.
    Replay {
        session: PathBuf,
        /// Editor configuration (JSON).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the export document here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> AppResult<()> {
    match cli.command {
        Command::Replay {
            session,
            config,
            output,
        } => {
            let config = load_config(config.as_deref())?;
            let session = Session::load(&session)?;
            let mut editor = EditorState::new(config);
            replay(&mut editor, session, &UrlImageSource);

            let export = editor.export()?;
            if let Some(json) = write_export(&export, output.as_deref())? {
                println!("{}", json);
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting PastePDF");

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
