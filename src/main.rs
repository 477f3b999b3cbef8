//! LexiBrief CLI - one-page briefs of legal documents
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use std::io::{self, Read};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use lexibrief::agent::{self, GeminiProvider};
use lexibrief::{export, ingest, logging, ui, Config, Tone};

#[derive(Parser)]
#[command(name = "lexibrief")]
#[command(author, version, about = "TUI for one-page legal document briefs", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Document (.pdf or .txt) to load into the TUI on startup
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a document without the TUI
    Summarise {
        /// Document to summarise (.pdf or .txt); reads stdin when omitted or "-"
        input: Option<PathBuf>,
        /// Summary focus: executive, litigation, compliance or plain-english
        #[arg(short, long, default_value = "executive")]
        tone: Tone,
        /// Show raw extracted text instead of summary
        #[arg(long)]
        raw: bool,
        /// Also save the brief as Summary_<date>.txt in the export directory
        #[arg(long)]
        save: bool,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Summarise {
            input,
            tone,
            raw,
            save,
        }) => {
            logging::init_stderr();
            let text = read_document(input).await?;

            if raw {
                // Just show raw extracted text
                println!("{}", text);
                eprintln!("--- Extracted {} characters ---", text.chars().count());
                return Ok(());
            }

            let config = Config::load()?;
            let provider = GeminiProvider::new(&config)?;
            eprintln!("Summarising {} characters...", text.chars().count());

            // User-facing message only; detail is already in the log
            let summary = agent::summarize(&provider, &text, tone, &config)
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;

            println!("{}\n", format!("=== One Page Brief: {} ===", tone).bold());
            println!("{}\n", summary);
            println!(
                "{}",
                format!(
                    "Summary Length: {} characters | Words: {}",
                    summary.chars().count(),
                    summary.split_whitespace().count()
                )
                .dimmed()
            );

            if save {
                let today = export::today();
                let path = export::save_summary(&config.export.dir, &summary, today)?;
                println!("{} {}", "Saved to".green(), path.display());
            }
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "lexibrief", &mut io::stdout());
        }
        None => {
            // Default: Launch the TUI
            let _guard = logging::init_file()?;
            let config = Config::load()?;
            if let Some(path) = &cli.file {
                if !path.exists() {
                    anyhow::bail!("File not found: {}", path.display());
                }
            }
            ui::run(config, cli.file).await?;
        }
    }

    Ok(())
}

/// Load the document from a file, or from stdin when it is piped in.
async fn read_document(input: Option<PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            ingest::ingest_file(&path).await.map_err(|e| {
                tracing::warn!(path = %path.display(), error = ?e, "ingestion failed");
                anyhow::anyhow!("{e}")
            })
        }
        _ => {
            if atty::is(atty::Stream::Stdin) {
                anyhow::bail!("No document given. Pass a .pdf or .txt file, or pipe text on stdin.");
            }
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
