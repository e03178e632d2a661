//! KnowLabel command-line front end.
//!
//! Loads the knowledge base once, then runs a single analysis, chat or
//! lookup request. Results go to stdout; logs go to stderr.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use knowlabel::config::parse_timeout_secs;
use knowlabel::render::{badge, render_json, render_result};
use knowlabel::{Analyzer, KnowLabelConfig, KnowLabelError, KnowledgeBase, OllamaOracle};

#[derive(Parser, Debug)]
#[command(name = "knowlabel", version, about = "Analyze cosmetic ingredient lists against a curated knowledge base")]
struct Cli {
    /// Knowledge base CSV [env: KNOWLABEL_DATA]
    #[arg(long, short = 'd')]
    data: Option<PathBuf>,

    /// Model generate endpoint [env: KNOWLABEL_OLLAMA_URL]
    #[arg(long)]
    endpoint: Option<String>,

    /// Model identifier [env: KNOWLABEL_MODEL]
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Model call timeout in seconds [env: KNOWLABEL_TIMEOUT_SECS]
    #[arg(long)]
    timeout_secs: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a comma- or newline-separated ingredient list (stdin when omitted)
    Analyze {
        text: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask a free-text question
    Chat {
        question: Vec<String>,
    },
    /// Show the curated record for one ingredient
    Lookup {
        name: String,
    },
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("knowlabel=info"));
    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn build_config(cli: &Cli) -> Result<KnowLabelConfig, KnowLabelError> {
    let mut config = KnowLabelConfig::from_env()?;
    if let Some(data) = &cli.data {
        config.data_path.clone_from(data);
    }
    if let Some(endpoint) = &cli.endpoint {
        config.oracle.endpoint.clone_from(endpoint);
    }
    if let Some(model) = &cli.model {
        config.oracle.model.clone_from(model);
    }
    if let Some(raw) = &cli.timeout_secs {
        config.oracle.timeout = parse_timeout_secs("--timeout-secs", raw)?;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<ExitCode, KnowLabelError> {
    let config = build_config(&cli)?;

    // Without a knowledge base nothing can be resolved.
    let kb = Arc::new(KnowledgeBase::from_csv_path(&config.data_path)?);
    info!(ingredients = kb.len(), path = %config.data_path.display(), "knowledge base ready");

    let oracle = OllamaOracle::new(config.oracle.clone())?;
    let analyzer = Analyzer::new(kb, oracle);

    match cli.command {
        Command::Analyze { text, json } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .map_err(KnowLabelError::Input)?;
                    buf
                }
            };
            if text.trim().is_empty() {
                eprintln!("Please enter some ingredients.");
                return Ok(ExitCode::from(2));
            }

            let result = analyzer.analyze(&text);
            if json {
                match render_json(&result) {
                    Ok(out) => println!("{out}"),
                    Err(e) => {
                        error!(error = %e, "failed to serialize results");
                        return Ok(ExitCode::FAILURE);
                    }
                }
            } else {
                print!("{}", render_result(&result, &config.oracle.model));
            }
        }
        Command::Chat { question } => {
            let question = question.join(" ");
            if question.trim().is_empty() {
                eprintln!("Please ask a question.");
                return Ok(ExitCode::from(2));
            }
            println!("{}", analyzer.chat(&question));
        }
        Command::Lookup { name } => match analyzer.lookup(&name) {
            Some(record) => {
                println!("### {}", name.trim());
                println!("{}", badge(record.beneficial, &config.oracle.model));
                println!("{}", record.description);
                if !record.alternatives.is_empty() {
                    println!("Alternatives: {}", record.alternatives.join(", "));
                }
            }
            None => {
                eprintln!("'{}' is not in the knowledge base", name.trim());
                return Ok(ExitCode::FAILURE);
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "knowlabel failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
