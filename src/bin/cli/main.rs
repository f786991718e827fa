mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use learndx::catalog::{Catalog, Fitzpatrick, Subject};
use learndx::identity::Identity;
use learndx::quiz::SessionConfig;
use learndx::storage::FileStore;
use learndx::QuizApp;

#[derive(Parser)]
#[command(name = "learndx", about = "Dermatology image recognition self-quiz", version)]
struct Cli {
    /// Opaque user id to namespace saved history (default: anonymous)
    #[arg(long, global = true, env = "LEARNDX_USER")]
    user: Option<String>,

    /// Data directory override
    #[arg(long, global = true, env = "LEARNDX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Load cases from a JSON file instead of the built-in catalog
    #[arg(long, global = true)]
    cases: Option<PathBuf>,

    /// Output format for listing commands
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Take a quiz (resumes a saved session unless --fresh)
    Quiz {
        /// Number of questions
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,

        /// Restrict to a subject (repeatable; default: all subjects)
        #[arg(long = "subject", value_enum)]
        subjects: Vec<SubjectArg>,

        /// Restrict to Fitzpatrick classes (repeatable; default: all)
        #[arg(long = "fitzpatrick")]
        fitzpatricks: Vec<Fitzpatrick>,

        /// Discard any saved session and start over
        #[arg(long)]
        fresh: bool,
    },

    /// List completed quizzes, newest first
    Results,

    /// Review the attempts of one session
    Review {
        /// Session id (prefix match against the result list)
        session: String,
    },

    /// Show performance statistics
    Stats,

    /// List the case catalog
    Cases,

    /// Clear saved data for the current identity
    Reset {
        /// Clear the attempt log
        #[arg(long)]
        attempts: bool,

        /// Clear the result log
        #[arg(long)]
        results: bool,

        /// Clear the saved session snapshot
        #[arg(long)]
        progress: bool,

        /// Clear everything
        #[arg(long)]
        all: bool,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum SubjectArg {
    Clinical,
    Histopathology,
}

impl From<SubjectArg> for Subject {
    fn from(arg: SubjectArg) -> Self {
        match arg {
            SubjectArg::Clinical => Subject::Clinical,
            SubjectArg::Histopathology => Subject::Histopathology,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let catalog = match &cli.cases {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("could not load cases from {}", path.display()))?,
        None => Catalog::builtin(),
    };

    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => FileStore::default_data_dir().context("could not resolve the data directory")?,
    };
    let store = FileStore::new(data_dir);
    store.init().context("could not initialize storage")?;

    let identity = Identity::from_user_id(cli.user.clone());
    let mut app = QuizApp::new(catalog, Box::new(store), identity);

    match cli.command {
        Command::Quiz { count, subjects, fitzpatricks, fresh } => {
            let subjects = if subjects.is_empty() {
                Subject::ALL.to_vec()
            } else {
                subjects.into_iter().map(Subject::from).collect()
            };
            let config = SessionConfig { count, subjects, fitzpatricks };
            commands::quiz::run(&mut app, &config, fresh)?;
        }
        Command::Results => {
            commands::results::run(&app, &cli.format)?;
        }
        Command::Review { session } => {
            commands::review::run(&app, &session, &cli.format)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format)?;
        }
        Command::Cases => {
            commands::cases::run(&app, &cli.format)?;
        }
        Command::Reset { attempts, results, progress, all } => {
            commands::reset::run(&mut app, attempts, results, progress, all)?;
        }
    }

    Ok(())
}
