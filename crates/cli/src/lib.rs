//! Command-line front end of the item-mean baseline.
//!
//! Two invocation forms:
//!
//! ```text
//! item-mean <TRAINFILE> <TESTFILE> [OUTFILE]
//! item-mean --for-users <USERFILE> <TRAINFILE>
//! ```
//!
//! A run goes through fixed phases: resolve the mode, train, load the
//! queries, score. Any failure ends the run; the exit status tells the
//! failure classes apart (see [`exit_status`]).

use anyhow::{Context, Result};
use baseline::{BaselineError, ItemMeanBaseline, score_items};
use clap::Parser;
use data_loader::{DataLoadError, ScoreRequest, parser};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Wrong number or form of arguments (clap uses the same status)
pub const EXIT_USAGE: i32 = 2;
/// A file could not be opened, read or written
pub const EXIT_IO: i32 = 3;
/// A line of an input file is malformed
pub const EXIT_PARSE: i32 = 4;
/// The training file holds no ratings
pub const EXIT_EMPTY_TRAINING: i32 = 5;

/// item-mean - item mean baseline rating predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "item-mean")]
#[command(
    about = "Predict ratings as the global mean plus each item's mean offset",
    long_about = None
)]
pub struct Cli {
    /// Score every trained item for each user listed (one per line) in USERFILE.
    /// Output always goes to stdout in this mode.
    #[arg(long, value_name = "USERFILE")]
    pub for_users: Option<PathBuf>,

    /// Shrink item means towards the global mean, as if every item had this
    /// many extra ratings at the global mean
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub damping: f64,

    /// TRAINFILE TESTFILE [OUTFILE], or just TRAINFILE with --for-users
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,
}

/// What a run scores, resolved once from the arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Score the explicit pairs of a test file
    Pairs {
        train: PathBuf,
        test: PathBuf,
        output: Option<PathBuf>,
    },
    /// Score every trained item for each listed user
    ForUsers { users: PathBuf, train: PathBuf },
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Failed to write predictions to {path}")]
    Output {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl Mode {
    pub fn from_cli(cli: &Cli) -> std::result::Result<Self, CliError> {
        match (&cli.for_users, cli.files.as_slice()) {
            (Some(users), [train]) => Ok(Mode::ForUsers {
                users: users.clone(),
                train: train.clone(),
            }),
            (Some(_), files) => Err(CliError::Usage(format!(
                "--for-users takes exactly one TRAINFILE, got {} file arguments",
                files.len()
            ))),
            (None, [train, test]) => Ok(Mode::Pairs {
                train: train.clone(),
                test: test.clone(),
                output: None,
            }),
            (None, [train, test, output]) => Ok(Mode::Pairs {
                train: train.clone(),
                test: test.clone(),
                output: Some(output.clone()),
            }),
            (None, files) => Err(CliError::Usage(format!(
                "expected TRAINFILE TESTFILE [OUTFILE], got {} file arguments",
                files.len()
            ))),
        }
    }
}

/// Run one invocation to completion
pub fn run(cli: &Cli) -> Result<()> {
    let mode = Mode::from_cli(cli)?;
    info!(?mode, damping = cli.damping, "starting");

    match mode {
        Mode::Pairs {
            train,
            test,
            output,
        } => {
            let model = train_model(&train, cli.damping)?;
            let request = parser::parse_pairs(&test)
                .with_context(|| format!("Failed to load test pairs from {}", test.display()))?;
            info!(pairs = request.len(), users = request.user_count(), "loaded test pairs");

            match output {
                Some(path) => write_to_file(&model, &request, &path)?,
                None => write_to_stdout(&model, &request)?,
            }
        }
        Mode::ForUsers { users, train } => {
            let model = train_model(&train, cli.damping)?;
            let users = parser::parse_users(&users)
                .with_context(|| format!("Failed to load users from {}", users.display()))?;
            let request = ScoreRequest::cross_product(users, &model.items());
            info!(
                users = request.user_count(),
                pairs = request.len(),
                "scoring all items for listed users"
            );

            write_to_stdout(&model, &request)?;
        }
    }

    Ok(())
}

fn train_model(path: &Path, damping: f64) -> Result<ItemMeanBaseline> {
    ItemMeanBaseline::train(path, damping)
        .with_context(|| format!("Failed to train on {}", path.display()))
}

fn write_to_stdout(model: &ItemMeanBaseline, request: &ScoreRequest) -> Result<()> {
    let stdout = io::stdout();
    let written = score_items(model, request, BufWriter::new(stdout.lock())).map_err(|source| {
        CliError::Output {
            path: "<stdout>".to_string(),
            source,
        }
    })?;
    info!(lines = written, "predictions written");
    Ok(())
}

/// Writes predictions to `path`.
///
/// A file that cannot be created is left untouched. Once this run has
/// created the file, a failure part-way through removes it again so no
/// truncated output is left behind.
fn write_to_file(model: &ItemMeanBaseline, request: &ScoreRequest, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| CliError::Output {
        path: path.display().to_string(),
        source,
    })?;

    let written = score_or_remove(model, request, BufWriter::new(file), path)?;
    info!(lines = written, file = %path.display(), "predictions written");
    Ok(())
}

/// Scores into `sink`, a writer over the freshly created file at `path`,
/// and deletes that file if scoring fails.
fn score_or_remove<W: Write>(
    model: &ItemMeanBaseline,
    request: &ScoreRequest,
    sink: W,
    path: &Path,
) -> std::result::Result<usize, CliError> {
    score_items(model, request, sink).map_err(|source| {
        if let Err(e) = fs::remove_file(path) {
            warn!(file = %path.display(), error = %e, "could not remove partial output");
        }
        CliError::Output {
            path: path.display().to_string(),
            source,
        }
    })
}

/// Maps a failed run to its exit status
pub fn exit_status(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<CliError>() {
            return match e {
                CliError::Usage(_) => EXIT_USAGE,
                CliError::Output { .. } => EXIT_IO,
            };
        }
        if let Some(e) = cause.downcast_ref::<BaselineError>() {
            return match e {
                BaselineError::Data(data) => data_error_status(data),
                BaselineError::EmptyTrainingSet => EXIT_EMPTY_TRAINING,
                BaselineError::InvalidDamping(_) => EXIT_USAGE,
            };
        }
        if let Some(e) = cause.downcast_ref::<DataLoadError>() {
            return data_error_status(e);
        }
    }
    EXIT_IO
}

fn data_error_status(err: &DataLoadError) -> i32 {
    if err.is_parse_error() {
        EXIT_PARSE
    } else {
        EXIT_IO
    }
}
