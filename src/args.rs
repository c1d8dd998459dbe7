//! These structs provide the CLI interface for the wellness CLI.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// wellness: A command-line journal for wellness activities.
///
/// Log what you did (exercise, study, meditation or anything else), for how many minutes, on
/// which day, with optional notes. Entries are kept in a plain text file, one per line.
///
/// Run without a subcommand to use the interactive menu.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    /// The subcommand, `Command::Menu` if none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}

#[derive(Subcommand, Debug, Clone, Eq, PartialEq)]
pub enum Command {
    /// Create the home directory and write a default config.json into it.
    Init,
    /// Start the interactive menu. This is the default.
    Menu,
    /// Add an activity to the end of the journal.
    Add(ActivityArgs),
    /// Print every activity with its index.
    List,
    /// Replace the activity at an index with a new one.
    Update(UpdateArgs),
    /// Remove the activity at an index. Later activities move down by one.
    Delete(DeleteArgs),
    /// Show exercise activities, the total duration and activities grouped by type.
    Summary,
}

impl Command {
    /// Whether the command changes the journal and so needs a save afterwards.
    pub fn mutates(&self) -> bool {
        matches!(self, Command::Add(_) | Command::Update(_) | Command::Delete(_))
    }
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory holding config.json and, by default, the journal. Defaults to the current
    /// directory.
    #[arg(long, env = "WELLNESS_HOME", default_value_t = DisplayPath::default_home())]
    home: DisplayPath,

    /// The journal file. Overrides the data_file setting in config.json.
    #[arg(long, env = "WELLNESS_DATA_FILE")]
    data_file: Option<PathBuf>,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }

    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }
}

/// The fields of one activity. `duration` and `date` are kept as text and parsed by the command
/// so that a bad value is reported the same way whether it came from the command line or the
/// interactive menu.
#[derive(Debug, ClapArgs, Clone, Eq, PartialEq)]
pub struct ActivityArgs {
    /// The kind of activity, e.g. Exercise, Study, Meditation.
    #[arg(long = "type")]
    activity_type: String,

    /// The duration in minutes.
    #[arg(long, allow_hyphen_values = true)]
    duration: String,

    /// The date as dd.MM.yyyy, e.g. 05.03.2024.
    #[arg(long)]
    date: String,

    /// Free-text notes.
    #[arg(long, default_value = "")]
    notes: String,
}

impl ActivityArgs {
    pub fn new(
        activity_type: impl Into<String>,
        duration: impl Into<String>,
        date: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            activity_type: activity_type.into(),
            duration: duration.into(),
            date: date.into(),
            notes: notes.into(),
        }
    }

    pub fn activity_type(&self) -> &str {
        &self.activity_type
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// Args for the `wellness update` command.
#[derive(Debug, ClapArgs, Clone, Eq, PartialEq)]
pub struct UpdateArgs {
    /// The zero-based index of the activity to replace, as shown by `wellness list`.
    #[arg(allow_negative_numbers = true)]
    index: i64,

    #[clap(flatten)]
    activity: ActivityArgs,
}

impl UpdateArgs {
    pub fn new(index: i64, activity: ActivityArgs) -> Self {
        Self { index, activity }
    }

    pub fn index(&self) -> i64 {
        self.index
    }

    pub fn activity(&self) -> &ActivityArgs {
        &self.activity
    }
}

/// Args for the `wellness delete` command.
#[derive(Debug, ClapArgs, Clone, Eq, PartialEq)]
pub struct DeleteArgs {
    /// The zero-based index of the activity to remove, as shown by `wellness list`.
    #[arg(allow_negative_numbers = true)]
    index: i64,
}

impl DeleteArgs {
    pub fn new(index: i64) -> Self {
        Self { index }
    }

    pub fn index(&self) -> i64 {
        self.index
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }

    fn default_home() -> Self {
        Self(PathBuf::from("."))
    }
}
