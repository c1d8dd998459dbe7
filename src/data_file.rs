//! Reading and writing the activity journal file.
//!
//! The file holds one activity per line as `type,duration,date,notes` with the date written as
//! `dd.MM.yyyy`. There is no header and no quoting, so a comma inside `type` or `notes` cannot be
//! read back faithfully.
//!
//! Loading is forgiving about the shape of a line but not about its content: a line without
//! exactly four fields is skipped, empty lines included, whereas a four-field line with a bad
//! duration or date discards everything that was read and yields an empty store.

use crate::error::{ErrorType, IntoResult};
use crate::model::{Activity, ActivityStore};
use crate::{utils, Result};
use anyhow::Context;
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// The default name of the journal file.
pub const DATA_FILE: &str = "wellness_data.txt";

const FIELD_COUNT: usize = 4;

/// The persistence adapter for an `ActivityStore`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the file with every activity in `store`, in order.
    ///
    /// # Errors
    /// - `ErrorType::Io` if the file cannot be created or written. Callers are expected to report
    ///   this and carry on.
    pub fn save(&self, store: &ActivityStore) -> Result<()> {
        let file = utils::create(&self.path).pub_result(ErrorType::Io)?;
        write_activities(file, store)
            .with_context(|| format!("Unable to save activities to {}", self.path.display()))
            .pub_result(ErrorType::Io)?;
        info!(
            "Saved {} activit{} to {}",
            store.len(),
            if store.len() == 1 { "y" } else { "ies" },
            self.path.display()
        );
        Ok(())
    }

    /// Reads the file into a new store. Never fails: a missing file, an unreadable file or a line
    /// with an unparseable duration or date all result in an empty store.
    pub fn load(&self) -> ActivityStore {
        match self.try_load() {
            Ok(store) => store,
            Err(e) => {
                error!("Error loading activity data: {e}");
                ActivityStore::new()
            }
        }
    }

    /// Reads the file into a new store.
    ///
    /// A missing file is not an error and yields an empty store. Lines that do not have exactly
    /// four fields are skipped with a warning.
    ///
    /// # Errors
    /// - `ErrorType::Parse` if a four-field line has a bad duration or date.
    /// - `ErrorType::Io` if the file exists but cannot be read.
    pub fn try_load(&self) -> Result<ActivityStore> {
        if !self.path.exists() {
            info!(
                "No existing data found at {}, starting a new journal",
                self.path.display()
            );
            return Ok(ActivityStore::new());
        }
        let content = utils::read(&self.path).pub_result(ErrorType::Io)?;
        let store = read_activities(&content)
            .map_err(|e| e.context(format!("Unable to load {}", self.path.display())))?;
        info!(
            "Loaded {} activit{} from {}",
            store.len(),
            if store.len() == 1 { "y" } else { "ies" },
            self.path.display()
        );
        Ok(store)
    }
}

fn write_activities(w: impl Write, store: &ActivityStore) -> anyhow::Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(w);
    for activity in store.list() {
        writer.write_record([
            activity.activity_type(),
            activity.duration().to_string().as_str(),
            activity.formatted_date().as_str(),
            activity.notes(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn read_activities(content: &str) -> Result<ActivityStore> {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(false).flexible(true).quoting(false);
    let mut store = ActivityStore::new();
    for (ix, raw) in content.lines().enumerate() {
        let line = ix + 1;
        // An empty line yields no record at all, which counts as zero fields.
        let record = builder
            .from_reader(raw.as_bytes())
            .records()
            .next()
            .transpose()
            .with_context(|| format!("Unable to read line {line}"))
            .pub_result(ErrorType::Io)?
            .unwrap_or_default();
        if record.len() != FIELD_COUNT {
            warn!("Skipping invalid line {line}: {raw}");
            continue;
        }
        let activity = Activity::parse(&record[0], &record[1], &record[2], &record[3])
            .map_err(|e| e.context(format!("Bad activity on line {line}")))?;
        debug!("Line {line}: {activity}");
        store.push(activity);
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn data_file(dir: &TempDir) -> DataFile {
        DataFile::new(dir.path().join(DATA_FILE))
    }

    #[test]
    fn test_save_format() {
        let dir = TempDir::new().unwrap();
        let file = data_file(&dir);
        let mut store = ActivityStore::new();
        store.add("Exercise", 30, d(2024, 1, 5), "run");
        store.add("Study", 60, d(2024, 11, 20), "");
        file.save(&store).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "Exercise,30,05.01.2024,run\nStudy,60,20.11.2024,\n");
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let file = data_file(&dir);
        let mut store = ActivityStore::new();
        store.add("Exercise", 30, d(2024, 1, 5), "ran 5k");
        store.add("Meditation", 10, d(2024, 1, 6), "");
        store.add("Study", -5, d(1999, 12, 31), "a \"quoted\" note");
        file.save(&store).unwrap();

        let loaded = file.try_load().unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let file = data_file(&dir);
        let mut store = ActivityStore::new();
        store.add("Exercise", 30, d(2024, 1, 5), "");
        store.add("Study", 60, d(2024, 1, 6), "");
        file.save(&store).unwrap();

        store.delete(0).unwrap();
        file.save(&store).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "Study,60,06.01.2024,\n");
    }

    #[test]
    fn test_save_to_missing_directory_fails_with_io() {
        let dir = TempDir::new().unwrap();
        let file = DataFile::new(dir.path().join("nope").join(DATA_FILE));
        let err = file.save(&ActivityStore::new()).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Io);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let file = data_file(&dir);
        assert!(file.try_load().unwrap().is_empty());
        assert!(file.load().is_empty());
    }

    #[test]
    fn test_load_skips_lines_with_wrong_field_count() {
        let dir = TempDir::new().unwrap();
        let file = data_file(&dir);
        std::fs::write(
            file.path(),
            "Exercise,30,05.01.2024,run\nStudy,60\nSleep,480,06.01.2024,long,night\n",
        )
        .unwrap();

        let store = file.load();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.list()[0],
            Activity::new("Exercise", 30, d(2024, 1, 5), "run")
        );
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let file = data_file(&dir);
        std::fs::write(
            file.path(),
            "Exercise,30,05.01.2024,run\n\nStudy,60,06.01.2024,\n\n",
        )
        .unwrap();

        let store = file.try_load().unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[1], Activity::new("Study", 60, d(2024, 1, 6), ""));
    }

    #[test]
    fn test_load_error_line_counts_blank_lines() {
        let dir = TempDir::new().unwrap();
        let file = data_file(&dir);
        std::fs::write(file.path(), "\nExercise,30,05.01.2024,run\n\nStudy,x,06.01.2024,\n")
            .unwrap();

        let err = file.try_load().unwrap_err();
        assert!(err.to_string().contains("line 4"), "{err}");
    }

    #[test]
    fn test_load_extreme_durations_summarize() {
        let dir = TempDir::new().unwrap();
        let file = data_file(&dir);
        std::fs::write(
            file.path(),
            "Study,9223372036854775807,01.01.2024,a\nStudy,1,02.01.2024,b\n",
        )
        .unwrap();

        let store = file.load();
        assert_eq!(store.len(), 2);
        assert_eq!(store.summarize().total_duration, i64::MIN);
    }

    #[test]
    fn test_load_bad_duration_discards_everything() {
        let dir = TempDir::new().unwrap();
        let file = data_file(&dir);
        std::fs::write(
            file.path(),
            "Exercise,30,05.01.2024,run\nStudy,sixty,06.01.2024,\n",
        )
        .unwrap();

        let err = file.try_load().unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("line 2"));
        assert!(file.load().is_empty());
    }

    #[test]
    fn test_load_bad_date_discards_everything() {
        let dir = TempDir::new().unwrap();
        let file = data_file(&dir);
        std::fs::write(file.path(), "Exercise,30,2024-01-05,run\n").unwrap();
        assert!(file.try_load().unwrap_err().is_parse());
        assert!(file.load().is_empty());
    }

    #[test]
    fn test_comma_in_notes_is_lossy() {
        let dir = TempDir::new().unwrap();
        let file = data_file(&dir);
        let mut store = ActivityStore::new();
        store.add("Exercise", 30, d(2024, 1, 5), "run, then swim");
        file.save(&store).unwrap();

        // Five fields on disk, so the line is skipped on the way back in.
        assert!(file.load().is_empty());
    }

    #[test]
    fn test_load_handles_crlf() {
        let dir = TempDir::new().unwrap();
        let file = data_file(&dir);
        std::fs::write(file.path(), "Exercise,30,05.01.2024,run\r\n").unwrap();
        let store = file.load();
        assert_eq!(store.list()[0].notes(), "run");
    }
}
