use crate::data_file::DataFile;
use crate::model::ActivityStore;
use crate::{Config, Result};
use tracing::error;

/// The application context: the journal file and the in-memory store that was loaded from it. It
/// is built once at startup and handed to every command handler.
#[derive(Debug, Clone)]
pub struct App {
    data_file: DataFile,
    store: ActivityStore,
}

impl App {
    /// Loads the journal named by `config`. A missing or unreadable journal results in an empty
    /// store, see `DataFile::load`.
    pub fn open(config: Config) -> Self {
        let data_file = config.data_file();
        let store = data_file.load();
        Self { data_file, store }
    }

    pub fn data_file(&self) -> &DataFile {
        &self.data_file
    }

    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut ActivityStore {
        &mut self.store
    }

    /// Writes the store back to the journal file.
    pub fn save(&self) -> Result<()> {
        self.data_file.save(&self.store)
    }

    /// Saves and reports a failure without returning it, so that shutdown can always proceed.
    /// Returns `true` if the save succeeded.
    pub fn save_or_report(&self) -> bool {
        match self.save() {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving activity data: {e}");
                false
            }
        }
    }
}
