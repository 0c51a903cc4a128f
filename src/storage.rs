use crate::models::LearningItem;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

const APP_DIR: &str = "memoword";
const ITEMS_FILE: &str = "items.json";

/// JSON-file persistence for the item collection, keyed by item id.
pub struct Storage {
    data_file: PathBuf,
}

impl Storage {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let data_dir = dirs::data_local_dir()
            .ok_or("Failed to resolve local data directory")?
            .join(APP_DIR);

        std::fs::create_dir_all(&data_dir)?;
        let data_file = data_dir.join(ITEMS_FILE);

        Ok(Storage { data_file })
    }

    pub fn new_with_path(data_file: PathBuf) -> Self {
        Storage { data_file }
    }

    pub fn load_items(&self) -> Result<HashMap<String, LearningItem>, Box<dyn std::error::Error>> {
        if self.data_file.exists() {
            let file = File::open(&self.data_file)?;
            let reader = BufReader::new(file);
            let items = match serde_json::from_reader(reader) {
                Ok(items) => items,
                Err(e) => {
                    // A corrupt file is recoverable; start over rather than fail
                    log::warn!("Failed to parse {}: {}. Starting with an empty collection.", self.data_file.display(), e);
                    HashMap::new()
                }
            };
            Ok(items)
        } else {
            Ok(HashMap::new())
        }
    }

    pub fn save_items(&self, items: &HashMap<String, LearningItem>) -> Result<(), Box<dyn std::error::Error>> {
        let file = OpenOptions::new().write(true).create(true).truncate(true).open(&self.data_file)?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, items)?;
        Ok(())
    }

    pub fn get_data_file_path(&self) -> &PathBuf {
        &self.data_file
    }
}
