use crate::errors::AppError;
use crate::models::AppData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error};

pub const DATA_PATH_VAR: &str = "MOOD_DATA_PATH";

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var(DATA_PATH_VAR) {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/moods.json"))
}

/// Whole-document JSON store for mood and journal entries.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn prepare(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// A missing file is an empty journal. A file that does not parse is
    /// moved aside to `<name>.corrupt` so the next persist cannot overwrite
    /// it, and the service starts empty.
    pub async fn load(&self) -> Result<AppData, AppError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(AppData::default()),
            Err(err) => {
                error!("failed to read data file {}: {err}", self.path.display());
                return Err(err.into());
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(data) => Ok(data),
            Err(err) => {
                let aside = self.sibling("corrupt");
                error!(
                    "failed to parse data file {}: {err}; moving it to {}",
                    self.path.display(),
                    aside.display()
                );
                fs::rename(&self.path, &aside).await?;
                Ok(AppData::default())
            }
        }
    }

    /// Writes to `<name>.tmp` and renames it over the data file, so a crash
    /// mid-write leaves the previous document intact.
    pub async fn persist(&self, data: &AppData) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(data)?;
        let staging = self.sibling("tmp");
        fs::write(&staging, payload).await?;
        fs::rename(&staging, &self.path).await?;
        debug!(
            moods = data.moods.len(),
            journal = data.journal.len(),
            "persisted data file"
        );
        Ok(())
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }
}
