//! Data directory store
//!
//! Every overwrite and delete first copies the current file into the backup
//! directory as `<name>.bak-<timestamp>`. Writes go to a temp file that is
//! then renamed over the target, so readers never see a partial file.
//! Writers take the store's write lock, so a backup and the write that
//! follows it never interleave with another writer.

use crate::admin::content::{validate_json, ValidatedJson};
use crate::admin::filename::{DataFileName, JSON_EXTENSION};
use crate::core::config::DataConfig;
use crate::core::error::{AtlasError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Listing entry for one data file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub name: String,
    pub size: u64,
    pub record_count: usize,
    pub modified: Option<DateTime<Utc>>,
}

/// Result of a save
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    /// False when an existing file was replaced
    pub created: bool,
    /// Backup taken of the replaced file
    pub backup: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DataStore {
    data_dir: PathBuf,
    backup_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

/// Backup timestamp: ISO-8601 UTC with `:` and `.` replaced by `-`
pub fn backup_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H-%M-%S-%3fZ").to_string()
}

/// Backup file name for a data file taken at `at`
pub fn backup_file_name(name: &DataFileName, at: DateTime<Utc>) -> String {
    format!("{}.bak-{}", name, backup_timestamp(at))
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            backup_dir: backup_dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(config.data_dir.clone(), config.backup_dir())
    }

    /// Create the data and backup directories if missing
    pub async fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.backup_dir).await?;
        fs::create_dir_all(&self.data_dir).await?;
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    fn path_for(&self, name: &DataFileName) -> PathBuf {
        self.data_dir.join(name.as_str())
    }

    /// Every addressable `.json` file, sorted by name
    ///
    /// Files that fail to parse are listed with a record count of zero.
    pub async fn list(&self) -> Result<Vec<FileSummary>> {
        let mut entries = fs::read_dir(&self.data_dir).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !file_name.ends_with(JSON_EXTENSION) {
                continue;
            }
            let Ok(name) = DataFileName::parse(&file_name) else {
                tracing::debug!("Skipping unaddressable file {:?}", file_name);
                continue;
            };
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            let record_count = match fs::read_to_string(entry.path()).await {
                Ok(content) => validate_json(&content).map(|doc| doc.item_count).unwrap_or(0),
                Err(e) => {
                    tracing::warn!("Could not read {}: {}", name, e);
                    0
                }
            };

            files.push(FileSummary {
                name: name.to_string(),
                size: metadata.len(),
                record_count,
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Read and validate one file
    pub async fn read(&self, name: &DataFileName) -> Result<ValidatedJson> {
        let content = match fs::read_to_string(self.path_for(name)).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AtlasError::FileNotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        validate_json(&content)
    }

    /// Create or replace a file, backing up any previous version
    pub async fn save(&self, name: &DataFileName, content: &str) -> Result<SaveOutcome> {
        validate_json(content)?;

        let _guard = self.write_lock.lock().await;
        let backup = self.copy_to_backup(name).await?;
        self.atomic_write(name, content).await?;
        tracing::info!(
            "Saved {} ({} bytes){}",
            name,
            content.len(),
            backup.as_deref().map(|b| format!(", backup {}", b)).unwrap_or_default()
        );

        Ok(SaveOutcome {
            created: backup.is_none(),
            backup,
        })
    }

    /// Create a new file; refuses to replace an existing one
    ///
    /// The finished temp file is hard-linked into place, which fails if the
    /// target already exists, so a file created by another process is not
    /// replaced either.
    pub async fn upload(&self, name: &DataFileName, content: &str) -> Result<()> {
        validate_json(content)?;

        let _guard = self.write_lock.lock().await;
        let temp = self.write_temp(name, content).await?;
        let linked = fs::hard_link(&temp, self.path_for(name)).await;
        if let Err(e) = fs::remove_file(&temp).await {
            tracing::warn!("Could not remove temp file {:?}: {}", temp, e);
        }
        match linked {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(AtlasError::FileExists(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        }
        tracing::info!("Uploaded {} ({} bytes)", name, content.len());
        Ok(())
    }

    /// Back up then remove a file; returns the backup name
    pub async fn delete(&self, name: &DataFileName) -> Result<String> {
        let _guard = self.write_lock.lock().await;
        let backup = self
            .copy_to_backup(name)
            .await?
            .ok_or_else(|| AtlasError::FileNotFound(name.to_string()))?;
        fs::remove_file(self.path_for(name)).await?;
        tracing::info!("Deleted {}, backup {}", name, backup);
        Ok(backup)
    }

    /// Copy the current file into the backup directory
    ///
    /// Returns `None` when there is nothing to back up.
    pub async fn backup(&self, name: &DataFileName) -> Result<Option<String>> {
        let _guard = self.write_lock.lock().await;
        self.copy_to_backup(name).await
    }

    /// Caller holds the write lock. Backups taken within the same
    /// millisecond get a `-1`, `-2`, ... suffix.
    async fn copy_to_backup(&self, name: &DataFileName) -> Result<Option<String>> {
        let source = self.path_for(name);
        if !fs::try_exists(&source).await? {
            return Ok(None);
        }

        fs::create_dir_all(&self.backup_dir).await?;
        let base = backup_file_name(name, Utc::now());
        let mut backup_name = base.clone();
        let mut suffix = 0;
        while fs::try_exists(self.backup_dir.join(&backup_name)).await? {
            suffix += 1;
            backup_name = format!("{}-{}", base, suffix);
        }
        fs::copy(&source, self.backup_dir.join(&backup_name)).await?;
        tracing::debug!("Backed up {} to {}", name, backup_name);
        Ok(Some(backup_name))
    }

    /// Backups taken of one file, oldest first
    pub async fn backups_of(&self, name: &DataFileName) -> Result<Vec<String>> {
        let prefix = format!("{}.bak-", name);
        let mut backups = Vec::new();
        let mut entries = match fs::read_dir(&self.backup_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(backups),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if file_name.starts_with(&prefix) {
                backups.push(file_name);
            }
        }
        backups.sort();
        Ok(backups)
    }

    /// Write `content` to a fresh temp file next to `name`
    async fn write_temp(&self, name: &DataFileName, content: &str) -> Result<PathBuf> {
        let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let temp = self
            .data_dir
            .join(format!("{}.{}-{}.tmp", name, std::process::id(), seq));
        fs::write(&temp, content).await?;
        Ok(temp)
    }

    async fn atomic_write(&self, name: &DataFileName, content: &str) -> Result<()> {
        let temp = self.write_temp(name, content).await?;
        if let Err(e) = fs::rename(&temp, self.path_for(name)).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }
}
