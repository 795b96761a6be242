//! [`FsLedger`]: the filesystem implementation of [`RequestLedger`].

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use cardreq_core::{
  ledger::{LedgerEntry, RequestLedger},
  record::RequestRecord,
};
use chrono::Utc;
use tokio::{
  fs::{self, OpenOptions},
  io::AsyncWriteExt as _,
};
use tracing::debug;

use crate::{Error, Result};

/// File extension of every ledger entry.
const ENTRY_EXTENSION: &str = ".txt";

/// A request ledger rooted at a single directory.
///
/// The directory is created lazily on the first append. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct FsLedger {
  root: PathBuf,
}

impl FsLedger {
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  pub fn root(&self) -> &Path { &self.root }

  fn entry_path(&self, oib: &str, millis: i64) -> PathBuf {
    self.root.join(format!("{oib}_{millis}{ENTRY_EXTENSION}"))
  }

  async fn read_entry(&self, path: &Path) -> Result<RequestRecord> {
    let content = fs::read_to_string(path)
      .await
      .map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
    RequestRecord::from_entry(&content)
      .map_err(|source| Error::Entry { path: path.to_path_buf(), source })
  }
}

impl RequestLedger for FsLedger {
  type Error = Error;

  async fn append(&self, record: &RequestRecord) -> Result<PathBuf> {
    fs::create_dir_all(&self.root)
      .await
      .map_err(|source| Error::CreateDir { path: self.root.clone(), source })?;

    let entry = record.to_entry();
    let mut millis = Utc::now().timestamp_millis();

    // Two appends within the same millisecond would share a name; move to
    // the next free one rather than overwrite.
    let (path, mut file) = loop {
      let path = self.entry_path(&record.oib, millis);
      match OpenOptions::new().write(true).create_new(true).open(&path).await {
        Ok(file) => break (path, file),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => millis += 1,
        Err(source) => return Err(Error::Write { path, source }),
      }
    };

    file
      .write_all(entry.as_bytes())
      .await
      .map_err(|source| Error::Write { path: path.clone(), source })?;
    file
      .flush()
      .await
      .map_err(|source| Error::Write { path: path.clone(), source })?;

    debug!(path = %path.display(), "ledger entry appended");
    Ok(path)
  }

  async fn rewrite(&self, location: &Path, record: &RequestRecord) -> Result<PathBuf> {
    fs::write(location, record.to_entry())
      .await
      .map_err(|source| Error::Write { path: location.to_path_buf(), source })?;
    debug!(path = %location.display(), "ledger entry rewritten");
    Ok(location.to_path_buf())
  }

  async fn list_locations(&self, oib: &str) -> Result<Vec<PathBuf>> {
    let list_err = |source| Error::List { path: self.root.clone(), source };

    let mut dir = match fs::read_dir(&self.root).await {
      Ok(dir) => dir,
      Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
      Err(err) => return Err(list_err(err)),
    };

    let mut locations = Vec::new();
    while let Some(entry) = dir.next_entry().await.map_err(list_err)? {
      let name = entry.file_name();
      let Some(name) = name.to_str() else { continue };
      if !name.starts_with(oib) || !name.ends_with(ENTRY_EXTENSION) {
        continue;
      }
      if entry.file_type().await.map_err(list_err)?.is_file() {
        locations.push(entry.path());
      }
    }

    locations.sort();
    Ok(locations)
  }

  async fn load_active(&self, oib: &str) -> Result<Vec<LedgerEntry>> {
    let mut active = Vec::new();
    for location in self.list_locations(oib).await? {
      let record = self.read_entry(&location).await?;
      if record.status.is_active() {
        active.push(LedgerEntry { location, record });
      }
    }
    Ok(active)
  }
}
