//! Key-value storage collaborators.
//!
//! The engine only ever needs `load(key)` and `save(key, bytes)`.
//! [`FileStore`] keeps one checksummed file per key; [`MemoryStore`] keeps
//! everything in process and is shared between clones.

use crate::core::constants::SAVE_VERSION_MAGIC;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors that can occur while reading or writing saves.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save data corrupted: {0}")]
    Corrupted(String),

    #[error("Invalid save file header")]
    InvalidHeader,
}

/// The storage medium the engine persists through.
pub trait KeyValueStore: Send + Sync {
    /// Returns the bytes stored under `key`, or `None` if absent.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores `bytes` under `key`, replacing any previous value.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).save(key, bytes)
    }
}

/// In-process store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A panicked writer cannot leave a half-written entry behind
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.entries().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

const MAGIC_LEN: usize = 8;
const LENGTH_LEN: usize = 4;
const CHECKSUM_LEN: usize = 32;

/// Wraps a payload in the on-disk frame.
///
/// Layout:
/// - Version magic (8 bytes, little endian)
/// - Payload length (4 bytes, little endian)
/// - Payload
/// - SHA256 over everything above (32 bytes)
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, StoreError> {
    let payload_len = u32::try_from(payload.len())
        .map_err(|_| StoreError::Corrupted("payload too large".to_string()))?;

    let mut frame = Vec::with_capacity(MAGIC_LEN + LENGTH_LEN + payload.len() + CHECKSUM_LEN);
    frame.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
    frame.extend_from_slice(&payload_len.to_le_bytes());
    frame.extend_from_slice(payload);

    let checksum = Sha256::digest(&frame);
    frame.extend_from_slice(&checksum);
    Ok(frame)
}

/// Verifies a frame and returns its payload.
pub fn decode_frame(frame: &[u8]) -> Result<Vec<u8>, StoreError> {
    if frame.len() < MAGIC_LEN + LENGTH_LEN + CHECKSUM_LEN {
        return Err(StoreError::InvalidHeader);
    }

    let (magic_bytes, rest) = frame.split_at(MAGIC_LEN);
    let mut magic = [0u8; MAGIC_LEN];
    magic.copy_from_slice(magic_bytes);
    if u64::from_le_bytes(magic) != SAVE_VERSION_MAGIC {
        return Err(StoreError::InvalidHeader);
    }

    let (length_bytes, rest) = rest.split_at(LENGTH_LEN);
    let mut length = [0u8; LENGTH_LEN];
    length.copy_from_slice(length_bytes);
    let payload_len = u32::from_le_bytes(length) as usize;

    if rest.len() != payload_len + CHECKSUM_LEN {
        return Err(StoreError::Corrupted(format!(
            "expected {} payload bytes, found {}",
            payload_len,
            rest.len().saturating_sub(CHECKSUM_LEN)
        )));
    }

    let (payload, stored_checksum) = rest.split_at(payload_len);
    let computed = Sha256::digest(&frame[..frame.len() - CHECKSUM_LEN]);
    if stored_checksum != computed.as_slice() {
        return Err(StoreError::Corrupted("checksum mismatch".to_string()));
    }

    Ok(payload.to_vec())
}

/// One framed file per key under a save directory.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// reader sees either the previous complete save or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Opens the store in `~/.hero-idle/`.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::new(default_save_dir()?)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.sav", key))
    }
}

/// `~/.hero-idle/`
pub fn default_save_dir() -> Result<PathBuf, StoreError> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(".hero-idle"))
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let frame = match fs::read(self.path_for(key)) {
            Ok(frame) => frame,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode_frame(&frame).map(Some)
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let frame = encode_frame(bytes)?;
        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{}.sav.tmp", key));

        let mut file = fs::File::create(&tmp)?;
        file.write_all(&frame)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &target)?;
        Ok(())
    }
}
