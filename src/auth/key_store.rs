//! File-backed storage for a channel API key.
//!
//! The file holds the key and nothing else: no trailing newline is written and
//! none is stripped on read.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::auth::ApiKey;
use crate::error::ThingSpeakError;

/// A plain-text file holding a single API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    /// Create a key-store at the given path. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the key back verbatim.
    ///
    /// A missing file is reported as [`ThingSpeakError::KeyStoreNotFound`].
    pub fn read(&self) -> Result<ApiKey, ThingSpeakError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(ApiKey::new(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::error!(path = %self.path.display(), "no ThingSpeak API key file found");
                Err(ThingSpeakError::KeyStoreNotFound {
                    path: self.path.clone(),
                })
            }
            Err(source) => Err(ThingSpeakError::KeyStore {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Overwrite the file with the key.
    pub fn write(&self, key: &ApiKey) -> Result<(), ThingSpeakError> {
        std::fs::write(&self.path, key.expose_secret()).map_err(|source| {
            ThingSpeakError::KeyStore {
                path: self.path.clone(),
                source,
            }
        })
    }
}

/// Resolve the key a channel client authenticates with.
///
/// An explicit key wins and is persisted to `file` when one is given.
/// Otherwise the key is read from `file`. With neither, construction fails.
pub fn resolve_api_key(
    api_key: Option<ApiKey>,
    file: Option<&Path>,
) -> Result<ApiKey, ThingSpeakError> {
    match (api_key, file) {
        (Some(key), Some(path)) => {
            KeyStore::new(path).write(&key)?;
            Ok(key)
        }
        (Some(key), None) => Ok(key),
        (None, Some(path)) => KeyStore::new(path).read(),
        (None, None) => {
            tracing::error!("no API key or API key file passed");
            Err(ThingSpeakError::Configuration(
                "an API key or an API key file is required".to_string(),
            ))
        }
    }
}
