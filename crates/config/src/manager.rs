//! File-backed configuration manager.
//!
//! Responsibilities:
//! - Load a config file into a shared `Store`, selecting the codec by extension
//!   and falling back to content sniffing.
//! - Remember where the configuration came from so it can be saved back in place.
//! - Save the store's exported document atomically in any supported format.
//! - Apply environment overrides through an `EnvOverlay`.
//!
//! Does NOT handle:
//! - Locking (the `Store` guards its own state).
//! - Flattening details (see `flatten.rs`).
//!
//! Invariants:
//! - All file I/O, decoding and encoding happen outside the store lock.
//! - A failed load leaves both the store and the remembered source untouched.
//! - A failed save leaves the target file untouched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::env::EnvOverlay;
use crate::error::ConfigError;
use crate::format::{Codec, Format, sniff};
use crate::persistence::{atomic_write, read_config_bytes};
use crate::store::Store;
use crate::value::NestedValue;

/// Where the current configuration was loaded from.
#[derive(Clone)]
struct Source {
    path: PathBuf,
    format: Option<Format>,
    codec: Arc<dyn Codec>,
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("path", &self.path)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// Loads, updates and saves one configuration file.
///
/// The store is shared: clone [`ConfigManager::store`] into readers while the
/// manager keeps ownership of reloads and saves.
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    store: Arc<Store>,
    source: Option<Source>,
}

/// Reads and decodes `path` without loading it into a store.
///
/// `forced` overrides detection. Otherwise the format is chosen from the
/// extension, or sniffed from the contents in the order JSON, TOML, YAML, INI
/// when the extension is missing or unknown.
///
/// # Errors
/// - `ConfigError::Io` if the file cannot be read.
/// - `ConfigError::Decode` if the extension names a format the contents do not match.
/// - `ConfigError::UnrecognizedContent` if sniffing finds no matching format.
pub fn read_document(
    path: &Path,
    forced: Option<Format>,
) -> Result<(Format, NestedValue), ConfigError> {
    let bytes = read_config_bytes(path)?;
    if let Some(format) = forced {
        return Ok((format, format.decode(&bytes)?));
    }
    match Format::from_path(path) {
        Ok(format) => Ok((format, format.decode(&bytes)?)),
        Err(ConfigError::UnsupportedFormat { extension }) => {
            tracing::debug!(
                path = %path.display(),
                extension = %extension,
                "Unknown config extension, detecting format from content"
            );
            sniff(&bytes).ok_or_else(|| ConfigError::UnrecognizedContent {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(e),
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager around an existing shared store.
    pub fn with_store(store: Arc<Store>) -> Self {
        Self {
            store,
            source: None,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_ref().map(|s| s.path.as_path())
    }

    /// Built-in format of the loaded file; `None` if nothing is loaded or a custom codec was used.
    pub fn source_format(&self) -> Option<Format> {
        self.source.as_ref().and_then(|s| s.format)
    }

    /// Loads `path` into the store, resolving the format as [`read_document`] does.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<Format, ConfigError> {
        let path = path.as_ref();
        let (format, doc) = read_document(path, None)?;
        self.install(path, Some(format), Arc::new(format), &doc);
        Ok(format)
    }

    /// Loads `path` with an explicitly chosen built-in format.
    pub fn load_file_as(&mut self, path: impl AsRef<Path>, format: Format) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let (_, doc) = read_document(path, Some(format))?;
        self.install(path, Some(format), Arc::new(format), &doc);
        Ok(())
    }

    /// Loads `path` with a caller-supplied codec, which is also used by [`save`](Self::save).
    pub fn load_file_with(
        &mut self,
        path: impl AsRef<Path>,
        codec: Arc<dyn Codec>,
    ) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let bytes = read_config_bytes(path)?;
        let doc = codec.decode(&bytes)?;
        self.install(path, None, codec, &doc);
        Ok(())
    }

    /// Decodes in-memory bytes into the store without touching the remembered source.
    pub fn load_bytes(&self, bytes: &[u8], codec: &dyn Codec) -> Result<(), ConfigError> {
        let doc = codec.decode(bytes)?;
        self.store.load(&doc);
        tracing::debug!(format = codec.name(), keys = self.store.len(), "Config loaded from memory");
        Ok(())
    }

    fn install(&mut self, path: &Path, format: Option<Format>, codec: Arc<dyn Codec>, doc: &NestedValue) {
        self.store.load(doc);
        tracing::debug!(
            path = %path.display(),
            format = codec.name(),
            keys = self.store.len(),
            "Config loaded"
        );
        self.source = Some(Source {
            path: path.to_path_buf(),
            format,
            codec,
        });
    }

    /// Applies environment overrides to the store.
    pub fn apply_env(&self, overlay: &EnvOverlay) -> Result<Vec<String>, ConfigError> {
        overlay.apply(&self.store)
    }

    /// Exports the store and encodes it with `codec`.
    pub fn render(&self, codec: &dyn Codec) -> Result<Vec<u8>, ConfigError> {
        let doc = self.store.export()?;
        codec.encode(&doc)
    }

    /// Saves back to the loaded file in its original format.
    ///
    /// # Errors
    /// Returns `ConfigError::NoSourcePath` if nothing was loaded from a file.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let source = self.source.as_ref().ok_or(ConfigError::NoSourcePath)?;
        self.write(&source.path, source.codec.as_ref())?;
        Ok(source.path.clone())
    }

    /// Saves to `path`, choosing the format from its extension.
    ///
    /// Falls back to the loaded file's format when `path` has no known extension.
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<Format, ConfigError> {
        let path = path.as_ref();
        let format = match (Format::from_path(path), self.source_format()) {
            (Ok(format), _) => format,
            (Err(_), Some(format)) => format,
            (Err(e), None) => return Err(e),
        };
        self.write(path, &format)?;
        Ok(format)
    }

    pub fn save_file_as(&self, path: impl AsRef<Path>, format: Format) -> Result<(), ConfigError> {
        self.write(path.as_ref(), &format)
    }

    pub fn save_file_with(&self, path: impl AsRef<Path>, codec: &dyn Codec) -> Result<(), ConfigError> {
        self.write(path.as_ref(), codec)
    }

    fn write(&self, path: &Path, codec: &dyn Codec) -> Result<(), ConfigError> {
        let bytes = self.render(codec)?;
        atomic_write(path, &bytes)?;
        tracing::debug!(path = %path.display(), format = codec.name(), "Config written");
        Ok(())
    }
}
