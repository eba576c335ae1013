//! Where message resource files come from.

use std::io::ErrorKind;
use std::path::PathBuf;

use itemservice_core::error::ItemServiceError;

/// Resource files compiled into the binary, from `messages/` in the repo root.
///
/// Each entry is `(file_name, content)`.
const BUNDLED_RESOURCES: &[(&str, &str)] = &[
    (
        "messages.properties",
        include_str!("../../../messages/messages.properties"),
    ),
    (
        "messages_en.properties",
        include_str!("../../../messages/messages_en.properties"),
    ),
    (
        "errors.properties",
        include_str!("../../../messages/errors.properties"),
    ),
    (
        "errors_en.properties",
        include_str!("../../../messages/errors_en.properties"),
    ),
];

/// A read-only set of named resource files.
pub trait ResourceSource {
    /// Human-readable origin, for logs and errors.
    fn describe(&self) -> String;

    /// Raw bytes of `file_name`, or `None` if the source has no such file.
    fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>, ItemServiceError>;
}

/// Files in a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ResourceSource for DirectorySource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>, ItemServiceError> {
        let path = self.dir.join(file_name);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ItemServiceError::Catalog(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }
}

/// Files embedded at compile time.
#[derive(Debug, Clone, Copy)]
pub struct BundledSource {
    files: &'static [(&'static str, &'static str)],
}

impl BundledSource {
    pub fn new(files: &'static [(&'static str, &'static str)]) -> Self {
        Self { files }
    }
}

impl Default for BundledSource {
    fn default() -> Self {
        Self::new(BUNDLED_RESOURCES)
    }
}

impl ResourceSource for BundledSource {
    fn describe(&self) -> String {
        "bundled resources".to_string()
    }

    fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>, ItemServiceError> {
        Ok(self
            .files
            .iter()
            .find(|(name, _)| *name == file_name)
            .map(|(_, content)| content.as_bytes().to_vec()))
    }
}
