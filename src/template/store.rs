//! Template Store - persist and retrieve named templates as YAML files
//!
//! One file per template at `{dir}/{name}.yaml`. The directory is created on
//! first store. There is no locking: concurrent writers to the same name race
//! and the last write wins.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use super::{MERGE_KEY, TemplateError, TemplateValue};

/// Directory used when none is configured
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// File extension for stored templates
pub const TEMPLATE_EXTENSION: &str = "yaml";

/// Deepest container nesting accepted by `store`; stays below the YAML
/// parser's recursion limit so anything stored can be loaded again.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Stores and loads templates within a single directory
#[derive(Debug, Clone)]
pub struct TemplateStore {
    /// Directory holding `{name}.yaml` files
    dir: PathBuf,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_DIR)
    }
}

impl TemplateStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Get the templates directory path
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the full path for a template by name
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, TEMPLATE_EXTENSION))
    }

    /// Store a template, overwriting any previous file of the same name.
    ///
    /// Returns `true` on success. Every failure is logged and reported as `false`.
    pub fn store(&self, data: &TemplateValue, name: &str) -> bool {
        match self.try_store(data, name) {
            Ok(path) => {
                info!("Template '{}' stored successfully at '{}'", name, path.display());
                true
            }
            Err(e) => {
                error!("{} fault while storing template '{}': {}", e.kind(), name, e);
                false
            }
        }
    }

    /// Load a template by name.
    ///
    /// Returns `None` when the file is absent (logged at info level) or when it
    /// cannot be read or parsed (logged at error level).
    pub fn load(&self, name: &str) -> Option<TemplateValue> {
        match self.try_load(name) {
            Ok(value) => {
                info!("Template '{}' loaded successfully from '{}'", name, self.path_for(name).display());
                Some(value)
            }
            Err(e) if e.is_not_found() => {
                info!("{}", e);
                None
            }
            Err(e) => {
                error!("{} fault while loading template '{}': {}", e.kind(), name, e);
                None
            }
        }
    }

    /// Fallible form of [`store`](Self::store); returns the written path
    pub fn try_store(&self, data: &TemplateValue, name: &str) -> Result<PathBuf, TemplateError> {
        validate_name(name)?;

        if data.depth() > MAX_NESTING_DEPTH {
            return Err(TemplateError::TooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        // A literal `<<` would be read back as a merge
        if data.contains_merge_key() {
            return Err(TemplateError::ReservedKey(MERGE_KEY.to_string()));
        }
        let yaml = data.to_yaml_string()?;

        fs::create_dir_all(&self.dir).map_err(|e| TemplateError::io(&self.dir, e))?;
        let path = self.path_for(name);
        fs::write(&path, yaml).map_err(|e| TemplateError::io(&path, e))?;

        Ok(path)
    }

    /// Fallible form of [`load`](Self::load)
    pub fn try_load(&self, name: &str) -> Result<TemplateValue, TemplateError> {
        validate_name(name)?;

        let path = self.path_for(name);
        if !path.exists() {
            return Err(TemplateError::NotFound {
                name: name.to_string(),
                path,
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| TemplateError::io(&path, e))?;
        Ok(TemplateValue::from_yaml_str(&content)?)
    }

    /// Check if a template exists on disk
    pub fn exists(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.path_for(name).is_file()
    }

    /// List all stored template names, sorted. A missing directory is empty.
    pub fn list(&self) -> Result<Vec<String>, TemplateError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| TemplateError::io(&self.dir, e))?;
        template_names(&self.dir, entries.map(|entry| entry.map(|e| e.path())))
    }
}

/// Collect sorted template names from directory entries; an unreadable entry
/// fails the whole listing
fn template_names<I>(dir: &Path, paths: I) -> Result<Vec<String>, TemplateError>
where
    I: IntoIterator<Item = std::io::Result<PathBuf>>,
{
    let mut names = Vec::new();
    for path in paths {
        let path = path.map_err(|e| TemplateError::io(dir, e))?;
        if path.is_file()
            && path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION)
            && let Some(stem) = path.file_stem()
            && let Some(name) = stem.to_str()
        {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

/// Reject names that are empty or could resolve outside the store directory
fn validate_name(name: &str) -> Result<(), TemplateError> {
    let bad = name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(TemplateError::InvalidName(name.to_string()));
    }
    Ok(())
}
