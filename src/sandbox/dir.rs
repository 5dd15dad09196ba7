//! Directory-backed sandbox.
//!
//! Wraps the working directory a prior execution step populated and exposes
//! it through the read-only [`Sandbox`] capability. Names are resolved
//! strictly inside the directory; traversal attempts are rejected.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::sandbox::{BufLineStream, LineStream, Sandbox};
use crate::types::{EvalError, Result};

/// Sandbox view over a directory on the host filesystem.
pub struct DirSandbox {
    /// Unique identifier for this sandbox instance
    instance_id: String,
    /// Directory holding the evaluation attempt's files
    root: PathBuf,
}

impl DirSandbox {
    /// Open a sandbox view over an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(EvalError::Sandbox(format!(
                "sandbox root is not a directory: {}",
                root.display()
            )));
        }
        let instance_id = uuid::Uuid::new_v4().to_string();
        debug!("opened sandbox {} at {}", instance_id, root.display());
        Ok(Self { instance_id, root })
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Resolve a sandbox-relative name, rejecting anything that could
    /// escape the root (absolute paths, `..`, prefixes).
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(EvalError::Sandbox("empty file name".to_string()));
        }
        let path = Path::new(name);
        if path.is_absolute() {
            return Err(EvalError::Sandbox(format!(
                "absolute path escapes sandbox: {name}"
            )));
        }
        for component in path.components() {
            match component {
                Component::Normal(_) => {}
                _ => {
                    return Err(EvalError::Sandbox(format!(
                        "path traversal rejected: {name}"
                    )))
                }
            }
        }
        Ok(self.root.join(path))
    }
}

impl Sandbox for DirSandbox {
    fn file_exists(&self, name: &str) -> Result<bool> {
        let path = self.resolve(name)?;
        match fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(EvalError::Io(e)),
        }
    }

    fn open_line_stream(&self, name: &str) -> Result<Box<dyn LineStream>> {
        let path = self.resolve(name)?;
        let file = File::open(&path)?;
        Ok(Box::new(BufLineStream::new(BufReader::new(file))))
    }
}
