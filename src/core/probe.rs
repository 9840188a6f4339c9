//! Dry-run host used by the `plan` and `locate` commands.
//!
//! Includes nothing. In plan mode no symbol is ever defined, so the loader
//! walks its whole search order. In locate mode the first existing file
//! counts as a definition and the walk stops there.

use crate::core::error::LoadError;
use crate::core::host::SymbolHost;
use crate::core::loader::{Attempt, Loader};
use std::cell::Cell;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct ProbeHost {
    stop_at_first_file: bool,
    hit: Cell<bool>,
}

impl ProbeHost {
    pub fn plan() -> Self {
        Self::default()
    }

    pub fn locate() -> Self {
        Self {
            stop_at_first_file: true,
            hit: Cell::new(false),
        }
    }
}

impl SymbolHost for ProbeHost {
    fn include_once(&self, _file: &Path) -> Result<(), LoadError> {
        self.hit.set(true);
        Ok(())
    }

    fn is_defined(&self, _name: &str) -> bool {
        self.stop_at_first_file && self.hit.get()
    }
}

/// Every attempt the loader would make for `name`, in order.
pub fn plan(loader: &Loader, name: &str) -> Result<Vec<Attempt>, LoadError> {
    let mut attempts = Vec::new();
    loader.load_observed(&ProbeHost::plan(), name, &mut |a: &Attempt| attempts.push(a.clone()))?;
    Ok(attempts)
}

/// The first existing file the loader would include for `name`.
pub fn locate(loader: &Loader, name: &str) -> Result<Option<PathBuf>, LoadError> {
    let mut found = None;
    loader.load_observed(&ProbeHost::locate(), name, &mut |a: &Attempt| {
        if a.existed && found.is_none() {
            found = Some(a.file.clone());
        }
    })?;
    Ok(found)
}
