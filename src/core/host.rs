//! The host runtime seam.
//!
//! The loader never owns the symbol table or the set of included files. It
//! asks the host three things: does a file exist, include it once, and is a
//! symbol now defined. Hosts may re-enter the hook stack from inside
//! `include_once` (a file referencing another unknown type), so every method
//! takes `&self` and hosts keep their own state behind interior mutability.

use crate::core::error::LoadError;
use crate::core::namespace::without_leading_separator;
use rustc_hash::FxHashSet;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

pub trait SymbolHost {
    fn file_exists(&self, file: &Path) -> bool {
        file.is_file()
    }

    /// Execute `file` unless it was already included. Errors are fatal for
    /// the symbol reference that triggered them.
    fn include_once(&self, file: &Path) -> Result<(), LoadError>;

    /// Whether `name` is a defined type or interface.
    fn is_defined(&self, name: &str) -> bool;
}

impl<H: SymbolHost + ?Sized> SymbolHost for &H {
    fn file_exists(&self, file: &Path) -> bool {
        (**self).file_exists(file)
    }

    fn include_once(&self, file: &Path) -> Result<(), LoadError> {
        (**self).include_once(file)
    }

    fn is_defined(&self, name: &str) -> bool {
        (**self).is_defined(name)
    }
}

/// Bookkeeping for hosts: defined symbols and already-included files.
///
/// Symbol names are stored without a leading namespace separator, so
/// `\App\Db` and `App\Db` name the same entry.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: RefCell<FxHashSet<String>>,
    included: RefCell<FxHashSet<PathBuf>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&self, name: &str) {
        self.symbols.borrow_mut().insert(without_leading_separator(name).to_string());
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.symbols.borrow().contains(without_leading_separator(name))
    }

    /// Records `file` as included. Returns false if it already was.
    pub fn mark_included(&self, file: &Path) -> bool {
        self.included.borrow_mut().insert(file.to_path_buf())
    }

    pub fn included_count(&self) -> usize {
        self.included.borrow().len()
    }
}
