//! Test host: a miniature runtime whose "source files" are line scripts.
//!
//! ```text
//! use App\Db          resolve another symbol through the hook stack first
//! declare App\Live    define a symbol
//! fail                make the include fail
//! ```

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use symload::core::config::LoaderConfig;
use symload::core::error::LoadError;
use symload::core::loader::Loader;
use symload::{HookStack, SymbolHost, SymbolTable};
use tempfile::TempDir;

pub struct Install {
    pub dir: TempDir,
}

impl Install {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `<root>/<rel>` with one script line per entry.
    pub fn file(&self, rel: &str, lines: &[&str]) -> PathBuf {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().expect("file has a parent")).expect("mkdir");
        fs::write(&path, lines.join("\n")).expect("write script");
        path
    }

    pub fn config(&self) -> LoaderConfig {
        LoaderConfig::for_root(self.root()).with_top_namespace("App")
    }

    pub fn loader(&self) -> Loader {
        Loader::new(self.config()).expect("valid config")
    }
}

#[derive(Default)]
pub struct Runtime {
    pub table: SymbolTable,
    pub hooks: HookStack,
    pub checks: RefCell<Vec<PathBuf>>,
    pub executed: RefCell<Vec<PathBuf>>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hooks(hooks: HookStack) -> Self {
        Self {
            hooks,
            ..Self::default()
        }
    }

    pub fn checked(&self) -> Vec<PathBuf> {
        self.checks.borrow().clone()
    }

    pub fn executed(&self) -> Vec<PathBuf> {
        self.executed.borrow().clone()
    }
}

impl SymbolHost for Runtime {
    fn file_exists(&self, file: &Path) -> bool {
        self.checks.borrow_mut().push(file.to_path_buf());
        file.is_file()
    }

    fn include_once(&self, file: &Path) -> Result<(), LoadError> {
        if !self.table.mark_included(file) {
            return Ok(());
        }
        self.executed.borrow_mut().push(file.to_path_buf());

        let script = fs::read_to_string(file)?;
        for line in script.lines() {
            let line = line.trim();
            if let Some(name) = line.strip_prefix("use ") {
                self.hooks.dispatch(self, name)?;
            } else if let Some(name) = line.strip_prefix("declare ") {
                self.table.define(name);
            } else if line == "fail" {
                return Err(LoadError::Host {
                    file: file.to_path_buf(),
                    message: "script failed".to_string(),
                });
            }
        }
        Ok(())
    }

    fn is_defined(&self, name: &str) -> bool {
        self.table.is_defined(name)
    }
}
