//! Dispatcher: turns a symbol name into include attempts against the roots.
//!
//! # Search order
//!
//! ```text
//! load("App\Plugins\Live\Visitor\Log")
//!   ├── resolve   → Live/Visitor/Log
//!   ├── classify  → Plugin
//!   ├── plugins/Live/Visitor/Log.inc            (family root)
//!   └── own marker present, truncation fallback:
//!         core/Live/Visitor/Log.inc              (plugins pair already tried)
//!         core/Live/Visitor.inc, plugins/Live/Visitor.inc
//!         core/Live.inc,         plugins/Live.inc
//!
//! load("Zend_Db_Table")
//!   └── libs/Zend/Db/Table.inc                   (single attempt, no fallback)
//! ```
//!
//! The fallback exists for files that declare several symbols: a file named
//! after a containing path (`Live.inc`) may define `App\Live\Visitor`.
//!
//! An attempt succeeds only if the host reports the requested symbol as
//! defined after including the file. Including a file that defines something
//! else is a miss.

use crate::core::config::LoaderConfig;
use crate::core::error::LoadError;
use crate::core::family::Family;
use crate::core::host::SymbolHost;
use crate::core::namespace::{CandidatePath, Namespace};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

const TARGET: &str = "symload::loader";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RootKind {
    Core,
    Plugins,
    Vendor,
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RootKind::Core => "core",
            RootKind::Plugins => "plugins",
            RootKind::Vendor => "vendor",
        };
        f.write_str(s)
    }
}

/// The system's own roots, in fallback order. Never includes the current directory.
pub const OWN_ROOTS: [RootKind; 2] = [RootKind::Core, RootKind::Plugins];

/// One include attempt as seen by an observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub root: RootKind,
    pub path: CandidatePath,
    pub file: PathBuf,
    pub existed: bool,
    pub defined: bool,
}

/// Resolves and loads symbols for one installation.
///
/// Immutable after construction. All per-call state lives on the stack of
/// [`Loader::load_observed`], so the host may re-enter the loader from inside
/// an include.
#[derive(Debug, Clone)]
pub struct Loader {
    config: LoaderConfig,
    namespace: Namespace,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Result<Self, LoadError> {
        config.validate()?;
        let namespace = Namespace::from_config(&config);
        Ok(Self { config, namespace })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn root_dir(&self, root: RootKind) -> PathBuf {
        let dir = match root {
            RootKind::Core => &self.config.roots.core,
            RootKind::Plugins => &self.config.roots.plugins,
            RootKind::Vendor => &self.config.roots.vendor,
        };
        self.config.install_root.join(dir)
    }

    pub fn resolve(&self, name: &str) -> Result<CandidatePath, LoadError> {
        self.namespace.resolve(name)
    }

    pub fn classify(&self, name: &str) -> Family {
        self.namespace.classify(name)
    }

    /// Load `name`, returning whether it is defined afterwards.
    ///
    /// `Ok(false)` is an ordinary miss. Errors are an invalid name or a host
    /// failure while including an existing file.
    pub fn load<H: SymbolHost + ?Sized>(&self, host: &H, name: &str) -> Result<bool, LoadError> {
        self.load_observed(host, name, &mut |_: &Attempt| {})
    }

    /// Like [`Loader::load`], reporting every attempt that touched the filesystem.
    pub fn load_observed<H: SymbolHost + ?Sized>(
        &self,
        host: &H,
        name: &str,
        observer: &mut dyn FnMut(&Attempt),
    ) -> Result<bool, LoadError> {
        let path = self.namespace.resolve(name)?;
        let family = self.namespace.classify(name);
        tracing::trace!(target: TARGET, name, %path, %family, "classified");

        let first = match family {
            Family::Plugin => Some(RootKind::Plugins),
            Family::CoreNamespace => Some(RootKind::Core),
            Family::Foreign => None,
        };

        if let Some(root) = first {
            if self.try_load(host, name, root, &path, observer)? {
                return Ok(true);
            }
        }

        if !self.namespace.has_own_marker(name) {
            return self.try_load(host, name, RootKind::Vendor, &path, observer);
        }

        let mut cursor = path.clone();
        loop {
            for root in OWN_ROOTS {
                // Each (root, path) pair is tried once per call.
                if first == Some(root) && cursor == path {
                    continue;
                }
                if self.try_load(host, name, root, &cursor, observer)? {
                    return Ok(true);
                }
            }

            cursor = cursor.truncated();
            if cursor.is_empty() {
                tracing::debug!(target: TARGET, name, "not found in any own root");
                return Ok(false);
            }
            tracing::debug!(target: TARGET, name, path = %cursor, "retrying with containing path");
        }
    }

    fn try_load<H: SymbolHost + ?Sized>(
        &self,
        host: &H,
        name: &str,
        root: RootKind,
        path: &CandidatePath,
        observer: &mut dyn FnMut(&Attempt),
    ) -> Result<bool, LoadError> {
        let Some(file) = path.file_under(&self.root_dir(root), &self.config.source_extension)
        else {
            return Ok(false);
        };

        let existed = host.file_exists(&file);
        let defined = if existed {
            host.include_once(&file)?;
            host.is_defined(name)
        } else {
            false
        };

        tracing::debug!(
            target: TARGET,
            name,
            %root,
            file = %file.display(),
            existed,
            defined,
            "attempt"
        );

        observer(&Attempt {
            root,
            path: path.clone(),
            file,
            existed,
            defined,
        });
        Ok(defined)
    }
}
