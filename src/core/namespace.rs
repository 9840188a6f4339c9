//! Symbol name to candidate path mapping.
//!
//! Names use `\` as the namespace separator. The legacy prefixed form
//! (`Legacy_Module_Name`) treats `_` as a separator too, so both map onto the
//! same directory layout:
//!
//! ```text
//! App\Plugins\Live\Visitor  ->  Live/Visitor
//! App\Db\Adapter            ->  Db/Adapter
//! Zend_Db_Table             ->  Zend/Db/Table
//! App                       ->  App
//! ```

use crate::core::config::LoaderConfig;
use crate::core::error::LoadError;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Namespace separator used in symbol names.
pub const NS_SEPARATOR: char = '\\';

/// Separator used in candidate paths.
pub const PATH_SEPARATOR: char = '/';

static VALID_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\\]+$").expect("static symbol name pattern"));

pub fn is_valid_name(name: &str) -> bool {
    VALID_NAME.is_match(name)
}

/// `\App\Db` and `App\Db` name the same symbol. Only one separator is dropped.
pub fn without_leading_separator(name: &str) -> &str {
    name.strip_prefix(NS_SEPARATOR).unwrap_or(name)
}

/// A relative, extension-less path derived from a symbol name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CandidatePath(String);

impl CandidatePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-empty path segments. Leading or doubled separators yield no segment.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PATH_SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Drops the final non-empty segment along with any trailing separators,
    /// so the result always names a different file. A path with a single
    /// segment truncates to empty.
    pub fn truncated(&self) -> CandidatePath {
        let trimmed = self.0.trim_end_matches(PATH_SEPARATOR);
        match trimmed.rfind(PATH_SEPARATOR) {
            Some(idx) => {
                CandidatePath(trimmed[..idx].trim_end_matches(PATH_SEPARATOR).to_string())
            }
            None => CandidatePath(String::new()),
        }
    }

    /// `<root>/<segments...>.<extension>`, or `None` when there is no segment
    /// to name a file after.
    pub fn file_under(&self, root: &Path, extension: &str) -> Option<PathBuf> {
        let segments: Vec<&str> = self.segments().collect();
        let (last, rest) = segments.split_last()?;

        let mut file = rest.iter().fold(root.to_path_buf(), |mut acc, segment| {
            acc.push(segment);
            acc
        });
        file.push(format!("{}.{}", last, extension));
        Some(file)
    }
}

impl fmt::Display for CandidatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The system's own namespace: its top-level name and the plugin segment below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    top: String,
    plugins: String,
}

impl Namespace {
    pub fn new(top: &str, plugins: &str) -> Self {
        Self {
            top: top.to_string(),
            plugins: plugins.to_string(),
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(&config.top_namespace, &config.plugins_segment)
    }

    pub fn top(&self) -> &str {
        &self.top
    }

    pub fn plugins(&self) -> &str {
        &self.plugins
    }

    /// Map a symbol name to its candidate path.
    ///
    /// Fails with [`LoadError::InvalidName`] for anything outside
    /// `[A-Za-z0-9_\\]`, including the empty name.
    pub fn resolve(&self, name: &str) -> Result<CandidatePath, LoadError> {
        if !is_valid_name(name) {
            return Err(LoadError::InvalidName(name.to_string()));
        }

        let path = without_leading_separator(name)
            .replace('_', "/")
            .replace(NS_SEPARATOR, "/");

        // The root symbol's file is named after the system itself.
        if path == self.top {
            return Ok(CandidatePath(path));
        }

        let path = strip_segment_prefix(&path, &self.top);
        let path = strip_segment_prefix(path, &self.plugins);
        Ok(CandidatePath(path.to_string()))
    }
}

fn strip_segment_prefix<'a>(path: &'a str, segment: &str) -> &'a str {
    path.strip_prefix(segment)
        .and_then(|rest| rest.strip_prefix(PATH_SEPARATOR))
        .unwrap_or(path)
}
