//! File-like build targets and prefix/suffix naming conventions.

use std::fmt;
use std::path::{Path, PathBuf};

/// A prefix/suffix naming convention, referenced indirectly through a pair
/// of environment variables.
///
/// The variables are resolved (with substitution) against a concrete
/// environment at query time, so chained conventions such as
/// `SHOBJPREFIX = $OBJPREFIX` follow the indirection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Affixes {
    prefix_var: &'static str,
    suffix_var: &'static str,
}

impl Affixes {
    /// Object files (`OBJPREFIX`/`OBJSUFFIX`).
    pub const OBJECT: Self = Self::new("OBJPREFIX", "OBJSUFFIX");
    /// Programs (`PROGPREFIX`/`PROGSUFFIX`).
    pub const PROGRAM: Self = Self::new("PROGPREFIX", "PROGSUFFIX");
    /// Static libraries (`LIBPREFIX`/`LIBSUFFIX`).
    pub const STATIC_LIB: Self = Self::new("LIBPREFIX", "LIBSUFFIX");
    /// Shared libraries (`SHLIBPREFIX`/`SHLIBSUFFIX`).
    pub const SHARED_LIB: Self = Self::new("SHLIBPREFIX", "SHLIBSUFFIX");
    /// Module-definition files (`WINDEFPREFIX`/`WINDEFSUFFIX`).
    pub const DEF_FILE: Self = Self::new("WINDEFPREFIX", "WINDEFSUFFIX");

    /// Create a convention referencing the given variable pair.
    #[must_use]
    pub const fn new(prefix_var: &'static str, suffix_var: &'static str) -> Self {
        Self {
            prefix_var,
            suffix_var,
        }
    }

    /// Variable holding the prefix.
    #[must_use]
    pub const fn prefix_var(&self) -> &'static str {
        self.prefix_var
    }

    /// Variable holding the suffix.
    #[must_use]
    pub const fn suffix_var(&self) -> &'static str {
        self.suffix_var
    }
}

/// A file-like entity in a target or source list.
///
/// Carries a resolvable path and supports matching and renaming by
/// prefix/suffix convention. Matching is on the file name only; the parent
/// directory is preserved across renames.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BuildPath {
    path: PathBuf,
}

impl BuildPath {
    /// Wrap a path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The underlying path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component, empty for pathological paths like `..`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// Whether the file name carries the given (already resolved) affixes.
    #[must_use]
    pub fn has_affixes(&self, prefix: &str, suffix: &str) -> bool {
        let name = self.file_name();
        name.starts_with(prefix) && name.ends_with(suffix)
    }

    /// Derive a sibling path by swapping one resolved affix pair for
    /// another. Affixes not present on the name are simply not stripped.
    #[must_use]
    pub fn with_affixes(
        &self,
        old_prefix: &str,
        old_suffix: &str,
        new_prefix: &str,
        new_suffix: &str,
    ) -> Self {
        let name = self.file_name();
        let stem = name.strip_prefix(old_prefix).unwrap_or(name);
        let stem = stem.strip_suffix(old_suffix).unwrap_or(stem);
        let renamed = format!("{new_prefix}{stem}{new_suffix}");
        let path = self
            .path
            .parent()
            .map_or_else(|| PathBuf::from(&renamed), |dir| dir.join(&renamed));
        Self { path }
    }
}

impl fmt::Display for BuildPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl From<&str> for BuildPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for BuildPath {
    fn from(path: PathBuf) -> Self {
        Self { path }
    }
}
