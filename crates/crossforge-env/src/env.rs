//! The construction environment: one owned build configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::builder::{Action, Builder, EmitterFn, Scanner};
use crate::error::EnvError;
use crate::path::{Affixes, BuildPath};
use crate::search;
use crate::subst;

/// A configuration value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// A single string (program name, suffix, flag template).
    Str(String),
    /// An ordered list of strings (recognized suffixes, flag lists).
    List(Vec<String>),
    /// A toggle.
    Bool(bool),
}

impl Value {
    /// Build a list value from anything yielding strings.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// String contents, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// List contents, if this is a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Boolean contents, if this is a toggle.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text this value contributes when substituted into a template.
    #[must_use]
    pub fn subst_text(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::List(items) => items.join(" "),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subst_text())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One build environment: a key/value configuration map plus the
/// registries a build framework consults when turning declared targets
/// into command lines.
///
/// The environment is an explicit owned value. Toolchain modules take
/// `&mut Environment` and mutate it in place; callers own its lifecycle
/// and serialize access themselves if they share one across threads.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    vars: FxHashMap<String, Value>,
    exec_path: Vec<PathBuf>,
    commands: FxHashMap<String, Action>,
    builders: FxHashMap<String, Builder>,
    scanners: FxHashMap<String, Scanner>,
    shlib_emitters: Vec<EmitterFn>,
}

impl Environment {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ============= Variables =============

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Look up a variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// Look up a string variable.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Look up a list variable.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(Value::as_list)
    }

    /// A toggle variable; unset or non-boolean reads as false.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Append an item to a list variable. A string value is promoted to a
    /// list first; an unset variable becomes a one-element list.
    pub fn append(&mut self, key: impl Into<String>, item: impl Into<String>) {
        let key = key.into();
        let item = item.into();
        let value = match self.vars.remove(&key) {
            Some(Value::List(mut items)) => {
                items.push(item);
                Value::List(items)
            }
            Some(Value::Str(s)) => Value::List(vec![s, item]),
            _ => Value::List(vec![item]),
        };
        self.vars.insert(key, value);
    }

    /// Iterate over all variables, unordered.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ============= Substitution =============

    /// Expand `$VAR` references in `input` against this environment.
    #[must_use]
    pub fn subst(&self, input: &str) -> String {
        subst::expand(input, &|name| self.get(name).map(Value::subst_text))
    }

    /// Expand a token list, splitting expanded text on whitespace and
    /// dropping tokens that expand to nothing.
    #[must_use]
    pub fn subst_tokens(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .flat_map(|token| {
                self.subst(token)
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    // ============= Naming conventions =============

    /// Resolve a convention's (prefix, suffix) pair, following variable
    /// indirection (`SHOBJPREFIX = $OBJPREFIX`).
    #[must_use]
    pub fn affix_pair(&self, affixes: Affixes) -> (String, String) {
        let prefix = self.subst(&format!("${{{}}}", affixes.prefix_var()));
        let suffix = self.subst(&format!("${{{}}}", affixes.suffix_var()));
        (prefix, suffix)
    }

    /// Find the first file whose name carries the convention's affixes.
    #[must_use]
    pub fn find_affixed<'a>(
        &self,
        files: &'a [BuildPath],
        affixes: Affixes,
    ) -> Option<&'a BuildPath> {
        let (prefix, suffix) = self.affix_pair(affixes);
        files.iter().find(|f| f.has_affixes(&prefix, &suffix))
    }

    /// Derive a new path from `file` by swapping one convention's affixes
    /// for another's.
    #[must_use]
    pub fn replace_affixes(&self, file: &BuildPath, from: Affixes, to: Affixes) -> BuildPath {
        let (old_prefix, old_suffix) = self.affix_pair(from);
        let (new_prefix, new_suffix) = self.affix_pair(to);
        file.with_affixes(&old_prefix, &old_suffix, &new_prefix, &new_suffix)
    }

    // ============= Executable search path =============

    /// The environment's executable search path, in priority order.
    #[must_use]
    pub fn exec_path(&self) -> &[PathBuf] {
        &self.exec_path
    }

    /// Replace the executable search path.
    pub fn set_exec_path(&mut self, paths: Vec<PathBuf>) {
        self.exec_path = paths;
    }

    /// Prepend a directory to the executable search path.
    ///
    /// The prepend is unconditional: no de-duplication is performed, so
    /// repeated configuration grows the list.
    pub fn prepend_exec_path(&mut self, dir: impl Into<PathBuf>) {
        self.exec_path.insert(0, dir.into());
    }

    /// Resolve an executable name against this environment's search path.
    #[must_use]
    pub fn where_is(&self, name: &str) -> Option<PathBuf> {
        search::where_is(name, &self.exec_path)
    }

    // ============= Registries =============

    /// Register a named command action, replacing any previous one.
    pub fn set_command(&mut self, name: impl Into<String>, action: Action) {
        self.commands.insert(name.into(), action);
    }

    /// Look up a named command action.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&Action> {
        self.commands.get(name)
    }

    /// Register a named builder, replacing any previous one.
    pub fn add_builder(&mut self, name: impl Into<String>, builder: Builder) {
        self.builders.insert(name.into(), builder);
    }

    /// Look up a named builder.
    #[must_use]
    pub fn builder(&self, name: &str) -> Option<&Builder> {
        self.builders.get(name)
    }

    /// Register a dependency scanner for a source suffix.
    pub fn add_scanner(&mut self, suffix: impl Into<String>, scanner: Scanner) {
        self.scanners.insert(suffix.into(), scanner);
    }

    /// Scanner registered for a source suffix, if any.
    #[must_use]
    pub fn scanner_for(&self, suffix: &str) -> Option<Scanner> {
        self.scanners.get(suffix).copied()
    }

    /// Append an emitter to the shared-library emitter chain. Additive:
    /// previously registered emitters keep running first.
    pub fn append_shlib_emitter(&mut self, emitter: EmitterFn) {
        self.shlib_emitters.push(emitter);
    }

    /// The shared-library emitter chain, in registration order.
    #[must_use]
    pub fn shlib_emitters(&self) -> &[EmitterFn] {
        &self.shlib_emitters
    }

    /// Run the shared-library emitter chain over a declared target/source
    /// pair, letting each emitter extend the lists.
    ///
    /// # Errors
    /// Returns the first emitter error; emitters report malformed build
    /// descriptions (for example a shared-library rule with no
    /// shared-library target).
    pub fn emit_shlib_targets(
        &self,
        targets: &mut Vec<BuildPath>,
        sources: &mut Vec<BuildPath>,
    ) -> Result<(), EnvError> {
        for emitter in &self.shlib_emitters {
            emitter(targets, sources, self)?;
        }
        Ok(())
    }

    /// Resolve a tool name against the environment path first, then the
    /// process `PATH`.
    #[must_use]
    pub fn where_is_anywhere(&self, name: &str) -> Option<PathBuf> {
        self.where_is(name).or_else(|| search::where_is_global(name))
    }

    /// The directory containing a resolved tool, if the tool resolves.
    #[must_use]
    pub fn tool_dir(&self, name: &str) -> Option<PathBuf> {
        self.where_is_anywhere(name)
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
    }
}
