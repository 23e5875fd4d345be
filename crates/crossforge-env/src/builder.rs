//! Build-step descriptors: actions, builders, emitters, scanners.
//!
//! These are declarative records the build framework consults when turning
//! declared targets into command lines. They live in registries owned by
//! the [`Environment`], never in process-global state.

use crate::env::Environment;
use crate::error::EnvError;
use crate::path::BuildPath;

/// Target-list emitter: may extend the target/source lists before the
/// build graph is frozen (import libraries, def files, ...).
pub type EmitterFn =
    fn(&mut Vec<BuildPath>, &mut Vec<BuildPath>, &Environment) -> Result<(), EnvError>;

/// Command-line generator: produces the token list for one build step from
/// the declared targets and sources.
pub type GeneratorFn = fn(&[BuildPath], &[BuildPath], &Environment) -> Vec<String>;

/// How a build step produces its command line.
#[derive(Clone, Debug)]
pub enum Action {
    /// A fixed command template, tokenized on whitespace. Variable
    /// references stay unexpanded until the step runs.
    Command(String),
    /// A generator function invoked with the step's targets and sources.
    Generated(GeneratorFn),
}

impl Action {
    /// Produce the command token list for one invocation.
    #[must_use]
    pub fn command_line(
        &self,
        targets: &[BuildPath],
        sources: &[BuildPath],
        env: &Environment,
    ) -> Vec<String> {
        match self {
            Self::Command(template) => template.split_whitespace().map(str::to_string).collect(),
            Self::Generated(generator) => generator(targets, sources, env),
        }
    }
}

/// Dependency scanners a source suffix can be registered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scanner {
    /// C preprocessor include scanning.
    C,
}

/// A declarative build-step descriptor: an action plus the file-naming
/// conventions of its outputs.
#[derive(Clone, Debug)]
pub struct Builder {
    action: Action,
    suffix: String,
    source_scanner: Option<Scanner>,
}

impl Builder {
    /// Create a builder producing files with the given suffix.
    #[must_use]
    pub fn new(action: Action, suffix: impl Into<String>) -> Self {
        Self {
            action,
            suffix: suffix.into(),
            source_scanner: None,
        }
    }

    /// Scan this builder's sources for dependencies with the given scanner.
    #[must_use]
    pub fn with_source_scanner(mut self, scanner: Scanner) -> Self {
        self.source_scanner = Some(scanner);
        self
    }

    /// The step's action.
    #[must_use]
    pub const fn action(&self) -> &Action {
        &self.action
    }

    /// Output-file suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Registered source scanner, if any.
    #[must_use]
    pub const fn source_scanner(&self) -> Option<Scanner> {
        self.source_scanner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_action_tokenizes_template() {
        let env = Environment::new();
        let action = Action::Command("$RC -i $SOURCE -o $TARGET".to_string());
        let tokens = action.command_line(&[], &[], &env);
        assert_eq!(tokens, ["$RC", "-i", "$SOURCE", "-o", "$TARGET"]);
    }

    #[test]
    fn builder_records_scanner() {
        let builder = Builder::new(Action::Command("$RCCOM".to_string()), ".o")
            .with_source_scanner(Scanner::C);
        assert_eq!(builder.suffix(), ".o");
        assert_eq!(builder.source_scanner(), Some(Scanner::C));
    }
}
