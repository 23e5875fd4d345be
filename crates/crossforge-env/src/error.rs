use thiserror::Error;

/// Environment configuration errors.
///
/// These indicate a malformed build description and are raised while the
/// environment is being configured, before any tool subprocess is spawned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("a shared library should have exactly one target with the suffix: {suffix}")]
    MissingSharedLibTarget { suffix: String },
}
