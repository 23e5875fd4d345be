//! Construction-environment model for build configuration.
//!
//! An [`Environment`] is an owned key/value configuration map describing one
//! build setup: tool program names, flag templates, file-naming conventions,
//! and the registries a build framework consults when turning declared
//! targets into command lines (builders, command actions, emitter chains,
//! source scanners).
//!
//! Toolchain modules mutate a borrowed `Environment`; nothing here is
//! process-global.

mod builder;
mod env;
mod error;
mod path;
mod search;
mod subst;

pub use builder::{Action, Builder, EmitterFn, GeneratorFn, Scanner};
pub use env::{Environment, Value};
pub use error::EnvError;
pub use path::{Affixes, BuildPath};
pub use search::{where_is, where_is_global};
