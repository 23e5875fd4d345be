//! Crossforge - cross-MinGW build-environment configuration.
//!
//! Locates a MinGW cross-compilation toolchain by probing prioritized name
//! prefixes on the search path, then populates a construction environment
//! so that subsequent compile, link, and resource steps invoke the right
//! cross tools with Windows file-naming conventions.
//!
//! # Example
//!
//! ```
//! let env = crossforge::configure("x86_64");
//!
//! // Windows naming conventions are set whether or not a toolchain was
//! // found; tool names are prefixed only when one resolves.
//! assert_eq!(env.get_str("PROGSUFFIX"), Some(".exe"));
//! assert_eq!(env.get_str("SHLIBSUFFIX"), Some(".dll"));
//! ```

pub mod mingw;
pub mod tools;

pub use crossforge_env::{
    Action, Affixes, Builder, BuildPath, EnvError, Environment, Scanner, Value,
};

/// Configure a fresh environment for cross-compiling to Windows.
///
/// `arch` is the target machine tag; exactly `"x86_64"` selects the 64-bit
/// toolchain prefixes, anything else the 32-bit ones.
#[must_use]
pub fn configure(arch: &str) -> Environment {
    let mut env = Environment::new();
    env.set(mingw::TARGET_ARCH, arch);
    mingw::generate(&mut env);
    env
}
