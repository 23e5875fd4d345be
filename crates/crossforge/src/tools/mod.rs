//! Generic toolchain configurators.
//!
//! Baseline presets for the GNU tools a build environment needs before any
//! cross-compilation overrides apply. Each module sets the keys its tool
//! owns; cross modules run them first and then override.

pub mod ar;
pub mod cc;
pub mod cxx;
pub mod gas;
pub mod link;

use crossforge_env::Environment;

/// Apply every GNU baseline preset, in the conventional order.
pub fn generate_all(env: &mut Environment) {
    cc::generate(env);
    cxx::generate(env);
    link::generate(env);
    ar::generate(env);
    gas::generate(env);
}
