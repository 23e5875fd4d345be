//! Archiver baseline.

use crossforge_env::{Environment, Value};

/// Set baseline keys for building static libraries with ar/ranlib.
pub fn generate(env: &mut Environment) {
    env.set("AR", "ar");
    env.set("ARFLAGS", "rc");
    env.set("ARCOM", "$AR $ARFLAGS $TARGET $SOURCES");
    env.set("RANLIB", "ranlib");
    env.set("RANLIBFLAGS", "");
    env.set("RANLIBCOM", "$RANLIB $RANLIBFLAGS $TARGET");
    env.set("LIBPREFIX", "lib");
    env.set("LIBSUFFIX", ".a");
    env.set("LIBPREFIXES", Value::list(["$LIBPREFIX"]));
    env.set("LIBSUFFIXES", Value::list(["$LIBSUFFIX"]));
}

/// Whether the baseline archiver resolves on any search path.
#[must_use]
pub fn exists(env: &Environment) -> bool {
    env.where_is_anywhere("ar").is_some()
}
