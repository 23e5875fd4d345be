//! GNU linker baseline.

use crossforge_env::{Action, Environment};

/// Set baseline keys for linking with the GNU toolchain.
///
/// Linking goes through the C++ driver so mixed C/C++ programs pick up the
/// right runtime libraries.
pub fn generate(env: &mut Environment) {
    env.set("LINK", "$CXX");
    env.set("LINKFLAGS", "");
    env.set(
        "LINKCOM",
        "$LINK -o $TARGET $LINKFLAGS $SOURCES $_LIBDIRFLAGS $_LIBFLAGS",
    );
    env.set("SHLINK", "$LINK");
    env.set("SHLINKFLAGS", "$LINKFLAGS -shared");
    env.set_command(
        "SHLINKCOM",
        Action::Command(
            "$SHLINK $SHLINKFLAGS -o $TARGET $SOURCES $_LIBDIRFLAGS $_LIBFLAGS".to_string(),
        ),
    );
    env.set("LIBDIRPREFIX", "-L");
    env.set("LIBLINKPREFIX", "-l");

    // ELF platform conventions; cross modules override these.
    env.set("PROGPREFIX", "");
    env.set("PROGSUFFIX", "");
    env.set("SHLIBPREFIX", "lib");
    env.set("SHLIBSUFFIX", ".so");
}

/// Whether the baseline link driver resolves on any search path.
#[must_use]
pub fn exists(env: &Environment) -> bool {
    env.where_is_anywhere("g++").is_some()
}
