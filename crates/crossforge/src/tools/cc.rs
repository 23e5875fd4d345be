//! C compiler baseline.

use crossforge_env::Environment;

/// Set baseline keys for compiling C with gcc.
pub fn generate(env: &mut Environment) {
    env.set("CC", "gcc");
    env.set("CFLAGS", "");
    env.set("CCFLAGS", "$CFLAGS");
    env.set(
        "CCCOM",
        "$CC $CFLAGS $CCFLAGS $_CPPDEFFLAGS $_CPPINCFLAGS -c -o $TARGET $SOURCES",
    );
    env.set("SHCC", "$CC");
    env.set("SHCFLAGS", "$CFLAGS");
    env.set("SHCCFLAGS", "$CCFLAGS -fPIC");
    env.set(
        "SHCCCOM",
        "$SHCC $SHCFLAGS $SHCCFLAGS $_CPPDEFFLAGS $_CPPINCFLAGS -c -o $TARGET $SOURCES",
    );
    env.set("CPPDEFPREFIX", "-D");
    env.set("INCPREFIX", "-I");
    env.set("CFILESUFFIX", ".c");

    // Platform object-file conventions; shared objects follow the static
    // ones unless a tool overrides them.
    env.set("OBJPREFIX", "");
    env.set("OBJSUFFIX", ".o");
    env.set("SHOBJPREFIX", "$OBJPREFIX");
    env.set("SHOBJSUFFIX", "$OBJSUFFIX");
}

/// Whether the baseline C compiler resolves on any search path.
#[must_use]
pub fn exists(env: &Environment) -> bool {
    env.where_is_anywhere("gcc").is_some()
}
