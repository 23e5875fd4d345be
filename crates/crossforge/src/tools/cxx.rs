//! C++ compiler baseline.

use crossforge_env::Environment;

/// Set baseline keys for compiling C++ with g++.
pub fn generate(env: &mut Environment) {
    env.set("CXX", "g++");
    env.set("CXXFLAGS", "");
    env.set(
        "CXXCOM",
        "$CXX $CXXFLAGS $_CPPDEFFLAGS $_CPPINCFLAGS -c -o $TARGET $SOURCES",
    );
    env.set("SHCXX", "$CXX");
    env.set("SHCXXFLAGS", "$CXXFLAGS -fPIC");
    env.set(
        "SHCXXCOM",
        "$SHCXX $SHCXXFLAGS $_CPPDEFFLAGS $_CPPINCFLAGS -c -o $TARGET $SOURCES",
    );
    env.set("CXXFILESUFFIX", ".cc");
}

/// Whether the baseline C++ compiler resolves on any search path.
#[must_use]
pub fn exists(env: &Environment) -> bool {
    env.where_is_anywhere("g++").is_some()
}
