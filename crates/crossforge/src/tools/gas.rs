//! Assembler baseline.

use crossforge_env::Environment;

/// Set baseline keys for assembling with gas.
pub fn generate(env: &mut Environment) {
    env.set("AS", "as");
    env.set("ASFLAGS", "");
    env.set("ASCOM", "$AS $ASFLAGS -o $TARGET $SOURCES");
    env.set("ASFILESUFFIX", ".s");
}

/// Whether the baseline assembler resolves on any search path.
#[must_use]
pub fn exists(env: &Environment) -> bool {
    env.where_is_anywhere("as").is_some()
}
