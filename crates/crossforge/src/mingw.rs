//! Cross-MinGW toolchain configuration.
//!
//! Probes the search path for a MinGW cross toolchain and rewires a
//! construction environment so compile/link/resource steps invoke the
//! prefixed cross tools and produce Windows-named artifacts (`.exe`,
//! `.dll`, import libraries, `.def` export files).

use crossforge_env::{
    Action, Affixes, Builder, BuildPath, EnvError, Environment, Scanner, Value, where_is_global,
};
use tracing::debug;

use crate::tools;

/// Variable carrying the target machine tag.
pub const TARGET_ARCH: &str = "TARGET_ARCH";

/// Variable suppressing import-library emission when set.
pub const NO_IMPORT_LIB: &str = "no_import_lib";

/// Machine tag selecting the 64-bit prefix table; every other tag selects
/// the 32-bit one.
const ARCH_64: &str = "x86_64";

/// Candidate toolchain-name prefixes for 32-bit targets, in priority order.
const PREFIXES32: &[&str] = &[
    "mingw32-",
    "mingw32msvc-",
    "i386-mingw32-",
    "i486-mingw32-",
    "i586-mingw32-",
    "i686-mingw32-",
    "i386-mingw32msvc-",
    "i486-mingw32msvc-",
    "i586-mingw32msvc-",
    "i686-mingw32msvc-",
    "i686-pc-mingw32-",
    "i686-w64-mingw32-",
];

/// Candidate toolchain-name prefixes for 64-bit targets, in priority order.
const PREFIXES64: &[&str] = &[
    "x86_64-w64-mingw32-",
    "amd64-mingw32-",
    "amd64-mingw32msvc-",
    "amd64-pc-mingw32-",
];

/// Locate a cross toolchain by probing `<prefix>gcc` for each candidate
/// prefix, environment search path first, then the process `PATH`.
///
/// The first prefix that resolves wins; later candidates are not probed.
/// `None` means no toolchain is installed, and callers fall back to
/// default tool names rather than failing.
#[must_use]
pub fn find(env: &Environment) -> Option<&'static str> {
    let prefixes = if env.get_str(TARGET_ARCH) == Some(ARCH_64) {
        PREFIXES64
    } else {
        PREFIXES32
    };

    prefixes.iter().copied().find(|prefix| {
        let gcc = format!("{prefix}gcc");
        env.where_is(&gcc).is_some() || where_is_global(&gcc).is_some()
    })
}

/// Whether a cross toolchain is resolvable for the environment's target.
#[must_use]
pub fn exists(env: &Environment) -> bool {
    find(env).is_some()
}

/// Build the shared-library link command line.
///
/// Token order is fixed: link program and flags, `-o <dll>` when a
/// shared-library target is declared, sources, library search/link
/// placeholders, then import-library and def-file output flags for
/// whichever of those targets exist.
#[must_use]
pub fn shlib_generator(
    targets: &[BuildPath],
    sources: &[BuildPath],
    env: &Environment,
) -> Vec<String> {
    let mut cmd = vec!["$SHLINK".to_string(), "$SHLINKFLAGS".to_string()];

    if let Some(dll) = env.find_affixed(targets, Affixes::SHARED_LIB) {
        cmd.push("-o".to_string());
        cmd.push(dll.to_string());
    }
    cmd.extend(sources.iter().map(ToString::to_string));
    cmd.push("$_LIBDIRFLAGS".to_string());
    cmd.push("$_LIBFLAGS".to_string());

    if let Some(implib) = env.find_affixed(targets, Affixes::STATIC_LIB) {
        cmd.push(format!("-Wl,--out-implib,{implib}"));
    }
    if let Some(def) = env.find_affixed(targets, Affixes::DEF_FILE) {
        cmd.push(format!("-Wl,--output-def,{def}"));
    }

    cmd
}

/// Extend a shared-library rule's targets with the import library and the
/// module-definition file the linker will produce alongside the DLL.
///
/// Derived targets are appended only when absent, so re-running the
/// emitter adds nothing. A rule with no shared-library-suffixed target is
/// a malformed build description and fails immediately.
///
/// # Errors
/// [`EnvError::MissingSharedLibTarget`] when no target carries the
/// shared-library affixes.
pub fn shlib_emitter(
    targets: &mut Vec<BuildPath>,
    sources: &mut Vec<BuildPath>,
    env: &Environment,
) -> Result<(), EnvError> {
    let Some(dll) = env.find_affixed(targets, Affixes::SHARED_LIB).cloned() else {
        let (_, suffix) = env.affix_pair(Affixes::SHARED_LIB);
        return Err(EnvError::MissingSharedLibTarget { suffix });
    };

    if !env.flag(NO_IMPORT_LIB) && env.find_affixed(targets, Affixes::STATIC_LIB).is_none() {
        targets.push(env.replace_affixes(&dll, Affixes::SHARED_LIB, Affixes::STATIC_LIB));
    }

    // The def file is always emitted when absent; there is no flag to
    // turn it off.
    let have_def = env.find_affixed(sources, Affixes::DEF_FILE).is_some()
        || env.find_affixed(targets, Affixes::DEF_FILE).is_some();
    if !have_def {
        targets.push(env.replace_affixes(&dll, Affixes::SHARED_LIB, Affixes::DEF_FILE));
    }

    Ok(())
}

/// Configure `env` for cross-compiling to Windows with MinGW.
///
/// Applies the GNU baselines, then overrides tool names with the detected
/// prefix (or none), mirrors shared flags onto static ones, installs the
/// shared-library command generator and target emitter, and sets Windows
/// file-naming conventions. Key values are idempotent across calls; the
/// search-path prepend below is not.
pub fn generate(env: &mut Environment) {
    let found = find(env);

    if let Some(prefix) = found {
        // The toolchain bin directory must lead the search path so the
        // prefixed tools resolve when steps run. The prepend happens on
        // every call, without de-duplication.
        if let Some(dir) = env.tool_dir(&format!("{prefix}gcc")) {
            debug!(prefix, dir = %dir.display(), "cross toolchain located");
            env.prepend_exec_path(dir);
        }
    } else {
        debug!("no cross toolchain found, keeping default tool names");
    }
    let prefix = found.unwrap_or_default();

    // Most of the environment is plain GNU behavior...
    tools::generate_all(env);

    // ...but the cross tools are prefixed, and Windows has no PIC split.
    env.set("CC", format!("{prefix}gcc"));
    env.set("SHCCFLAGS", "$CCFLAGS");
    env.set("CXX", format!("{prefix}g++"));
    env.set("SHCXXFLAGS", "$CXXFLAGS");
    env.set("LINK", format!("{prefix}g++"));
    env.set("AR", format!("{prefix}ar"));
    env.set("RANLIB", format!("{prefix}ranlib"));
    env.set("AS", format!("{prefix}as"));

    env.set("SHLINKFLAGS", "$LINKFLAGS -shared");
    env.set_command("SHLINKCOM", Action::Generated(shlib_generator));
    env.append_shlib_emitter(shlib_emitter);

    env.set("WINDEFPREFIX", "");
    env.set("WINDEFSUFFIX", ".def");
    env.set("STATIC_AND_SHARED_OBJECTS_ARE_THE_SAME", true);

    // Resource compilation: windres output participates in dependency
    // scanning like any C source.
    env.set("RC", format!("{prefix}windres"));
    env.set("RCFLAGS", "");
    env.set(
        "RCCOM",
        "$RC $_CPPDEFFLAGS $_CPPINCFLAGS ${INCPREFIX}${SOURCE_DIR} $RCFLAGS -i $SOURCE -o $TARGET",
    );
    env.add_builder(
        "RES",
        Builder::new(Action::Command("$RCCOM".to_string()), ".o")
            .with_source_scanner(Scanner::C),
    );
    env.add_scanner(".rc", Scanner::C);

    // Windows naming conventions override the platform defaults.
    env.set("OBJPREFIX", "");
    env.set("OBJSUFFIX", ".o");
    env.set("SHOBJPREFIX", "$OBJPREFIX");
    env.set("SHOBJSUFFIX", "$OBJSUFFIX");
    env.set("PROGPREFIX", "");
    env.set("PROGSUFFIX", ".exe");
    env.set("LIBPREFIX", "lib");
    env.set("LIBSUFFIX", ".a");
    env.set("SHLIBPREFIX", "");
    env.set("SHLIBSUFFIX", ".dll");
    env.set("LIBPREFIXES", Value::list(["lib", ""]));
    env.set("LIBSUFFIXES", Value::list([".a", ".lib"]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn fake_tool(dir: &Path, name: &str) {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    fn env_with_tools(tools: &[&str]) -> (tempfile::TempDir, Environment) {
        let dir = tempfile::tempdir().unwrap();
        for tool in tools {
            fake_tool(dir.path(), tool);
        }
        let mut env = Environment::new();
        env.set_exec_path(vec![dir.path().to_path_buf()]);
        (dir, env)
    }

    /// A toolchain on the host PATH would shadow the fake ones these
    /// tests lay out.
    fn mingw_on_host_path() -> bool {
        PREFIXES32
            .iter()
            .chain(PREFIXES64)
            .any(|prefix| where_is_global(&format!("{prefix}gcc")).is_some())
    }

    /// Environment with every affix convention set, no toolchain probing.
    fn windows_env() -> Environment {
        let mut env = Environment::new();
        tools::generate_all(&mut env);
        env.set("WINDEFPREFIX", "");
        env.set("WINDEFSUFFIX", ".def");
        env.set("SHLIBPREFIX", "");
        env.set("SHLIBSUFFIX", ".dll");
        env.set("LIBPREFIX", "lib");
        env.set("LIBSUFFIX", ".a");
        env
    }

    #[test]
    fn find_follows_declared_priority() {
        if mingw_on_host_path() {
            eprintln!("Skipping test: a MinGW toolchain is on the host PATH");
            return;
        }
        // Both candidates resolve; the earlier table entry wins.
        let (_dir, env) = env_with_tools(&["i686-mingw32-gcc", "i686-w64-mingw32-gcc"]);
        assert_eq!(find(&env), Some("i686-mingw32-"));
    }

    #[test]
    fn find_uses_32bit_table_for_other_tags() {
        if mingw_on_host_path() {
            eprintln!("Skipping test: a MinGW toolchain is on the host PATH");
            return;
        }
        let (_dir, mut env) = env_with_tools(&["i686-w64-mingw32-gcc"]);
        assert_eq!(find(&env), Some("i686-w64-mingw32-"));

        // Any tag other than the exact 64-bit one keeps the 32-bit table.
        env.set(TARGET_ARCH, "arm");
        assert_eq!(find(&env), Some("i686-w64-mingw32-"));
    }

    #[test]
    fn find_consults_only_the_64bit_table_for_x86_64() {
        if mingw_on_host_path() {
            eprintln!("Skipping test: a MinGW toolchain is on the host PATH");
            return;
        }
        let (_dir, mut env) = env_with_tools(&["i686-w64-mingw32-gcc", "x86_64-w64-mingw32-gcc"]);
        env.set(TARGET_ARCH, "x86_64");
        assert_eq!(find(&env), Some("x86_64-w64-mingw32-"));
    }

    #[test]
    fn find_reports_absence_as_none() {
        if mingw_on_host_path() {
            eprintln!("Skipping test: a MinGW toolchain is on the host PATH");
            return;
        }
        let (_dir, env) = env_with_tools(&[]);
        assert_eq!(find(&env), None);
        assert!(!exists(&env));
    }

    #[test]
    fn emitter_appends_implib_and_def() {
        let env = windows_env();
        let mut targets = vec![BuildPath::new("foo.dll")];
        let mut sources = vec![BuildPath::new("a.o")];

        shlib_emitter(&mut targets, &mut sources, &env).unwrap();

        assert_eq!(targets.len(), 3);
        assert_eq!(targets[1].file_name(), "libfoo.a");
        assert_eq!(targets[2].file_name(), "foo.def");
        assert_eq!(sources.len(), 1);
    }

    #[test]
    fn emitter_honors_no_import_lib() {
        let mut env = windows_env();
        env.set(NO_IMPORT_LIB, true);
        let mut targets = vec![BuildPath::new("foo.dll")];
        let mut sources = Vec::new();

        shlib_emitter(&mut targets, &mut sources, &env).unwrap();

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].file_name(), "foo.def");
    }

    #[test]
    fn emitter_skips_def_when_supplied_as_source() {
        let env = windows_env();
        let mut targets = vec![BuildPath::new("foo.dll")];
        let mut sources = vec![BuildPath::new("exports.def")];

        shlib_emitter(&mut targets, &mut sources, &env).unwrap();

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].file_name(), "libfoo.a");
    }

    #[test]
    fn emitter_without_dll_target_is_fatal() {
        let env = windows_env();
        let mut targets = vec![BuildPath::new("foo.o")];
        let mut sources = Vec::new();

        let err = shlib_emitter(&mut targets, &mut sources, &env).unwrap_err();
        assert_eq!(
            err,
            EnvError::MissingSharedLibTarget {
                suffix: ".dll".to_string()
            }
        );
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn emitter_is_idempotent() {
        let env = windows_env();
        let mut targets = vec![BuildPath::new("foo.dll")];
        let mut sources = Vec::new();

        shlib_emitter(&mut targets, &mut sources, &env).unwrap();
        shlib_emitter(&mut targets, &mut sources, &env).unwrap();

        assert_eq!(targets.len(), 3);
    }

    #[test]
    fn generator_token_order() {
        let env = windows_env();
        let targets = [
            BuildPath::new("foo.dll"),
            BuildPath::new("libfoo.a"),
            BuildPath::new("foo.def"),
        ];
        let sources = [BuildPath::new("a.o"), BuildPath::new("b.o")];

        let cmd = shlib_generator(&targets, &sources, &env);
        assert_eq!(
            cmd,
            [
                "$SHLINK",
                "$SHLINKFLAGS",
                "-o",
                "foo.dll",
                "a.o",
                "b.o",
                "$_LIBDIRFLAGS",
                "$_LIBFLAGS",
                "-Wl,--out-implib,libfoo.a",
                "-Wl,--output-def,foo.def",
            ]
        );
    }

    #[test]
    fn generator_omits_flags_for_absent_targets() {
        let env = windows_env();
        let targets = [BuildPath::new("foo.dll")];
        let sources = [BuildPath::new("a.o")];

        let cmd = shlib_generator(&targets, &sources, &env);
        assert!(!cmd.iter().any(|t| t.starts_with("-Wl,--out-implib")));
        assert!(!cmd.iter().any(|t| t.starts_with("-Wl,--output-def")));
    }

    #[test]
    fn generate_without_toolchain_keeps_plain_names() {
        if mingw_on_host_path() {
            eprintln!("Skipping test: a MinGW toolchain is on the host PATH");
            return;
        }
        let (_dir, mut env) = env_with_tools(&[]);
        generate(&mut env);

        assert_eq!(env.get_str("CC"), Some("gcc"));
        assert_eq!(env.get_str("RC"), Some("windres"));
        assert_eq!(env.get_str("PROGSUFFIX"), Some(".exe"));
        assert_eq!(env.get_str("SHLIBSUFFIX"), Some(".dll"));
        assert!(env.flag("STATIC_AND_SHARED_OBJECTS_ARE_THE_SAME"));
    }

    #[test]
    fn generate_prefixes_every_tool() {
        if mingw_on_host_path() {
            eprintln!("Skipping test: a MinGW toolchain is on the host PATH");
            return;
        }
        let (_dir, mut env) = env_with_tools(&["i686-w64-mingw32-gcc"]);
        generate(&mut env);

        assert_eq!(env.get_str("CC"), Some("i686-w64-mingw32-gcc"));
        assert_eq!(env.get_str("CXX"), Some("i686-w64-mingw32-g++"));
        assert_eq!(env.get_str("LINK"), Some("i686-w64-mingw32-g++"));
        assert_eq!(env.get_str("AR"), Some("i686-w64-mingw32-ar"));
        assert_eq!(env.get_str("RANLIB"), Some("i686-w64-mingw32-ranlib"));
        assert_eq!(env.get_str("AS"), Some("i686-w64-mingw32-as"));
        assert_eq!(env.get_str("RC"), Some("i686-w64-mingw32-windres"));
    }

    #[test]
    fn generate_registers_resource_builder() {
        let (_dir, mut env) = env_with_tools(&[]);
        generate(&mut env);

        let res = env.builder("RES").unwrap();
        assert_eq!(res.suffix(), ".o");
        assert_eq!(res.source_scanner(), Some(Scanner::C));
        assert_eq!(env.scanner_for(".rc"), Some(Scanner::C));
    }

    #[test]
    fn generate_shared_flags_mirror_static_ones() {
        let (_dir, mut env) = env_with_tools(&[]);
        generate(&mut env);
        env.set("CCFLAGS", "-O2");
        env.set("LINKFLAGS", "-static-libgcc");

        // No -fPIC on Windows targets.
        assert_eq!(env.subst("$SHCCFLAGS"), "-O2");
        assert_eq!(env.subst("$SHLINKFLAGS"), "-static-libgcc -shared");
    }

    #[test]
    fn generate_is_idempotent_on_key_values() {
        let (_dir, mut env) = env_with_tools(&["i686-w64-mingw32-gcc"]);
        generate(&mut env);
        let mut first: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        first.sort();

        generate(&mut env);
        let mut second: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        second.sort();

        assert_eq!(first, second);
    }

    #[test]
    fn environment_prepend_grows_on_regenerate() {
        // Known wart: each generate() prepends the toolchain directory
        // again, so the search path grows without bound under repeated
        // configuration.
        let (_dir, mut env) = env_with_tools(&["i686-w64-mingw32-gcc"]);
        let before = env.exec_path().len();

        generate(&mut env);
        generate(&mut env);

        assert_eq!(env.exec_path().len(), before + 2);
        assert_eq!(env.exec_path()[0], env.exec_path()[1]);
    }

    #[test]
    fn shlinkcom_is_replaced_with_the_generator() {
        let (_dir, mut env) = env_with_tools(&[]);
        generate(&mut env);

        let targets = [BuildPath::new("foo.dll")];
        let sources = [BuildPath::new("a.o")];
        let action = env.command("SHLINKCOM").unwrap();
        let cmd = action.command_line(&targets, &sources, &env);
        assert_eq!(cmd[..4], ["$SHLINK", "$SHLINKFLAGS", "-o", "foo.dll"]);
    }
}
