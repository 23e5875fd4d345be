//! Executable resolution against search paths.
//!
//! Two independent mechanisms, matching how build environments look up
//! tools: the environment's own configured path list, and the process-wide
//! `PATH`. Resolution never spawns a subprocess.

use std::path::{Path, PathBuf};

/// Resolve `name` against an explicit list of directories.
///
/// Returns the first directory entry that exists and is executable, in
/// list order.
#[must_use]
pub fn where_is(name: &str, paths: &[PathBuf]) -> Option<PathBuf> {
    paths
        .iter()
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

/// Resolve `name` against the process `PATH`.
#[must_use]
pub fn where_is_global(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;

        fs::write(path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(not(unix))]
    fn make_executable(path: &Path) {
        fs::write(path, "").unwrap();
    }

    #[test]
    fn finds_in_listed_directory() {
        let dir = tempfile::tempdir().unwrap();
        make_executable(&dir.path().join("i686-w64-mingw32-gcc"));

        let paths = vec![dir.path().to_path_buf()];
        let found = where_is("i686-w64-mingw32-gcc", &paths).unwrap();
        assert_eq!(found.parent().unwrap(), dir.path());
        assert!(where_is("x86_64-w64-mingw32-gcc", &paths).is_none());
    }

    #[test]
    fn earlier_directories_win() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        make_executable(&first.path().join("mingw32-gcc"));
        make_executable(&second.path().join("mingw32-gcc"));

        let paths = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let found = where_is("mingw32-gcc", &paths).unwrap();
        assert_eq!(found.parent().unwrap(), first.path());
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mingw32-gcc"), "").unwrap();

        let paths = vec![dir.path().to_path_buf()];
        assert!(where_is("mingw32-gcc", &paths).is_none());
    }
}
