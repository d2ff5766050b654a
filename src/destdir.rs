//! Destdir staging path resolution
//!
//! Build systems stage installs under a destination root named by the
//! DESTDIR environment variable instead of writing to the real
//! filesystem. Install paths arrive absolute (e.g.
//! /usr/lib/systemd/system) and have to be rebased under that root.

use std::env;
use std::path::{Component, Path, PathBuf};

/// Read the staging root from the environment, once at startup.
///
/// Unset and empty both mean "no staging, install to real paths".
pub fn staging_root() -> Option<PathBuf> {
    match env::var_os("DESTDIR") {
        Some(v) if !v.is_empty() => Some(PathBuf::from(v)),
        _ => None,
    }
}

/// Rebase `path` under `root`, or return it unchanged without a root.
///
/// A naive `root.join(path)` would discard the root whenever `path` is
/// absolute, so the root component is stripped off first. The root
/// itself may be absolute or relative.
pub fn resolve(path: &Path, root: Option<&Path>) -> PathBuf {
    let Some(root) = root else {
        return path.to_path_buf();
    };

    let stripped: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    root.join(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_root_returns_path_unchanged() {
        let path = Path::new("/usr/lib/systemd/system");
        assert_eq!(resolve(path, None), path);
    }

    #[test]
    fn absolute_path_is_rebased_under_root() {
        let resolved = resolve(
            Path::new("/usr/lib/systemd/system"),
            Some(Path::new("/tmp/staging")),
        );
        assert_eq!(resolved, Path::new("/tmp/staging/usr/lib/systemd/system"));
    }

    #[test]
    fn relative_root_is_kept() {
        let resolved = resolve(Path::new("/etc/systemd/user"), Some(Path::new("build/dest")));
        assert_eq!(resolved, Path::new("build/dest/etc/systemd/user"));
    }

    #[test]
    fn relative_path_joins_directly() {
        let resolved = resolve(Path::new("etc/systemd/system"), Some(Path::new("/dest")));
        assert_eq!(resolved, Path::new("/dest/etc/systemd/system"));
    }
}
