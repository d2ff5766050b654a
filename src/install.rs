//! Activation symlink installation
//!
//! Wires dbus.socket and dbus.service into systemd's `*.target.wants/`
//! directories, the same links `systemctl enable dbus.service` would
//! create. Runs once per install, straight through, aborting on the
//! first unrecoverable filesystem error.

use std::fs;
use std::io;
use std::os::unix::fs as unix_fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::destdir;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Failed to create directory {}: {}", .0.display(), .1)]
    CreateDir(PathBuf, io::Error),

    #[error("Failed to remove existing entry {}: {}", .0.display(), .1)]
    RemoveExisting(PathBuf, io::Error),

    #[error("Failed to create symlink {} -> {}: {}", .0.display(), .1.display(), .2)]
    Symlink(PathBuf, PathBuf, io::Error),
}

/// Everything the installer needs, passed explicitly so tests can
/// point it at a scratch tree instead of the environment.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// System-scope systemd unit directory, pre-destdir.
    pub system_unit_dir: PathBuf,
    /// User-scope systemd unit directory, pre-destdir.
    pub user_unit_dir: PathBuf,
    /// Staging root the build system installs under, if any.
    pub destdir: Option<PathBuf>,
    /// Whether per-user session bus support was built.
    pub user_session: bool,
}

/// Create `dir` and any missing parents.
///
/// Already-present directories are fine; anything else (permission
/// denied, a regular file in the way) is fatal.
fn ensure_dir(dir: &Path) -> Result<(), InstallError> {
    fs::create_dir_all(dir).map_err(|e| InstallError::CreateDir(dir.to_path_buf(), e))
}

/// Replace whatever sits at `link` with a symlink to `target`.
///
/// Remove-then-create, not atomic: a reader racing the installer can
/// briefly see the link missing. Install steps run one at a time per
/// destination tree, so no locking here. Only a not-found probe result
/// is treated as "nothing to remove"; a directory or an unreadable
/// entry at `link` aborts the install instead of being masked.
pub fn force_symlink(target: &Path, link: &Path) -> Result<(), InstallError> {
    match fs::symlink_metadata(link) {
        Ok(_) => {
            fs::remove_file(link)
                .map_err(|e| InstallError::RemoveExisting(link.to_path_buf(), e))?;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(InstallError::RemoveExisting(link.to_path_buf(), e)),
    }

    log::debug!("symlink {} -> {}", link.display(), target.display());
    unix_fs::symlink(target, link)
        .map_err(|e| InstallError::Symlink(link.to_path_buf(), target.to_path_buf(), e))
}

/// Run the post-install steps.
///
/// Unconditionally enables D-Bus on the system instance; the user
/// instance is only touched when `user_session` is set. Link targets
/// are relative (`../dbus.socket`) so the tree stays valid after the
/// staging root is stripped off at package time.
pub fn run(opts: &InstallOptions) -> Result<(), InstallError> {
    let destdir = opts.destdir.as_deref();
    let system_dir = destdir::resolve(&opts.system_unit_dir, destdir);
    let user_dir = destdir::resolve(&opts.user_unit_dir, destdir);

    let sockets_wants = system_dir.join("sockets.target.wants");
    let multi_user_wants = system_dir.join("multi-user.target.wants");
    ensure_dir(&sockets_wants)?;
    ensure_dir(&multi_user_wants)?;

    force_symlink(Path::new("../dbus.socket"), &sockets_wants.join("dbus.socket"))?;
    force_symlink(
        Path::new("../dbus.service"),
        &multi_user_wants.join("dbus.service"),
    )?;

    if opts.user_session {
        let user_wants = user_dir.join("sockets.target.wants");
        ensure_dir(&user_wants)?;
        force_symlink(Path::new("../dbus.socket"), &user_wants.join("dbus.socket"))?;
    } else {
        log::debug!("user_session disabled, leaving {} alone", user_dir.display());
    }

    log::info!(
        "Enabled D-Bus activation in {}{}",
        system_dir.display(),
        if opts.user_session { " and user instance" } else { "" }
    );
    Ok(())
}
