//! dbus-postinstall - systemd activation wiring for D-Bus
//!
//! Post-install hook run by the build system after the dbus unit files
//! land. It creates the handful of symlinks that make systemd start
//! dbus.socket and dbus.service with their targets:
//!
//! ```text
//! <system unit dir>/sockets.target.wants/dbus.socket    -> ../dbus.socket
//! <system unit dir>/multi-user.target.wants/dbus.service -> ../dbus.service
//! <user unit dir>/sockets.target.wants/dbus.socket      -> ../dbus.socket   (user_session only)
//! ```
//!
//! All paths are resolved against the DESTDIR staging root when one is
//! configured, so packaging runs never touch the real filesystem.

pub mod destdir;
pub mod install;

pub use install::{force_symlink, run, InstallError, InstallOptions};
