use std::path::PathBuf;

use clap::Parser;

use dbus_postinstall::destdir;
use dbus_postinstall::install::{self, InstallOptions};

#[derive(Parser)]
#[command(name = "dbus-postinstall")]
#[command(about = "Wire dbus.socket and dbus.service into systemd activation directories")]
struct Args {
    /// System-scope systemd unit directory (e.g. /usr/lib/systemd/system)
    system_unit_dir: PathBuf,

    /// User-scope systemd unit directory (e.g. /usr/lib/systemd/user)
    user_unit_dir: PathBuf,

    /// Also enable the session bus socket in the user unit directory
    #[arg(long)]
    user_session: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let args = Args::parse();

    let opts = InstallOptions {
        system_unit_dir: args.system_unit_dir,
        user_unit_dir: args.user_unit_dir,
        destdir: destdir::staging_root(),
        user_session: args.user_session,
    };
    install::run(&opts)?;

    Ok(())
}
