// SPDX-License-Identifier: GPL-2.0
//! usbhid unbinder
//!
//! Detaches allow-listed USB HID interfaces from the generic usbhid driver.
//!
//! Usage:
//!   usbhid-unbind               # Unbind matching devices (default)
//!   usbhid-unbind --dry-run     # Show what would be unbound
//!   usbhid-unbind list          # Show all usbhid bindings

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use usbhid_unbind::{list_devices, unbind_matching, SysfsDriver, ALLOW_LIST, USBHID_DRIVER_DIR};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Detach allow-listed USB HID devices from usbhid
#[derive(Parser)]
#[command(name = "usbhid-unbind", version = VERSION, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Driver directory to operate on
    #[arg(long, global = true, value_name = "PATH", default_value = USBHID_DRIVER_DIR)]
    driver_dir: PathBuf,

    /// Report matches without unbinding
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Unbind allow-listed devices
    Unbind,
    /// List bound devices and whether they match
    List,
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn do_list(driver: &SysfsDriver) -> Result<()> {
    let devices = driver.scan()?;
    list_devices(&devices, ALLOW_LIST, &mut io::stdout().lock())
}

fn do_unbind(mut driver: SysfsDriver, dry_run: bool) -> Result<()> {
    if !dry_run && !nix::unistd::geteuid().is_root() {
        warn!("Not running as root; the kernel will likely refuse the unbind");
    }

    let devices = driver.scan()?;
    unbind_matching(
        &devices,
        ALLOW_LIST,
        &mut driver,
        &mut io::stdout().lock(),
        dry_run,
    )?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    info!("[{}] usbhid-unbind v{}", timestamp, VERSION);

    let driver = SysfsDriver::new(cli.driver_dir);
    info!("Scanning {}", driver.dir().display());

    match cli.command {
        Some(Commands::List) => do_list(&driver),
        Some(Commands::Unbind) | None => do_unbind(driver, cli.dry_run),
    }
}
