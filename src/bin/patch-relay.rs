//! Patch relay command
//!
//! Resolves a patch slug against the patch catalog and saves the patch file.
//! Prints the attachment headers with `--headers`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use modgui_icons::relay::{PatchRelay, DEFAULT_API};

/// Command-line arguments of the patch relay.
#[derive(Parser, Debug)]
#[command(name = "patch-relay", version, about = "Download a shared patch by slug")]
struct Args {
    /// Slug of the patch in the catalog.
    slug: String,

    /// Directory the patch file is written to.
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Base URL of the catalog API.
    #[arg(long, default_value = DEFAULT_API)]
    api: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Print the download headers.
    #[arg(long)]
    headers: bool,

    /// Log filter (error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let relay = PatchRelay::new(&args.api).with_timeout(Duration::from_secs(args.timeout));
    let download = match relay.fetch(&args.slug) {
        Ok(download) => download,
        Err(e) => {
            log::error!("{e} (HTTP {})", e.status());
            return ExitCode::FAILURE;
        }
    };

    if args.headers {
        for (name, value) in download.headers() {
            println!("{name}: {value}");
        }
    }

    let path = args.out.join(download.safe_filename());
    if let Err(e) = std::fs::write(&path, &download.contents) {
        log::error!("cannot write {}: {e}", path.display());
        return ExitCode::FAILURE;
    }
    log::info!("saved {}", path.display());
    ExitCode::SUCCESS
}
