//! Plugin icon demo host
//!
//! Opens a window hosting one icon widget driven by its controller.
//!
//! # Usage
//!
//! ```bash
//! modgui-demo                          # main Cardinal icon
//! modgui-demo --profile cardinal-fx    # paged knob icon
//! modgui-demo --profile my.json        # profile from a file
//! modgui-demo --export cardinal.json   # write the profile and exit
//! ```

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use modgui_icons::app::HostApp;
use modgui_icons::profile::{self, PRESET_NAMES};

/// Command-line arguments of the demo host.
#[derive(Parser, Debug)]
#[command(name = "modgui-demo", version, about = "Host a plugin icon widget")]
struct Args {
    /// Preset name or path to a profile JSON file.
    #[arg(short, long, default_value = "cardinal")]
    profile: String,

    /// Write the selected profile as JSON to this path and exit.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let profile = match profile::resolve(&args.profile) {
        Ok(profile) => profile,
        Err(e) => {
            log::error!("{e} (presets: {})", PRESET_NAMES.join(", "));
            std::process::exit(2);
        }
    };

    if let Some(path) = &args.export {
        if let Err(e) = profile::save_to_file(&profile, path) {
            log::error!("cannot export profile: {e}");
            std::process::exit(1);
        }
        log::info!("profile written to {}", path.display());
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 520.0])
            .with_title(format!("{} icon", profile.name)),
        ..Default::default()
    };

    eframe::run_native(
        "modgui-demo",
        options,
        Box::new(|_cc| Ok(Box::new(HostApp::new(profile)))),
    )
}
