// Roster Grid replay tool
// Runs a gesture script against the engine and prints the report as JSON

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use roster_grid::services::collaborators::Notifier;
use roster_grid::services::notification::DesktopNotifier;
use roster_grid::services::replay::{self, Script};
use roster_grid::services::settings::SettingsService;

struct Args {
    script: PathBuf,
    config: Option<PathBuf>,
    desktop: bool,
}

const USAGE: &str = "Usage: roster-grid <script.json> [--config <settings.toml>] [--desktop]";

fn parse_args() -> Result<Args> {
    let mut script = None;
    let mut config = None;
    let mut desktop = false;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "--desktop" | "-d" => desktop = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ if script.is_none() => script = Some(PathBuf::from(&arg)),
            other => bail!("Unexpected argument: {}", other),
        }
    }

    Ok(Args {
        script: script.context(USAGE)?,
        config,
        desktop,
    })
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = parse_args()?;
    log::info!("Replaying {:?}", args.script);

    let settings_service = match args.config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::with_default_path()?,
    };
    let settings = settings_service.load()?;

    let raw = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {:?}", args.script))?;
    let script = Script::from_json(&raw)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    let report = runtime.block_on(replay::run(&script, settings))?;

    // Show the collected notifications as system notifications
    if args.desktop {
        let notifier = DesktopNotifier::new("Roster Grid");
        for (level, message) in &report.notifications {
            notifier.notify(*level, message);
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
