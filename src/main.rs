use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use demo::DemoApp;
use emails_input::SettingsOverrides;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Parser)]
#[command(name = "emails-input", version, about = "Multi-email entry widget demo")]
struct Cli {
    /// TOML file with per-widget setting overrides.
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Initial email, repeatable. All must be valid.
    #[arg(long = "email", value_name = "ADDRESS")]
    emails: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Also installs the `log` bridge, so library crates logging through `log` show up here.
    if let Err(err) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("logging already initialised: {err}");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let overrides = cli
        .settings
        .as_deref()
        .map(SettingsOverrides::load)
        .transpose()
        .context("loading settings")?;
    if let Some(path) = &cli.settings {
        log::debug!("settings overrides loaded from {}", path.display());
    }

    let app = DemoApp::new(overrides.as_ref(), &cli.emails).context("mounting the widget")?;
    platform::run(Box::new(app)).context("running the window")?;
    Ok(())
}
