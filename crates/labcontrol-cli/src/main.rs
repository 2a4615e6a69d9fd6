//! Desktop runner for the lab occupancy controller.
//!
//! Runs the controller with terminal peripherals. Buttons are driven from
//! stdin, one command per line:
//!
//! - `e`: tap the entry button
//! - `s`: tap the exit button
//! - `r`: press the reset button
//! - `q`: quit
//!
//! Set `LABCONTROL_CONFIG` to a JSON file to override the defaults and
//! `RUST_LOG` to change the log filter.

mod console;

use std::time::Duration;

use anyhow::{Context, Result};
use labcontrol_controller::{Lab, LabDevices};
use labcontrol_core::LabConfig;
use labcontrol_hardware::mock::{MockButton, MockButtonHandle, MockInterruptPin};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use console::{ConsoleBuzzer, ConsoleDisplay, ConsoleLed};

/// Environment variable naming the configuration file.
const CONFIG_ENV: &str = "LABCONTROL_CONFIG";

/// How long a keyboard tap holds a button.
const TAP_HOLD: Duration = Duration::from_millis(150);

fn load_config() -> Result<LabConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => LabConfig::from_path(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.to_string_lossy())),
        None => Ok(LabConfig::default()),
    }
}

fn tap(button: &MockButtonHandle) {
    let button = button.clone();
    tokio::spawn(async move { button.tap(TAP_HOLD).await });
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;

    let (entry, entry_button) = MockButton::with_name("Entry".to_string());
    let (exit, exit_button) = MockButton::with_name("Exit".to_string());
    let (reset, reset_button) = MockInterruptPin::new();

    let lab = Lab::start(
        &config,
        LabDevices {
            entry,
            exit,
            reset,
            red: ConsoleLed::new("red"),
            green: ConsoleLed::new("green"),
            blue: ConsoleLed::new("blue"),
            buzzer: ConsoleBuzzer,
            display: ConsoleDisplay::default(),
        },
    )
    .context("Failed to start lab controller")?;

    info!("Commands: e = entry, s = exit, r = reset, q = quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match line.trim() {
                    "e" => tap(&entry_button),
                    "s" => tap(&exit_button),
                    "r" => {
                        reset_button.trigger();
                    }
                    "q" => break,
                    "" => {}
                    other => warn!("Unknown command: {}", other),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    let dropped = lab.audio_dropped();
    let stats = lab.shutdown().await;
    info!(
        "Exits: {} ({} ignored), {} sound(s) dropped",
        stats.exited, stats.ignored_exits, dropped
    );
    Ok(())
}
