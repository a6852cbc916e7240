//! `cecctl`: debug CLI over the controller facade.
//!
//! Loads the TOML config (path from `CECCTL_CONFIG`, else the platform
//! default), runs one intent, and prints the structured result.
//!
//! ```text
//! cecctl on                 # power the TV on
//! cecctl off                # standby
//! cecctl pow                # poll power status (never fails)
//! cecctl scan               # list bus devices
//! cecctl key volume-up      # press one key
//! cecctl keys up,up,ok      # press a sequence
//! cecctl vendor A1:B2:C3    # raw vendor command
//! cecctl osd "Living Room"  # set the OSD name
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cec_control::controller::{KeyPressOptions, KeySequenceOptions, VendorCommandOptions};
use cec_control::{load_from_path, CecController, ControllerConfig};
use cec_core::KeyInput;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    // Level from RUST_LOG when set, else from the config file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        bail!("usage: cecctl <on|off|pow|scan|key|keys|vendor|osd> [args]");
    };

    let controller = CecController::from_config(&config);

    match command.as_str() {
        "on" => {
            let output = controller.turn_on(None).await?;
            print_output(&output);
        }
        "off" | "standby" => {
            let output = controller.standby(None).await?;
            print_output(&output);
        }
        "pow" | "status" => {
            let status = controller.power_status(None).await;
            println!("available: {}", status.available);
            println!("status:    {}", status.status);
            if let Some(error) = status.error {
                println!("error:     {error}");
            }
        }
        "scan" => {
            let outcome = controller.scan_devices().await?;
            info!("found {} device(s)", outcome.devices.len());
            for device in &outcome.devices {
                println!(
                    "#{} {:20} addr={} power={}",
                    device.logical_address,
                    device.name,
                    device.physical_address.as_deref().unwrap_or("-"),
                    device.power_status.as_deref().unwrap_or("-"),
                );
            }
        }
        "key" => {
            let key = args.next().context("usage: cecctl key <name>")?;
            let outcome = controller
                .send_key(key.as_str(), KeyPressOptions::default())
                .await?;
            println!("sent code 0x{:02X}", outcome.code);
        }
        "keys" => {
            let list = args.next().context("usage: cecctl keys <a,b,c>")?;
            let keys: Vec<KeyInput> = list.split(',').map(KeyInput::from).collect();
            let outcomes = controller
                .send_key_sequence(
                    keys,
                    KeySequenceOptions {
                        delay_ms: 250,
                        ..Default::default()
                    },
                )
                .await?;
            println!("sent {} key(s)", outcomes.len());
        }
        "vendor" => {
            let payload = args.next().context("usage: cecctl vendor <hex bytes>")?;
            let output = controller
                .send_vendor_command(payload.as_str(), VendorCommandOptions::default())
                .await?;
            print_output(&output);
        }
        "osd" => {
            let name = args.next().context("usage: cecctl osd <name>")?;
            let output = controller.set_osd_name(Some(&name)).await?;
            print_output(&output);
        }
        other => bail!("unknown command {other:?}"),
    }

    Ok(())
}

fn load_config() -> anyhow::Result<ControllerConfig> {
    let path = match std::env::var_os("CECCTL_CONFIG") {
        Some(p) => PathBuf::from(p),
        None => cec_control::config::config_file_path()?,
    };
    load_from_path(&path).with_context(|| format!("loading config from {}", path.display()))
}

fn print_output(output: &str) {
    if output.is_empty() {
        println!("ok");
    } else {
        println!("{output}");
    }
}
