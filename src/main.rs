mod cli;
mod config;
mod download;
mod error;
mod install;
mod platform;
mod source;
mod tool;
mod types;
mod verify;


use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::{get_setting, load_config, save_config, set_setting, unset_setting, SETTING_KEYS};
use platform::get_system_info;
use std::path::PathBuf;
use tool::{registry, select_tools};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli)?;

    let mut config = load_config()?;

    match cli.command {
        Commands::Version => {
            println!("backplane-tools v{}", env!("CARGO_PKG_VERSION"));
        }

        Commands::List => {
            let tools = registry(&config.settings, &get_system_info());
            println!("--- Available Tools ---");
            for tool in &tools {
                println!("  - {}", tool.name());
            }
        }

        Commands::Install { tools, root_dir } => {
            let platform = get_system_info();
            tracing::info!("Installing for platform {}", platform);

            let root_dir = root_dir.unwrap_or_else(|| PathBuf::from(&config.settings.root_dir));
            let registered = registry(&config.settings, &platform);

            for tool in select_tools(&registered, &tools)? {
                tool.install(&root_dir)
                    .await
                    .with_context(|| format!("Failed to install {}", tool.name()))?;
                println!("Installed {} to {}", tool.name(), root_dir.join(tool.name()).display());
            }
        }

        Commands::Configure { tools } => {
            let registered = registry(&config.settings, &get_system_info());
            for tool in select_tools(&registered, &tools)? {
                tool.configure()
                    .with_context(|| format!("Failed to configure {}", tool.name()))?;
                tracing::info!("Configured {}", tool.name());
            }
        }

        Commands::Remove { tools } => {
            let registered = registry(&config.settings, &get_system_info());
            for tool in select_tools(&registered, &tools)? {
                tool.remove()
                    .with_context(|| format!("Failed to remove {}", tool.name()))?;
                tracing::info!("Removed {}", tool.name());
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Get { key } => {
                if let Some(key) = key {
                    let value = get_setting(&config.settings, &key)
                        .unwrap_or_else(|| format!("Setting '{}' not found", key));
                    println!("{}", value);
                } else {
                    println!("--- backplane-tools Settings ---");
                    for key in SETTING_KEYS {
                        if let Some(value) = get_setting(&config.settings, key) {
                            println!("  {}: {}", key, value);
                        }
                    }
                }
            }
            ConfigAction::Set { args } => {
                let (key, value) = parse_key_value(&args)?;
                set_setting(&mut config.settings, &key, &value)?;
                save_config(&config)?;
                tracing::info!("Setting '{}' updated to '{}'", key, value);
            }
            ConfigAction::Unset { key } => {
                unset_setting(&mut config.settings, &key)?;
                save_config(&config)?;
                tracing::info!("Setting '{}' unset", key);
            }
            ConfigAction::Show { format } => match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&config)?),
                "yaml" => print!("{}", serde_yaml::to_string(&config)?),
                other => return Err(anyhow!("Unsupported format '{}'. Use json or yaml", other)),
            },
        },
    }

    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.quiet {
        "error"
    } else if cli.verbose == 0 {
        "warn"
    } else if cli.verbose == 1 {
        "info"
    } else {
        "debug"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

/// Accepts either `key=value` or `key value`.
fn parse_key_value(args: &[String]) -> Result<(String, String)> {
    match args {
        [single] => single
            .split_once('=')
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .ok_or_else(|| anyhow!("Invalid format. Use 'key=value' or 'key value'.")),
        [key, value] => Ok((key.clone(), value.clone())),
        _ => Err(anyhow!("Invalid format. Use 'key=value' or 'key value'.")),
    }
}
