/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When AppConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;

use cloudtask::config::{AppConfig, RedirectPolicy};

pub fn run_init(output: PathBuf, base_url: Option<String>, accept_defaults: bool) -> Result<()> {
    let mut config = AppConfig::default();
    if let Some(base_url) = base_url {
        config.api.base_url = base_url;
    }

    if !accept_defaults {
        prompt_config(&mut config)?;
    }

    let yaml = config.to_yaml()?;
    std::fs::write(&output, yaml)
        .context(format!("failed to write config to {}", output.display()))?;

    println!("{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}

fn prompt_config(config: &mut AppConfig) -> Result<()> {
    println!("{}", style("Welcome to CloudTask Init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a client configuration.").dim()
    );

    let theme = ColorfulTheme::default();

    config.api.base_url = Input::with_theme(&theme)
        .with_prompt("Backend URL")
        .default(config.api.base_url.clone())
        .interact_text()?;

    config.api.timeout_secs = Input::with_theme(&theme)
        .with_prompt("Request timeout (seconds)")
        .default(config.api.timeout_secs)
        .interact_text()?;

    println!("\n{}", style("--- Session ---").bold());
    let policies = ["Redirect to login on auth failures only", "Redirect to login on any failure"];
    let selection = Select::with_theme(&theme)
        .with_prompt("Dashboard failure handling")
        .items(&policies)
        .default(0)
        .interact()?;
    config.ui.redirect_policy = if selection == 0 {
        RedirectPolicy::UnauthorizedOnly
    } else {
        RedirectPolicy::AnyError
    };

    let session_path: String = Input::with_theme(&theme)
        .with_prompt("Session file (empty for platform default)")
        .allow_empty(true)
        .interact_text()?;
    if !session_path.trim().is_empty() {
        config.session.path = Some(PathBuf::from(session_path.trim()));
    }

    Ok(())
}
