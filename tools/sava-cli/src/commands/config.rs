//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;
use crate::output::format_duration;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
        ConfigCommand::Env => show_env(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[store]");
    ctx.output.kv("path", &ctx.store_path().display().to_string());

    ctx.output.info("[session]");
    ctx.output.kv("path", &ctx.session_path().display().to_string());
    ctx.output.kv("lang", &ctx.config.session.lang);

    let settings = &ctx.settings;
    ctx.output.info("[pricing]");
    ctx.output.kv("tax_rate", &settings.pricing.tax_rate.to_string());
    ctx.output.kv("shipping", &settings.pricing.shipping_flat.display());
    ctx.output.kv(
        "free_shipping_over",
        &settings.pricing.free_shipping_threshold.display(),
    );
    ctx.output.kv("products_per_page", &settings.products_per_page.to_string());
    ctx.output.kv("orders_per_page", &settings.orders_per_page.to_string());
    ctx.output.kv(
        "session_timeout",
        &format_duration(settings.cart_session_timeout.as_secs()),
    );

    ctx.output.info("[logging]");
    ctx.output.kv("level", &settings.log_level);
    match &settings.log_file {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(stderr only)"),
    }

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = ctx.config.get(key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = &ctx.config_path else {
        bail!("No config file found. Run `sava config init` to create one.");
    };

    let mut config = CliConfig::load(config_path)?;
    config.set(key, value)?;
    config.save(config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors = ctx.config.validate();
    errors.extend(ctx.settings.validate());
    let mut warnings: Vec<String> = Vec::new();

    if !ctx.settings.secret_key_from_env {
        warnings.push("SECRET_KEY not set, using a generated key".to_string());
    }
    if ctx.settings.debug && ctx.settings.environment.is_production() {
        warnings.push("DEBUG is on in production".to_string());
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn show_env(ctx: &Context) -> Result<()> {
    let info = ctx.settings.env_info();

    if ctx.output.is_json() {
        ctx.output.json(&info);
        return Ok(());
    }

    ctx.output.header(info.app_name);
    ctx.output.kv("version", info.version);
    ctx.output.kv("environment", info.environment.as_str());
    ctx.output.kv("debug", &info.debug.to_string());
    ctx.output.kv("log_level", &info.log_level);
    Ok(())
}
