//! Configuration management commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use shelf_gateway::BackoffConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let gateway = &ctx.config.gateway;
    ctx.output.info("[gateway]");
    ctx.output.kv(
        "fixture",
        &gateway
            .fixture
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(bundled)".to_string()),
    );
    ctx.output.kv("latency_ms", &gateway.latency_ms.to_string());
    if let Some(n) = gateway.fail_every {
        ctx.output.kv("fail_every", &n.to_string());
    }

    ctx.output.info("[gateway.retry]");
    ctx.output.kv("max_attempts", &gateway.retry.max_attempts.to_string());
    ctx.output.kv("backoff", &describe_backoff(&gateway.retry.backoff));

    ctx.output.info("[store]");
    ctx.output.kv(
        "fetch_timeout_ms",
        &match ctx.config.store.fetch_timeout() {
            Some(limit) => limit.as_millis().to_string(),
            None => "none".to_string(),
        },
    );
    ctx.output.kv(
        "refresh_delay_ms",
        &ctx.config.store.refresh_delay_ms.to_string(),
    );

    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv(
        "format",
        &format!("{:?}", ctx.config.logging.format).to_lowercase(),
    );

    Ok(())
}

fn describe_backoff(backoff: &BackoffConfig) -> String {
    match backoff {
        BackoffConfig::None => "none".to_string(),
        BackoffConfig::Fixed { delay_ms } => format!("fixed {}ms", delay_ms),
        BackoffConfig::Exponential { base_ms, max_ms } => {
            format!("exponential {}ms..{}ms", base_ms, max_ms)
        }
    }
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        if !console::user_attended() || ctx.output.is_json() {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        let overwrite = Confirm::new()
            .with_prompt(format!("Overwrite {}?", config_path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ctx.output.info("Keeping existing config");
            return Ok(());
        }
    }

    std::fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check(&ctx.config);

    // Print results
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

/// Collect errors and warnings for a configuration.
fn check(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Some(path) = &config.gateway.fixture {
        if !path.is_file() {
            errors.push(format!("gateway.fixture not found: {}", path.display()));
        }
    }

    if config.gateway.fail_every == Some(1) {
        warnings.push("gateway.fail_every = 1 makes every request fail".to_string());
    }

    if let BackoffConfig::Exponential { base_ms, max_ms } = config.gateway.retry.backoff {
        if base_ms > max_ms {
            errors.push("gateway.retry.backoff.base_ms must not exceed max_ms".to_string());
        }
    }

    if let Some(limit) = config.store.fetch_timeout() {
        let latency = config.gateway.latency_ms as u128;
        if latency >= limit.as_millis() {
            warnings.push(format!(
                "gateway.latency_ms ({}) reaches store.fetch_timeout_ms ({}); every load will time out",
                latency,
                limit.as_millis()
            ));
        }
    }

    if config.logging.level.trim().is_empty() {
        errors.push("logging.level must not be empty".to_string());
    }

    (errors, warnings)
}
