//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, POLL_INTERVAL_RANGE_MS, SAMPLE_RATE_RANGE};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    validate_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    validate_key(key)?;

    let config = store.load().await?;
    match config_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &config_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn validate_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "source" | "recordings_dir" if value.trim().is_empty() => {
            return Err(invalid("Value must not be empty".to_string()));
        }
        "source" => config.source = Some(value.to_string()),
        "recordings_dir" => config.recordings_dir = Some(value.to_string()),
        "poll_interval_ms" => {
            let ms = value
                .parse::<u64>()
                .ok()
                .filter(|ms| POLL_INTERVAL_RANGE_MS.contains(ms))
                .ok_or_else(|| {
                    invalid(format!(
                        "Value must be a number of milliseconds between {} and {}",
                        POLL_INTERVAL_RANGE_MS.start(),
                        POLL_INTERVAL_RANGE_MS.end()
                    ))
                })?;
            config.poll_interval_ms = Some(ms);
        }
        "sample_rate" => {
            let rate = value
                .parse::<u32>()
                .ok()
                .filter(|rate| SAMPLE_RATE_RANGE.contains(rate))
                .ok_or_else(|| {
                    invalid(format!(
                        "Value must be a sample rate between {} and {} Hz",
                        SAMPLE_RATE_RANGE.start(),
                        SAMPLE_RATE_RANGE.end()
                    ))
                })?;
            config.sample_rate = Some(rate);
        }
        "recording_enabled" => {
            let enabled = parse_bool(value)
                .map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?;
            config.recording_enabled = Some(enabled);
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }

    Ok(())
}

/// Current value of `key` as text
fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "source" => config.source.clone(),
        "recordings_dir" => config.recordings_dir.clone(),
        "poll_interval_ms" => config.poll_interval_ms.map(|v| v.to_string()),
        "sample_rate" => config.sample_rate.map(|v| v.to_string()),
        "recording_enabled" => config.recording_enabled.map(|b| b.to_string()),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
