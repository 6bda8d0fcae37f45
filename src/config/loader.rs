use std::path::Path;

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use tracing::{debug, error, warn};

use crate::config::settings::{LoggingConfig, SunlightConfig};
use crate::config::types::ConfigUpdate;

/// Load a YAML config file, expanding `${VAR}` / `${VAR:default}` from the environment
pub async fn file_to_config(path: &Path) -> Result<SunlightConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read config file '{}'", path.display()))?;
    parse_config(&expand_env_vars(&content))
}

pub fn parse_config(content: &str) -> Result<SunlightConfig> {
    let mut config: SunlightConfig = serde_yaml::from_str(content).inspect_err(|e| {
        error!("parse config error: {}", e);
    })?;

    // Apply defaults
    if config.logging.is_none() {
        config.logging = Some(LoggingConfig::default());
    }

    debug!("validating config ...");
    for issue in validate_config(&config.client) {
        warn!("{}", issue);
    }
    Ok(config)
}

/// Credential pairs that will not do what the caller probably expects.
/// These are warnings, the client still accepts the update.
pub fn validate_config(update: &ConfigUpdate) -> Vec<String> {
    let mut issues = Vec::new();
    let Some(credentials) = &update.credentials else {
        issues.push("config: 'credentials' missing; requests will be sent unauthenticated".to_owned());
        return issues;
    };

    match &credentials.platform {
        Some(platform) if platform.username.is_some() != platform.token.is_some() => issues.push(
            "credentials.platform: username and token must be given together, auth header is left unchanged"
                .to_owned(),
        ),
        None => issues.push("credentials.platform: missing, no Authorization header will be sent".to_owned()),
        _ => {}
    }

    match &credentials.backend {
        Some(backend) if backend.username.is_none() || backend.password.is_none() => {
            issues.push("credentials.backend: username and password are both required for token requests".to_owned())
        }
        None => issues.push("credentials.backend: missing, token requests will carry no account".to_owned()),
        _ => {}
    }

    issues
}

pub fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").expect("static regex");
    re.replace_all(input, |caps: &Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
