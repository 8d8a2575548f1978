//! Client and logging setup for hosts running the providers

use std::time::Duration;

use aws_config::{retry::RetryConfig, BehaviorVersion, ConfigLoader, Region};
use aws_sdk_iot::config::StalledStreamProtectionConfig;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::Error;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_STALLED_STREAM_GRACE_PERIOD_SECS: u64 = 5;
const DEFAULT_LOG_FILTER: &str = "info";

/// How to build the IoT client.
///
/// Unset profile and region fall back to the default provider chains of the
/// SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub profile_name: Option<String>,
    pub region: Option<String>,
    pub max_attempts: u32,
    pub stalled_stream_grace_period_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            profile_name: None,
            region: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            stalled_stream_grace_period_secs: DEFAULT_STALLED_STREAM_GRACE_PERIOD_SECS,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_attempts == 0 {
            return Err(Error::Config {
                message: "max_attempts must be at least 1".to_owned(),
            });
        }
        Ok(())
    }

    fn loader(&self) -> ConfigLoader {
        let mut loader = ConfigLoader::default()
            .retry_config(RetryConfig::standard().with_max_attempts(self.max_attempts))
            .stalled_stream_protection(
                StalledStreamProtectionConfig::enabled()
                    .grace_period(Duration::from_secs(self.stalled_stream_grace_period_secs))
                    .build(),
            )
            .behavior_version(BehaviorVersion::latest());

        if let Some(ref profile_name) = self.profile_name {
            loader = loader.profile_name(profile_name);
        }
        if let Some(ref region) = self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        loader
    }
}

/// Loads the SDK configuration and builds an IoT client from it.
pub async fn load_client(config: &ClientConfig) -> Result<aws_sdk_iot::Client, Error> {
    config.validate()?;
    let sdk_config = config.loader().load().await;
    Ok(aws_sdk_iot::Client::new(&sdk_config))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as `info,iot_providers=debug`
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl LoggingConfig {
    fn env_filter(&self) -> Result<EnvFilter, Error> {
        EnvFilter::try_new(&self.filter).map_err(|e| Error::Config {
            message: format!("invalid log filter \"{}\": {e}", self.filter),
        })
    }
}

/// Installs a global fmt subscriber. Fails if one is installed already.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .try_init()
        .map_err(|e| Error::Config {
            message: format!("cannot install log subscriber: {e}"),
        })
}
