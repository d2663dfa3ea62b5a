// src/config.rs
use anyhow::Result;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_GENERATION_SERVICE_URL: &str = "http://127.0.0.1:5555";
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;

/// Server configuration, from command-line flags with environment fallbacks.
#[derive(Debug, Clone, Parser)]
#[command(name = "job-description-api")]
#[command(about = "Validate job posting requests and forward them to the generation service")]
pub struct AppConfig {
    #[arg(long, env = "ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub address: IpAddr,

    #[arg(long, env = "ROCKET_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Base URL of the text-generation service
    #[arg(long, env = "GENERATION_SERVICE_URL", default_value = DEFAULT_GENERATION_SERVICE_URL)]
    pub generation_service_url: String,

    #[arg(long, env = "GENERATION_TIMEOUT_SECS", default_value_t = DEFAULT_GENERATION_TIMEOUT_SECS)]
    pub generation_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            generation_service_url: DEFAULT_GENERATION_SERVICE_URL.to_string(),
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Parse flags/environment and check the result.
    pub fn load() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.generation_service_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!(
                "GENERATION_SERVICE_URL must start with http:// or https://, got: {}",
                url
            );
        }

        if self.generation_timeout_secs == 0 {
            anyhow::bail!("GENERATION_TIMEOUT_SECS must be greater than zero");
        }

        Ok(())
    }
}
