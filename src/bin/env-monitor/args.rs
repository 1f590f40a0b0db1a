use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Context as _, Error, anyhow};
use clap::Parser;
use env_monitor::{network::Credentials, sensor::SensorKind};
use reqwest::Url;

#[derive(Debug, Parser)]
pub struct Args {
    #[arg(long, env = "ENV_MONITOR_ENDPOINT", default_value = "http://localhost:3001/data")]
    pub endpoint: Url,

    #[arg(
        long,
        env = "ENV_MONITOR_INTERVAL_SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_secs: u64,

    #[arg(
        long,
        env = "ENV_MONITOR_TIMEOUT_SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    #[arg(long, env = "WIFI_SSID", requires = "wifi_password")]
    pub wifi_ssid: Option<String>,

    #[arg(long, env = "WIFI_PASSWORD", hide_env_values = true)]
    pub wifi_password: Option<String>,

    #[arg(long, env = "WIFI_INTERFACE", default_value = "wlan0")]
    pub wifi_interface: String,

    #[arg(
        long,
        env = "ENV_MONITOR_CONNECT_POLL_SECS",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub connect_poll_secs: u64,

    /// Read one value from a file instead of the stub, as KIND=PATH.
    #[arg(long = "sensor-file", value_name = "KIND=PATH")]
    pub sensor_files: Vec<SensorFile>,

    /// Run a single iteration and exit.
    #[arg(long)]
    pub once: bool,
}

impl Args {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_poll(&self) -> Duration {
        Duration::from_secs(self.connect_poll_secs)
    }

    pub fn credentials(&self) -> Option<Credentials> {
        Some(Credentials {
            ssid: self.wifi_ssid.clone()?,
            password: self.wifi_password.clone()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SensorFile {
    pub kind: SensorKind,
    pub path: PathBuf,
}

impl FromStr for SensorFile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, path) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KIND=PATH, got: {s}"))?;

        let kind = kind
            .parse()
            .with_context(|| format!("invalid sensor file binding: {s}"))?;

        if path.is_empty() {
            return Err(anyhow!("empty path for {kind} sensor"));
        }

        Ok(Self {
            kind,
            path: PathBuf::from(path),
        })
    }
}
