use std::{path::PathBuf, time::Duration};

use anyhow::{Context as _, Result, bail};
use async_trait::async_trait;
use tokio::{process::Command, time::sleep};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Connected,
    Disconnected,
}

#[derive(Clone)]
pub struct Credentials {
    pub ssid: String,

    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Wireless association as seen by the application.
#[async_trait]
pub trait Network: Send + Sync {
    async fn begin(&mut self, credentials: &Credentials) -> Result<()>;

    async fn status(&self) -> LinkStatus;
}

/// Joins the network and blocks until associated. There is no timeout.
pub async fn connect<N>(network: &mut N, credentials: &Credentials, poll: Duration)
where
    N: Network + ?Sized,
{
    if let Err(err) = network.begin(credentials).await {
        warn!(ssid = %credentials.ssid, "failed to begin association: {err:#}");
    }

    while network.status().await != LinkStatus::Connected {
        sleep(poll).await;
        info!("connecting to wifi...");
    }

    info!(ssid = %credentials.ssid, "connected to wifi");
}

/// WiFi managed through NetworkManager on a Linux host.
#[derive(Debug)]
pub struct NmcliWifi {
    interface: String,
    operstate: PathBuf,
}

impl NmcliWifi {
    pub fn new(interface: impl Into<String>) -> Self {
        let interface = interface.into();
        let operstate = PathBuf::from(format!("/sys/class/net/{interface}/operstate"));

        Self {
            interface,
            operstate,
        }
    }
}

#[async_trait]
impl Network for NmcliWifi {
    async fn begin(&mut self, credentials: &Credentials) -> Result<()> {
        let output = Command::new("nmcli")
            .args(["device", "wifi", "connect", &credentials.ssid])
            .args(["password", &credentials.password])
            .args(["ifname", &self.interface])
            .output()
            .await
            .context("failed to run nmcli")?;

        if !output.status.success() {
            bail!(
                "nmcli exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(())
    }

    async fn status(&self) -> LinkStatus {
        match tokio::fs::read_to_string(&self.operstate).await {
            Ok(state) if state.trim() == "up" => LinkStatus::Connected,
            Ok(_) => LinkStatus::Disconnected,
            Err(err) => {
                debug!(path = ?self.operstate, "failed to read operstate: {err}");
                LinkStatus::Disconnected
            }
        }
    }
}

/// A link brought up outside this process; always reported as connected.
#[derive(Debug, Default)]
pub struct HostNetwork;

#[async_trait]
impl Network for HostNetwork {
    async fn begin(&mut self, _credentials: &Credentials) -> Result<()> {
        Ok(())
    }

    async fn status(&self) -> LinkStatus {
        LinkStatus::Connected
    }
}

#[async_trait]
impl<N> Network for Box<N>
where
    N: Network + ?Sized,
{
    async fn begin(&mut self, credentials: &Credentials) -> Result<()> {
        (**self).begin(credentials).await
    }

    async fn status(&self) -> LinkStatus {
        (**self).status().await
    }
}
