mod args;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use env_monitor::{
    monitor::{Monitor, Outcome},
    network::{HostNetwork, Network, NmcliWifi, connect},
    sensor::SensorSuite,
    transport::HttpTransport,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run() -> Result<ExitCode> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return Err(e).context("invalid configuration"),
    };

    let mut sensors = SensorSuite::stub();
    for file in &args.sensor_files {
        sensors
            .bind_file(file.kind, &file.path)
            .with_context(|| format!("failed to bind {} sensor to {:?}", file.kind, file.path))?;
        info!(kind = %file.kind, path = ?file.path, "sensor bound to file");
    }

    let transport = HttpTransport::new(args.endpoint.clone(), args.timeout())
        .context("failed to create HTTP transport")?;
    info!(endpoint = %transport.endpoint(), "reporting to endpoint");

    let network: Box<dyn Network> = match args.credentials() {
        Some(credentials) => {
            let mut wifi = NmcliWifi::new(args.wifi_interface.as_str());
            connect(&mut wifi, &credentials, args.connect_poll()).await;
            Box::new(wifi)
        }
        None => {
            info!("no wifi credentials configured, using host network");
            Box::new(HostNetwork)
        }
    };

    let mut monitor = Monitor::new(network, transport, sensors, args.interval());

    if args.once {
        let outcome = monitor.tick().await;
        return Ok(ExitCode::from(once_exit_code(&outcome)));
    }

    monitor.run().await;

    Ok(ExitCode::SUCCESS)
}

/// Any server answer counts as success, whatever its status.
fn once_exit_code(outcome: &Outcome) -> u8 {
    if outcome.is_delivered() { 0 } else { 1 }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use env_monitor::transport::Response;

    use super::*;

    #[test]
    fn once_exits_zero_only_when_delivered() {
        assert_eq!(once_exit_code(&Outcome::Offline), 1);
        assert_eq!(
            once_exit_code(&Outcome::SensorFailed(anyhow!("no fix"))),
            1
        );
        assert_eq!(
            once_exit_code(&Outcome::SendFailed(anyhow!("connection refused"))),
            1
        );
        assert_eq!(
            once_exit_code(&Outcome::Delivered(Response {
                status: 500,
                body: "Internal Error".to_string(),
            })),
            0
        );
    }
}
