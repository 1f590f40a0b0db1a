use std::{mem, panic, time::Duration};

use anyhow::Error;
use tokio::{task::spawn_blocking, time::sleep};
use tracing::{debug, error, info, warn};

use crate::{
    network::{LinkStatus, Network},
    reading::{CONTENT_TYPE, Sample},
    sensor::SensorSuite,
    transport::{Response, Transport},
};

/// How one iteration ended.
#[derive(Debug)]
pub enum Outcome {
    /// Not associated; nothing was read or sent.
    Offline,
    /// A sensor failed or produced an unsendable value; the reading was dropped.
    SensorFailed(Error),
    /// The server answered, with any status.
    Delivered(Response),
    /// No response at all.
    SendFailed(Error),
}

impl Outcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Outcome::Delivered(_))
    }
}

pub struct Monitor<N, T> {
    network: N,
    transport: T,
    sensors: SensorSuite,
    interval: Duration,
}

impl<N, T> Monitor<N, T>
where
    N: Network,
    T: Transport,
{
    pub fn new(network: N, transport: T, sensors: SensorSuite, interval: Duration) -> Self {
        Self {
            network,
            transport,
            sensors,
            interval,
        }
    }

    /// Gate, sense, serialize, transmit, report. Never retries.
    pub async fn tick(&mut self) -> Outcome {
        if self.network.status().await != LinkStatus::Connected {
            debug!("not connected, skipping iteration");
            return Outcome::Offline;
        }

        let sample = match self.sample().await {
            Ok(sample) => sample,
            Err(err) => {
                warn!("dropping reading: {err:#}");
                return Outcome::SensorFailed(err);
            }
        };

        let body = match sample.reading.to_json() {
            Ok(body) => body,
            Err(err) => {
                warn!("dropping reading: {err:#}");
                return Outcome::SensorFailed(err);
            }
        };
        debug!(measured_at = %sample.measured_at, %body, "sending reading");

        match self.transport.post(CONTENT_TYPE, body).await {
            Ok(response) => {
                info!(status = response.status, body = %response.body, "reading sent");
                Outcome::Delivered(response)
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "error on sending POST");
                Outcome::SendFailed(err)
            }
        }
    }

    /// Sensors may block on file or bus I/O, so they are read off the runtime thread.
    async fn sample(&mut self) -> anyhow::Result<Sample> {
        let mut sensors = mem::take(&mut self.sensors);
        let (sensors, sample) = spawn_blocking(move || {
            let sample = sensors.sample();
            (sensors, sample)
        })
        .await
        .unwrap_or_else(|err| panic::resume_unwind(err.into_panic()));
        self.sensors = sensors;

        sample
    }

    pub async fn run(mut self) {
        info!(interval = ?self.interval, "starting sense-report loop");

        loop {
            self.tick().await;
            sleep(self.interval).await;
        }
    }
}
