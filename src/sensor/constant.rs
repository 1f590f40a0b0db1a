use anyhow::Result;

use crate::sensor::Sensor;

pub const STUB_TEMPERATURE: f32 = 25.0;
pub const STUB_HUMIDITY: f32 = 50.0;
pub const STUB_GAS: f32 = 400.0;
pub const STUB_CO2: f32 = 600.0;
pub const STUB_GPS: &str = "51.5074, -0.1278";
pub const STUB_ULTRASONIC: f32 = 100.0;
pub const STUB_CAMERA: &str = "base64encodedimage";

/// Stub sensor that always returns the same value.
#[derive(Debug, Clone)]
pub struct Constant<T>(pub T);

impl<T> Sensor for Constant<T>
where
    T: Clone + Send,
{
    type Value = T;

    fn read(&mut self) -> Result<T> {
        Ok(self.0.clone())
    }
}
