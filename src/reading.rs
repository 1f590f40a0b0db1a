use anyhow::{Context as _, Result, bail};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub temperature: f32,

    pub humidity: f32,

    pub gas: f32,

    pub co2: f32,

    pub gps: String,

    pub ultrasonic: f32,

    pub camera: String,
}

impl Reading {
    /// Non-finite numbers are rejected rather than sent as `null`.
    pub fn to_json(&self) -> Result<String> {
        for (key, value) in [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("gas", self.gas),
            ("co2", self.co2),
            ("ultrasonic", self.ultrasonic),
        ] {
            if !value.is_finite() {
                bail!("{key} is not a finite number: {value}");
            }
        }

        serde_json::to_string(self).context("failed to serialize reading")
    }
}

/// A reading together with the moment its last sensor returned.
#[derive(Debug, Clone)]
pub struct Sample {
    pub measured_at: DateTime<Utc>,

    pub reading: Reading,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_reading() -> Reading {
        Reading {
            temperature: 25.0,
            humidity: 50.0,
            gas: 400.0,
            co2: 600.0,
            gps: "51.5074, -0.1278".to_string(),
            ultrasonic: 100.0,
            camera: "base64encodedimage".to_string(),
        }
    }

    #[test]
    fn serializes_reference_reading() {
        let json = reference_reading().to_json().unwrap();

        assert_eq!(
            json,
            r#"{"temperature":25.0,"humidity":50.0,"gas":400.0,"co2":600.0,"gps":"51.5074, -0.1278","ultrasonic":100.0,"camera":"base64encodedimage"}"#
        );
    }

    #[test]
    fn keeps_values_unrounded() {
        let mut reading = reference_reading();
        reading.temperature = 21.37;
        reading.co2 = 1234.5;

        let value: serde_json::Value =
            serde_json::from_str(&reading.to_json().unwrap()).unwrap();

        assert_eq!(value["temperature"].as_f64().unwrap() as f32, 21.37);
        assert_eq!(value["co2"].as_f64().unwrap() as f32, 1234.5);
        assert_eq!(value.as_object().unwrap().len(), 7);
    }

    #[test]
    fn rejects_non_finite_values() {
        let mut reading = reference_reading();
        reading.ultrasonic = f32::NAN;

        let err = reading.to_json().unwrap_err();
        assert_eq!(err.to_string(), "ultrasonic is not a finite number: NaN");
    }
}
