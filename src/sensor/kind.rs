use std::{fmt, str::FromStr};

use anyhow::{Error, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Temperature,
    Humidity,
    Gas,
    Co2,
    Gps,
    Ultrasonic,
    Camera,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Number,
    Text,
}

impl SensorKind {
    /// Read order within one iteration.
    pub const ALL: [SensorKind; 7] = [
        SensorKind::Temperature,
        SensorKind::Humidity,
        SensorKind::Gas,
        SensorKind::Co2,
        SensorKind::Gps,
        SensorKind::Ultrasonic,
        SensorKind::Camera,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Humidity => "humidity",
            SensorKind::Gas => "gas",
            SensorKind::Co2 => "co2",
            SensorKind::Gps => "gps",
            SensorKind::Ultrasonic => "ultrasonic",
            SensorKind::Camera => "camera",
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            SensorKind::Gps | SensorKind::Camera => ValueType::Text,
            _ => ValueType::Number,
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(SensorKind::Temperature),
            "humidity" => Ok(SensorKind::Humidity),
            "gas" => Ok(SensorKind::Gas),
            "co2" => Ok(SensorKind::Co2),
            "gps" => Ok(SensorKind::Gps),
            "ultrasonic" => Ok(SensorKind::Ultrasonic),
            "camera" => Ok(SensorKind::Camera),
            _ => bail!("unknown sensor kind: {}", s),
        }
    }
}
