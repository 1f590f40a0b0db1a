use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use chrono::Utc;

use crate::{
    reading::{Reading, Sample},
    sensor::{
        Constant, FileSensor, ImageFileSensor, STUB_CAMERA, STUB_CO2, STUB_GAS, STUB_GPS,
        STUB_HUMIDITY, STUB_TEMPERATURE, STUB_ULTRASONIC, Sensor, SensorKind, ValueType,
    },
};

pub type NumberSensor = Box<dyn Sensor<Value = f32>>;
pub type TextSensor = Box<dyn Sensor<Value = String>>;

/// One sensor per reading kind.
pub struct SensorSuite {
    temperature: NumberSensor,
    humidity: NumberSensor,
    gas: NumberSensor,
    co2: NumberSensor,
    gps: TextSensor,
    ultrasonic: NumberSensor,
    camera: TextSensor,
}

impl SensorSuite {
    /// Every kind backed by its constant stub value.
    pub fn stub() -> Self {
        Self {
            temperature: Box::new(Constant(STUB_TEMPERATURE)),
            humidity: Box::new(Constant(STUB_HUMIDITY)),
            gas: Box::new(Constant(STUB_GAS)),
            co2: Box::new(Constant(STUB_CO2)),
            gps: Box::new(Constant(STUB_GPS.to_string())),
            ultrasonic: Box::new(Constant(STUB_ULTRASONIC)),
            camera: Box::new(Constant(STUB_CAMERA.to_string())),
        }
    }

    pub fn set_number(&mut self, kind: SensorKind, sensor: NumberSensor) -> Result<()> {
        let slot = match kind {
            SensorKind::Temperature => &mut self.temperature,
            SensorKind::Humidity => &mut self.humidity,
            SensorKind::Gas => &mut self.gas,
            SensorKind::Co2 => &mut self.co2,
            SensorKind::Ultrasonic => &mut self.ultrasonic,
            SensorKind::Gps | SensorKind::Camera => {
                bail!("{kind} expects a text sensor, got a number sensor")
            }
        };
        *slot = sensor;

        Ok(())
    }

    pub fn set_text(&mut self, kind: SensorKind, sensor: TextSensor) -> Result<()> {
        let slot = match kind {
            SensorKind::Gps => &mut self.gps,
            SensorKind::Camera => &mut self.camera,
            _ => bail!("{kind} expects a number sensor, got a text sensor"),
        };
        *slot = sensor;

        Ok(())
    }

    pub fn with_number(
        mut self,
        kind: SensorKind,
        sensor: impl Sensor<Value = f32> + 'static,
    ) -> Result<Self> {
        self.set_number(kind, Box::new(sensor))?;
        Ok(self)
    }

    pub fn with_text(
        mut self,
        kind: SensorKind,
        sensor: impl Sensor<Value = String> + 'static,
    ) -> Result<Self> {
        self.set_text(kind, Box::new(sensor))?;
        Ok(self)
    }

    /// Backs `kind` with a file: camera frames are base64-encoded, other
    /// kinds are parsed from the file's trimmed text.
    pub fn bind_file(&mut self, kind: SensorKind, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();

        match (kind, kind.value_type()) {
            (SensorKind::Camera, _) => {
                self.set_text(kind, Box::new(ImageFileSensor::new(path)))
            }
            (_, ValueType::Text) => {
                self.set_text(kind, Box::new(FileSensor::<String>::new(path)))
            }
            (_, ValueType::Number) => {
                self.set_number(kind, Box::new(FileSensor::<f32>::new(path)))
            }
        }
    }

    /// Reads every sensor in [`SensorKind::ALL`] order.
    ///
    /// Stops at the first failing sensor, so a partial reading is never returned.
    pub fn sample(&mut self) -> Result<Sample> {
        let temperature = read(&mut self.temperature, SensorKind::Temperature)?;
        let humidity = read(&mut self.humidity, SensorKind::Humidity)?;
        let gas = read(&mut self.gas, SensorKind::Gas)?;
        let co2 = read(&mut self.co2, SensorKind::Co2)?;
        let gps = read(&mut self.gps, SensorKind::Gps)?;
        let ultrasonic = read(&mut self.ultrasonic, SensorKind::Ultrasonic)?;
        let camera = read(&mut self.camera, SensorKind::Camera)?;

        Ok(Sample {
            measured_at: Utc::now(),
            reading: Reading {
                temperature,
                humidity,
                gas,
                co2,
                gps,
                ultrasonic,
                camera,
            },
        })
    }
}

impl Default for SensorSuite {
    fn default() -> Self {
        Self::stub()
    }
}

fn read<T>(sensor: &mut Box<dyn Sensor<Value = T>>, kind: SensorKind) -> Result<T> {
    sensor
        .read()
        .with_context(|| format!("failed to read {kind} sensor"))
}
