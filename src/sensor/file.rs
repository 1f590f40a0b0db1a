use std::{fs, marker::PhantomData, path::PathBuf, str::FromStr};

use anyhow::{Context as _, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::sensor::Sensor;

/// Hardware-backed sensor exposed as a text file, e.g. a sysfs or IIO node.
///
/// The whole file is read on every call, trimmed, and parsed as `T`.
#[derive(Debug)]
pub struct FileSensor<T> {
    path: PathBuf,
    _value: PhantomData<fn() -> T>,
}

impl<T> FileSensor<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _value: PhantomData,
        }
    }
}

impl<T> Sensor for FileSensor<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    type Value = T;

    fn read(&mut self) -> Result<T> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read sensor file: {:?}", self.path))?;

        raw.trim()
            .parse()
            .with_context(|| format!("failed to parse sensor value: {:?}", raw.trim()))
    }
}

/// Camera frames written to disk by a capture daemon, sent base64-encoded.
#[derive(Debug)]
pub struct ImageFileSensor {
    path: PathBuf,
}

impl ImageFileSensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Sensor for ImageFileSensor {
    type Value = String;

    fn read(&mut self) -> Result<String> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("failed to read image file: {:?}", self.path))?;

        Ok(STANDARD.encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn reads_trimmed_number() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  23.5 ").unwrap();

        let mut sensor = FileSensor::<f32>::new(file.path());
        assert_eq!(sensor.read().unwrap(), 23.5);
    }

    #[test]
    fn rereads_on_every_call() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "10").unwrap();
        let mut sensor = FileSensor::<f32>::new(file.path());
        assert_eq!(sensor.read().unwrap(), 10.0);

        fs::write(file.path(), "11.25\n").unwrap();
        assert_eq!(sensor.read().unwrap(), 11.25);
    }

    #[test]
    fn reports_unparsable_value() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "n/a").unwrap();

        let err = FileSensor::<f32>::new(file.path()).read().unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse sensor value"));
    }

    #[test]
    fn reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sensor = FileSensor::<String>::new(dir.path().join("missing"));

        assert!(sensor.read().is_err());
    }

    #[test]
    fn encodes_image_as_base64() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xd8, 0xff, 0xe0]).unwrap();

        let mut sensor = ImageFileSensor::new(file.path());
        assert_eq!(sensor.read().unwrap(), "/9j/4A==");
    }
}
