mod constant;
mod file;
mod kind;
mod suite;

use anyhow::Result;

pub use constant::*;
pub use file::*;
pub use kind::*;
pub use suite::*;

/// A source of one typed value per iteration.
///
/// Closures returning `Result<T>` are sensors too, which is how ad-hoc drivers
/// and test doubles are plugged in.
pub trait Sensor: Send {
    type Value;

    fn read(&mut self) -> Result<Self::Value>;
}

impl<T, F> Sensor for F
where
    F: FnMut() -> Result<T> + Send,
{
    type Value = T;

    fn read(&mut self) -> Result<T> {
        self()
    }
}
