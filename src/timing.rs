//! Wall-clock timing of arbitrary computations

use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};

/// A value together with the time it took to compute
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timed<T> {
    pub value: T,
    #[serde(rename = "seconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed time in seconds
    pub fn secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl<T, E> Timed<Result<T, E>> {
    /// Lift a fallible result out, keeping the elapsed time on success
    pub fn transpose(self) -> Result<Timed<T>, E> {
        let elapsed = self.elapsed;
        self.value.map(|value| Timed { value, elapsed })
    }
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Run `f` once and record how long it took
pub fn measure<R, F>(f: F) -> Timed<R>
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}
