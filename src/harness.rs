use std::hint::black_box;
use std::time::{Duration, Instant};

/// Outcome of a single timed invocation.
///
/// `elapsed` is always populated, whether `result` is a success or the
/// point at which the invocation failed.
#[derive(Debug)]
pub struct Timed<T, E> {
    pub elapsed: Duration,
    pub result: Result<T, E>,
}

impl<T, E> Timed<T, E> {
    pub fn elapsed_ms(&self) -> f64 {
        duration_ms(self.elapsed)
    }
}

/// Run `f` exactly once, timing it from a monotonic start instant up to
/// completion or the first error it returns.
pub fn time_fallible<T, E>(f: impl FnOnce() -> Result<T, E>) -> Timed<T, E> {
    let start = Instant::now();
    let result = black_box(f());
    let elapsed = start.elapsed();

    Timed { elapsed, result }
}

pub fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// `total / count`, or zero when there is nothing to divide by.
pub fn mean_or_zero(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
