//! Per-body timing for the batch progress bar (`progress` feature).
//!
//! [`BodyTimer`] keeps an exponential moving average of the time spent on each body,
//! `ema ← α·dt + (1–α)·ema`, seeded with the first duration. [`fmt_dur`] renders durations
//! as `"253µs"`, `"42ms"` or `"3.14s"`.
use std::time::{Duration, Instant};

pub struct BodyTimer {
    last: Instant,
    ema_ns: f64,
    alpha: f64,
    count: u64,
}

impl BodyTimer {
    pub fn new(alpha: f64) -> Self {
        Self {
            last: Instant::now(),
            ema_ns: 0.0,
            alpha,
            count: 0,
        }
    }

    /// Close the current body and return its duration.
    #[inline]
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        self.count += 1;

        let dt_ns = dt.as_nanos() as f64;
        self.ema_ns = match self.count {
            1 => dt_ns,
            _ => self.alpha * dt_ns + (1.0 - self.alpha) * self.ema_ns,
        };
        dt
    }

    #[inline]
    pub fn avg(&self) -> Duration {
        match self.count {
            0 => Duration::ZERO,
            _ => Duration::from_nanos(self.ema_ns as u64),
        }
    }
}

#[inline]
pub fn fmt_dur(d: Duration) -> String {
    match (d.as_micros(), d.as_millis()) {
        (us, _) if us < 1_000 => format!("{us}µs"),
        (_, ms) if ms < 1_000 => format!("{ms}ms"),
        _ => format!("{:.2}s", d.as_secs_f32()),
    }
}

#[cfg(test)]
mod progress_bar_test {
    use super::*;

    #[test]
    fn test_fmt_dur() {
        assert_eq!(fmt_dur(Duration::from_micros(253)), "253µs");
        assert_eq!(fmt_dur(Duration::from_millis(42)), "42ms");
        assert_eq!(fmt_dur(Duration::from_millis(3140)), "3.14s");
    }

    #[test]
    fn test_timer_average() {
        let mut timer = BodyTimer::new(0.5);
        assert_eq!(timer.avg(), Duration::ZERO);
        let first = timer.tick();
        assert_eq!(timer.avg().as_nanos(), first.as_nanos());
    }
}
