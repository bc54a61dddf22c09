use std::time::Instant;

/// Produces the per-tick normalization factor from wall-clock time.
///
/// The factor is the reciprocal of the seconds elapsed since the previous
/// tick, turning raw deltas into per-second rates. It is computed once per
/// tick and applied to every counter of that tick.
#[derive(Debug)]
pub struct IntervalClock {
    last: Instant,
}

impl IntervalClock {
    /// Starts the clock; the first tick measures from now
    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    pub fn start_at(now: Instant) -> Self {
        Self { last: now }
    }

    /// Normalization factor for a tick happening at `now`.
    ///
    /// Returns 0 if no time has elapsed, which renders the tick's ratios as
    /// non-finite instead of dividing by zero here. The interval start only
    /// moves on [`commit`](Self::commit), so a tick whose sampling failed is
    /// folded into the next one.
    pub fn factor_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.last).as_secs_f64();
        if elapsed > 0.0 {
            1.0 / elapsed
        } else {
            0.0
        }
    }

    /// Starts the next interval at `now`, after a tick was sampled successfully
    pub fn commit(&mut self, now: Instant) {
        self.last = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_factor_is_per_second() {
        let start = Instant::now();
        let mut clock = IntervalClock::start_at(start);

        let now = start + Duration::from_millis(500);
        let factor = clock.factor_at(now);
        assert!((factor - 2.0).abs() < 1e-9, "factor was {}", factor);
        clock.commit(now);

        let factor = clock.factor_at(start + Duration::from_millis(2500));
        assert!((factor - 0.5).abs() < 1e-9, "factor was {}", factor);
    }

    #[test]
    fn test_uncommitted_tick_extends_interval() {
        let start = Instant::now();
        let clock = IntervalClock::start_at(start);

        let _ = clock.factor_at(start + Duration::from_secs(1));
        let factor = clock.factor_at(start + Duration::from_secs(2));
        assert!((factor - 0.5).abs() < 1e-9, "factor was {}", factor);
    }

    #[test]
    fn test_zero_elapsed() {
        let start = Instant::now();
        let clock = IntervalClock::start_at(start);
        assert_eq!(clock.factor_at(start), 0.0);
    }
}
