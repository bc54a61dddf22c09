use log::debug;

/// Tracks a free-running hardware counter across reads.
///
/// Free-running counters are never cleared by reads, so each observation is
/// turned into the delta since the previous one. Only the low `width_bits` bits
/// of a raw value are meaningful; anything above is reserved and discarded
/// before comparing.
///
/// When a value is not greater than the previous one (the counter wrapped, was
/// reset by someone else, or this is the first observation of a zero counter)
/// the whole raw value is taken as the delta.
///
/// # Examples
///
/// ```
/// use uncore::WrappingCounter;
///
/// let mut counter = WrappingCounter::new(48);
/// assert_eq!(counter.observe(1000), 1000);
/// assert_eq!(counter.observe(1500), 500);
///
/// // Going backward: the raw value becomes the delta and the new baseline
/// assert_eq!(counter.observe(200), 200);
/// assert_eq!(counter.observe(250), 50);
/// ```
#[derive(Debug, Clone)]
pub struct WrappingCounter {
    width_mask: u64,
    last: u64,
}

impl WrappingCounter {
    /// Creates a counter tracker for a counter `width_bits` wide.
    ///
    /// Widths outside 1..=64 are clamped.
    pub fn new(width_bits: u32) -> Self {
        let width_bits = width_bits.clamp(1, 64);
        let width_mask = if width_bits == 64 {
            u64::MAX
        } else {
            (1u64 << width_bits) - 1
        };
        Self {
            width_mask,
            last: 0,
        }
    }

    /// Records a raw counter value and returns the elapsed count since the
    /// previous observation.
    pub fn observe(&mut self, raw: u64) -> u64 {
        let value = raw & self.width_mask;
        let delta = if value > self.last {
            value - self.last
        } else {
            if value == self.last && value != 0 {
                debug!("counter did not advance: value={}", value);
            } else if value < self.last {
                debug!("counter went backward: previous={}, new={}", self.last, value);
            }
            value
        };
        self.last = value;
        delta
    }

    /// The most recent (masked) raw value observed
    pub fn last(&self) -> u64 {
        self.last
    }

    /// Mask of the meaningful counter bits
    pub fn width_mask(&self) -> u64 {
        self.width_mask
    }
}
