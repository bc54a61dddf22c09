//! Event selection register encoding.
//!
//! Layout of a client uncore PERFEVTSEL register:
//!
//! | bits  | field                        |
//! |-------|------------------------------|
//! | 0-7   | event code                   |
//! | 8-15  | unit mask                    |
//! | 18    | edge detect                  |
//! | 20    | overflow interrupt enable    |
//! | 22    | counter enable               |
//! | 23    | invert counter mask          |
//! | 24-28 | counter mask                 |
//! | 32-39 | thread filter                |

const UNIT_MASK_SHIFT: u32 = 8;
const EDGE_DETECT_BIT: u32 = 18;
const OVERFLOW_INTERRUPT_BIT: u32 = 20;
const ENABLE_BIT: u32 = 22;
const INVERT_BIT: u32 = 23;
const COUNTER_MASK_SHIFT: u32 = 24;
const COUNTER_MASK_BITS: u64 = 0x1F;
const THREAD_FILTER_SHIFT: u32 = 32;

/// Semantic fields of an event selection register
///
/// Values are packed as given; legal ranges are defined by the hardware event
/// tables, not checked here. Fields wider than their slot are truncated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventSelect {
    pub event_code: u8,
    pub unit_mask: u8,
    pub edge_detect: bool,
    pub overflow_interrupt: bool,
    pub enable: bool,
    pub invert: bool,
    /// Threshold compared against the per-cycle increment, 0 disables it
    pub counter_mask: u8,
    /// Restrict counting to the given thread, `None` counts all
    pub thread_filter: Option<u8>,
}

impl EventSelect {
    /// Enabled selection for `event_code`/`unit_mask` with every other field cleared
    pub fn enabled(event_code: u8, unit_mask: u8) -> Self {
        Self {
            event_code,
            unit_mask,
            enable: true,
            ..Default::default()
        }
    }

    /// Packs the fields into a register value
    pub fn encode(&self) -> u64 {
        encode(
            self.event_code,
            self.unit_mask,
            self.edge_detect,
            self.overflow_interrupt,
            self.enable,
            self.invert,
            self.counter_mask,
            self.thread_filter,
        )
    }
}

/// Packs event selection fields into a register value.
#[allow(clippy::too_many_arguments)]
pub fn encode(
    event_code: u8,
    unit_mask: u8,
    edge_detect: bool,
    overflow_interrupt: bool,
    enable: bool,
    invert: bool,
    counter_mask: u8,
    thread_filter: Option<u8>,
) -> u64 {
    u64::from(event_code)
        | u64::from(unit_mask) << UNIT_MASK_SHIFT
        | u64::from(edge_detect) << EDGE_DETECT_BIT
        | u64::from(overflow_interrupt) << OVERFLOW_INTERRUPT_BIT
        | u64::from(enable) << ENABLE_BIT
        | u64::from(invert) << INVERT_BIT
        | (u64::from(counter_mask) & COUNTER_MASK_BITS) << COUNTER_MASK_SHIFT
        | u64::from(thread_filter.unwrap_or(0)) << THREAD_FILTER_SHIFT
}
