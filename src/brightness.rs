use crate::constants::timing::*;

/// Pulse lengths in microseconds for one multiplexing step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub on_us: u32,
    pub off_us: u32,
}

impl Timing {
    /// Positive levels lengthen the on pulse: 0..=100 maps onto 1..=2000us
    /// and values up to 200 keep extending it. Negative levels drop the on
    /// pulse and insert a dark dwell instead: -1..=-200 maps onto 1..=2000us.
    pub fn from_brightness(level: i16) -> Self {
        let level = level.clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS);
        if level >= 0 {
            Timing {
                on_us: map(level as u32, NOMINAL_MAX_BRIGHTNESS as u32),
                off_us: 0,
            }
        } else {
            Timing {
                on_us: 0,
                off_us: map(level.unsigned_abs() as u32, MIN_BRIGHTNESS.unsigned_abs() as u32),
            }
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            on_us: DEFAULT_ON_TIME_US,
            off_us: 0,
        }
    }
}

// linear map of 0..=span onto MIN_PULSE_US..=MAX_PULSE_US
fn map(value: u32, span: u32) -> u32 {
    MIN_PULSE_US + value * (MAX_PULSE_US - MIN_PULSE_US) / span
}
