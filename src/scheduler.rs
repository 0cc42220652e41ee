//! Multiplexing state machine.
//!
//! One plane is either a digit (with all of its lit segments) or a segment
//! (with every digit that shows it), depending on the configured axis.

use crate::brightness::Timing;
use crate::config::{Axis, DisplayConfig};
use crate::transport::OutputTransport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// The current plane is lit.
    On,
    /// Everything is dark for the off time of a negative brightness.
    OffDwell,
}

/// What a tick asks the driver to do to the outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub off: Option<usize>,
    pub on: Option<usize>,
}

impl Transition {
    pub fn is_idle(&self) -> bool {
        self.off.is_none() && self.on.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshState {
    pub plane: usize,
    pub last_change_us: u32,
    pub phase: Phase,
}

impl RefreshState {
    pub const fn new() -> Self {
        Self {
            plane: 0,
            last_change_us: 0,
            phase: Phase::On,
        }
    }

    /// Advances at most one step. Returns an idle transition until the
    /// budget of the current phase has elapsed since the last change.
    pub fn poll(&mut self, now_us: u32, timing: Timing, plane_count: usize) -> Transition {
        if plane_count == 0 {
            return Transition::default();
        }

        let budget = match self.phase {
            Phase::On => timing.on_us,
            Phase::OffDwell => timing.off_us,
        };
        if now_us.wrapping_sub(self.last_change_us) < budget {
            return Transition::default();
        }
        self.last_change_us = now_us;

        let mut transition = Transition::default();
        match self.phase {
            Phase::OffDwell => self.phase = Phase::On,
            Phase::On => {
                transition.off = Some(self.plane);
                if timing.off_us > 0 {
                    self.phase = Phase::OffDwell;
                    return transition;
                }
            }
        }

        self.plane = (self.plane + 1) % plane_count;
        transition.on = Some(self.plane);
        transition
    }
}

impl Default for RefreshState {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives the lines of one plane on or off. Does not commit.
pub fn set_plane<T>(
    transport: &mut T,
    config: &DisplayConfig,
    codes: &[u8],
    plane: usize,
    on: bool,
) -> Result<(), T::Error>
where
    T: OutputTransport,
{
    let levels = config.levels();
    let digits = config.digit_lines();
    let segments = config.active_segment_lines();

    match config.axis() {
        Axis::Digits => {
            let Some(&digit_line) = digits.get(plane) else {
                return Ok(());
            };
            let code = codes.get(plane).copied().unwrap_or(0);
            if on {
                transport.set_level(digit_line, levels.digit(true))?;
                for (segment, &line) in segments.iter().enumerate() {
                    if code & (1 << segment) != 0 {
                        transport.set_level(line, levels.segment(true))?;
                    }
                }
            } else {
                for &line in segments {
                    transport.set_level(line, levels.segment(false))?;
                }
                transport.set_level(digit_line, levels.digit(false))?;
            }
        }
        Axis::Segments => {
            let Some(&segment_line) = segments.get(plane) else {
                return Ok(());
            };
            if on {
                transport.set_level(segment_line, levels.segment(true))?;
                for (&line, &code) in digits.iter().zip(codes) {
                    if code & (1 << plane) != 0 {
                        transport.set_level(line, levels.digit(true))?;
                    }
                }
            } else {
                for &line in digits {
                    transport.set_level(line, levels.digit(false))?;
                }
                transport.set_level(segment_line, levels.segment(false))?;
            }
        }
    }

    Ok(())
}
