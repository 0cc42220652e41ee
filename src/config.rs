use crate::constants::{MAX_DIGITS, MAX_SEGMENTS};

/// Wiring family of the display. Determines which logic level turns a
/// digit-select line and a segment-select line on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareConfig {
    CommonCathode,
    CommonAnode,
    /// Active-high low-side switches, most commonly N-type FETs.
    NTransistors,
    /// Active-low high-side switches, most commonly P-type FETs.
    PTransistors,
}

impl HardwareConfig {
    /// N-type switches on a common cathode display invert the digit lines.
    pub const NP_COMMON_CATHODE: HardwareConfig = HardwareConfig::CommonAnode;
    pub const NP_COMMON_ANODE: HardwareConfig = HardwareConfig::CommonCathode;

    pub fn levels(self) -> Levels {
        let (digit_on, segment_on) = match self {
            HardwareConfig::CommonCathode => (false, true),
            HardwareConfig::CommonAnode => (true, false),
            HardwareConfig::NTransistors => (true, true),
            HardwareConfig::PTransistors => (false, false),
        };
        Levels {
            digit_on,
            segment_on,
        }
    }
}

/// Logic levels that switch lines on. Off is always the complement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Levels {
    pub digit_on: bool,
    pub segment_on: bool,
}

impl Levels {
    pub fn digit(&self, on: bool) -> bool {
        if on {
            self.digit_on
        } else {
            !self.digit_on
        }
    }

    pub fn segment(&self, on: bool) -> bool {
        if on {
            self.segment_on
        } else {
            !self.segment_on
        }
    }
}

/// Which lines get lit together during one multiplexing step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// One digit at a time, all of its segments together. Used when the
    /// current-limiting resistors are on the segment lines.
    Digits,
    /// One segment at a time across all digits. Used when the resistors
    /// are on the digit lines.
    Segments,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    pub hardware: HardwareConfig,
    digit_lines: [u8; MAX_DIGITS],
    num_digits: u8,
    pub segment_lines: [u8; MAX_SEGMENTS],
    pub resistors_on_segments: bool,
    pub update_with_delays: bool,
    pub leading_zeros: bool,
    pub disable_decimal_point: bool,
}

impl DisplayConfig {
    /// Digits beyond `MAX_DIGITS` are dropped. The last segment line drives
    /// the decimal point and is ignored when it is disabled.
    pub fn new(
        hardware: HardwareConfig,
        digit_lines: &[u8],
        segment_lines: [u8; MAX_SEGMENTS],
    ) -> Self {
        let num_digits = digit_lines.len().min(MAX_DIGITS);
        #[cfg(feature = "defmt")]
        if digit_lines.len() > MAX_DIGITS {
            defmt::warn!(
                "{} digit lines given, clamping to {}",
                digit_lines.len(),
                MAX_DIGITS
            );
        }
        let mut lines = [0; MAX_DIGITS];
        lines[..num_digits].copy_from_slice(&digit_lines[..num_digits]);

        Self {
            hardware,
            digit_lines: lines,
            num_digits: num_digits as u8,
            segment_lines,
            resistors_on_segments: false,
            update_with_delays: false,
            leading_zeros: false,
            disable_decimal_point: false,
        }
    }

    pub fn resistors_on_segments(mut self, enabled: bool) -> Self {
        self.resistors_on_segments = enabled;
        self
    }

    /// Legacy blocking refresh: every call sweeps the whole display with
    /// busy waits and returns with all lines off.
    pub fn update_with_delays(mut self, enabled: bool) -> Self {
        self.update_with_delays = enabled;
        self
    }

    pub fn leading_zeros(mut self, enabled: bool) -> Self {
        self.leading_zeros = enabled;
        self
    }

    pub fn disable_decimal_point(mut self, disabled: bool) -> Self {
        self.disable_decimal_point = disabled;
        self
    }

    pub fn num_digits(&self) -> usize {
        self.num_digits as usize
    }

    pub fn num_segments(&self) -> usize {
        if self.disable_decimal_point {
            MAX_SEGMENTS - 1
        } else {
            MAX_SEGMENTS
        }
    }

    pub fn segment_mask(&self) -> u8 {
        if self.disable_decimal_point {
            0x7F
        } else {
            0xFF
        }
    }

    pub fn digit_lines(&self) -> &[u8] {
        &self.digit_lines[..self.num_digits()]
    }

    pub fn active_segment_lines(&self) -> &[u8] {
        &self.segment_lines[..self.num_segments()]
    }

    pub fn levels(&self) -> Levels {
        self.hardware.levels()
    }

    pub fn axis(&self) -> Axis {
        if self.resistors_on_segments {
            Axis::Digits
        } else {
            Axis::Segments
        }
    }

    pub fn plane_count(&self) -> usize {
        match self.axis() {
            Axis::Digits => self.num_digits(),
            Axis::Segments => self.num_segments(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(HardwareConfig::CommonCathode, &[], [0; MAX_SEGMENTS])
    }
}
