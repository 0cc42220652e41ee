#![no_std]

mod brightness;
mod clock;
mod config;
mod constants;
pub mod decode;
pub mod scheduler;
pub mod transport;

pub use brightness::Timing;
pub use clock::Clock;
pub use config::{Axis, DisplayConfig, HardwareConfig, Levels};
pub use constants::*;
pub use decode::Base;
pub use transport::{OutputTransport, PinError, PinTransport, ShiftRegisterTransport};

use num_traits::float::FloatCore;
use num_traits::ToPrimitive;
use scheduler::RefreshState;

/// Multiplexed seven-segment display driven line by line.
///
/// Call [`SevSeg::refresh_display`] from the main loop as often as possible.
/// In the default non-blocking mode each call returns immediately unless it
/// is time to switch to the next plane.
pub struct SevSeg<T, C> {
    pub transport: T,
    pub clock: C,
    config: DisplayConfig,
    digit_codes: [u8; MAX_DIGITS],
    timing: Timing,
    state: RefreshState,
}

impl<T, C, E> SevSeg<T, C>
where
    T: OutputTransport<Error = E>,
    C: Clock,
{
    pub fn new(transport: T, clock: C) -> Self {
        Self {
            transport,
            clock,
            config: DisplayConfig::default(),
            digit_codes: [0; MAX_DIGITS],
            timing: Timing::default(),
            state: RefreshState::new(),
        }
    }

    pub fn destroy(self) -> (T, C) {
        (self.transport, self.clock)
    }

    /// Configures every digit and segment line as an output, switches them
    /// all off and shows `0`.
    pub fn begin(&mut self, config: DisplayConfig) -> Result<(), SevSegError<E>> {
        self.config = config;
        self.state = RefreshState::new();

        let levels = self.config.levels();
        for &line in self.config.digit_lines() {
            self.transport.configure_output(line)?;
            self.transport.set_level(line, levels.digit(false))?;
        }
        for &line in self.config.active_segment_lines() {
            self.transport.configure_output(line)?;
            self.transport.set_level(line, levels.segment(false))?;
        }
        self.transport.commit()?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "sevseg: {} digits, {} segments, {}, axis {}",
            self.config.num_digits(),
            self.config.num_segments(),
            self.config.hardware,
            self.config.axis()
        );

        self.set_number(0, None, Base::Decimal);
        Ok(())
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn refresh_state(&self) -> &RefreshState {
        &self.state
    }

    pub fn brightness_timing(&self) -> Timing {
        self.timing
    }

    /// -200..=200, see [`Timing::from_brightness`]. Out of range values are clamped.
    pub fn set_brightness(&mut self, level: i16) {
        self.timing = Timing::from_brightness(level);
        if self.timing.off_us == 0 {
            self.state.phase = scheduler::Phase::On;
        }
    }

    /// Shows an integer. `dec_places` lights the decimal point that many
    /// positions from the right. Values that don't fit show dashes.
    pub fn set_number<N>(&mut self, number: N, dec_places: Option<u8>, base: Base)
    where
        N: ToPrimitive,
    {
        match number.to_i64() {
            Some(value) => self.set_new_num(value, dec_places, base),
            None => self.show_overflow(),
        }
    }

    /// Shows a float rounded half away from zero to `dec_places`.
    pub fn set_float<F>(&mut self, number: F, dec_places: Option<u8>, base: Base)
    where
        F: FloatCore,
    {
        match decode::scale_float(number, dec_places, base) {
            Some(value) => self.set_new_num(value, dec_places, base),
            None => self.show_overflow(),
        }
    }

    /// Raw masks, `0bHGFEDCBA` with H the decimal point. Extra entries are ignored.
    pub fn set_segments(&mut self, segments: &[u8]) {
        let mask = self.config.segment_mask();
        let num_digits = self.config.num_digits();
        for (code, &segs) in self.digit_codes[..num_digits].iter_mut().zip(segments) {
            *code = segs & mask;
        }
    }

    pub fn get_segments(&self) -> &[u8] {
        &self.digit_codes[..self.config.num_digits()]
    }

    /// Out of range digits are ignored.
    pub fn set_segments_digit(&mut self, digit: usize, segments: u8) {
        let mask = self.config.segment_mask();
        if let Some(code) = self.digit_codes[..self.config.num_digits()].get_mut(digit) {
            *code = segments & mask;
        }
    }

    /// Shows text as well as seven segments allow. A `.` after a character
    /// lights that position's decimal point.
    pub fn set_chars(&mut self, text: &str) {
        self.write_chars(text.chars());
    }

    /// Like [`SevSeg::set_chars`] for byte strings, stopping at a NUL.
    pub fn set_ascii(&mut self, bytes: &[u8]) {
        self.write_chars(bytes.iter().map(|&b| b as char));
    }

    pub fn blank(&mut self) -> Result<(), SevSegError<E>> {
        let blank = glyph(BLANK_IDX);
        let num_digits = self.config.num_digits();
        self.digit_codes[..num_digits].fill(blank);
        self.refresh_display()
    }

    /// Advances the multiplexing.
    ///
    /// Non-blocking mode lights at most one new plane per call and only once
    /// the current on (or off) time has elapsed. With `update_with_delays`
    /// this blocks for a full sweep of every plane and returns with all lines
    /// off.
    pub fn refresh_display(&mut self) -> Result<(), SevSegError<E>> {
        if self.config.update_with_delays {
            return self.refresh_with_delays();
        }

        let now = self.clock.now_us();
        let transition = self.state.poll(now, self.timing, self.config.plane_count());
        if transition.is_idle() {
            return Ok(());
        }

        if let Some(plane) = transition.off {
            self.set_plane(plane, false)?;
        }
        if let Some(plane) = transition.on {
            self.set_plane(plane, true)?;
        }
        self.transport.commit()?;
        Ok(())
    }

    fn refresh_with_delays(&mut self) -> Result<(), SevSegError<E>> {
        for plane in 0..self.config.plane_count() {
            self.set_plane(plane, true)?;
            self.transport.commit()?;
            self.clock.delay_us(self.timing.on_us);

            self.set_plane(plane, false)?;
            self.transport.commit()?;
            if self.timing.off_us > 0 {
                self.clock.delay_us(self.timing.off_us);
            }
        }
        Ok(())
    }

    fn set_plane(&mut self, plane: usize, on: bool) -> Result<(), SevSegError<E>> {
        let codes = &self.digit_codes[..self.config.num_digits()];
        scheduler::set_plane(&mut self.transport, &self.config, codes, plane, on)?;
        Ok(())
    }

    fn set_new_num(&mut self, value: i64, dec_places: Option<u8>, base: Base) {
        let num_digits = self.config.num_digits();
        let mut digits = [BLANK_IDX; MAX_DIGITS];
        let fits = decode::find_digits(
            value,
            dec_places,
            base,
            self.config.leading_zeros,
            &mut digits[..num_digits],
        );
        let dec_places = if fits { dec_places } else { None };
        self.set_digit_codes(&digits[..num_digits], dec_places);
    }

    fn set_digit_codes(&mut self, digits: &[u8], dec_places: Option<u8>) {
        let mask = self.config.segment_mask();
        let point = decode::decimal_point_position(dec_places, digits.len());
        for (pos, (code, &digit)) in self.digit_codes.iter_mut().zip(digits).enumerate() {
            *code = glyph(digit);
            if point == Some(pos) {
                *code |= DECIMAL_POINT;
            }
            *code &= mask;
        }
    }

    fn show_overflow(&mut self) {
        let num_digits = self.config.num_digits();
        self.set_digit_codes(&[DASH_IDX; MAX_DIGITS][..num_digits], None);
    }

    fn write_chars<I>(&mut self, text: I)
    where
        I: IntoIterator<Item = char>,
    {
        let num_digits = self.config.num_digits();
        let mask = self.config.segment_mask();
        let codes = &mut self.digit_codes[..num_digits];
        codes.fill(0);
        decode::segments_from_chars(text, codes);
        for code in codes.iter_mut() {
            *code &= mask;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SevSegError<E> {
    Transport(E),
}

impl<E> From<E> for SevSegError<E> {
    fn from(error: E) -> Self {
        SevSegError::Transport(error)
    }
}
