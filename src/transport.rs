//! Output line backends.
//!
//! The driver addresses logical lines by number. A transport maps those
//! numbers onto something physical: GPIO pins, or outputs of a chain of
//! 74HC595-style shift registers.

use embedded_hal::digital::OutputPin;

pub trait OutputTransport {
    type Error;

    fn configure_output(&mut self, line: u8) -> Result<(), Self::Error>;

    /// Sets `line` to the given logic level. Backends may stage the change
    /// until `commit`.
    fn set_level(&mut self, line: u8, high: bool) -> Result<(), Self::Error>;

    fn commit(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: OutputTransport + ?Sized> OutputTransport for &mut T {
    type Error = T::Error;

    fn configure_output(&mut self, line: u8) -> Result<(), Self::Error> {
        (**self).configure_output(line)
    }

    fn set_level(&mut self, line: u8, high: bool) -> Result<(), Self::Error> {
        (**self).set_level(line, high)
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        (**self).commit()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError<E> {
    Pin(E),
    InvalidLine(u8),
}

/// Direct GPIO backend. Line `n` is `pins[n]`.
pub struct PinTransport<P, const N: usize> {
    pins: [P; N],
}

impl<P, const N: usize> PinTransport<P, N>
where
    P: OutputPin,
{
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    pub fn destroy(self) -> [P; N] {
        self.pins
    }

    fn pin(&mut self, line: u8) -> Result<&mut P, PinError<P::Error>> {
        self.pins
            .get_mut(line as usize)
            .ok_or(PinError::InvalidLine(line))
    }
}

impl<P, const N: usize> OutputTransport for PinTransport<P, N>
where
    P: OutputPin,
{
    type Error = PinError<P::Error>;

    // pins arrive already configured as outputs by their HAL type
    fn configure_output(&mut self, line: u8) -> Result<(), Self::Error> {
        self.pin(line).map(|_| ())
    }

    fn set_level(&mut self, line: u8, high: bool) -> Result<(), Self::Error> {
        let pin = self.pin(line)?;
        if high {
            pin.set_high().map_err(PinError::Pin)
        } else {
            pin.set_low().map_err(PinError::Pin)
        }
    }
}

/// Shift register backend. Line `n` is output `n % 8` of register `n / 8`,
/// counted from the register closest to the data pin.
pub struct ShiftRegisterTransport<DS, SHCP, STCP, const REGISTERS: usize = 2> {
    data: DS,
    shift_clock: SHCP,
    store_clock: STCP,
    staged: [u8; REGISTERS],
}

impl<DS, SHCP, STCP, E, const REGISTERS: usize> ShiftRegisterTransport<DS, SHCP, STCP, REGISTERS>
where
    DS: OutputPin<Error = E>,
    SHCP: OutputPin<Error = E>,
    STCP: OutputPin<Error = E>,
{
    pub fn new(data: DS, shift_clock: SHCP, store_clock: STCP) -> Self {
        Self {
            data,
            shift_clock,
            store_clock,
            staged: [0; REGISTERS],
        }
    }

    pub fn destroy(self) -> (DS, SHCP, STCP) {
        (self.data, self.shift_clock, self.store_clock)
    }

    pub fn lines(&self) -> usize {
        REGISTERS * 8
    }

    /// Staged level of `line`, as it will be latched by the next commit.
    pub fn staged_level(&self, line: u8) -> Option<bool> {
        let register = self.staged.get(line as usize / 8)?;
        Some(register & (1 << (line % 8)) != 0)
    }

    fn check_line(&self, line: u8) -> Result<(), PinError<E>> {
        if (line as usize) < self.lines() {
            Ok(())
        } else {
            Err(PinError::InvalidLine(line))
        }
    }
}

impl<DS, SHCP, STCP, E, const REGISTERS: usize> OutputTransport
    for ShiftRegisterTransport<DS, SHCP, STCP, REGISTERS>
where
    DS: OutputPin<Error = E>,
    SHCP: OutputPin<Error = E>,
    STCP: OutputPin<Error = E>,
{
    type Error = PinError<E>;

    fn configure_output(&mut self, line: u8) -> Result<(), Self::Error> {
        self.check_line(line)
    }

    fn set_level(&mut self, line: u8, high: bool) -> Result<(), Self::Error> {
        self.check_line(line)?;
        let register = &mut self.staged[line as usize / 8];
        let bit = 1 << (line % 8);
        if high {
            *register |= bit;
        } else {
            *register &= !bit;
        }
        Ok(())
    }

    /// Shifts every staged line out, highest line first, then latches.
    fn commit(&mut self) -> Result<(), Self::Error> {
        for line in (0..self.lines()).rev() {
            let high = self.staged[line / 8] & (1 << (line % 8)) != 0;
            if high {
                self.data.set_high().map_err(PinError::Pin)?;
            } else {
                self.data.set_low().map_err(PinError::Pin)?;
            }
            self.shift_clock.set_low().map_err(PinError::Pin)?;
            self.shift_clock.set_high().map_err(PinError::Pin)?;
        }
        self.store_clock.set_low().map_err(PinError::Pin)?;
        self.store_clock.set_high().map_err(PinError::Pin)?;
        Ok(())
    }
}
