#![allow(dead_code)]

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use sevseg::{Clock, DisplayConfig, HardwareConfig, OutputTransport, SevSeg};

pub const SEGMENT_LINES: [u8; 8] = [8, 9, 10, 11, 12, 13, 14, 15];
pub const DIGIT_LINES: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

/// Remembers the last level of every line and counts commits.
#[derive(Default)]
pub struct MockTransport {
    pub levels: [Option<bool>; 16],
    pub configured: Vec<u8>,
    pub writes: Vec<(u8, bool)>,
    pub commits: usize,
}

impl OutputTransport for MockTransport {
    type Error = Infallible;

    fn configure_output(&mut self, line: u8) -> Result<(), Self::Error> {
        self.configured.push(line);
        Ok(())
    }

    fn set_level(&mut self, line: u8, high: bool) -> Result<(), Self::Error> {
        self.levels[line as usize] = Some(high);
        self.writes.push((line, high));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.commits += 1;
        Ok(())
    }
}

/// Time only moves when a test sets it or the driver busy-waits.
#[derive(Default)]
pub struct MockClock {
    pub now: u32,
    pub delays: Vec<u32>,
}

impl Clock for MockClock {
    fn now_us(&mut self) -> u32 {
        self.now
    }

    fn delay_us(&mut self, us: u32) {
        self.delays.push(us);
        self.now = self.now.wrapping_add(us);
    }
}

pub type Display = SevSeg<MockTransport, MockClock>;

pub fn config(num_digits: usize) -> DisplayConfig {
    DisplayConfig::new(
        HardwareConfig::CommonCathode,
        &DIGIT_LINES[..num_digits],
        SEGMENT_LINES,
    )
}

pub fn display_with(config: DisplayConfig) -> Display {
    let mut display = SevSeg::new(MockTransport::default(), MockClock::default());
    display.begin(config).unwrap();
    display.transport.writes.clear();
    display.transport.commits = 0;
    display
}

pub fn display(num_digits: usize) -> Display {
    display_with(config(num_digits))
}

/// Mock GPIO that appends its transitions to a shared log.
pub struct LogPin {
    pub name: char,
    pub log: Rc<RefCell<Vec<(char, bool)>>>,
}

impl embedded_hal::digital::ErrorType for LogPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for LogPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.name, true));
        Ok(())
    }
}
