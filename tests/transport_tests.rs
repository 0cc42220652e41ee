mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::LogPin;
use sevseg::{
    segment, DisplayConfig, HardwareConfig, OutputTransport, PinError, PinTransport, SevSeg,
    ShiftRegisterTransport,
};

type Log = Rc<RefCell<Vec<(char, bool)>>>;

fn pin(name: char, log: &Log) -> LogPin {
    LogPin {
        name,
        log: log.clone(),
    }
}

fn shift_register(log: &Log) -> ShiftRegisterTransport<LogPin, LogPin, LogPin> {
    ShiftRegisterTransport::new(pin('d', log), pin('s', log), pin('l', log))
}

/// Data bits in the order they were clocked in.
fn shifted_bits(log: &Log) -> Vec<bool> {
    let log = log.borrow();
    let mut data = false;
    let mut bits = Vec::new();
    for &(name, high) in log.iter() {
        match name {
            'd' => data = high,
            's' if high => bits.push(data),
            _ => {}
        }
    }
    bits
}

#[test]
fn pin_transport_drives_pins() {
    let log = Log::default();
    let mut transport = PinTransport::new([pin('a', &log), pin('b', &log)]);

    transport.configure_output(1).unwrap();
    transport.set_level(1, true).unwrap();
    transport.set_level(0, false).unwrap();
    transport.commit().unwrap();

    assert_eq!(*log.borrow(), [('b', true), ('a', false)]);
}

#[test]
fn pin_transport_rejects_unknown_lines() {
    let log = Log::default();
    let mut transport = PinTransport::new([pin('a', &log)]);
    assert_eq!(transport.set_level(1, true), Err(PinError::InvalidLine(1)));
    assert_eq!(transport.configure_output(7), Err(PinError::InvalidLine(7)));
    assert!(log.borrow().is_empty());
}

#[test]
fn shift_register_stages_until_commit() {
    let log = Log::default();
    let mut transport = shift_register(&log);

    transport.set_level(0, true).unwrap();
    transport.set_level(9, true).unwrap();
    transport.set_level(9, false).unwrap();
    transport.set_level(15, true).unwrap();
    assert!(log.borrow().is_empty());
    assert_eq!(transport.staged_level(0), Some(true));
    assert_eq!(transport.staged_level(9), Some(false));
    assert_eq!(transport.staged_level(16), None);

    transport.commit().unwrap();

    let bits = shifted_bits(&log);
    assert_eq!(bits.len(), 16);
    // highest line goes out first
    assert!(bits[0]);
    assert!(bits[15]);
    assert_eq!(bits.iter().filter(|&&b| b).count(), 2);

    let log = log.borrow();
    assert_eq!(log.iter().filter(|(name, _)| *name == 's').count(), 32);
    assert_eq!(&log[log.len() - 2..], [('l', false), ('l', true)]);
}

#[test]
fn shift_register_line_count() {
    let log = Log::default();
    let mut transport: ShiftRegisterTransport<_, _, _, 3> =
        ShiftRegisterTransport::new(pin('d', &log), pin('s', &log), pin('l', &log));
    assert_eq!(transport.lines(), 24);
    assert!(transport.set_level(23, true).is_ok());
    assert_eq!(transport.set_level(24, true), Err(PinError::InvalidLine(24)));
}

#[test]
fn driver_over_shift_register() {
    let log = Log::default();
    let config = DisplayConfig::new(
        HardwareConfig::NTransistors,
        &[8, 9, 10, 11],
        [0, 1, 2, 3, 4, 5, 6, 7],
    )
    .resistors_on_segments(true);
    let mut display = SevSeg::new(shift_register(&log), common::MockClock::default());
    display.begin(config).unwrap();
    display.set_segments(&[0, segment::A | segment::G, 0, 0]);

    display.clock.now = 2000;
    log.borrow_mut().clear();
    display.refresh_display().unwrap();

    // one latch per plane transition
    assert_eq!(
        log.borrow().iter().filter(|&&p| p == ('l', true)).count(),
        1
    );
    let transport = &display.transport;
    assert_eq!(transport.staged_level(8), Some(false));
    assert_eq!(transport.staged_level(9), Some(true));
    assert_eq!(transport.staged_level(0), Some(true));
    assert_eq!(transport.staged_level(6), Some(true));
    assert_eq!(transport.staged_level(1), Some(false));

    let bits = shifted_bits(&log);
    // line 9 is the seventh bit out of sixteen
    assert!(bits[15 - 9]);
    assert!(bits[15]);
    assert!(bits[15 - 6]);
}
