pub const MAX_DIGITS: usize = 8;
pub const MAX_SEGMENTS: usize = 8; // 7 strokes + decimal point
pub const DECIMAL_POINT: u8 = 0x80;

// Bit-segment mapping: 0bHGFEDCBA, H is the decimal point
//
//   AAA        000
//  F   B      5   1
//   GGG        666
//  E   C      4   2
//   DDD  H     333  7
pub mod segment {
    pub const A: u8 = 0x01;
    pub const B: u8 = 0x02;
    pub const C: u8 = 0x04;
    pub const D: u8 = 0x08;
    pub const E: u8 = 0x10;
    pub const F: u8 = 0x20;
    pub const G: u8 = 0x40;
    pub const DP: u8 = 0x80;
}

pub const NUMERAL_OFFSET: u8 = 0;
pub const ALPHA_OFFSET: u8 = 10;
pub const BLANK_IDX: u8 = 36;
pub const DASH_IDX: u8 = 37;
pub const PERIOD_IDX: u8 = 38;
pub const ASTERISK_IDX: u8 = 39;
pub const UNDERSCORE_IDX: u8 = 40;
pub const NUM_GLYPHS: usize = 41;

/// Segment masks indexed by glyph code.
pub const GLYPHS: [u8; NUM_GLYPHS] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
    0x77, // A
    0x7C, // b
    0x39, // C
    0x5E, // d
    0x79, // E
    0x71, // F
    0x3D, // G
    0x76, // H
    0x06, // I
    0x0E, // J
    0x76, // K, same as H
    0x38, // L
    0x00, // M, no display
    0x54, // n
    0x3F, // O
    0x73, // P
    0x67, // q
    0x50, // r
    0x6D, // S
    0x78, // t
    0x3E, // U
    0x3E, // V, same as U
    0x00, // W, no display
    0x76, // X, same as H
    0x6E, // y
    0x5B, // Z, same as 2
    0x00, // ' ' blank
    0x40, // '-' dash
    0x80, // '.' period
    0x63, // '*' degree
    0x08, // '_' underscore
];

pub const POWERS_OF_10: [i64; 10] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

pub const POWERS_OF_16: [i64; 9] = [
    0x1,
    0x10,
    0x100,
    0x1000,
    0x1_0000,
    0x10_0000,
    0x100_0000,
    0x1000_0000,
    0x1_0000_0000,
];

pub mod timing {
    pub const DEFAULT_ON_TIME_US: u32 = 2000; // brightness 100
    pub const MIN_PULSE_US: u32 = 1;
    pub const MAX_PULSE_US: u32 = 2000;
    pub const NOMINAL_MAX_BRIGHTNESS: i16 = 100;
    pub const MAX_BRIGHTNESS: i16 = 200;
    pub const MIN_BRIGHTNESS: i16 = -200;
}

/// Segment mask for a glyph code. Unknown codes render blank.
pub fn glyph(index: u8) -> u8 {
    GLYPHS
        .get(index as usize)
        .copied()
        .unwrap_or(GLYPHS[BLANK_IDX as usize])
}
