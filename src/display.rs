//! Four-digit seven-segment display state and the multiplexer that draws it.
//!
//! Segment patterns use bit 0..=6 for segments a..g and bit 7 for the
//! decimal point, matching the order of the segment pins handed to
//! [`Multiplexer::new`].

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;
use heapless::Vec;

use crate::clock::ClockTime;
use crate::config::DIGIT_SETTLE_US;

/// Number of digit positions on the display.
pub const DIGIT_COUNT: usize = 4;

/// Number of segment lines, including the decimal point.
pub const SEGMENT_COUNT: usize = 8;

/// Rightmost digit.
pub const DIGIT0: usize = 0;
pub const DIGIT1: usize = 1;
pub const DIGIT2: usize = 2;
/// Leftmost digit.
pub const DIGIT3: usize = 3;

/// Order in which digits are strobed within one frame.
pub const STROBE_ORDER: [usize; DIGIT_COUNT] = [DIGIT3, DIGIT2, DIGIT1, DIGIT0];

/// Decimal point segment bit.
pub const DOT: u8 = 1 << 7;

/// Segment patterns for 0-9.
const DIGIT_PATTERNS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// "bUdS", leftmost letter first.
pub const BUDS: [u8; DIGIT_COUNT] = [0x7C, 0x3E, 0x5E, 0x6D];

/// Content of a single digit position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// A numeral, looked up in the digit table. Values above 9 render blank.
    Digit(u8),
    /// A literal segment pattern, used to spell words.
    Raw(u8),
}

impl Glyph {
    pub fn pattern(self) -> u8 {
        match self {
            Glyph::Digit(d) => DIGIT_PATTERNS.get(d as usize).copied().unwrap_or(0x00),
            Glyph::Raw(p) => p,
        }
    }
}

/// What the display should show: one glyph per position plus show/dot masks.
///
/// Bit `n` of `show` and `dots` refers to position `DIGITn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayState {
    pub glyphs: [Glyph; DIGIT_COUNT],
    pub show: u8,
    pub dots: u8,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::blank()
    }
}

impl DisplayState {
    pub const fn blank() -> Self {
        Self {
            glyphs: [Glyph::Digit(0); DIGIT_COUNT],
            show: 0,
            dots: 0,
        }
    }

    /// A single numeral on `DIGIT0`.
    pub fn single(value: u8) -> Self {
        let mut state = Self::blank();
        state.set(DIGIT0, Glyph::Digit(value % 10));
        state
    }

    /// Minutes on the left pair, seconds on the right pair.
    pub fn time(time: ClockTime) -> Self {
        let mut state = Self::blank();
        state.set_pair(DIGIT2, time.minutes);
        state.set_pair(DIGIT0, time.seconds);
        state
    }

    /// Spells a word, `letters[0]` on the leftmost digit.
    pub fn word(letters: [u8; DIGIT_COUNT]) -> Self {
        let mut state = Self::blank();
        for (&position, pattern) in STROBE_ORDER.iter().zip(letters) {
            state.set(position, Glyph::Raw(pattern));
        }
        state
    }

    /// Puts a glyph on `position` and lights it.
    pub fn set(&mut self, position: usize, glyph: Glyph) {
        self.glyphs[position] = glyph;
        self.show |= 1 << position;
    }

    /// Puts a two-digit number on `low` (ones) and `low + 1` (tens).
    pub fn set_pair(&mut self, low: usize, value: u8) {
        self.set(low, Glyph::Digit(value % 10));
        self.set(low + 1, Glyph::Digit(value / 10 % 10));
    }

    pub fn hide(&mut self, position: usize) {
        self.show &= !(1 << position);
    }

    pub fn set_dot(&mut self, position: usize, on: bool) {
        if on {
            self.dots |= 1 << position;
        } else {
            self.dots &= !(1 << position);
        }
    }

    pub fn toggle_dot(&mut self, position: usize) {
        self.dots ^= 1 << position;
    }

    pub fn is_shown(&self, position: usize) -> bool {
        self.show & (1 << position) != 0
    }

    pub fn has_dot(&self, position: usize) -> bool {
        self.dots & (1 << position) != 0
    }

    /// Full segment pattern for a position, decimal point included.
    pub fn pattern(&self, position: usize) -> u8 {
        let dot = if self.has_dot(position) { DOT } else { 0 };
        self.glyphs[position].pattern() | dot
    }
}

/// One step of a multiplexed frame: light `position` with `pattern`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strobe {
    pub position: usize,
    pub pattern: u8,
}

/// The strobe sequence for one frame. Hidden positions are skipped.
pub fn frame(state: &DisplayState) -> Vec<Strobe, DIGIT_COUNT> {
    let mut strobes = Vec::new();
    for &position in STROBE_ORDER.iter() {
        if state.is_shown(position) {
            // Capacity equals the number of positions.
            let _ = strobes.push(Strobe {
                position,
                pattern: state.pattern(position),
            });
        }
    }
    strobes
}

/// Drives a common-cathode display through its segment and digit-enable lines.
///
/// Both sets of lines are active-high.
pub struct Multiplexer<P> {
    segments: [P; SEGMENT_COUNT],
    digits: [P; DIGIT_COUNT],
}

impl<P: OutputPin> Multiplexer<P> {
    pub fn new(segments: [P; SEGMENT_COUNT], digits: [P; DIGIT_COUNT]) -> Self {
        Self { segments, digits }
    }

    /// Draws one frame of `state`, holding each lit digit for
    /// [`DIGIT_SETTLE_US`]. All lines are off when this returns.
    pub fn refresh<D: DelayUs<u32>>(
        &mut self,
        state: &DisplayState,
        delay: &mut D,
    ) -> Result<(), P::Error> {
        for strobe in frame(state) {
            // Blank before switching digits, otherwise the old pattern ghosts.
            self.blank()?;
            self.digits[strobe.position].set_high()?;
            for (bit, segment) in self.segments.iter_mut().enumerate() {
                if strobe.pattern & (1 << bit) != 0 {
                    segment.set_high()?;
                }
            }
            delay.delay_us(DIGIT_SETTLE_US);
        }
        self.blank()
    }

    fn blank(&mut self) -> Result<(), P::Error> {
        for segment in self.segments.iter_mut() {
            segment.set_low()?;
        }
        for digit in self.digits.iter_mut() {
            digit.set_low()?;
        }
        Ok(())
    }
}
