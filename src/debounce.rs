//! Key debouncing with a two-bit vertical counter per line.
//!
//! Eight lines are handled in parallel, one per bit. A line changes its
//! debounced state only after four consecutive samples disagree with it; any
//! sample that agrees resets that line's counter, so short glitches never
//! reach the debounced state.

/// Debounced state of up to eight active-low key lines.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    /// Debounced state, a set bit means pressed.
    state: u8,
    /// Counter low bits.
    ct0: u8,
    /// Counter high bits.
    ct1: u8,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            state: 0,
            ct0: 0xFF,
            ct1: 0xFF,
        }
    }

    /// Feeds one sample of raw pin levels (a set bit means the line is high,
    /// i.e. released). Called once per debounce period.
    ///
    /// Returns the lines that became pressed with this sample.
    pub fn sample(&mut self, levels: u8) -> u8 {
        let mut changed = self.state ^ !levels;

        self.ct0 = !(self.ct0 & changed);
        self.ct1 = self.ct0 ^ (self.ct1 & changed);
        changed &= self.ct0 & self.ct1;

        self.state ^= changed;
        self.state & changed
    }

    /// Lines currently held down after debouncing.
    pub fn pressed(&self) -> u8 {
        self.state
    }
}
