//! Pin assignments for the Pico.
//!
//! | Function | Pins |
//! | -------- | ---- |
//! | Confirm, Increment, Decrement, Back keys | GPIO2..GPIO5, pull-up, active-low |
//! | Segments a..g, dp | GPIO6..GPIO13, active-high |
//! | Digit enables DIGIT0..DIGIT3 | GPIO14..GPIO17, active-high |
//! | Buzzer | GPIO18 |
//! | Heartbeat LED | GPIO25 (on-board) |

use embedded_hal::digital::v2::InputPin;
use interval_clock::Button;
use rp_pico::hal::gpio::{
    bank0::{Gpio18, Gpio25},
    DynPinId, FunctionSioInput, FunctionSioOutput, Pin, PullDown, PullUp,
};

pub type OutPin = Pin<DynPinId, FunctionSioOutput, PullDown>;
pub type KeyPin = Pin<DynPinId, FunctionSioInput, PullUp>;
pub type BuzzerPin = Pin<Gpio18, FunctionSioOutput, PullDown>;
pub type LedPin = Pin<Gpio25, FunctionSioOutput, PullDown>;

/// Bits of the key mask that have a physical key behind them.
const KEY_MASK: u8 = 0x0F;

/// The four key inputs, indexed like [`Button::ALL`].
pub struct Keypad {
    pins: [KeyPin; 4],
}

impl Keypad {
    pub fn new(pins: [KeyPin; 4]) -> Self {
        Self { pins }
    }

    /// Raw line levels, bit [`Button::mask`] set while that key is released.
    /// Bits without a key read as released.
    pub fn levels(&self) -> u8 {
        Button::ALL
            .iter()
            .zip(self.pins.iter())
            .fold(!KEY_MASK, |levels, (button, pin)| {
                if pin.is_high().unwrap_or(true) {
                    levels | button.mask()
                } else {
                    levels
                }
            })
    }
}
