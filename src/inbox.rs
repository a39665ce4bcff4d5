//! Events handed from interrupt context to the foreground loop.
//!
//! Interrupts only ever add to the inbox (increment the second counter, OR in
//! key bits); the foreground loop only takes from it. Every access is a
//! single atomic read-modify-write, so no critical section is needed.

use portable_atomic::{AtomicU8, Ordering};

/// Logical buttons. The board layer maps pins onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Button {
    /// Confirm / next field.
    Confirm,
    Increment,
    Decrement,
    /// Abandon the session and go back to mode selection.
    Back,
}

impl Button {
    pub const ALL: [Button; 4] = [
        Button::Confirm,
        Button::Increment,
        Button::Decrement,
        Button::Back,
    ];

    /// Bit of this button in key masks.
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

pub struct EventInbox {
    seconds: AtomicU8,
    presses: AtomicU8,
}

impl Default for EventInbox {
    fn default() -> Self {
        Self::new()
    }
}

impl EventInbox {
    pub const fn new() -> Self {
        Self {
            seconds: AtomicU8::new(0),
            presses: AtomicU8::new(0),
        }
    }

    /// Counts one elapsed second. Saturates instead of wrapping.
    pub fn record_second(&self) {
        let _ = self
            .seconds
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_add(1));
    }

    /// Takes one pending second, if any.
    pub fn take_second(&self) -> bool {
        self.seconds
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok()
    }

    pub fn pending_seconds(&self) -> u8 {
        self.seconds.load(Ordering::Acquire)
    }

    /// Marks every button in `mask` as pressed.
    pub fn record_presses(&self, mask: u8) {
        if mask != 0 {
            self.presses.fetch_or(mask, Ordering::AcqRel);
        }
    }

    pub fn press(&self, button: Button) {
        self.record_presses(button.mask());
    }

    /// Checks and clears the pending press of `button`. A press is delivered
    /// at most once.
    pub fn take_press(&self, button: Button) -> bool {
        let mask = button.mask();
        self.presses.fetch_and(!mask, Ordering::AcqRel) & mask != 0
    }
}
