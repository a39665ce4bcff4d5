//! Buzzer pulse scheduling, counted in debounce ticks.

use crate::config::{BUZZER_GAP, BUZZER_LONG, BUZZER_SHORT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Pulse {
    Short,
    Long,
}

impl Pulse {
    /// Pulse length in debounce ticks.
    pub const fn ticks(self) -> u16 {
        match self {
            Pulse::Short => BUZZER_SHORT,
            Pulse::Long => BUZZER_LONG,
        }
    }
}

/// A request for `count` pulses of one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct BuzzRequest {
    pub pulse: Pulse,
    pub count: u8,
}

impl BuzzRequest {
    pub const fn once(pulse: Pulse) -> Self {
        Self { pulse, count: 1 }
    }

    pub const fn repeat(pulse: Pulse, count: u8) -> Self {
        Self { pulse, count }
    }
}

/// Tracks the pulse being sounded and how many follow it.
#[derive(Clone, Copy, Debug)]
pub struct Buzzer {
    pulse: Pulse,
    /// Ticks left in the sounding pulse. The buzzer is on while non-zero.
    remaining_ticks: u16,
    /// Pulses still to sound after the current one.
    remaining_pulses: u8,
    /// Ticks of silence left before the next pulse starts.
    gap_ticks: u16,
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buzzer {
    pub const fn new() -> Self {
        Self {
            pulse: Pulse::Short,
            remaining_ticks: 0,
            remaining_pulses: 0,
            gap_ticks: 0,
        }
    }

    /// Arms `count` pulses of `pulse`, replacing whatever was sounding.
    pub fn request(&mut self, pulse: Pulse, count: u8) {
        if count == 0 {
            return;
        }
        debug!("buzz {} x{}", pulse, count);
        self.pulse = pulse;
        self.remaining_ticks = pulse.ticks();
        self.remaining_pulses = count - 1;
        self.gap_ticks = 0;
    }

    pub fn apply(&mut self, request: BuzzRequest) {
        self.request(request.pulse, request.count);
    }

    /// Advances the schedule by one debounce period.
    pub fn tick(&mut self) {
        if self.remaining_ticks > 0 {
            self.remaining_ticks -= 1;
            if self.remaining_ticks == 0 && self.remaining_pulses > 0 {
                self.gap_ticks = BUZZER_GAP;
            }
        } else if self.gap_ticks > 0 {
            self.gap_ticks -= 1;
            if self.gap_ticks == 0 {
                self.remaining_pulses -= 1;
                self.remaining_ticks = self.pulse.ticks();
            }
        }
    }

    /// Whether the buzzer pin should be driven.
    pub fn is_active(&self) -> bool {
        self.remaining_ticks > 0
    }

    /// Whether anything is sounding or still queued.
    pub fn is_busy(&self) -> bool {
        self.remaining_ticks > 0 || self.gap_ticks > 0
    }
}
