/// Minutes and seconds of an elapsed or remaining duration.
///
/// There is no hour field: counting up past 59:59 rolls over to 0:00.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct ClockTime {
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockTime {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(minutes: u8, seconds: u8) -> Self {
        Self { minutes, seconds }
    }

    pub const fn from_minutes(minutes: u8) -> Self {
        Self::new(minutes, 0)
    }

    pub const fn from_seconds(seconds: u8) -> Self {
        Self::new(seconds / 60, seconds % 60)
    }

    pub fn is_zero(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }

    pub fn total_seconds(&self) -> u16 {
        self.minutes as u16 * 60 + self.seconds as u16
    }

    /// Adds one second, carrying into the minute.
    pub fn count_up(&mut self) {
        self.seconds += 1;
        if self.seconds >= 60 {
            self.seconds = 0;
            self.add_minute();
        }
    }

    /// Adds one minute. Rolls over to 0 after 59.
    pub fn add_minute(&mut self) {
        self.minutes += 1;
        if self.minutes >= 60 {
            self.minutes = 0;
        }
    }

    /// Removes one second, borrowing a minute when the seconds run out.
    /// Stays at 0:00 once there.
    pub fn count_down(&mut self) {
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        }
    }
}
