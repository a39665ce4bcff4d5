//! Compile-time timing and behaviour constants.

/// Period of the one-second alarm, in microseconds.
pub const SECOND_US: u32 = 1_000_000;

/// Period of the key sampling / buzzer alarm, in microseconds.
pub const DEBOUNCE_PERIOD_US: u32 = 2_000;

/// How long each strobed digit stays lit.
pub const DIGIT_SETTLE_US: u32 = 50;

/// Value the precount starts from.
pub const PRECOUNT: u8 = 10;

/// Length of the final-seconds warning window. Also the number of long
/// pulses announcing a finished schedule.
pub const DEFAULT_BUZZCOUNT: u8 = 4;

/// Long pulse length, in debounce ticks.
pub const BUZZER_LONG: u16 = 10;

/// Short pulse length, in debounce ticks.
pub const BUZZER_SHORT: u16 = 5;

/// Silence between repeated pulses, in debounce ticks.
pub const BUZZER_GAP: u16 = BUZZER_SHORT;

/// Upper bound of the rounds field in CONFIGURE.
pub const MAX_ROUNDS: u8 = 99;
