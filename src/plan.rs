//! Timer modes and the work/pause schedules they run.

use crate::clock::ClockTime;
use crate::config::MAX_ROUNDS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Mode {
    /// Counts up from 0:00 until stopped.
    Stopwatch,
    /// One configurable countdown.
    Timer,
    /// Configurable work/pause rounds.
    Interval,
    /// 20 s work, 10 s pause, 8 rounds.
    Tabata,
    /// "For good and bad": 18 one-minute rounds, no pause.
    Fgb,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Stopwatch,
        Mode::Timer,
        Mode::Interval,
        Mode::Tabata,
        Mode::Fgb,
    ];

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Number shown on the display while selecting, starting at 1.
    pub fn ordinal(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Whether the mode asks for parameters before running.
    pub fn is_configurable(self) -> bool {
        matches!(self, Mode::Timer | Mode::Interval)
    }

    /// Schedule the mode starts from, `None` for the stopwatch.
    pub fn default_plan(self) -> Option<IntervalPlan> {
        match self {
            Mode::Stopwatch => None,
            Mode::Timer => Some(IntervalPlan::single(ClockTime::from_minutes(1))),
            Mode::Interval => Some(IntervalPlan::new(
                ClockTime::from_seconds(30),
                ClockTime::from_seconds(30),
                5,
            )),
            Mode::Tabata => Some(IntervalPlan::new(
                ClockTime::from_seconds(20),
                ClockTime::from_seconds(10),
                8,
            )),
            Mode::Fgb => Some(IntervalPlan::new(
                ClockTime::from_minutes(1),
                ClockTime::ZERO,
                18,
            )),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One contiguous stretch of a schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Segment {
    Work(ClockTime),
    Pause(ClockTime),
}

impl Segment {
    pub fn duration(self) -> ClockTime {
        match self {
            Segment::Work(t) | Segment::Pause(t) => t,
        }
    }
}

/// A repeating work/pause schedule.
///
/// Work and pause rounds are consumed alternately, work first, so
/// `rounds_pause` is either equal to `rounds_work` or one more than it
/// (or zero when the schedule has no pauses).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalPlan {
    pub work: ClockTime,
    pub pause: ClockTime,
    pub rounds_work: u8,
    pub rounds_pause: u8,
}

impl IntervalPlan {
    /// `rounds` of work each followed by a pause. A zero pause means no pauses.
    pub fn new(work: ClockTime, pause: ClockTime, rounds: u8) -> Self {
        let mut plan = Self {
            work,
            pause,
            rounds_work: 0,
            rounds_pause: 0,
        };
        plan.set_rounds(rounds);
        plan
    }

    /// A single work segment.
    pub fn single(work: ClockTime) -> Self {
        Self::new(work, ClockTime::ZERO, 1)
    }

    pub fn set_rounds(&mut self, rounds: u8) {
        self.rounds_work = rounds.min(MAX_ROUNDS);
        self.sync_pause_rounds();
    }

    /// Pause rounds mirror work rounds, unless there is no pause at all.
    pub fn sync_pause_rounds(&mut self) {
        self.rounds_pause = if self.pause.is_zero() {
            0
        } else {
            self.rounds_work
        };
    }

    /// Pulls the next segment: the pause owed to the last work round if any,
    /// otherwise another work round. `None` once both are used up.
    pub fn next_segment(&mut self) -> Option<Segment> {
        if self.rounds_pause > self.rounds_work {
            self.rounds_pause -= 1;
            Some(Segment::Pause(self.pause))
        } else if self.rounds_work > 0 {
            self.rounds_work -= 1;
            Some(Segment::Work(self.work))
        } else {
            None
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.rounds_work == 0 && self.rounds_pause == 0
    }

    /// Seconds of work and pause left in the schedule.
    pub fn remaining_seconds(&self) -> u32 {
        self.rounds_work as u32 * self.work.total_seconds() as u32
            + self.rounds_pause as u32 * self.pause.total_seconds() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn next_cycles_through_all_modes() {
        let mut mode = Mode::Stopwatch;
        for _ in 0..Mode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, Mode::Stopwatch);
    }

    #[test]
    fn prev_wraps_to_the_last_mode() {
        assert_eq!(Mode::Stopwatch.prev(), Mode::Fgb);
        assert_eq!(Mode::Fgb.next(), Mode::Stopwatch);
        assert_eq!(Mode::Tabata.prev(), Mode::Interval);
    }

    #[test]
    fn ordinals_start_at_one() {
        let ordinals: Vec<u8> = Mode::ALL.iter().map(|m| m.ordinal()).collect();
        assert_eq!(ordinals, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn only_timer_and_interval_are_configured() {
        let configured: Vec<Mode> = Mode::ALL
            .iter()
            .copied()
            .filter(|m| m.is_configurable())
            .collect();
        assert_eq!(configured, [Mode::Timer, Mode::Interval]);
    }

    #[test]
    fn segments_alternate_work_first() {
        let mut plan = IntervalPlan::new(ClockTime::new(0, 20), ClockTime::new(0, 10), 2);
        let work = Segment::Work(ClockTime::new(0, 20));
        let pause = Segment::Pause(ClockTime::new(0, 10));

        assert_eq!(plan.next_segment(), Some(work));
        assert_eq!(plan.next_segment(), Some(pause));
        assert_eq!(plan.next_segment(), Some(work));
        assert_eq!(plan.next_segment(), Some(pause));
        assert_eq!(plan.next_segment(), None);
        assert!(plan.is_exhausted());
        assert_eq!(plan.next_segment(), None);
    }

    #[test]
    fn zero_pause_means_work_only() {
        let plan = Mode::Fgb.default_plan().unwrap();
        assert_eq!(plan.rounds_work, 18);
        assert_eq!(plan.rounds_pause, 0);

        let mut plan = plan;
        let mut count = 0;
        while let Some(segment) = plan.next_segment() {
            assert!(matches!(segment, Segment::Work(_)));
            count += 1;
        }
        assert_eq!(count, 18);
    }

    #[test]
    fn tabata_runs_for_four_minutes() {
        let plan = Mode::Tabata.default_plan().unwrap();
        assert_eq!(plan.remaining_seconds(), 8 * 20 + 8 * 10);
    }

    #[test]
    fn rounds_are_capped() {
        let mut plan = IntervalPlan::new(ClockTime::new(0, 30), ClockTime::new(0, 30), 200);
        assert_eq!(plan.rounds_work, MAX_ROUNDS);
        plan.pause = ClockTime::ZERO;
        plan.sync_pause_rounds();
        assert_eq!(plan.rounds_pause, 0);
    }
}
