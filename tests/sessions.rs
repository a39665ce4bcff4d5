//! Whole sessions driven the way the firmware drives them: interrupts fill
//! the inbox, the foreground loop calls `Machine::step`.

use interval_clock::config::{BUZZER_LONG, DEFAULT_BUZZCOUNT, PRECOUNT};
use interval_clock::display::{BUDS, DIGIT0, DIGIT1, DIGIT2};
use interval_clock::{
    BuzzRequest, Button, Buzzer, ClockTime, Debouncer, DisplayState, EventInbox, Field, Glyph,
    Machine, Mode, Pulse, State,
};

struct Rig {
    machine: Machine,
    inbox: EventInbox,
}

impl Rig {
    fn new() -> Self {
        Self {
            machine: Machine::new(),
            inbox: EventInbox::new(),
        }
    }

    fn press(&mut self, button: Button) -> Option<BuzzRequest> {
        self.inbox.press(button);
        self.machine.step(&self.inbox)
    }

    fn tick(&mut self) -> Option<BuzzRequest> {
        self.inbox.record_second();
        self.machine.step(&self.inbox)
    }

    fn select(&mut self, mode: Mode) {
        while self.machine.mode() != mode {
            self.press(Button::Increment);
        }
        self.press(Button::Confirm);
    }

    fn run_precount(&mut self) {
        for _ in 0..PRECOUNT {
            self.tick();
        }
        assert_eq!(self.machine.state(), State::Running);
    }

    fn digit(&self, position: usize) -> Glyph {
        self.machine.display().glyphs[position]
    }
}

fn digit_value(glyph: Glyph) -> u8 {
    match glyph {
        Glyph::Digit(d) => d,
        Glyph::Raw(p) => panic!("expected a numeral, found pattern {p:#04x}"),
    }
}

#[test]
fn tabata_runs_240_seconds_then_shows_buds() {
    let mut rig = Rig::new();
    rig.select(Mode::Tabata);
    assert_eq!(rig.machine.state(), State::Precount);
    rig.run_precount();

    let mut active = 0;
    let mut pause_digits = Vec::new();
    while !rig.machine.session().is_finished() {
        rig.tick();
        if !rig.machine.session().is_finished() {
            active += 1;
            let rounds = digit_value(rig.digit(DIGIT2));
            if pause_digits.last() != Some(&rounds) {
                pause_digits.push(rounds);
            }
        }
        assert!(active <= 240, "schedule did not finish");
    }

    assert_eq!(active, 8 * 20 + 8 * 10);
    assert_eq!(pause_digits, [8, 7, 6, 5, 4, 3, 2, 1, 0]);
    assert_eq!(*rig.machine.display(), DisplayState::word(BUDS));
}

#[test]
fn tabata_shows_seconds_and_pauses_left() {
    let mut rig = Rig::new();
    rig.select(Mode::Tabata);
    rig.run_precount();

    assert_eq!(rig.tick(), Some(BuzzRequest::once(Pulse::Long)));
    assert_eq!(rig.digit(DIGIT1), Glyph::Digit(2));
    assert_eq!(rig.digit(DIGIT0), Glyph::Digit(0));
    assert_eq!(rig.digit(DIGIT2), Glyph::Digit(8));
    assert!(rig.machine.display().has_dot(DIGIT2));

    rig.tick();
    assert_eq!(rig.digit(DIGIT1), Glyph::Digit(1));
    assert_eq!(rig.digit(DIGIT0), Glyph::Digit(9));
    assert!(!rig.machine.display().has_dot(DIGIT2));
}

#[test]
fn exhausted_interval_stays_finished() {
    let mut rig = Rig::new();
    rig.select(Mode::Interval);

    // 0:03 work, 0:02 pause, 2 rounds.
    rig.press(Button::Confirm);
    for _ in 0..27 {
        rig.press(Button::Decrement);
    }
    rig.press(Button::Confirm);
    rig.press(Button::Confirm);
    for _ in 0..28 {
        rig.press(Button::Decrement);
    }
    rig.press(Button::Confirm);
    assert_eq!(rig.machine.session().config_cursor(), Some(Field::Rounds));
    for _ in 0..3 {
        rig.press(Button::Decrement);
    }
    rig.press(Button::Confirm);

    let plan = rig.machine.session().plan.unwrap();
    assert_eq!(plan.work, ClockTime::new(0, 3));
    assert_eq!(plan.pause, ClockTime::new(0, 2));
    assert_eq!((plan.rounds_work, plan.rounds_pause), (2, 2));

    rig.run_precount();
    for _ in 0..(2 * 3 + 2 * 2) {
        rig.tick();
        assert!(!rig.machine.session().is_finished());
    }

    assert_eq!(
        rig.tick(),
        Some(BuzzRequest::repeat(Pulse::Long, DEFAULT_BUZZCOUNT))
    );
    let plan = rig.machine.session().plan.unwrap();
    assert!(plan.is_exhausted());

    for _ in 0..500 {
        assert_eq!(rig.tick(), None);
        assert_eq!(*rig.machine.display(), DisplayState::word(BUDS));
        assert_eq!(rig.machine.session().elapsed, ClockTime::ZERO);
        assert_eq!(rig.machine.session().plan, Some(plan));
    }
}

#[test]
fn fgb_runs_eighteen_minute_rounds() {
    let mut rig = Rig::new();
    rig.select(Mode::Fgb);
    rig.run_precount();

    let mut segment_starts = 0;
    let mut active = 0u32;
    while !rig.machine.session().is_finished() {
        if rig.tick() == Some(BuzzRequest::once(Pulse::Long)) {
            segment_starts += 1;
        }
        active += 1;
    }
    assert_eq!(segment_starts, 18);
    // The last tick is the one that announces the end.
    assert_eq!(active - 1, 18 * 60);
}

#[test]
fn back_abandons_a_running_session() {
    let mut rig = Rig::new();
    rig.select(Mode::Stopwatch);
    rig.run_precount();
    for _ in 0..5 {
        rig.tick();
    }
    assert_eq!(rig.machine.session().elapsed, ClockTime::new(0, 5));

    rig.press(Button::Back);
    assert_eq!(rig.machine.state(), State::Select);
    assert_eq!(rig.machine.session().elapsed, ClockTime::ZERO);
    assert_eq!(rig.digit(DIGIT0), Glyph::Digit(Mode::Stopwatch.ordinal()));
}

#[test]
fn late_loop_catches_up_on_every_second() {
    let mut rig = Rig::new();
    rig.select(Mode::Stopwatch);
    rig.run_precount();

    for _ in 0..75 {
        rig.inbox.record_second();
    }
    rig.machine.step(&rig.inbox);

    assert_eq!(rig.inbox.pending_seconds(), 0);
    assert_eq!(rig.machine.session().elapsed, ClockTime::new(1, 15));
    // Each tick shows the time before advancing it.
    assert_eq!(rig.digit(DIGIT2), Glyph::Digit(1));
    assert_eq!(rig.digit(DIGIT1), Glyph::Digit(1));
    assert_eq!(rig.digit(DIGIT0), Glyph::Digit(4));
}

#[test]
fn raw_key_samples_reach_the_machine() {
    const RELEASED: u8 = 0xFF;
    let mut debouncer = Debouncer::new();
    let inbox = EventInbox::new();
    let mut machine = Machine::new();

    let mut hold = |levels: u8, samples: usize, machine: &mut Machine| {
        for _ in 0..samples {
            inbox.record_presses(debouncer.sample(levels));
            machine.step(&inbox);
        }
    };

    // A bounce shorter than the debounce window does nothing.
    hold(RELEASED & !Button::Increment.mask(), 2, &mut machine);
    hold(RELEASED, 5, &mut machine);
    assert_eq!(machine.mode(), Mode::Stopwatch);

    // A held key advances the mode once.
    hold(RELEASED & !Button::Increment.mask(), 200, &mut machine);
    hold(RELEASED, 5, &mut machine);
    assert_eq!(machine.mode(), Mode::Timer);

    hold(RELEASED & !Button::Confirm.mask(), 10, &mut machine);
    assert_eq!(machine.state(), State::Configure(Field::WorkMinutes));
}

#[test]
fn finish_is_announced_with_four_long_pulses() {
    let mut rig = Rig::new();
    rig.select(Mode::Timer);
    rig.press(Button::Confirm);
    rig.run_precount();

    let mut buzzer = Buzzer::new();
    let mut announced = None;
    for _ in 0..200 {
        if let Some(request) = rig.tick() {
            announced = Some(request);
        }
        if rig.machine.session().is_finished() {
            break;
        }
    }
    let request = announced.unwrap();
    assert_eq!(request, BuzzRequest::repeat(Pulse::Long, DEFAULT_BUZZCOUNT));

    buzzer.apply(request);
    let mut pulses = 0;
    let mut on_ticks = 0;
    let mut was_active = false;
    while buzzer.is_busy() {
        if buzzer.is_active() {
            on_ticks += 1;
            if !was_active {
                pulses += 1;
            }
        }
        was_active = buzzer.is_active();
        buzzer.tick();
    }
    assert_eq!(pulses, DEFAULT_BUZZCOUNT);
    assert_eq!(on_ticks, DEFAULT_BUZZCOUNT as u16 * BUZZER_LONG);
}
