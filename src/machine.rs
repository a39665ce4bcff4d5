//! The mode/timer state machine.
//!
//! ```text
//! SELECT --A--> CONFIGURE --A (last field)--> PRECOUNT --0--> RUNNING
//!    \________________A (fixed modes)______/
//! any state --Back--> SELECT
//! ```
//!
//! The machine owns the [`DisplayState`] the renderer draws and hands buzzer
//! requests back to the caller. Key presses are consumed in SELECT and
//! CONFIGURE only; PRECOUNT and RUNNING are driven by seconds alone.

use crate::buzzer::{BuzzRequest, Pulse};
use crate::clock::ClockTime;
use crate::config::{DEFAULT_BUZZCOUNT, MAX_ROUNDS, PRECOUNT};
use crate::display::{DisplayState, Glyph, BUDS, DIGIT0, DIGIT1, DIGIT2, DIGIT3};
use crate::inbox::{Button, EventInbox};
use crate::plan::{IntervalPlan, Mode};

/// Order in which pending presses are handled within one step.
const KEY_ORDER: [Button; 4] = [
    Button::Back,
    Button::Confirm,
    Button::Increment,
    Button::Decrement,
];

/// Parameter being edited in CONFIGURE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Field {
    WorkMinutes,
    WorkSeconds,
    PauseMinutes,
    PauseSeconds,
    Rounds,
}

impl Field {
    pub const FIRST: Field = Field::WorkMinutes;

    /// The field after this one for `mode`, `None` when this one is last.
    /// A timer only exposes its work minutes.
    pub fn next(self, mode: Mode) -> Option<Field> {
        match (mode, self) {
            (Mode::Timer, _) => None,
            (_, Field::WorkMinutes) => Some(Field::WorkSeconds),
            (_, Field::WorkSeconds) => Some(Field::PauseMinutes),
            (_, Field::PauseMinutes) => Some(Field::PauseSeconds),
            (_, Field::PauseSeconds) => Some(Field::Rounds),
            (_, Field::Rounds) => None,
        }
    }

    fn modulus(self) -> u8 {
        match self {
            Field::Rounds => MAX_ROUNDS + 1,
            _ => 60,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum State {
    Select,
    Configure(Field),
    Precount,
    Running,
}

/// Working memory of one session, rebuilt every time SELECT is entered.
#[derive(Clone, Copy, Debug)]
pub struct Session {
    pub mode: Mode,
    pub state: State,
    /// Time left in the current segment, or time counted so far for the
    /// stopwatch.
    pub elapsed: ClockTime,
    /// `None` for the stopwatch.
    pub plan: Option<IntervalPlan>,
    pub precount_remaining: u8,
    started: bool,
    finished: bool,
}

impl Session {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            state: State::Select,
            elapsed: ClockTime::ZERO,
            plan: mode.default_plan(),
            precount_remaining: PRECOUNT,
            started: false,
            finished: false,
        }
    }

    pub fn config_cursor(&self) -> Option<Field> {
        match self.state {
            State::Configure(field) => Some(field),
            _ => None,
        }
    }

    /// Whether the schedule has run out. Never true for the stopwatch.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

pub struct Machine {
    session: Session,
    display: DisplayState,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        let mut machine = Self {
            session: Session::new(Mode::Stopwatch),
            display: DisplayState::blank(),
        };
        machine.show_select();
        machine
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> State {
        self.session.state
    }

    pub fn mode(&self) -> Mode {
        self.session.mode
    }

    /// Handles everything pending in `inbox`: key presses first, then every
    /// elapsed second in order.
    ///
    /// Returns the last buzzer request produced, if any.
    pub fn step(&mut self, inbox: &EventInbox) -> Option<BuzzRequest> {
        for button in KEY_ORDER {
            if inbox.take_press(button) {
                self.press(button);
            }
        }

        let backlog = inbox.pending_seconds();
        if backlog > 1 {
            warn!("catching up on {} seconds", backlog);
        }

        let mut request = None;
        while inbox.take_second() {
            if let Some(r) = self.second() {
                request = Some(r);
            }
        }
        request
    }

    /// Reacts to one debounced key press.
    pub fn press(&mut self, button: Button) {
        match (self.session.state, button) {
            (State::Select, Button::Back) => {}
            (_, Button::Back) => self.back_to_select(),
            (State::Select, _) => self.select_key(button),
            (State::Configure(field), _) => self.configure_key(field, button),
            (State::Precount | State::Running, _) => trace!("{} dropped", button),
        }
    }

    /// Advances the machine by one second.
    pub fn second(&mut self) -> Option<BuzzRequest> {
        match self.session.state {
            State::Select => {
                self.display.toggle_dot(DIGIT0);
                None
            }
            State::Configure(_) => None,
            State::Precount => self.precount_tick(),
            State::Running => self.running_tick(),
        }
    }

    fn select_key(&mut self, button: Button) {
        match button {
            Button::Confirm => self.confirm_mode(),
            Button::Increment => {
                self.session.mode = self.session.mode.next();
                debug!("mode {}", self.session.mode);
                self.show_select();
            }
            Button::Decrement => {
                self.session.mode = self.session.mode.prev();
                debug!("mode {}", self.session.mode);
                self.show_select();
            }
            Button::Back => {}
        }
    }

    fn confirm_mode(&mut self) {
        let mode = self.session.mode;
        self.session = Session::new(mode);
        info!("{} selected", mode);

        if mode.is_configurable() {
            self.session.state = State::Configure(Field::FIRST);
            self.show_configure(Field::FIRST);
        } else {
            self.start_precount();
        }
    }

    fn configure_key(&mut self, field: Field, button: Button) {
        match button {
            Button::Confirm => match field.next(self.session.mode) {
                Some(next) => {
                    debug!("editing {}", next);
                    self.session.state = State::Configure(next);
                    self.show_configure(next);
                }
                None => self.start_precount(),
            },
            Button::Increment => self.adjust(field, true),
            Button::Decrement => self.adjust(field, false),
            Button::Back => {}
        }
    }

    /// Steps `field` by one, wrapping within its range.
    fn adjust(&mut self, field: Field, up: bool) {
        let Some(plan) = self.session.plan.as_mut() else {
            return;
        };

        let value = match field {
            Field::WorkMinutes => &mut plan.work.minutes,
            Field::WorkSeconds => &mut plan.work.seconds,
            Field::PauseMinutes => &mut plan.pause.minutes,
            Field::PauseSeconds => &mut plan.pause.seconds,
            Field::Rounds => &mut plan.rounds_work,
        };
        let modulus = field.modulus();
        *value = if up {
            (*value + 1) % modulus
        } else {
            (*value + modulus - 1) % modulus
        };
        trace!("{} = {}", field, *value);

        plan.sync_pause_rounds();
        self.show_configure(field);
    }

    fn start_precount(&mut self) {
        if let Some(plan) = self.session.plan.as_mut() {
            plan.sync_pause_rounds();
        }
        self.session.state = State::Precount;
        self.session.precount_remaining = PRECOUNT;
        info!("precount from {}", PRECOUNT);
        self.show_precount(PRECOUNT);
    }

    fn back_to_select(&mut self) {
        info!("back to select from {}", self.session.state);
        self.session = Session::new(self.session.mode);
        self.display = DisplayState::blank();
        self.show_select();
    }

    fn precount_tick(&mut self) -> Option<BuzzRequest> {
        let n = self.session.precount_remaining;
        self.show_precount(n);

        let request = final_seconds_warning(n as u16);
        self.session.precount_remaining = n.saturating_sub(1);
        if self.session.precount_remaining == 0 {
            info!("running {}", self.session.mode);
            self.session.state = State::Running;
        }
        request
    }

    fn running_tick(&mut self) -> Option<BuzzRequest> {
        let session = &mut self.session;
        let mut request = None;

        match session.plan.as_mut() {
            Some(plan) => {
                request = final_seconds_warning(session.elapsed.total_seconds());

                if session.elapsed.is_zero() && !session.finished {
                    match plan.next_segment() {
                        Some(segment) => {
                            info!("segment {}", segment);
                            session.elapsed = segment.duration();
                            request = Some(BuzzRequest::once(Pulse::Long));
                        }
                        None => {
                            info!("schedule finished");
                            session.finished = true;
                            request = Some(BuzzRequest::repeat(Pulse::Long, DEFAULT_BUZZCOUNT));
                        }
                    }
                }
            }
            None if !session.started => request = Some(BuzzRequest::once(Pulse::Long)),
            None => {}
        }
        session.started = true;

        self.show_running();

        let session = &mut self.session;
        if session.plan.is_some() {
            session.elapsed.count_down();
        } else {
            session.elapsed.count_up();
        }
        request
    }

    fn show_select(&mut self) {
        let dots = self.display.dots & (1 << DIGIT0);
        self.display = DisplayState::single(self.session.mode.ordinal());
        self.display.dots = dots;
    }

    fn show_configure(&mut self, field: Field) {
        let Some(plan) = self.session.plan else {
            return;
        };
        self.display = match field {
            Field::WorkMinutes | Field::WorkSeconds => DisplayState::time(plan.work),
            Field::PauseMinutes | Field::PauseSeconds => DisplayState::time(plan.pause),
            Field::Rounds => {
                let mut display = DisplayState::blank();
                display.set_pair(DIGIT0, plan.rounds_work);
                display
            }
        };
    }

    fn show_precount(&mut self, n: u8) {
        let mut display = DisplayState::blank();
        display.set(DIGIT0, Glyph::Digit(n % 10));
        if n > 9 {
            display.set(DIGIT1, Glyph::Digit(n / 10 % 10));
        }
        display.set_dot(DIGIT0, n % 2 == 0);
        self.display = display;
    }

    fn show_running(&mut self) {
        let session = &self.session;
        if session.finished {
            self.display = DisplayState::word(BUDS);
            return;
        }

        let mut display = match (session.mode, session.plan) {
            // Tabata segments never reach a minute, so the left pair shows
            // the pauses still to come instead.
            (Mode::Tabata, Some(plan)) => {
                let mut display = DisplayState::blank();
                display.set_pair(DIGIT0, session.elapsed.seconds);
                display.set_pair(DIGIT2, plan.rounds_pause);
                if plan.rounds_pause < 10 {
                    display.hide(DIGIT3);
                }
                display
            }
            _ => DisplayState::time(session.elapsed),
        };
        display.set_dot(DIGIT2, session.elapsed.seconds % 2 == 0);
        self.display = display;
    }
}

/// A short pulse for each of the last [`DEFAULT_BUZZCOUNT`] seconds.
fn final_seconds_warning(seconds_left: u16) -> Option<BuzzRequest> {
    (1..=DEFAULT_BUZZCOUNT as u16)
        .contains(&seconds_left)
        .then_some(BuzzRequest::once(Pulse::Short))
}
