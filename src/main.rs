//! Interval clock firmware for the Raspberry Pi Pico.
//!
//! Alarm 0 fires every second and counts into the event inbox. Alarm 1 fires
//! every debounce period, samples the keys and clocks the buzzer. The idle
//! loop runs the state machine and multiplexes the display.
//!
//! Only the RP2040 build has an application; host builds exist so the
//! library tests can run.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod board;

#[cfg(target_os = "none")]
use {defmt_rtt as _, panic_probe as _};

#[cfg(target_os = "none")]
#[rtic::app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use crate::board::{BuzzerPin, Keypad, LedPin, OutPin};
    use embedded_hal::digital::v2::{OutputPin, ToggleableOutputPin};
    use interval_clock::config::{DEBOUNCE_PERIOD_US, SECOND_US};
    use interval_clock::{Buzzer, Debouncer, EventInbox, Machine, Multiplexer};
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        fugit::ExtU32,
        sio::Sio,
        timer::{Alarm, Alarm0, Alarm1, Timer},
        watchdog::Watchdog,
    };

    // Shared resources (accessed by multiple tasks)
    #[shared]
    struct Shared {
        inbox: EventInbox,
        buzzer: Buzzer,
    }

    // Local resources (accessed by single tasks)
    #[local]
    struct Local {
        second_alarm: Alarm0,
        debounce_alarm: Alarm1,
        led: LedPin,
        keypad: Keypad,
        debouncer: Debouncer,
        buzzer_pin: BuzzerPin,
        machine: Machine,
        multiplexer: Multiplexer<OutPin>,
        delay: cortex_m::delay::Delay,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("interval clock starting");

        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

        let mut second_alarm = timer.alarm_0().unwrap();
        second_alarm.schedule(SECOND_US.micros()).unwrap();
        second_alarm.enable_interrupt();

        let mut debounce_alarm = timer.alarm_1().unwrap();
        debounce_alarm.schedule(DEBOUNCE_PERIOD_US.micros()).unwrap();
        debounce_alarm.enable_interrupt();

        let delay = cortex_m::delay::Delay::new(ctx.core.SYST, clocks.system_clock.freq().to_Hz());

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let keypad = Keypad::new([
            pins.gpio2.into_pull_up_input().into_dyn_pin(),
            pins.gpio3.into_pull_up_input().into_dyn_pin(),
            pins.gpio4.into_pull_up_input().into_dyn_pin(),
            pins.gpio5.into_pull_up_input().into_dyn_pin(),
        ]);

        let multiplexer = Multiplexer::new(
            [
                pins.gpio6.into_push_pull_output().into_dyn_pin(),
                pins.gpio7.into_push_pull_output().into_dyn_pin(),
                pins.gpio8.into_push_pull_output().into_dyn_pin(),
                pins.gpio9.into_push_pull_output().into_dyn_pin(),
                pins.gpio10.into_push_pull_output().into_dyn_pin(),
                pins.gpio11.into_push_pull_output().into_dyn_pin(),
                pins.gpio12.into_push_pull_output().into_dyn_pin(),
                pins.gpio13.into_push_pull_output().into_dyn_pin(),
            ],
            [
                pins.gpio14.into_push_pull_output().into_dyn_pin(),
                pins.gpio15.into_push_pull_output().into_dyn_pin(),
                pins.gpio16.into_push_pull_output().into_dyn_pin(),
                pins.gpio17.into_push_pull_output().into_dyn_pin(),
            ],
        );

        let buzzer_pin = pins.gpio18.into_push_pull_output();
        let led = pins.led.into_push_pull_output();

        (
            Shared {
                inbox: EventInbox::new(),
                buzzer: Buzzer::new(),
            },
            Local {
                second_alarm,
                debounce_alarm,
                led,
                keypad,
                debouncer: Debouncer::new(),
                buzzer_pin,
                machine: Machine::new(),
                multiplexer,
                delay,
            },
            init::Monotonics(),
        )
    }

    // Hardware Task: Timer Interrupt (1Hz)
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [&inbox], local = [second_alarm, led])]
    fn second_tick(ctx: second_tick::Context) {
        ctx.local.second_alarm.clear_interrupt();
        ctx.local.second_alarm.schedule(SECOND_US.micros()).ok();

        ctx.local.led.toggle().ok();
        ctx.shared.inbox.record_second();
    }

    // Hardware Task: Timer Interrupt (debounce period)
    #[task(
        binds = TIMER_IRQ_1,
        priority = 1,
        shared = [&inbox, buzzer],
        local = [debounce_alarm, keypad, debouncer, buzzer_pin]
    )]
    fn debounce_tick(mut ctx: debounce_tick::Context) {
        ctx.local.debounce_alarm.clear_interrupt();
        ctx.local.debounce_alarm.schedule(DEBOUNCE_PERIOD_US.micros()).ok();

        let pressed = ctx.local.debouncer.sample(ctx.local.keypad.levels());
        ctx.shared.inbox.record_presses(pressed);

        let active = ctx.shared.buzzer.lock(|buzzer| {
            buzzer.tick();
            buzzer.is_active()
        });
        if active {
            ctx.local.buzzer_pin.set_high().ok();
        } else {
            ctx.local.buzzer_pin.set_low().ok();
        }
    }

    // Foreground loop: state machine plus display multiplexing
    #[idle(shared = [&inbox, buzzer], local = [machine, multiplexer, delay])]
    fn idle(mut ctx: idle::Context) -> ! {
        loop {
            if let Some(request) = ctx.local.machine.step(ctx.shared.inbox) {
                ctx.shared.buzzer.lock(|buzzer| buzzer.apply(request));
            }

            ctx.local
                .multiplexer
                .refresh(ctx.local.machine.display(), ctx.local.delay)
                .ok();
        }
    }
}

#[cfg(not(target_os = "none"))]
fn main() {}
