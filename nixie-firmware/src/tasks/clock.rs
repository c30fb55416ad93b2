//! Clock task
//!
//! Runs the time keeping, scramble and display pipeline on a fixed tick:
//! - Advance or sync the local time
//! - Overlay the scramble animation
//! - Shift the digits out to the tubes

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Duration, Instant, Ticker, Timer};
use portable_atomic::Ordering;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use nixie_core::config::ClockConfig;
use nixie_core::display::NixieDriver;
use nixie_core::scramble::Scrambler;
use nixie_core::time::{ClockTime, TickOutcome, Timekeeper};
use nixie_core::TUBE_COUNT;
use nixie_drivers::register::Hv513Bank;

use crate::channels::{CONNECTED, TIME_REPORT};
use crate::feed::SignalTimeFeed;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 100;

/// HV513 chain on SPI0
pub type TubeChain =
    Hv513Bank<Spi<'static, SPI0, Blocking>, Output<'static>, Output<'static>, Output<'static>>;

/// Four-tube display on the HV513 chain
pub type Display = NixieDriver<TubeChain, TUBE_COUNT>;

/// Clock task - owns the display and the local time
#[embassy_executor::task]
pub async fn clock_task(mut display: Display, config: &'static ClockConfig) {
    info!("Clock task started");

    if display.begin().is_err() {
        warn!("Display init failed, tubes may stay dark");
    }

    self_test(&mut display, config.display.selftest_dwell_ms).await;

    let rng = SmallRng::seed_from_u64(Instant::now().as_ticks());
    let mut scrambler = Scrambler::with_config(rng, config.scramble);
    let mut timekeeper = Timekeeper::with_config(SignalTimeFeed::new(), &config.timekeeping);
    let mut reported: Option<ClockTime> = None;

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let start = Instant::now();

    loop {
        ticker.next().await;

        // Calculate elapsed time since start in milliseconds
        let now_ms = start.elapsed().as_millis() as u32;
        let connected = CONNECTED.load(Ordering::Relaxed);

        match timekeeper.step(now_ms, connected) {
            TickOutcome::Synced => {
                info!(
                    "Time synced to {}:{}",
                    timekeeper.hour(),
                    timekeeper.minute()
                );
            }
            TickOutcome::Rejected => warn!("Ignoring out-of-range time update"),
            TickOutcome::Advanced | TickOutcome::Idle => {}
        }

        let time = timekeeper.time();
        if reported != Some(time) {
            TIME_REPORT.signal(time);
            reported = Some(time);
        }

        let mut digits = time.to_digits();
        let was_scrambling = scrambler.is_scrambling();
        scrambler.step(now_ms, &mut digits);
        if scrambler.is_scrambling() && !was_scrambling {
            debug!("Scramble started");
        }

        if display.set_digits(&digits).is_err() {
            warn!("Display write failed");
        }
    }
}

/// Light every digit on every tube in turn
async fn self_test(display: &mut Display, dwell_ms: u32) {
    if dwell_ms == 0 {
        return;
    }

    info!("Display self-test");
    for digit in 0..10 {
        if display.set_digits(&[digit; TUBE_COUNT]).is_err() {
            warn!("Display write failed during self-test");
            return;
        }
        Timer::after_millis(dwell_ms as u64).await;
    }
}
