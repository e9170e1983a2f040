//! Head motion task
//!
//! Owns the head's H-bridge channel and ticks the motion scheduler at
//! the fixed cadence. State changes are logged via change detection so
//! the per-tick hot path stays quiet.

use defmt::*;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Duration, Ticker};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use wraith_core::config::HeadConfig;
use wraith_core::head::HeadMotionScheduler;
use wraith_drivers::HBridgeMotor;

use super::TICK_INTERVAL_MS;

/// Head motion control task
#[embassy_executor::task]
pub async fn head_task(
    enable: PwmOutput<'static>,
    in1: Output<'static>,
    in2: Output<'static>,
) {
    info!("Head motion task started");

    let bridge = HBridgeMotor::new(enable, in1, in2);
    let mut rosc = RoscRng;
    let rng = SmallRng::seed_from_u64(rosc.next_u64());
    let mut scheduler = unwrap!(HeadMotionScheduler::new(HeadConfig::default(), bridge, rng));

    let mut last_state = scheduler.state();
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        scheduler.step();

        let state = scheduler.state();
        if state != last_state {
            debug!(
                "Head: {:?} -> {:?} ({} states completed)",
                last_state,
                state,
                scheduler.completed_states()
            );
            last_state = state;
        }

        ticker.next().await;
    }
}
