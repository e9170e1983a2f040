//! Light intensity task
//!
//! Owns the light's H-bridge channel and ticks the intensity scheduler
//! at the fixed cadence.

use defmt::*;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Duration, Ticker};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use wraith_core::config::LightConfig;
use wraith_core::light::LightIntensityScheduler;
use wraith_drivers::HBridgeLight;

use super::TICK_INTERVAL_MS;

/// Light intensity control task
#[embassy_executor::task]
pub async fn light_task(
    enable: PwmOutput<'static>,
    in1: Output<'static>,
    in2: Output<'static>,
) {
    info!("Light intensity task started");

    let channel = HBridgeLight::new(enable, in1, in2);
    let mut rosc = RoscRng;
    let rng = SmallRng::seed_from_u64(rosc.next_u64());
    let mut scheduler = unwrap!(LightIntensityScheduler::new(
        LightConfig::default(),
        channel,
        rng
    ));

    let mut last_state = scheduler.state();
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        scheduler.step();

        let state = scheduler.state();
        if state != last_state {
            debug!(
                "Light: {:?} -> {:?} (brightness {})",
                last_state,
                state,
                scheduler.brightness()
            );
            last_state = state;
        }

        ticker.next().await;
    }
}
