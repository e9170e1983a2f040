//! Cooling fan task
//!
//! The fan is a static duty output with no state machine: set it once,
//! then just keep the PWM channel alive.

use defmt::*;
use embassy_rp::pwm::PwmOutput;

use wraith_drivers::Fan;

/// Fan control task
#[embassy_executor::task]
pub async fn fan_task(enable: PwmOutput<'static>) {
    let mut fan = Fan::new(enable);
    fan.run();
    info!("Fan running at fixed duty");

    core::future::pending::<()>().await
}
