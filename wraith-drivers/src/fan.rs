//! Cooling fan driver
//!
//! The light's heatsink fan is a four-pin unit with a PWM control
//! wire. It has no state machine: one fixed duty, set at startup and
//! left alone.

use embedded_hal::pwm::SetDutyCycle;

/// Stock duty level (of 255) the fan runs at
pub const FAN_DUTY: u8 = 75;

/// Fixed-duty fan output
pub struct Fan<P> {
    pwm: P,
    duty: u8,
}

impl<P: SetDutyCycle> Fan<P> {
    /// Create a fan at the stock duty level
    pub fn new(pwm: P) -> Self {
        Self::with_duty(pwm, FAN_DUTY)
    }

    /// Create a fan at a custom duty level (of 255)
    pub fn with_duty(pwm: P, duty: u8) -> Self {
        Self { pwm, duty }
    }

    /// Start the fan at its configured duty
    pub fn run(&mut self) {
        self.pwm
            .set_duty_cycle_fraction(u16::from(self.duty), 255)
            .ok();
    }

    /// Stop the fan
    pub fn stop(&mut self) {
        self.pwm.set_duty_cycle_fully_off().ok();
    }
}
