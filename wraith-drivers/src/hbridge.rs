//! H-bridge output channels
//!
//! Both prop outputs run through one dual-channel H-bridge (L298N or
//! similar): the head motor on one channel, the LED on the other. A
//! channel is (enable PWM, IN1, IN2); the IN pins pick the polarity and
//! the enable duty carries the drive level.
//!
//! Pin or PWM errors are discarded: on the target board these outputs
//! are infallible, and the schedulers rewrite the full command every
//! tick anyway, so a dropped write self-heals. Worst case the prop
//! shows a wrong pose for one tick; it never crashes.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use wraith_core::traits::{Direction, LightOutput, MotorOutput};

/// Drive levels are 0..=255, scaled onto the PWM's own duty range
const LEVEL_RANGE: u16 = 255;

/// One H-bridge channel wired to the head motor
///
/// The scheduler only changes direction while the commanded speed is
/// zero, so the polarity pins never flip under load.
pub struct HBridgeMotor<P, A, B> {
    enable: P,
    in1: A,
    in2: B,
}

impl<P: SetDutyCycle, A: OutputPin, B: OutputPin> HBridgeMotor<P, A, B> {
    /// Create the channel with the motor parked
    pub fn new(enable: P, in1: A, in2: B) -> Self {
        let mut bridge = Self { enable, in1, in2 };
        bridge.set_motor(Direction::Clockwise, 0);
        bridge
    }
}

impl<P: SetDutyCycle, A: OutputPin, B: OutputPin> MotorOutput for HBridgeMotor<P, A, B> {
    fn set_motor(&mut self, direction: Direction, speed: u8) {
        match direction {
            Direction::Clockwise => {
                self.in1.set_high().ok();
                self.in2.set_low().ok();
            }
            Direction::CounterClockwise => {
                self.in1.set_low().ok();
                self.in2.set_high().ok();
            }
        }
        self.enable
            .set_duty_cycle_fraction(u16::from(speed), LEVEL_RANGE)
            .ok();
    }
}

/// One H-bridge channel wired to the LED
///
/// Polarity is fixed at construction (the LED only conducts one way);
/// brightness rides on the enable duty.
pub struct HBridgeLight<P, A, B> {
    enable: P,
    // Held so the latched polarity pins stay owned for the light's lifetime
    _in1: A,
    _in2: B,
}

impl<P: SetDutyCycle, A: OutputPin, B: OutputPin> HBridgeLight<P, A, B> {
    /// Create the channel dark, with the polarity pins latched
    pub fn new(enable: P, mut in1: A, mut in2: B) -> Self {
        in1.set_high().ok();
        in2.set_low().ok();
        let mut light = Self {
            enable,
            _in1: in1,
            _in2: in2,
        };
        light.set_brightness(0);
        light
    }
}

impl<P: SetDutyCycle, A: OutputPin, B: OutputPin> LightOutput for HBridgeLight<P, A, B> {
    fn set_brightness(&mut self, level: u8) {
        self.enable
            .set_duty_cycle_fraction(u16::from(level), LEVEL_RANGE)
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct FakePin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    /// Fake PWM with a 255-step duty range, so duty == level
    struct FakePwm {
        duty: u16,
    }

    impl FakePwm {
        fn new() -> Self {
            Self { duty: 0 }
        }
    }

    impl embedded_hal::pwm::ErrorType for FakePwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            255
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_motor_clockwise_polarity() {
        let mut pwm = FakePwm::new();
        let mut in1 = FakePin::default();
        let mut in2 = FakePin::default();
        {
            let mut bridge = HBridgeMotor::new(&mut pwm, &mut in1, &mut in2);
            bridge.set_motor(Direction::Clockwise, 200);
        }
        assert!(in1.high);
        assert!(!in2.high);
        assert_eq!(pwm.duty, 200);
    }

    #[test]
    fn test_motor_counter_clockwise_polarity() {
        let mut pwm = FakePwm::new();
        let mut in1 = FakePin::default();
        let mut in2 = FakePin::default();
        {
            let mut bridge = HBridgeMotor::new(&mut pwm, &mut in1, &mut in2);
            bridge.set_motor(Direction::CounterClockwise, 50);
        }
        assert!(!in1.high);
        assert!(in2.high);
        assert_eq!(pwm.duty, 50);
    }

    #[test]
    fn test_motor_starts_parked() {
        let mut pwm = FakePwm::new();
        pwm.duty = 123;
        let mut in1 = FakePin::default();
        let mut in2 = FakePin::default();
        let _bridge = HBridgeMotor::new(&mut pwm, &mut in1, &mut in2);
        assert_eq!(pwm.duty, 0);
    }

    #[test]
    fn test_light_polarity_latched_and_scaled() {
        let mut pwm = FakePwm::new();
        let mut in1 = FakePin::default();
        let mut in2 = FakePin::default();
        {
            let mut light = HBridgeLight::new(&mut pwm, &mut in1, &mut in2);
            light.set_brightness(150);
        }
        assert!(in1.high);
        assert!(!in2.high);
        assert_eq!(pwm.duty, 150);
    }

    #[test]
    fn test_light_starts_dark() {
        let mut pwm = FakePwm::new();
        pwm.duty = 60;
        let mut in1 = FakePin::default();
        let mut in2 = FakePin::default();
        let _light = HBridgeLight::new(&mut pwm, &mut in1, &mut in2);
        assert_eq!(pwm.duty, 0);
    }
}
