//! Wraith - Animatronic Prop Firmware
//!
//! Main firmware binary for RP2040-based prop controllers. The prop is
//! a motorized head and a pulsing light, each animated by its own
//! randomized scheduler, plus a fixed-duty cooling fan.
//!
//! Both animated outputs run through one dual-channel H-bridge: connect
//! (PIN_0, PIN_2, PIN_3) to (ENA, IN1, IN2) and the bridge's OUT1/OUT2
//! to the head motor; connect (PIN_1, PIN_4, PIN_5) to (ENB, IN3, IN4)
//! and OUT3/OUT4 to the LED. The fan's control wire goes on PIN_6.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use {defmt_rtt as _, panic_probe as _};

mod tasks;

use tasks::{fan_task, head_task, light_task};

/// PWM wrap for the H-bridge enable channels (about 1.9 kHz at 125 MHz)
const BRIDGE_PWM_TOP: u16 = 0xFFFF;

/// PWM wrap for the fan control wire (25 kHz, above audible range)
const FAN_PWM_TOP: u16 = 4999;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Wraith firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // The H-bridge enable pins share PWM slice 0: channel A drives the
    // head motor (ENA), channel B the light (ENB)
    let mut bridge_config = PwmConfig::default();
    bridge_config.top = BRIDGE_PWM_TOP;
    let bridge_pwm = Pwm::new_output_ab(p.PWM_SLICE0, p.PIN_0, p.PIN_1, bridge_config);
    let (head_enable, light_enable) = bridge_pwm.split();
    let head_enable = unwrap!(head_enable);
    let light_enable = unwrap!(light_enable);

    // H-bridge direction inputs
    let head_in1 = Output::new(p.PIN_2, Level::Low);
    let head_in2 = Output::new(p.PIN_3, Level::Low);
    let light_in1 = Output::new(p.PIN_4, Level::Low);
    let light_in2 = Output::new(p.PIN_5, Level::Low);

    // Fan control wire on its own slice
    let mut fan_config = PwmConfig::default();
    fan_config.top = FAN_PWM_TOP;
    let fan_pwm = Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, fan_config);
    let (fan_enable, _) = fan_pwm.split();
    let fan_enable = unwrap!(fan_enable);

    unwrap!(spawner.spawn(head_task(head_enable, head_in1, head_in2)));
    unwrap!(spawner.spawn(light_task(light_enable, light_in1, light_in2)));
    unwrap!(spawner.spawn(fan_task(fan_enable)));

    info!("All prop tasks running");
}
