//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the output traits
//! defined in wraith-core, written against the `embedded-hal` 1.0
//! traits so any board with PWM and GPIO can host the prop:
//!
//! - H-bridge motor channel (head motor)
//! - H-bridge light channel (high-power LED, fixed polarity)
//! - Cooling fan (fixed duty, no state machine)

#![no_std]
#![deny(unsafe_code)]

pub mod fan;
pub mod hbridge;

pub use fan::{Fan, FAN_DUTY};
pub use hbridge::{HBridgeLight, HBridgeMotor};
