//! Board-agnostic behavior core for the Wraith animatronic prop
//!
//! This crate contains all behavior logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (motor, light, randomness)
//! - Head motion scheduler (turns, double takes, circle spins)
//! - Light intensity scheduler (breathing ramps, flicker)
//! - Timing-table configuration types
//!
//! Both schedulers are polled once per tick by the host loop and write
//! their output through the traits in [`traits`]. They share no state
//! and can be ticked in any order.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod head;
pub mod light;
pub mod traits;
