//! Light intensity scheduling
//!
//! The prop's light is a high-power LED whose brightness breathes:
//! long static holds, linear ramps up to full glow and back down, and
//! the occasional flicker burst, spaced out by hysteresis. Ramps come
//! in a quick and a slow variant, chosen at random per cycle.

mod scheduler;

pub use scheduler::LightIntensityScheduler;

#[cfg(feature = "defmt")]
use defmt::Format;

/// Light intensity states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum LightState {
    /// Brightness held where the previous state left it
    Static,
    /// Linear ramp to full brightness, stepping every few ticks
    PanningUpQuickly,
    /// Linear ramp to full brightness, stepping less often
    PanningUpSlowly,
    /// Linear ramp down to the floor, stepping every few ticks
    PanningDownQuickly,
    /// Linear ramp down to the floor, stepping less often
    PanningDownSlowly,
    /// Random brightness redraws, rate-limited to look like a sputter
    Flickering,
}

impl LightState {
    /// Whether this state ramps toward full brightness
    pub fn is_rising(self) -> bool {
        matches!(
            self,
            LightState::PanningUpQuickly | LightState::PanningUpSlowly
        )
    }
}
