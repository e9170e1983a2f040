//! Timing-table configuration types
//!
//! Every speed, duration, and hysteresis threshold the schedulers use
//! lives in one of these immutable structs, passed in at construction.
//! The `Default` impls carry the tuned production values; tests pass
//! compressed tables to get dense transitions.
//!
//! The tuned motion durations are empirical - they depend on the
//! motor's orientation and load - and are not derived from the speeds.

use crate::light::LightState;

#[cfg(feature = "defmt")]
use defmt::Format;

/// Errors detected when validating a timing table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum ConfigError {
    /// A random range has min > max
    InvertedRange,
    /// A state or segment duration is zero
    ZeroDuration,
    /// A ramp or flicker pacing divisor is zero
    ZeroPacing,
    /// Inverted brightness bounds (min > max)
    InvertedBrightness,
    /// A spin cluster must allow at least one spin
    ZeroSpinCount,
    /// A spin cluster and its pause must fit the segment list
    SpinClusterTooLong,
}

/// An inclusive range of tick counts to draw a random duration from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub struct TickRange {
    /// Smallest duration the range can produce
    pub min: u16,
    /// Largest duration the range can produce
    pub max: u16,
}

impl TickRange {
    /// Create a new range
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// Draw a duration from the range
    pub fn sample<R: crate::traits::RandomSource>(&self, rng: &mut R) -> u16 {
        rng.uniform(self.min, self.max)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange);
        }
        if self.max == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}

/// Head motion timing table
///
/// Speeds are raw PWM levels (0..=255). Durations are tick counts; the
/// tick period itself is the host loop's concern.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub struct HeadConfig {
    /// Drive level for slow turns
    pub slow_speed: u8,
    /// Drive level for double-take legs
    pub fast_speed: u8,
    /// Drive level for circle spins
    pub max_speed: u8,
    /// Ticks of driving that produce roughly a 135 degree slow turn
    pub slow_turn_ticks: u16,
    /// Pause after a slow turn
    pub slow_turn_pause: TickRange,
    /// Ticks of driving that produce roughly a 45 degree fast leg
    pub fast_turn_ticks: u16,
    /// Motor-off gap between the two legs of a double take
    pub fast_turn_gap_ticks: u16,
    /// Pause after a double take
    pub double_take_pause: TickRange,
    /// Ticks of driving that produce one full circle spin
    pub circle_spin_ticks: u16,
    /// Most spins a single cluster may chain (at least 1)
    pub max_sequential_spins: u16,
    /// Pause after a spin cluster
    pub circle_spin_pause: TickRange,
    /// Completed states required between double takes
    pub min_states_before_double_take: u16,
    /// Completed states required between spin clusters
    pub min_states_before_circle_spin: u16,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            slow_speed: 50,
            fast_speed: 200,
            max_speed: 255,
            slow_turn_ticks: 260,
            slow_turn_pause: TickRange::new(400, 1000),
            fast_turn_ticks: 60,
            fast_turn_gap_ticks: 30,
            double_take_pause: TickRange::new(1300, 2000),
            circle_spin_ticks: 240,
            max_sequential_spins: 3,
            circle_spin_pause: TickRange::new(2000, 3000),
            min_states_before_double_take: 5,
            min_states_before_circle_spin: 10,
        }
    }
}

impl HeadConfig {
    /// Check the table for impossible values
    ///
    /// After this passes, the scheduler can never fail at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.slow_turn_pause.validate()?;
        self.double_take_pause.validate()?;
        self.circle_spin_pause.validate()?;
        if self.slow_turn_ticks == 0
            || self.fast_turn_ticks == 0
            || self.fast_turn_gap_ticks == 0
            || self.circle_spin_ticks == 0
        {
            return Err(ConfigError::ZeroDuration);
        }
        if self.max_sequential_spins == 0 {
            return Err(ConfigError::ZeroSpinCount);
        }
        if self.max_sequential_spins as usize + 1 > crate::head::MAX_SEGMENTS {
            return Err(ConfigError::SpinClusterTooLong);
        }
        Ok(())
    }
}

/// Light intensity timing table
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub struct LightConfig {
    /// Lowest brightness level the light ever shows
    pub min_brightness: u8,
    /// Highest brightness level the light ever shows
    pub max_brightness: u8,
    /// Duration of a Static hold
    pub static_ticks: u16,
    /// Duration of a quick ramp (up or down)
    pub pan_quick_ticks: u16,
    /// Duration of a slow ramp (up or down)
    pub pan_slow_ticks: u16,
    /// Duration of a flicker burst
    pub flicker_ticks: u16,
    /// Ticks between brightness steps on a quick ramp
    pub loops_per_delta_quick: u16,
    /// Ticks between brightness steps on a slow ramp
    pub loops_per_delta_slow: u16,
    /// Minimum ticks between flicker redraws
    pub min_loops_per_flicker: u16,
    /// Completed states required between flicker bursts
    pub min_states_before_flicker: u16,
    /// Static states that must complete before the light may rise again
    pub min_static_states_before_rise: u16,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            min_brightness: 0,
            max_brightness: 150,
            static_ticks: 1000,
            pan_quick_ticks: 600,
            pan_slow_ticks: 1200,
            flicker_ticks: 600,
            loops_per_delta_quick: 2,
            loops_per_delta_slow: 6,
            min_loops_per_flicker: 16,
            min_states_before_flicker: 5,
            min_static_states_before_rise: 1,
        }
    }
}

impl LightConfig {
    /// Check the table for impossible values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_brightness > self.max_brightness {
            return Err(ConfigError::InvertedBrightness);
        }
        if self.static_ticks == 0
            || self.pan_quick_ticks == 0
            || self.pan_slow_ticks == 0
            || self.flicker_ticks == 0
        {
            return Err(ConfigError::ZeroDuration);
        }
        if self.loops_per_delta_quick == 0
            || self.loops_per_delta_slow == 0
            || self.min_loops_per_flicker == 0
        {
            return Err(ConfigError::ZeroPacing);
        }
        // A ramp needs at least one brightness step
        if self.loops_per_delta_quick > self.pan_quick_ticks
            || self.loops_per_delta_slow > self.pan_slow_ticks
        {
            return Err(ConfigError::ZeroPacing);
        }
        Ok(())
    }

    /// Duration of one state, in ticks
    ///
    /// Exhaustive by state tag; every variant has exactly one entry.
    pub fn state_ticks(&self, state: LightState) -> u16 {
        match state {
            LightState::Static => self.static_ticks,
            LightState::PanningUpQuickly => self.pan_quick_ticks,
            LightState::PanningUpSlowly => self.pan_slow_ticks,
            LightState::PanningDownQuickly => self.pan_quick_ticks,
            LightState::PanningDownSlowly => self.pan_slow_ticks,
            LightState::Flickering => self.flicker_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_valid() {
        assert_eq!(HeadConfig::default().validate(), Ok(()));
        assert_eq!(LightConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_inverted_pause_range_rejected() {
        let config = HeadConfig {
            slow_turn_pause: TickRange::new(1000, 400),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvertedRange));
    }

    #[test]
    fn test_zero_motion_duration_rejected() {
        let config = HeadConfig {
            circle_spin_ticks: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));
    }

    #[test]
    fn test_zero_spin_count_rejected() {
        let config = HeadConfig {
            max_sequential_spins: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpinCount));
    }

    #[test]
    fn test_oversized_spin_cluster_rejected() {
        let config = HeadConfig {
            max_sequential_spins: 4,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SpinClusterTooLong));
    }

    #[test]
    fn test_inverted_brightness_rejected() {
        let config = LightConfig {
            min_brightness: 151,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvertedBrightness));
    }

    #[test]
    fn test_zero_pacing_rejected() {
        let config = LightConfig {
            loops_per_delta_quick: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPacing));
    }

    #[test]
    fn test_pacing_longer_than_ramp_rejected() {
        let config = LightConfig {
            pan_quick_ticks: 10,
            loops_per_delta_quick: 11,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPacing));
    }

    #[test]
    fn test_state_duration_table() {
        let config = LightConfig::default();
        assert_eq!(config.state_ticks(LightState::Static), 1000);
        assert_eq!(config.state_ticks(LightState::PanningUpQuickly), 600);
        assert_eq!(config.state_ticks(LightState::PanningUpSlowly), 1200);
        assert_eq!(config.state_ticks(LightState::PanningDownQuickly), 600);
        assert_eq!(config.state_ticks(LightState::PanningDownSlowly), 1200);
        assert_eq!(config.state_ticks(LightState::Flickering), 600);
    }
}
