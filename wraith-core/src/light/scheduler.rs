//! Light intensity scheduler
//!
//! Recomputes the brightness for the current state and tick, reapplies
//! it to the light every tick, and walks the breathing cycle
//! (hold, ramp up, hold at the peak, ramp down) with flicker bursts
//! inserted under a hysteresis gate.

use super::LightState;
use crate::config::{ConfigError, LightConfig};
use crate::traits::{LightOutput, RandomSource};

/// Brightness of a ramp at `elapsed` ticks into its state
///
/// The value only moves every `loops_per_delta` ticks and is recomputed
/// from progress rather than accumulated, so the final step lands
/// exactly on the target bound for any valid table:
/// `from + span * steps_done / steps_total`, floored.
fn ramp_level(min: u8, max: u8, rising: bool, elapsed: u16, loops_per_delta: u16, ticks: u16) -> u8 {
    let steps_total = u32::from(ticks / loops_per_delta).max(1);
    let steps_done = u32::from(elapsed / loops_per_delta).min(steps_total);
    let span = u32::from(max - min);
    let offset = (span * steps_done / steps_total) as u8;
    if rising {
        min + offset
    } else {
        max - offset
    }
}

/// Randomized scheduler for the light
///
/// Owns its light output, its random source, and all of its state; the
/// host loop just calls [`step`](Self::step) once per tick. Constructed
/// once at startup and never reset.
pub struct LightIntensityScheduler<L, R> {
    config: LightConfig,
    light: L,
    rng: R,
    /// Active state
    state: LightState,
    /// Ticks elapsed in the active state
    elapsed: u16,
    /// Brightness currently on the light
    brightness: u8,
    /// Ticks since the last flicker redraw
    ticks_since_flicker: u16,
    /// Total states completed since startup
    completed_states: u32,
    /// Completed states since the last flicker burst fired
    states_since_flicker: u16,
    /// Static states completed since the light last started rising
    static_states_since_rise: u16,
}

impl<L: LightOutput, R: RandomSource> LightIntensityScheduler<L, R> {
    /// Create a new scheduler resting at the brightness floor
    ///
    /// Fails only if the timing table is invalid; after that, stepping
    /// can never fail.
    pub fn new(config: LightConfig, light: L, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let brightness = config.min_brightness;
        Ok(Self {
            config,
            light,
            rng,
            state: LightState::Static,
            elapsed: 0,
            brightness,
            ticks_since_flicker: 0,
            completed_states: 0,
            states_since_flicker: 0,
            static_states_since_rise: 0,
        })
    }

    /// Get the active state
    pub fn state(&self) -> LightState {
        self.state
    }

    /// Get the brightness currently on the light
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Total states completed since startup
    pub fn completed_states(&self) -> u32 {
        self.completed_states
    }

    /// Completed states since the last flicker burst
    pub fn states_since_flicker(&self) -> u16 {
        self.states_since_flicker
    }

    /// Static states completed since the light last started rising
    pub fn static_states_since_rise(&self) -> u16 {
        self.static_states_since_rise
    }

    /// Get the timing table
    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    /// Advance one tick
    ///
    /// Updates the brightness for the current state, reapplies it to
    /// the light (every tick, whether or not it changed), and runs the
    /// transition policy when the state's table duration is reached.
    pub fn step(&mut self) {
        self.elapsed += 1;

        match self.state {
            LightState::Static => {}
            LightState::PanningUpQuickly => {
                self.brightness = self.ramp(true, self.config.loops_per_delta_quick);
            }
            LightState::PanningUpSlowly => {
                self.brightness = self.ramp(true, self.config.loops_per_delta_slow);
            }
            LightState::PanningDownQuickly => {
                self.brightness = self.ramp(false, self.config.loops_per_delta_quick);
            }
            LightState::PanningDownSlowly => {
                self.brightness = self.ramp(false, self.config.loops_per_delta_slow);
            }
            LightState::Flickering => {
                self.ticks_since_flicker += 1;
                if self.ticks_since_flicker >= self.config.min_loops_per_flicker {
                    self.ticks_since_flicker = 0;
                    self.brightness = self
                        .rng
                        .uniform(
                            u16::from(self.config.min_brightness),
                            u16::from(self.config.max_brightness),
                        ) as u8;
                }
            }
        }

        self.light.set_brightness(self.brightness);

        if self.elapsed >= self.config.state_ticks(self.state) {
            self.transition();
        }
    }

    fn ramp(&self, rising: bool, loops_per_delta: u16) -> u8 {
        ramp_level(
            self.config.min_brightness,
            self.config.max_brightness,
            rising,
            self.elapsed,
            loops_per_delta,
            self.config.state_ticks(self.state),
        )
    }

    /// A state just completed: update hysteresis and pick the next one
    fn transition(&mut self) {
        self.completed_states = self.completed_states.saturating_add(1);
        self.states_since_flicker = self.states_since_flicker.saturating_add(1);
        if self.state == LightState::Static {
            self.static_states_since_rise = self.static_states_since_rise.saturating_add(1);
        }

        let next = self.choose_next();
        if next == LightState::Flickering {
            self.states_since_flicker = 0;
            self.ticks_since_flicker = 0;
        } else if next.is_rising() {
            self.static_states_since_rise = 0;
        }

        self.state = next;
        self.elapsed = 0;
    }

    /// Pick the next state
    ///
    /// The flicker interruption is decided first (a coin, only when the
    /// flicker gate is open); otherwise ramps and flicker fall back to
    /// a hold, and a completed hold starts the next ramp: down from the
    /// peak, up from anywhere else once the rise gate is open, with the
    /// quick/slow variant chosen by a second coin.
    fn choose_next(&mut self) -> LightState {
        if self.states_since_flicker >= self.config.min_states_before_flicker
            && self.rng.uniform(0, 1) == 1
        {
            return LightState::Flickering;
        }

        match self.state {
            LightState::Static => {
                if self.brightness >= self.config.max_brightness {
                    if self.rng.uniform(0, 1) == 0 {
                        LightState::PanningDownQuickly
                    } else {
                        LightState::PanningDownSlowly
                    }
                } else if self.static_states_since_rise >= self.config.min_static_states_before_rise
                {
                    if self.rng.uniform(0, 1) == 0 {
                        LightState::PanningUpQuickly
                    } else {
                        LightState::PanningUpSlowly
                    }
                } else {
                    // Rise gate still closed: keep holding
                    LightState::Static
                }
            }
            LightState::PanningUpQuickly
            | LightState::PanningUpSlowly
            | LightState::PanningDownQuickly
            | LightState::PanningDownSlowly
            | LightState::Flickering => LightState::Static,
        }
    }
}
