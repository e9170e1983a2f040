//! Head motion scheduler
//!
//! Plays the current state's motion segments tick by tick, reapplies
//! the active command to the motor every tick, and picks the next state
//! when the last segment completes. Double takes and circle spins are
//! gated by hysteresis counters so they stay rare.

use heapless::Vec;

use super::segment::{segments_for, MotionSegment, MAX_SEGMENTS};
use super::HeadState;
use crate::config::{ConfigError, HeadConfig};
use crate::traits::{MotorCommand, MotorOutput, RandomSource};

/// Randomized scheduler for the head motor
///
/// Owns its motor output, its random source, and all of its state; the
/// host loop just calls [`step`](Self::step) once per tick. Constructed
/// once at startup and never reset.
pub struct HeadMotionScheduler<M, R> {
    config: HeadConfig,
    motor: M,
    rng: R,
    /// Active state
    state: HeadState,
    /// Segments for the active state
    segments: Vec<MotionSegment, MAX_SEGMENTS>,
    /// Index of the segment currently playing
    segment_index: u8,
    /// Ticks elapsed in the current segment
    segment_elapsed: u16,
    /// Total states completed since startup
    completed_states: u32,
    /// Completed states since the last double take fired
    states_since_double_take: u16,
    /// Completed states since the last spin cluster fired
    states_since_circle_spin: u16,
}

impl<M: MotorOutput, R: RandomSource> HeadMotionScheduler<M, R> {
    /// Create a new scheduler starting in a slow clockwise turn
    ///
    /// Fails only if the timing table is invalid; after that, stepping
    /// can never fail.
    pub fn new(config: HeadConfig, motor: M, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = HeadState::SlowTurnCw;
        let segments = segments_for(state, &config, &mut rng);
        Ok(Self {
            config,
            motor,
            rng,
            state,
            segments,
            segment_index: 0,
            segment_elapsed: 0,
            completed_states: 0,
            states_since_double_take: 0,
            states_since_circle_spin: 0,
        })
    }

    /// Get the active state
    pub fn state(&self) -> HeadState {
        self.state
    }

    /// Get the command the active segment is applying
    pub fn current_command(&self) -> MotorCommand {
        match self.segments.get(self.segment_index as usize) {
            Some(seg) => MotorCommand::running(seg.direction, seg.speed),
            // Unreachable: every state expands to at least one segment
            None => MotorCommand::stopped(),
        }
    }

    /// Total states completed since startup
    pub fn completed_states(&self) -> u32 {
        self.completed_states
    }

    /// Completed states since the last double take
    pub fn states_since_double_take(&self) -> u16 {
        self.states_since_double_take
    }

    /// Completed states since the last spin cluster
    pub fn states_since_circle_spin(&self) -> u16 {
        self.states_since_circle_spin
    }

    /// Get the timing table
    pub fn config(&self) -> &HeadConfig {
        &self.config
    }

    /// Advance one tick
    ///
    /// Applies the active segment's command to the motor (every tick,
    /// whether or not it changed), then advances the segment and state
    /// bookkeeping once the segment's duration is reached.
    pub fn step(&mut self) {
        self.segment_elapsed += 1;

        let cmd = self.current_command();
        self.motor.set_motor(cmd.direction, cmd.speed);

        let segment_done = match self.segments.get(self.segment_index as usize) {
            Some(seg) => self.segment_elapsed >= seg.ticks,
            None => true,
        };
        if segment_done {
            self.advance_segment();
        }
    }

    /// Move to the next segment, or to the next state after the last one
    fn advance_segment(&mut self) {
        self.segment_elapsed = 0;
        self.segment_index += 1;
        if self.segment_index as usize >= self.segments.len() {
            self.transition();
        }
    }

    /// A state just completed: update hysteresis and pick the next one
    fn transition(&mut self) {
        self.completed_states = self.completed_states.saturating_add(1);
        self.states_since_double_take = self.states_since_double_take.saturating_add(1);
        self.states_since_circle_spin = self.states_since_circle_spin.saturating_add(1);

        let next = self.choose_next();
        match next {
            HeadState::DoubleTakeCw | HeadState::DoubleTakeCcw => {
                self.states_since_double_take = 0;
            }
            HeadState::SpinningInCircles => {
                self.states_since_circle_spin = 0;
            }
            HeadState::SlowTurnCw | HeadState::SlowTurnCcw => {}
        }

        self.state = next;
        self.segment_index = 0;
        self.segment_elapsed = 0;
        self.segments = segments_for(next, &self.config, &mut self.rng);
    }

    /// Pick the next state uniformly from the eligible candidates
    ///
    /// Slow turns are always eligible; the gated states join the list
    /// once their hysteresis counter reaches its threshold.
    fn choose_next(&mut self) -> HeadState {
        let mut candidates: Vec<HeadState, 5> = Vec::new();
        let _ = candidates.push(HeadState::SlowTurnCw);
        let _ = candidates.push(HeadState::SlowTurnCcw);
        if self.states_since_double_take >= self.config.min_states_before_double_take {
            let _ = candidates.push(HeadState::DoubleTakeCw);
            let _ = candidates.push(HeadState::DoubleTakeCcw);
        }
        if self.states_since_circle_spin >= self.config.min_states_before_circle_spin {
            let _ = candidates.push(HeadState::SpinningInCircles);
        }

        let index = self.rng.uniform(0, candidates.len() as u16 - 1);
        candidates
            .get(index as usize)
            .copied()
            .unwrap_or(HeadState::SlowTurnCw)
    }
}
