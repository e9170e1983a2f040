//! Motion segments expanded from head states
//!
//! Segments are the atomic units of head motion. Each segment drives
//! the motor in one direction at one speed for a fixed number of ticks;
//! sub-phases of a state (the pause after a turn, the gap between
//! double-take legs, each spin of a cluster) are just further segments.

use heapless::Vec;

use super::HeadState;
use crate::config::HeadConfig;
use crate::traits::{Direction, RandomSource};

#[cfg(feature = "defmt")]
use defmt::Format;

/// Maximum segments a single state expands into
///
/// The longest expansions are a three-spin cluster plus its pause and a
/// double take's leg/gap/leg/pause.
pub const MAX_SEGMENTS: usize = 4;

/// A single motion segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub struct MotionSegment {
    /// Rotation direction
    pub direction: Direction,
    /// Drive speed (0 = motor off)
    pub speed: u8,
    /// Duration in ticks
    pub ticks: u16,
}

impl MotionSegment {
    /// A driven segment
    pub const fn run(direction: Direction, speed: u8, ticks: u16) -> Self {
        Self {
            direction,
            speed,
            ticks,
        }
    }

    /// A motor-off segment
    ///
    /// Keeps the previous direction on the pins so nothing flips while
    /// the motor coasts.
    pub const fn pause(direction: Direction, ticks: u16) -> Self {
        Self {
            direction,
            speed: 0,
            ticks,
        }
    }
}

/// Expand a state into its motion segments
///
/// Random draws happen here, once per state entry: the trailing pause
/// for every state, plus the spin count and cluster direction for
/// [`HeadState::SpinningInCircles`] (drawn in that order). Every spin
/// in a cluster shares the one drawn direction.
pub fn segments_for<R: RandomSource>(
    state: HeadState,
    config: &HeadConfig,
    rng: &mut R,
) -> Vec<MotionSegment, MAX_SEGMENTS> {
    let mut segments = Vec::new();

    match state {
        HeadState::SlowTurnCw | HeadState::SlowTurnCcw => {
            let dir = if state == HeadState::SlowTurnCw {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            };
            let _ = segments.push(MotionSegment::run(
                dir,
                config.slow_speed,
                config.slow_turn_ticks,
            ));
            let _ = segments.push(MotionSegment::pause(
                dir,
                config.slow_turn_pause.sample(rng),
            ));
        }
        HeadState::DoubleTakeCw | HeadState::DoubleTakeCcw => {
            let dir = if state == HeadState::DoubleTakeCw {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            };
            let _ = segments.push(MotionSegment::run(
                dir,
                config.fast_speed,
                config.fast_turn_ticks,
            ));
            let _ = segments.push(MotionSegment::pause(dir, config.fast_turn_gap_ticks));
            let _ = segments.push(MotionSegment::run(
                dir.opposite(),
                config.fast_speed,
                config.fast_turn_ticks,
            ));
            let _ = segments.push(MotionSegment::pause(
                dir.opposite(),
                config.double_take_pause.sample(rng),
            ));
        }
        HeadState::SpinningInCircles => {
            let spins = rng.uniform(1, config.max_sequential_spins);
            let dir = if rng.uniform(0, 1) == 0 {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            };
            for _ in 0..spins {
                let _ = segments.push(MotionSegment::run(
                    dir,
                    config.max_speed,
                    config.circle_spin_ticks,
                ));
            }
            let _ = segments.push(MotionSegment::pause(
                dir,
                config.circle_spin_pause.sample(rng),
            ));
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted random source: pops queued values (clamped into the
    /// requested range), then repeats the range minimum.
    struct ScriptedRandom {
        values: heapless::Deque<u16, 16>,
    }

    impl ScriptedRandom {
        fn new(values: &[u16]) -> Self {
            let mut queue = heapless::Deque::new();
            for &v in values {
                let _ = queue.push_back(v);
            }
            Self { values: queue }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn uniform(&mut self, min: u16, max: u16) -> u16 {
            match self.values.pop_front() {
                Some(v) => v.clamp(min, max),
                None => min,
            }
        }
    }

    #[test]
    fn test_slow_turn_expansion() {
        let config = HeadConfig::default();
        let mut rng = ScriptedRandom::new(&[700]);

        let segments = segments_for(HeadState::SlowTurnCw, &config, &mut rng);

        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[0],
            MotionSegment::run(Direction::Clockwise, 50, 260)
        );
        assert_eq!(segments[1], MotionSegment::pause(Direction::Clockwise, 700));
    }

    #[test]
    fn test_slow_turn_ccw_direction() {
        let config = HeadConfig::default();
        let mut rng = ScriptedRandom::new(&[400]);

        let segments = segments_for(HeadState::SlowTurnCcw, &config, &mut rng);

        assert_eq!(segments[0].direction, Direction::CounterClockwise);
        assert_eq!(segments[0].speed, config.slow_speed);
    }

    #[test]
    fn test_double_take_leg_gap_leg_pause() {
        let config = HeadConfig::default();
        let mut rng = ScriptedRandom::new(&[1500]);

        let segments = segments_for(HeadState::DoubleTakeCcw, &config, &mut rng);

        assert_eq!(segments.len(), 4);
        // First leg in the named direction, at fast speed
        assert_eq!(
            segments[0],
            MotionSegment::run(Direction::CounterClockwise, 200, 60)
        );
        // Gap with the motor off
        assert_eq!(segments[1].speed, 0);
        assert_eq!(segments[1].ticks, 30);
        // Return leg in the opposite direction
        assert_eq!(
            segments[2],
            MotionSegment::run(Direction::Clockwise, 200, 60)
        );
        // Trailing pause of the scripted duration
        assert_eq!(segments[3].speed, 0);
        assert_eq!(segments[3].ticks, 1500);
    }

    #[test]
    fn test_spin_cluster_shares_direction() {
        let config = HeadConfig::default();
        // spins = 3, direction coin = 1 (counter-clockwise), pause = 2500
        let mut rng = ScriptedRandom::new(&[3, 1, 2500]);

        let segments = segments_for(HeadState::SpinningInCircles, &config, &mut rng);

        assert_eq!(segments.len(), 4);
        for spin in &segments[..3] {
            assert_eq!(spin.direction, Direction::CounterClockwise);
            assert_eq!(spin.speed, 255);
            assert_eq!(spin.ticks, 240);
        }
        assert_eq!(segments[3].speed, 0);
        assert_eq!(segments[3].ticks, 2500);
    }

    #[test]
    fn test_single_spin_cluster() {
        let config = HeadConfig::default();
        // spins = 1, direction coin = 0 (clockwise), pause clamps to 2000
        let mut rng = ScriptedRandom::new(&[1, 0, 0]);

        let segments = segments_for(HeadState::SpinningInCircles, &config, &mut rng);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].direction, Direction::Clockwise);
        assert_eq!(segments[1].ticks, 2000);
    }

    #[test]
    fn test_pause_durations_stay_in_range() {
        let config = HeadConfig::default();
        use rand::SeedableRng;
        let mut rng = rand::rngs::SmallRng::seed_from_u64(11);

        for _ in 0..200 {
            let segments = segments_for(HeadState::SlowTurnCw, &config, &mut rng);
            let pause = segments[1].ticks;
            assert!((400..=1000).contains(&pause));
        }
    }
}
