//! Light output trait

/// Trait for the light output the intensity scheduler writes to
///
/// The level is reapplied every tick whether or not it changed;
/// implementations must treat the write as idempotent. Levels stay
/// within the configured brightness bounds (0..=150 with the stock
/// timing tables).
pub trait LightOutput {
    /// Apply a brightness level to the light
    fn set_brightness(&mut self, level: u8);
}
