//! Chance rolls for pattern commands.
use rand::Rng;

/// Produces a roll in `1..=100`.
pub trait Dice: Send + Sync {
    fn roll(&self) -> u8;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngDice;

impl Dice for ThreadRngDice {
    fn roll(&self) -> u8 {
        rand::thread_rng().gen_range(1..=100)
    }
}

/// Always rolls the same value. Out-of-range values are clamped.
#[derive(Debug, Clone, Copy)]
pub struct FixedDice(pub u8);

impl Dice for FixedDice {
    fn roll(&self) -> u8 {
        self.0.clamp(1, 100)
    }
}
