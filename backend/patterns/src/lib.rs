pub mod command;
pub mod dice;
pub mod event;
pub mod matcher;
pub mod runner;

pub use command::{PatternCommand, DEFAULT_CHANCE};
pub use dice::{Dice, FixedDice, ThreadRngDice};
pub use event::{PatternEvent, PatternEventKind, PatternPayload};
pub use matcher::{PatternMatch, PatternRegistry};
pub use runner::{PatternOutcome, PatternRunner};
