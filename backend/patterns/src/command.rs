/// Pattern commands: triggered by words anywhere in a message rather than a
/// prefix, optionally only some of the time.
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use switchyard_core::MessageRef;

pub const DEFAULT_CHANCE: u8 = 100;

#[async_trait]
pub trait PatternCommand: Send + Sync {
    fn name(&self) -> &str;

    /// Extra trigger words. Always matched as whole words.
    fn aliases(&self) -> &[String] {
        &[]
    }

    /// Percentage (1–100) of matches that actually run the command.
    fn chance(&self) -> u8 {
        DEFAULT_CHANCE
    }

    /// When true the name must appear as a whole word ("explore" no longer
    /// triggers on "lore"). Aliases are unaffected.
    fn match_full_name(&self) -> bool {
        false
    }

    async fn message_run(&self, message: &MessageRef) -> Result<Value>;
}
