/// Pattern matching and the registry of pattern commands.
///
/// Matching is case-insensitive. A command's name matches as a substring of
/// the message unless it asks for full-name matching; aliases always match as
/// whole words. Commands are tried in registration order and the first match
/// wins.
use std::sync::Arc;

use anyhow::{Context, Result};
use regex::Regex;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::command::PatternCommand;

/// A command found in a message, with the word that triggered it.
#[derive(Clone)]
pub struct PatternMatch {
    pub command: Arc<dyn PatternCommand>,
    pub alias: String,
}

impl std::fmt::Debug for PatternMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternMatch")
            .field("command", &self.command.name())
            .field("alias", &self.alias)
            .finish()
    }
}

fn whole_word(word: &str) -> Result<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
        .with_context(|| format!("invalid pattern for '{word}'"))
}

fn substring(word: &str) -> Result<Regex> {
    Regex::new(&format!("(?i){}", regex::escape(word)))
        .with_context(|| format!("invalid pattern for '{word}'"))
}

struct CompiledPattern {
    command: Arc<dyn PatternCommand>,
    name: Regex,
    aliases: Vec<(String, Regex)>,
}

impl CompiledPattern {
    fn compile(command: Arc<dyn PatternCommand>) -> Result<Self> {
        let name = if command.match_full_name() {
            whole_word(command.name())?
        } else {
            substring(command.name())?
        };
        let aliases = command
            .aliases()
            .iter()
            .map(|a| whole_word(a).map(|re| (a.clone(), re)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { command, name, aliases })
    }

    fn find(&self, content: &str) -> Option<String> {
        if self.name.is_match(content) {
            return Some(self.command.name().to_string());
        }
        self.aliases
            .iter()
            .find(|(_, re)| re.is_match(content))
            .map(|(alias, _)| alias.clone())
    }
}

#[derive(Default, Clone)]
pub struct PatternRegistry {
    patterns: Arc<RwLock<Vec<CompiledPattern>>>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, command: Arc<dyn PatternCommand>) -> Result<()> {
        let compiled = CompiledPattern::compile(command)?;
        info!(
            "[Patterns] Registered {} ({} aliases, chance {})",
            compiled.command.name(),
            compiled.aliases.len(),
            compiled.command.chance()
        );
        self.patterns.write().await.push(compiled);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.patterns.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.patterns.read().await.is_empty()
    }

    /// First registered command whose name or alias appears in `content`.
    pub async fn find(&self, content: &str) -> Option<PatternMatch> {
        let patterns = self.patterns.read().await;
        patterns.iter().find_map(|p| {
            p.find(content).map(|alias| {
                debug!("[Patterns] '{}' matched {}", alias, p.command.name());
                PatternMatch {
                    command: Arc::clone(&p.command),
                    alias,
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use switchyard_core::MessageRef;

    struct Word {
        name: &'static str,
        aliases: Vec<String>,
        full: bool,
    }

    #[async_trait]
    impl PatternCommand for Word {
        fn name(&self) -> &str {
            self.name
        }

        fn aliases(&self) -> &[String] {
            &self.aliases
        }

        fn match_full_name(&self) -> bool {
            self.full
        }

        async fn message_run(&self, _: &MessageRef) -> Result<Value> {
            Ok(json!(self.name))
        }
    }

    fn word(name: &'static str, aliases: &[&str], full: bool) -> Arc<dyn PatternCommand> {
        Arc::new(Word {
            name,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            full,
        })
    }

    #[tokio::test]
    async fn name_matches_as_substring_by_default() {
        let registry = PatternRegistry::new();
        registry.register(word("lore", &[], false)).await.unwrap();
        let m = registry.find("let's go EXPLORE").await.unwrap();
        assert_eq!(m.alias, "lore");
    }

    #[tokio::test]
    async fn full_name_requires_whole_word() {
        let registry = PatternRegistry::new();
        registry.register(word("lore", &[], true)).await.unwrap();
        assert!(registry.find("let's go explore").await.is_none());
        assert!(registry.find("tell me some Lore!").await.is_some());
    }

    #[tokio::test]
    async fn aliases_match_whole_words_only() {
        let registry = PatternRegistry::new();
        registry.register(word("greeting", &["hi"], true)).await.unwrap();
        assert!(registry.find("this is fine").await.is_none());
        assert_eq!(registry.find("oh hi there").await.unwrap().alias, "hi");
    }

    #[tokio::test]
    async fn first_registered_wins() {
        let registry = PatternRegistry::new();
        registry.register(word("cat", &[], false)).await.unwrap();
        registry.register(word("catalog", &[], false)).await.unwrap();
        let m = registry.find("the catalog").await.unwrap();
        assert_eq!(m.command.name(), "cat");
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn names_are_escaped() {
        let registry = PatternRegistry::new();
        registry.register(word("c++", &[], false)).await.unwrap();
        assert!(registry.find("I like C++").await.is_some());
        assert!(registry.find("I like c").await.is_none());
    }
}
