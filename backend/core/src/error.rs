use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::invocation::InvocationShape;

/// Stable identifiers attached to dispatch-level rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Identifier {
    MessageSubcommandNoMatch,
    ChatInputSubcommandNoMatch,
    SubcommandNotFound,
}

impl Identifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MessageSubcommandNoMatch => "message_subcommand_no_match",
            Self::ChatInputSubcommandNoMatch => "chat_input_subcommand_no_match",
            Self::SubcommandNotFound => "subcommand_not_found",
        }
    }

    /// The no-match identifier for an invocation shape.
    pub fn no_match(shape: InvocationShape) -> Self {
        match shape {
            InvocationShape::Message => Self::MessageSubcommandNoMatch,
            InvocationShape::ChatInput => Self::ChatInputSubcommandNoMatch,
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejections raised by the dispatcher itself, before or instead of running
/// a handler. Handler failures never surface here; they become error events.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("[{identifier}] no subcommand of `{command}` matched (group or name: {group_or_name:?}, name: {name:?})")]
    NoMatch {
        identifier: Identifier,
        command: String,
        group_or_name: Option<String>,
        name: Option<String>,
    },

    #[error("[{}] subcommand `{subcommand}` of `{command}` delegates to unknown command `{target}`", Identifier::SubcommandNotFound)]
    DelegateNotFound {
        command: String,
        subcommand: String,
        target: String,
    },

    #[error("[{}] command `{target}` (delegated from `{command} {subcommand}`) does not support {shape} invocations", Identifier::SubcommandNotFound)]
    DelegateUnsupported {
        command: String,
        subcommand: String,
        target: String,
        shape: InvocationShape,
    },
}

impl DispatchError {
    pub fn identifier(&self) -> Identifier {
        match self {
            Self::NoMatch { identifier, .. } => *identifier,
            Self::DelegateNotFound { .. } | Self::DelegateUnsupported { .. } => {
                Identifier::SubcommandNotFound
            }
        }
    }

    /// True for rejections aimed at the command author rather than the user.
    pub fn is_misconfiguration(&self) -> bool {
        !matches!(self, Self::NoMatch { .. })
    }
}

/// Construction-time problems with a mapping declaration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("subcommand `{entry}` references unknown {shape} method `{method}`")]
    UnknownMethod {
        entry: String,
        method: String,
        shape: InvocationShape,
    },

    #[error("subcommand `{entry}` references unknown precondition `{name}`")]
    UnknownPrecondition { entry: String, name: String },

    #[error("subcommand `{entry}` both delegates to `{target}` and declares handlers")]
    DelegateWithHandlers { entry: String, target: String },

    #[error("empty {kind} name")]
    EmptyName { kind: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_message_carries_identifier() {
        let err = DispatchError::NoMatch {
            identifier: Identifier::no_match(InvocationShape::Message),
            command: "config".into(),
            group_or_name: Some("bogus".into()),
            name: None,
        };
        assert!(err.to_string().starts_with("[message_subcommand_no_match]"));
        assert!(!err.is_misconfiguration());
    }

    #[test]
    fn delegate_errors_are_misconfiguration() {
        let err = DispatchError::DelegateNotFound {
            command: "config".into(),
            subcommand: "ban".into(),
            target: "ban".into(),
        };
        assert_eq!(err.identifier(), Identifier::SubcommandNotFound);
        assert!(err.is_misconfiguration());
    }
}
