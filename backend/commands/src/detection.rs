/// Prefix detection: split a raw message into a command name and the
/// argument cursor that follows it.
use switchyard_core::ArgCursor;

/// A prefixed command found at the start of a message.
#[derive(Debug, Clone)]
pub struct DetectedInvocation {
    pub command_name: String,
    /// Tokens after the command name.
    pub args: ArgCursor,
    /// Text after the command name, trimmed.
    pub raw_args: String,
}

/// Detect `<prefix><command> [args...]`. Returns `None` for ordinary messages
/// and for a bare prefix.
pub fn detect_invocation(content: &str, prefix: &str) -> Option<DetectedInvocation> {
    let trimmed = content.trim_start();
    let body = trimmed.strip_prefix(prefix)?;
    if body.is_empty() || body.starts_with(char::is_whitespace) {
        return None;
    }

    let (name, rest) = body
        .split_once(char::is_whitespace)
        .map(|(n, r)| (n, r.trim()))
        .unwrap_or((body, ""));

    Some(DetectedInvocation {
        command_name: name.to_string(),
        args: ArgCursor::parse(rest),
        raw_args: rest.to_string(),
    })
}

/// Text after the command name with the prefix stripped; empty when there is
/// none.
pub fn parameters_after_command(content: &str, prefix: &str) -> String {
    let trimmed = content.trim();
    let prefix_less = trimmed.strip_prefix(prefix).unwrap_or(trimmed).trim();
    match prefix_less.split_once(char::is_whitespace) {
        Some((_, rest)) => rest.trim().to_string(),
        None => String::new(),
    }
}
