//! Terminal output: ANSI notes, tables, and event rendering.

use switchyard_core::{EventKind, SubcommandEvent};
use switchyard_patterns::{PatternEvent, PatternEventKind};

// ---------------------------------------------------------------------------
// ANSI Color/Style helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm'
            for next in chars.by_ref() {
                if next == 'm' { break; }
            }
        } else {
            result.push(c);
        }
    }
    result
}

fn paint(color: &str, text: &str) -> String {
    if supports_color() {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}

// ---------------------------------------------------------------------------
// Formatted notes
// ---------------------------------------------------------------------------

pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

/// Render left-aligned columns with a header row and a separator.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(strip_ansi(cell).chars().count());
        }
    }

    let line = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| {
                let pad = w.saturating_sub(strip_ansi(cell).chars().count());
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect();
        format!("  {}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers.iter().map(|h| h.to_string()).collect());
    out.push_str(&line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        let cells = (0..widths.len()).map(|i| row.get(i).cloned().unwrap_or_default()).collect();
        out.push_str(&line(cells));
    }
    out
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

pub fn event_row(event: &SubcommandEvent) -> Vec<String> {
    let p = event.payload();
    let color = match event.kind() {
        EventKind::Run => CYAN,
        EventKind::Success => GREEN,
        EventKind::Denied | EventKind::HandlerMissing => YELLOW,
        EventKind::Error => RED,
    };
    let detail = match event {
        SubcommandEvent::Run(_) | SubcommandEvent::HandlerMissing(_) => String::new(),
        SubcommandEvent::Success { result, duration_ms, .. } => format!("{result} ({duration_ms:.2}ms)"),
        SubcommandEvent::Denied { denial, .. } => format!("{}: {}", denial.precondition, denial.reason),
        SubcommandEvent::Error { error, duration_ms, .. } => format!("{error:#} ({duration_ms:.2}ms)"),
    };
    let target = match &p.group {
        Some(group) => format!("{} {} {}", p.command, group, p.subcommand),
        None => format!("{} {}", p.command, p.subcommand),
    };
    vec![paint(color, event.name()), target, paint(DIM, &detail)]
}

pub fn render_events(events: &[SubcommandEvent]) -> String {
    let rows: Vec<Vec<String>> = events.iter().map(event_row).collect();
    render_table(&["EVENT", "TARGET", "DETAIL"], &rows)
}

pub fn render_pattern_events(events: &[PatternEvent]) -> String {
    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|event| {
            let detail = match event {
                PatternEvent::NoLuck { roll, .. } => format!("rolled {roll}"),
                PatternEvent::Run(_) => String::new(),
                PatternEvent::Success { result, .. } => result.to_string(),
                PatternEvent::Error { error, .. } => format!("{error:#}"),
                PatternEvent::Finished { success, duration_ms, .. } => {
                    format!("success={success} ({duration_ms:.2}ms)")
                }
            };
            let color = match event.kind() {
                PatternEventKind::Error => RED,
                PatternEventKind::NoLuck => YELLOW,
                _ => CYAN,
            };
            let p = event.payload();
            vec![paint(color, event.name()), format!("{} ({})", p.command, p.alias), detail]
        })
        .collect();
    render_table(&["EVENT", "COMMAND", "DETAIL"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_core::{InvocationSource, MessageRef, RunContext, SubcommandPayload};

    #[test]
    fn strips_ansi() {
        let colored = format!("{GREEN}hello{RESET}");
        assert_eq!(strip_ansi(&colored), "hello");
    }

    #[test]
    fn renders_table() {
        let rows = vec![
            vec!["Alice".to_string(), "42".to_string()],
            vec!["Bob".to_string()],
        ];
        let table = render_table(&["Name", "Count"], &rows);
        assert!(table.contains("Alice  42"));
        assert_eq!(table.lines().count(), 4);
    }

    #[test]
    fn event_rows_name_the_target() {
        let payload = SubcommandPayload::new(
            "config",
            "add",
            Some("roles".into()),
            InvocationSource::Message(MessageRef::default()),
            RunContext::default(),
        );
        let row = event_row(&SubcommandEvent::Run(payload));
        assert_eq!(strip_ansi(&row[0]), "message_subcommand_run");
        assert_eq!(row[1], "config roles add");
    }
}
