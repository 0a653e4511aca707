/// Subcommand resolution for both invocation shapes.
///
/// Text resolution peeks at up to two tokens (group-or-name, then name),
/// scans the model, and always rewinds the cursor before returning. The
/// caller decides whether to commit by consuming `consumed` tokens.
use tracing::debug;

use switchyard_core::TokenCursor;

use crate::mapping::{Entry, MappingModel};

/// An entry picked by resolution, with the group it was found in.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub entry: &'a Entry,
    pub group: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub enum TextResolution<'a> {
    /// A token named the entry. `consumed` is 1 (top level) or 2 (group).
    Matched { resolved: Resolved<'a>, consumed: usize },
    /// Nothing matched; a default entry applies. `consumed` counts the peeked
    /// tokens that existed.
    Default { resolved: Resolved<'a>, consumed: usize },
    /// Nothing matched and no default applies.
    NoMatch {
        group_or_name: Option<String>,
        name: Option<String>,
    },
}

impl<'a> TextResolution<'a> {
    pub fn resolved(&self) -> Option<Resolved<'a>> {
        match self {
            Self::Matched { resolved, .. } | Self::Default { resolved, .. } => Some(*resolved),
            Self::NoMatch { .. } => None,
        }
    }

    /// Tokens to consume when committing this resolution.
    pub fn consumed(&self) -> usize {
        match self {
            Self::Matched { consumed, .. } | Self::Default { consumed, .. } => *consumed,
            Self::NoMatch { .. } => 0,
        }
    }
}

/// Outcome of scanning one scope for a name.
struct ScopeScan<'a> {
    matched: Option<&'a Entry>,
    /// Last default seen before the scan stopped.
    default: Option<&'a Entry>,
}

/// Linear scan: the last default wins, the first name match stops the scan.
fn scan_scope<'a>(entries: &'a [Entry], name: Option<&str>) -> ScopeScan<'a> {
    let mut default = None;
    for entry in entries {
        if entry.is_default {
            default = Some(entry);
        }
        if name == Some(entry.name.as_str()) {
            return ScopeScan {
                matched: Some(entry),
                default,
            };
        }
    }
    ScopeScan {
        matched: None,
        default,
    }
}

/// Resolve a text invocation. The cursor is left where it started.
pub fn resolve_text<'a, C>(model: &'a MappingModel, cursor: &mut C) -> TextResolution<'a>
where
    C: TokenCursor + ?Sized,
{
    let checkpoint = cursor.checkpoint();
    let group_or_name = cursor.consume_next();
    let name = cursor.consume_next();
    cursor.rewind(checkpoint);

    debug!(
        "[Resolver] text tokens group_or_name={:?} name={:?}",
        group_or_name, name
    );

    let top = scan_scope(model.entries(), group_or_name.as_deref());
    if let Some(entry) = top.matched {
        return TextResolution::Matched {
            resolved: Resolved { entry, group: None },
            consumed: 1,
        };
    }

    let mut default = top.default.map(|entry| Resolved { entry, group: None });

    if name.is_some() {
        for group in model.groups() {
            if group_or_name.as_deref() != Some(group.name.as_str()) {
                continue;
            }
            let scan = scan_scope(&group.entries, name.as_deref());
            if let Some(entry) = scan.matched {
                return TextResolution::Matched {
                    resolved: Resolved {
                        entry,
                        group: Some(&group.name),
                    },
                    consumed: 2,
                };
            }
            if let Some(entry) = scan.default {
                default = Some(Resolved {
                    entry,
                    group: Some(&group.name),
                });
            }
        }
    }

    match default {
        Some(resolved) => {
            let consumed = usize::from(group_or_name.is_some()) + usize::from(name.is_some());
            TextResolution::Default { resolved, consumed }
        }
        None => TextResolution::NoMatch {
            group_or_name,
            name,
        },
    }
}

/// Resolve a structured invocation. Defaults never apply, and a group name
/// without a subcommand name never matches.
pub fn resolve_structured<'a>(
    model: &'a MappingModel,
    subcommand: Option<&str>,
    group: Option<&str>,
) -> Option<Resolved<'a>> {
    let subcommand = subcommand?;

    match group {
        Some(group_name) => model
            .groups()
            .iter()
            .filter(|g| g.name == group_name)
            .find_map(|g| {
                g.entries
                    .iter()
                    .find(|e| e.name == subcommand)
                    .map(|entry| Resolved {
                        entry,
                        group: Some(&g.name),
                    })
            }),
        None => model
            .entries()
            .iter()
            .find(|e| e.name == subcommand)
            .map(|entry| Resolved { entry, group: None }),
    }
}
