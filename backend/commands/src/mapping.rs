/// Subcommand mapping model.
///
/// Built once when a command is constructed and read-only afterwards. The
/// declaration list is partitioned into top-level entries and groups, each
/// keeping declaration order; duplicate names and multiple defaults are
/// tolerated here and settled by scan order during resolution.
use std::collections::HashMap;
use std::sync::Arc;

use switchyard_core::{
    InvocationShape, MappingError, Precondition, PreconditionSet, StructuredHandler, TextHandler,
};

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// What an entry runs.
#[derive(Clone)]
pub enum EntryTarget {
    /// Handlers stored on the entry, one per invocation shape.
    Handlers {
        text: Option<Arc<dyn TextHandler>>,
        structured: Option<Arc<dyn StructuredHandler>>,
    },
    /// Run another registered command instead.
    Delegate { command: String },
}

/// A named leaf mapping.
#[derive(Clone)]
pub struct Entry {
    pub name: String,
    pub is_default: bool,
    pub target: EntryTarget,
    pub preconditions: PreconditionSet,
}

impl Entry {
    pub fn new(name: impl Into<String>, target: EntryTarget) -> Self {
        Self {
            name: name.into(),
            is_default: false,
            target,
            preconditions: PreconditionSet::new(),
        }
    }

    pub fn delegate(&self) -> Option<&str> {
        match &self.target {
            EntryTarget::Delegate { command } => Some(command),
            EntryTarget::Handlers { .. } => None,
        }
    }

    pub fn has_handler_for(&self, shape: InvocationShape) -> bool {
        match &self.target {
            EntryTarget::Delegate { .. } => true,
            EntryTarget::Handlers { text, structured } => match shape {
                InvocationShape::Message => text.is_some(),
                InvocationShape::ChatInput => structured.is_some(),
            },
        }
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Entry");
        s.field("name", &self.name).field("is_default", &self.is_default);
        match &self.target {
            EntryTarget::Handlers { text, structured } => s
                .field("text", &text.is_some())
                .field("structured", &structured.is_some()),
            EntryTarget::Delegate { command } => s.field("delegate", command),
        };
        s.field("preconditions", &self.preconditions).finish()
    }
}

/// A named collection of entries, one level below the command.
#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// A single declaration: either a top-level entry or a group.
#[derive(Debug, Clone)]
pub enum Mapping {
    Entry(Entry),
    Group(Group),
}

#[derive(Debug, Clone, Default)]
pub struct MappingModel {
    entries: Vec<Entry>,
    groups: Vec<Group>,
}

impl MappingModel {
    /// Partition declarations by kind, keeping declaration order.
    pub fn new(mappings: Vec<Mapping>) -> Self {
        let mut model = Self::default();
        for mapping in mappings {
            match mapping {
                Mapping::Entry(entry) => model.entries.push(entry),
                Mapping::Group(group) => model.groups.push(group),
            }
        }
        model
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.groups.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Named references
// ---------------------------------------------------------------------------

/// A handler named by method, or given directly.
pub enum HandlerRef<H: ?Sized> {
    Method(String),
    Direct(Arc<H>),
}

impl<H: ?Sized> Clone for HandlerRef<H> {
    fn clone(&self) -> Self {
        match self {
            Self::Method(name) => Self::Method(name.clone()),
            Self::Direct(handler) => Self::Direct(Arc::clone(handler)),
        }
    }
}

/// The command's methods, addressable by name from declarations.
#[derive(Clone, Default)]
pub struct MethodTable {
    text: HashMap<String, Arc<dyn TextHandler>>,
    structured: HashMap<String, Arc<dyn StructuredHandler>>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, handler: Arc<dyn TextHandler>) -> Self {
        self.text.insert(name.into(), handler);
        self
    }

    pub fn structured(mut self, name: impl Into<String>, handler: Arc<dyn StructuredHandler>) -> Self {
        self.structured.insert(name.into(), handler);
        self
    }

    pub fn get_text(&self, name: &str) -> Option<Arc<dyn TextHandler>> {
        self.text.get(name).cloned()
    }

    pub fn get_structured(&self, name: &str) -> Option<Arc<dyn StructuredHandler>> {
        self.structured.get(name).cloned()
    }
}

/// Named preconditions. Its `global()` list runs before any delegated command.
#[derive(Clone, Default)]
pub struct PreconditionStore {
    named: HashMap<String, Arc<dyn Precondition>>,
    global: PreconditionSet,
}

impl PreconditionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a precondition under its own name.
    pub fn register(mut self, precondition: Arc<dyn Precondition>) -> Self {
        self.named.insert(precondition.name().to_string(), precondition);
        self
    }

    /// Register a precondition that also runs globally for delegated commands.
    pub fn register_global(mut self, precondition: Arc<dyn Precondition>) -> Self {
        self.global.push(Arc::clone(&precondition));
        self.register(precondition)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Precondition>> {
        self.named.get(name).cloned()
    }

    pub fn global(&self) -> &PreconditionSet {
        &self.global
    }
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// Unresolved entry declaration.
#[derive(Clone)]
pub struct EntryDecl {
    pub name: String,
    pub is_default: bool,
    pub text: Option<HandlerRef<dyn TextHandler>>,
    pub structured: Option<HandlerRef<dyn StructuredHandler>>,
    pub delegate: Option<String>,
    pub preconditions: Vec<HandlerRef<dyn Precondition>>,
}

impl EntryDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_default: false,
            text: None,
            structured: None,
            delegate: None,
            preconditions: Vec::new(),
        }
    }

    pub fn default_entry(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn text_method(mut self, method: impl Into<String>) -> Self {
        self.text = Some(HandlerRef::Method(method.into()));
        self
    }

    pub fn text(mut self, handler: Arc<dyn TextHandler>) -> Self {
        self.text = Some(HandlerRef::Direct(handler));
        self
    }

    pub fn structured_method(mut self, method: impl Into<String>) -> Self {
        self.structured = Some(HandlerRef::Method(method.into()));
        self
    }

    pub fn structured(mut self, handler: Arc<dyn StructuredHandler>) -> Self {
        self.structured = Some(HandlerRef::Direct(handler));
        self
    }

    /// Delegate to a registered command of the given name.
    pub fn delegate(mut self, command: impl Into<String>) -> Self {
        self.delegate = Some(command.into());
        self
    }

    pub fn precondition_named(mut self, name: impl Into<String>) -> Self {
        self.preconditions.push(HandlerRef::Method(name.into()));
        self
    }

    pub fn precondition(mut self, precondition: Arc<dyn Precondition>) -> Self {
        self.preconditions.push(HandlerRef::Direct(precondition));
        self
    }
}

/// Unresolved mapping declaration.
#[derive(Clone)]
pub enum MappingDecl {
    Entry(EntryDecl),
    Group { name: String, entries: Vec<EntryDecl> },
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Resolves declarations against a method table and precondition store.
/// Every named reference is checked here, so a built model never needs a
/// late lookup.
#[derive(Default)]
pub struct MappingBuilder {
    methods: MethodTable,
    preconditions: PreconditionStore,
    decls: Vec<MappingDecl>,
}

impl MappingBuilder {
    pub fn new(methods: MethodTable) -> Self {
        Self {
            methods,
            ..Default::default()
        }
    }

    pub fn preconditions(mut self, store: PreconditionStore) -> Self {
        self.preconditions = store;
        self
    }

    pub fn entry(mut self, decl: EntryDecl) -> Self {
        self.decls.push(MappingDecl::Entry(decl));
        self
    }

    pub fn group(mut self, name: impl Into<String>, entries: Vec<EntryDecl>) -> Self {
        self.decls.push(MappingDecl::Group {
            name: name.into(),
            entries,
        });
        self
    }

    pub fn declarations(mut self, decls: impl IntoIterator<Item = MappingDecl>) -> Self {
        self.decls.extend(decls);
        self
    }

    pub fn build(self) -> Result<MappingModel, MappingError> {
        let mut mappings = Vec::with_capacity(self.decls.len());
        for decl in &self.decls {
            let mapping = match decl {
                MappingDecl::Entry(entry) => Mapping::Entry(self.resolve_entry(entry)?),
                MappingDecl::Group { name, entries } => {
                    if name.trim().is_empty() {
                        return Err(MappingError::EmptyName { kind: "group" });
                    }
                    let entries = entries
                        .iter()
                        .map(|e| self.resolve_entry(e))
                        .collect::<Result<Vec<_>, _>>()?;
                    Mapping::Group(Group {
                        name: name.clone(),
                        entries,
                    })
                }
            };
            mappings.push(mapping);
        }
        Ok(MappingModel::new(mappings))
    }

    fn resolve_entry(&self, decl: &EntryDecl) -> Result<Entry, MappingError> {
        if decl.name.trim().is_empty() {
            return Err(MappingError::EmptyName { kind: "subcommand" });
        }

        let target = match &decl.delegate {
            Some(target) => {
                if decl.text.is_some() || decl.structured.is_some() {
                    return Err(MappingError::DelegateWithHandlers {
                        entry: decl.name.clone(),
                        target: target.clone(),
                    });
                }
                EntryTarget::Delegate {
                    command: target.clone(),
                }
            }
            None => EntryTarget::Handlers {
                text: match &decl.text {
                    None => None,
                    Some(HandlerRef::Direct(h)) => Some(Arc::clone(h)),
                    Some(HandlerRef::Method(m)) => Some(self.methods.get_text(m).ok_or_else(|| {
                        MappingError::UnknownMethod {
                            entry: decl.name.clone(),
                            method: m.clone(),
                            shape: InvocationShape::Message,
                        }
                    })?),
                },
                structured: match &decl.structured {
                    None => None,
                    Some(HandlerRef::Direct(h)) => Some(Arc::clone(h)),
                    Some(HandlerRef::Method(m)) => {
                        Some(self.methods.get_structured(m).ok_or_else(|| {
                            MappingError::UnknownMethod {
                                entry: decl.name.clone(),
                                method: m.clone(),
                                shape: InvocationShape::ChatInput,
                            }
                        })?)
                    }
                },
            },
        };

        let preconditions = decl
            .preconditions
            .iter()
            .map(|p| match p {
                HandlerRef::Direct(p) => Ok(Arc::clone(p)),
                HandlerRef::Method(name) => {
                    self.preconditions
                        .get(name)
                        .ok_or_else(|| MappingError::UnknownPrecondition {
                            entry: decl.name.clone(),
                            name: name.clone(),
                        })
                }
            })
            .collect::<Result<PreconditionSet, _>>()?;

        Ok(Entry {
            name: decl.name.clone(),
            is_default: decl.is_default,
            target,
            preconditions,
        })
    }
}
