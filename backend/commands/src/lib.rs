pub mod command;
pub mod detection;
pub mod dispatch;
pub mod mapping;
pub mod registry;
pub mod resolver;

pub use command::{DelegatedOutcome, SubcommandCommand};
pub use detection::{detect_invocation, parameters_after_command, DetectedInvocation};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use mapping::{
    Entry, EntryDecl, EntryTarget, Group, HandlerRef, Mapping, MappingBuilder, MappingDecl,
    MappingModel, MethodTable, PreconditionStore,
};
pub use registry::{CommandRegistry, RegisteredCommand};
pub use resolver::{resolve_structured, resolve_text, Resolved, TextResolution};
