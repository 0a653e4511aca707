pub mod cursor;
pub mod error;
pub mod event;
pub mod handler;
pub mod invocation;
pub mod precondition;

pub use cursor::{ArgCursor, Checkpoint, TokenCursor};
pub use error::{DispatchError, Identifier, MappingError};
pub use event::{EventKind, EventSink, InvocationSource, NullSink, SubcommandEvent, SubcommandPayload};
pub use handler::{structured_fn, text_fn, StructuredHandler, TextHandler};
pub use invocation::{
    InteractionRef, InvocationShape, MessageRef, RunContext, StructuredInvocation, TextInvocation,
};
pub use precondition::{Denial, GuildOnly, InvocationRef, Precondition, PreconditionSet, UserAllowList, Verdict};
