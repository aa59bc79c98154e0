//! # Mindweave Editor
//!
//! Command-based editing core for mindweave documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ caller (UI, scripting, tests)               │
//! └─────────────────────────────────────────────┘
//!                     ↓ intents
//! ┌─────────────────────────────────────────────┐
//! │ ActionDispatcher: validate + build Command  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ ActionRunner: execute through UndoManager,  │
//! │ then fire re-layout + change notifications  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ Command::execute(CommandContext)            │
//! │  - mutates the Mindmap document             │
//! │  - drives the RenderBridge                  │
//! │  - records its own undo state               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Everything reversible**: every mutation is a Command with a
//!    forward and an inverse application
//! 2. **One seam**: all mutations funnel through the dispatcher; nothing
//!    else touches the document
//! 3. **Linear history**: two stacks, strict LIFO, new edits invalidate
//!    the redo branch
//! 4. **Fail fast**: a command that cannot resolve its targets propagates
//!    the failure; a recorded-but-inconsistent command is worse than a
//!    visible error
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mindweave_editor::{EditSession, NullRenderBridge};
//! use mindweave_model::Mindmap;
//!
//! let (map, root) = Mindmap::with_central_topic("Plan")?;
//! let mut session = EditSession::new(map, Box::new(NullRenderBridge));
//!
//! let child = session.dispatcher().add_topic_under("First idea", root)?;
//! session.dispatcher().change_font_color(vec![child], Some("#c33".into()))?;
//! session.dispatcher().undo()?;
//! ```

mod command;
mod commands;
mod context;
mod dispatcher;
mod errors;
mod layout;
mod runner;
mod session;
mod undo_manager;

pub use command::{Command, CommandId, CommandIdGenerator, CommandKind, CommandState};
pub use commands::FieldValue;
pub use context::{
    CommandContext, NullRenderBridge, RecordingRenderBridge, RenderBridge, RenderEvent,
};
pub use dispatcher::ActionDispatcher;
pub use errors::EditorError;
pub use layout::{LayoutEngine, Placement};
pub use runner::{ActionRunner, ChangeEvent, EditorListener};
pub use session::EditSession;
pub use undo_manager::UndoManager;

// Re-export common model types for convenience
pub use mindweave_model::{ErrorKind, Mindmap, Point, TopicId, TopicModel};
