//! Commands Layer
//!
//! Command handlers that expose the repositories to callers. Every handler
//! validates its input before the first write.

mod entry_cmd;
mod template_cmd;
mod tag_cmd;

pub use entry_cmd::*;
pub use template_cmd::*;
pub use tag_cmd::*;
