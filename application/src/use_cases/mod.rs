//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod conversation_session;
pub mod dispatch_loop;
pub mod handle_intent;
pub mod shared;
mod tool_helpers;
