//! Shared types used across all manzar crates.

pub mod types;

pub use types::{MsgContext, ReplyPayload};
