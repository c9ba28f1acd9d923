//! Decides whether an inbound message warrants a reply and produces it.
//!
//! Pipeline: trigger classification → per-user throttle → completion call.
//! Every per-message failure is converted to a user-facing phrase; nothing
//! here panics or propagates an error to the event loop.

pub mod reply;
pub mod throttle;
pub mod trigger;

pub use {
    reply::{Responder, ResponderConfig},
    throttle::{RequestThrottle, ThrottleDecision, UserRateLimit},
    trigger::{BotIdentity, Shortcut, Trigger, TriggerConfig, classify},
};
