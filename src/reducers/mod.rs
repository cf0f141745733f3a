//! Domain reducers. Each module owns one slice of the state; the root
//! `update.rs` tries them in order and stops at the first that consumes
//! the message.

pub mod agents;
pub mod chat;
pub mod editor;
pub mod integrations;
pub mod workflows;
