//! # Task Triage
//!
//! Terminal client for a remote task prioritization service. The service
//! owns the scoring algorithm; this crate owns the round trip: validating a
//! user-supplied batch of task records, invoking the `analyze` or `suggest`
//! operation, and turning the annotated response into a classified view.
//!
//! ## Modules
//! - `input`: the raw task batch and its validation
//! - `client`: the HTTP round trip and its errors
//! - `classify`: severity buckets and display coercions
//! - `render`: the presentation model and terminal writer
//! - `session`: the interaction loop tying the above together

pub mod classify;
pub mod client;
pub mod config;
pub mod input;
pub mod render;
pub mod session;
pub mod task;

pub use client::{HttpPrioritizer, Prioritizer, Strategy};
pub use config::Config;
pub use session::Session;
