//! Declarative command registration and dispatch.
//!
//! Handlers describe themselves with [`command::metadata::CommandMetadata`] (usually through the
//! [`command`](macro@command) attribute), are collected into a [`command::registry::CommandRegistry`]
//! and, once built, are served by a [`command::dispatcher::Dispatcher`].

// lets `#[command]` expansions refer to `::cmdframe_core` from inside this crate too
extern crate self as cmdframe_core;

pub mod command;

pub use anyhow;
pub use async_trait::async_trait;
pub use cmdframe_proc_macro::command;
