//! The command system.
//!
//! The key things that make up the command system are:
//!
//! - The [`CommandHandler`] trait: metadata for one command plus the `invoke` method that runs it.
//!
//!   Normally, you don't want or need to implement this trait manually.
//!   Just write the function and annotate it with `#[command]`, which generates a type
//!   that implements this trait (and delegates to the annotated function).
//!   See its documentation for how that works.
//!
//!   This is used as a trait object, because handlers with unrelated types are stored together
//!   in the registry.
//!
//! - [`descriptor::CommandDescriptor`]: the normalised form of a handler's metadata. It answers
//!   identifier, flag and permission lookups and builds the messages sent on rejection.
//!
//! - The registry: [`registry::CommandRegistry`] collects handlers from one or more
//!   [`HandlerSource`]s, refusing any whose identifiers collide with one already registered.
//!   Building it exports every identifier to a [`table::CommandTable`] and yields the
//!   [`dispatcher::Dispatcher`].
//!
//! - The dispatcher: [`dispatcher::Dispatcher::execute`] resolves a label, checks the sender,
//!   permissions, flags and argument count, and finally invokes the handler.

use std::sync::Arc;

use async_trait::async_trait;

pub use self::context::CommandContext;

pub mod context;
pub mod descriptor;
pub mod dispatcher;
pub mod errors;
pub mod flags;
pub mod metadata;
pub mod registry;
pub mod sender;
pub mod table;

#[cfg(test)]
pub(crate) mod test_util;

/// The parameters a handler function declares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParameterShape {
    /// No parameters. The handler is invoked without a context.
    None,
    /// A single [`CommandContext`].
    Context,
    /// Anything else, described for error reporting. Such handlers are refused at build time.
    Unsupported(String),
}

/// A command that can be executed.
///
/// You usually don't want to or need to implement this manually -- write the function that
/// handles the command and apply the `#[command]` proc macro. It will generate a struct that
/// implements this.
// This trait is used as a trait object and AFIT makes traits not object safe, so we still need
// #[async_trait] here :(
#[async_trait]
pub trait CommandHandler {
    /// The raw declarative metadata for this command.
    fn metadata(&self) -> metadata::CommandMetadata;

    fn parameter_shape(&self) -> ParameterShape;

    /// Runs the command. `ctxt` is `Some` exactly when the handler was built to receive one.
    async fn invoke(&self, ctxt: Option<CommandContext>) -> anyhow::Result<()>;
}

/// Just a type alias for a handler as a trait object with other necessary bounds.
/// See [CommandHandler] for more documentation.
pub type TCommandHandler = Arc<dyn CommandHandler + Send + Sync>;

/// Something that can list command handlers for the registry to scan.
pub trait HandlerSource {
    fn enumerate(&self) -> Vec<TCommandHandler>;
}

impl HandlerSource for [TCommandHandler] {
    fn enumerate(&self) -> Vec<TCommandHandler> {
        self.to_vec()
    }
}

impl HandlerSource for Vec<TCommandHandler> {
    fn enumerate(&self) -> Vec<TCommandHandler> {
        self.clone()
    }
}

impl<const N: usize> HandlerSource for [TCommandHandler; N] {
    fn enumerate(&self) -> Vec<TCommandHandler> {
        self.to_vec()
    }
}

/// Declares a unit type that acts as a [`HandlerSource`] for the listed `#[command]` types.
///
/// ```ignore
/// declare_commands!(pub AdminCommands => [ban_command, kick_command]);
/// registry.register(&AdminCommands);
/// ```
#[macro_export]
macro_rules! declare_commands {
    ($vis:vis $source:ident => [$($name:path),* $(,)?]) => {
        $vis struct $source;

        impl $crate::command::HandlerSource for $source {
            fn enumerate(&self) -> ::std::vec::Vec<$crate::command::TCommandHandler> {
                vec![$(::std::sync::Arc::new($name) as $crate::command::TCommandHandler),*]
            }
        }
    };
}
