use std::any::Any;
use std::panic::AssertUnwindSafe;

use cmdframe_common::err;
use futures_util::FutureExt;
use tracing::debug;

use super::descriptor::CommandDescriptor;
use super::errors::{ExecutionError, RegistrationError, UsageError};
use super::flags::{SplitArgs, split_flags};
use super::registry::RegisteredCommand;
use super::sender::{CommandSender, TCommandSender};
use super::CommandContext;

/// What became of one call to [`Dispatcher::execute`].
///
/// All reporting has already happened by the time this is returned; it exists so callers can
/// observe the result.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// No registered command answers to the label.
    Unknown,
    /// The sender's input was refused and the sender was told why.
    Rejected(UsageError),
    /// The handler ran and returned successfully.
    Completed,
    /// The handler failed or panicked. The fault was logged.
    Faulted(ExecutionError),
}

impl DispatchOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Routes incoming commands to their handlers. Obtained from
/// [`CommandRegistry::build`](super::registry::CommandRegistry::build) and read-only from then on.
pub struct Dispatcher {
    namespace: String,
    commands: Vec<RegisteredCommand>,
    skipped: Vec<RegistrationError>,
}

impl Dispatcher {
    pub(crate) fn new(namespace: String, commands: Vec<RegisteredCommand>, skipped: Vec<RegistrationError>) -> Self {
        Self {
            namespace,
            commands,
            skipped,
        }
    }

    /// Executes the command identified by `label` on behalf of `sender`.
    ///
    /// Checks run in order and stop at the first failure: sender kind, permission, flag
    /// syntax, argument count. Refusals are sent to the sender. Failures inside the handler,
    /// panics included, are logged and never propagate.
    pub async fn execute(&self, sender: TCommandSender, label: &str, raw_args: &[String]) -> DispatchOutcome {
        let label = label.to_lowercase();
        let Some(command) = self.find(&label) else {
            return DispatchOutcome::Unknown;
        };

        let descriptor = &command.descriptor;

        let result = match check(descriptor, &*sender, raw_args) {
            Ok(split) => invoke(command, sender.clone(), &label, split).await,
            Err(usage) => Err(ExecutionError::Usage(usage)),
        };

        let Err(err) = result else {
            return DispatchOutcome::Completed;
        };

        match err {
            ExecutionError::Usage(usage) => {
                debug!(
                    "refused '{}' from {} ({}): {usage}",
                    descriptor.name(),
                    sender.name(),
                    sender.kind()
                );

                for line in descriptor.rejection_messages(&usage) {
                    sender.send_message(&line);
                }
                DispatchOutcome::Rejected(usage)
            },
            fault => {
                err!(
                    "command '{}' invoked by {} as '{label}' failed: {fault}",
                    descriptor.name(),
                    sender.name()
                );
                DispatchOutcome::Faulted(fault)
            },
        }
    }

    /// The first command whose identifiers contain `label`, compared after lower-casing.
    pub fn find(&self, label: &str) -> Option<&RegisteredCommand> {
        let label = label.to_lowercase();
        self.commands.iter().find(|c| c.descriptor.identify(&label))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter().map(|c| &c.descriptor)
    }

    pub fn commands(&self) -> &[RegisteredCommand] {
        &self.commands
    }

    /// Handlers refused during registration and build.
    pub fn skipped(&self) -> &[RegistrationError] {
        &self.skipped
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// Operators and trusted console kinds may run anything. Anyone else needs one of the
/// command's permissions, unless it declares none.
pub fn is_permitted(descriptor: &CommandDescriptor, sender: &dyn CommandSender) -> bool {
    sender.is_operator()
        || sender.is_trusted_console()
        || descriptor.permissions().is_empty()
        || sender
            .effective_permissions()
            .iter()
            .any(|permission| descriptor.has_permission(permission))
}

/// The validation chain run before a handler is invoked.
fn check(descriptor: &CommandDescriptor, sender: &dyn CommandSender, raw_args: &[String]) -> Result<SplitArgs, UsageError> {
    if descriptor.is_player_only() && !sender.is_interactive() {
        return Err(UsageError::PlayerOnly);
    }

    if !is_permitted(descriptor, sender) {
        return Err(UsageError::NoPermission);
    }

    // flags are checked first so a malformed flag is reported even if the count would be fine
    let split = split_flags(descriptor, raw_args)?;
    descriptor.check_arg_count(split.args.len())?;

    Ok(split)
}

async fn invoke(
    command: &RegisteredCommand,
    sender: TCommandSender,
    label: &str,
    split: SplitArgs,
) -> Result<(), ExecutionError> {
    let ctxt = command
        .descriptor
        .sends_context()
        .then(|| CommandContext::new(sender, label, split.args, split.flags));

    match AssertUnwindSafe(command.handler.invoke(ctxt)).catch_unwind().await {
        Ok(result) => result.map_err(ExecutionError::Command),
        Err(payload) => Err(ExecutionError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
