use std::collections::HashMap;

use super::sender::TCommandSender;

/// Everything a handler gets to see about one invocation.
///
/// Created per dispatch and dropped once the handler returns.
#[derive(Clone)]
pub struct CommandContext {
    sender: TCommandSender,
    label: String,
    args: Vec<String>,
    flags: HashMap<String, Option<String>>,
}

impl CommandContext {
    pub fn new(
        sender: TCommandSender,
        label: impl Into<String>,
        args: Vec<String>,
        flags: HashMap<String, Option<String>>,
    ) -> Self {
        Self {
            sender,
            label: label.into(),
            args,
            flags,
        }
    }

    pub fn sender(&self) -> &TCommandSender {
        &self.sender
    }

    /// The identifier the command was invoked with, lower-cased.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Positional arguments, flags and flag values excluded.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn flags(&self) -> &HashMap<String, Option<String>> {
        &self.flags
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains_key(flag)
    }

    /// `None` both when the flag is absent and when it takes no value.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.flags.get(flag).and_then(Option::as_deref)
    }

    pub fn reply(&self, message: &str) {
        self.sender.send_message(message);
    }
}

impl std::fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("sender", &self.sender.name())
            .field("label", &self.label)
            .field("args", &self.args)
            .field("flags", &self.flags)
            .finish()
    }
}
