use std::fmt::Display;
use std::sync::Arc;

/// Who issued a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SenderKind {
    /// An interactive player session.
    Player,
    /// The local server console.
    Console,
    /// A remote console connection.
    RemoteConsole,
    /// An automated, block-triggered sender.
    Block,
}

impl SenderKind {
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Player)
    }

    /// Trusted console kinds bypass permission checks.
    pub fn is_trusted_console(&self) -> bool {
        matches!(self, Self::Console | Self::RemoteConsole | Self::Block)
    }
}

impl Display for SenderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Player => "player",
                Self::Console => "console",
                Self::RemoteConsole => "remote console",
                Self::Block => "block",
            }
        )
    }
}

/// The sender of a command. Message delivery and formatting are the implementor's concern.
pub trait CommandSender: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> SenderKind;

    /// Operators are permitted to run every command.
    fn is_operator(&self) -> bool;

    /// Every permission the sender effectively holds.
    fn effective_permissions(&self) -> Vec<String>;

    fn send_message(&self, message: &str);

    fn is_interactive(&self) -> bool {
        self.kind().is_interactive()
    }

    fn is_trusted_console(&self) -> bool {
        self.kind().is_trusted_console()
    }
}

/// Just a type alias for a sender as a shareable trait object.
pub type TCommandSender = Arc<dyn CommandSender>;
