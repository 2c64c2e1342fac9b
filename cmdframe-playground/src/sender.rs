use cmdframe_common::config::config::Session;
use cmdframe_core::command::sender::{CommandSender, SenderKind};

/// The shell's own console. Trusted, so it passes every permission check.
pub struct ConsoleSender {
    name: String,
}

impl ConsoleSender {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_owned() }
    }
}

impl CommandSender for ConsoleSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SenderKind {
        SenderKind::Console
    }

    fn is_operator(&self) -> bool {
        false
    }

    fn effective_permissions(&self) -> Vec<String> {
        vec![]
    }

    fn send_message(&self, message: &str) {
        println!("{message}");
    }
}

/// A player session configured in `config.toml`, impersonated with `@name`.
pub struct PlayerSession {
    session: Session,
}

impl PlayerSession {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CommandSender for PlayerSession {
    fn name(&self) -> &str {
        &self.session.name
    }

    fn kind(&self) -> SenderKind {
        SenderKind::Player
    }

    fn is_operator(&self) -> bool {
        self.session.operator
    }

    fn effective_permissions(&self) -> Vec<String> {
        self.session.permissions.clone()
    }

    fn send_message(&self, message: &str) {
        println!("[to {}] {message}", self.session.name);
    }
}
