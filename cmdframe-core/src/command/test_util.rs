use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::metadata::CommandMetadata;
use super::sender::{CommandSender, SenderKind};
use super::{CommandContext, CommandHandler, ParameterShape, TCommandHandler};

/// A sender that remembers every message it was sent.
pub struct RecordingSender {
    pub name: String,
    pub kind: SenderKind,
    pub operator: bool,
    pub permissions: Vec<String>,
    pub messages: Mutex<Vec<String>>,
}

impl RecordingSender {
    pub fn new(kind: SenderKind) -> Self {
        Self {
            name: format!("test-{kind}"),
            kind,
            operator: false,
            permissions: vec![],
            messages: Mutex::new(vec![]),
        }
    }

    pub fn player(permissions: &[&str]) -> Arc<Self> {
        let mut sender = Self::new(SenderKind::Player);
        sender.permissions = permissions.iter().map(|&p| p.to_owned()).collect();
        Arc::new(sender)
    }

    pub fn operator() -> Arc<Self> {
        let mut sender = Self::new(SenderKind::Player);
        sender.operator = true;
        Arc::new(sender)
    }

    pub fn of_kind(kind: SenderKind) -> Arc<Self> {
        Arc::new(Self::new(kind))
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl CommandSender for RecordingSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SenderKind {
        self.kind
    }

    fn is_operator(&self) -> bool {
        self.operator
    }

    fn effective_permissions(&self) -> Vec<String> {
        self.permissions.clone()
    }

    fn send_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_owned());
    }
}

pub enum Behaviour {
    Succeed,
    Fail,
    Panic,
}

/// One recorded invocation: `None` when the handler got no context.
pub type Call = Option<(Vec<String>, Vec<(String, Option<String>)>)>;

/// A handler whose metadata and shape are set by the test, recording each invocation.
pub struct RecordingHandler {
    pub metadata: CommandMetadata,
    pub shape: ParameterShape,
    pub behaviour: Behaviour,
    pub calls: Mutex<Vec<Call>>,
}

impl RecordingHandler {
    pub fn new(metadata: CommandMetadata) -> Arc<Self> {
        Self::with(metadata, ParameterShape::Context, Behaviour::Succeed)
    }

    pub fn with(metadata: CommandMetadata, shape: ParameterShape, behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            metadata,
            shape,
            behaviour,
            calls: Mutex::new(vec![]),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn handler(self: &Arc<Self>) -> TCommandHandler {
        self.clone()
    }
}

#[async_trait]
impl CommandHandler for RecordingHandler {
    fn metadata(&self) -> CommandMetadata {
        self.metadata.clone()
    }

    fn parameter_shape(&self) -> ParameterShape {
        self.shape.clone()
    }

    async fn invoke(&self, ctxt: Option<CommandContext>) -> anyhow::Result<()> {
        let call = ctxt.map(|ctxt| {
            let mut flags = ctxt
                .flags()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<Vec<_>>();
            flags.sort();
            (ctxt.args().to_vec(), flags)
        });
        self.calls.lock().unwrap().push(call);

        match self.behaviour {
            Behaviour::Succeed => Ok(()),
            Behaviour::Fail => anyhow::bail!("handler failed on purpose"),
            Behaviour::Panic => panic!("handler panicked on purpose"),
        }
    }
}
