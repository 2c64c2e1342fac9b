use cmdframe_common::err;
use tracing::{debug, info, warn};

use super::descriptor::CommandDescriptor;
use super::dispatcher::Dispatcher;
use super::errors::RegistrationError;
use super::table::CommandTable;
use super::{HandlerSource, ParameterShape, TCommandHandler};

/// A descriptor paired with the handler it describes.
pub struct RegisteredCommand {
    pub(crate) descriptor: CommandDescriptor,
    pub(crate) handler: TCommandHandler,
}

impl RegisteredCommand {
    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    pub fn handler(&self) -> &TCommandHandler {
        &self.handler
    }
}

/// Collects command handlers for one application.
///
/// Registration happens once at startup; [`CommandRegistry::build`] then consumes the registry
/// and hands back the [`Dispatcher`] that serves it.
pub struct CommandRegistry {
    namespace: String,
    commands: Vec<RegisteredCommand>,
    skipped: Vec<RegistrationError>,
}

impl CommandRegistry {
    /// `namespace` is the owning application's name, used when exporting identifiers.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            commands: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Registers every handler `source` lists.
    ///
    /// A handler whose name or any alias is already claimed by a registered command is not
    /// registered at all; a warning names the colliding identifier and scanning moves on.
    pub fn register<S: HandlerSource + ?Sized>(&mut self, source: &S) -> &mut Self {
        for handler in source.enumerate() {
            let metadata = handler.metadata();

            let descriptor = match CommandDescriptor::new(&metadata) {
                Ok(descriptor) => descriptor,
                Err(error) => {
                    self.skip(RegistrationError::InvalidMetadata {
                        command: metadata.name,
                        error,
                    });
                    continue;
                },
            };

            if let Some(identifier) = self.find_collision(&descriptor) {
                self.skip(RegistrationError::DuplicateIdentifier {
                    command: descriptor.name().to_owned(),
                    identifier,
                });
                continue;
            }

            debug!("registered command '{}'", descriptor.name());
            self.commands.push(RegisteredCommand { descriptor, handler });
        }

        self
    }

    /// The first identifier of an already registered command that `descriptor` also claims.
    fn find_collision(&self, descriptor: &CommandDescriptor) -> Option<String> {
        self.commands.iter().find_map(|existing| {
            existing
                .descriptor
                .identifiers()
                .iter()
                .find(|id| descriptor.identify(id))
                .cloned()
        })
    }

    fn skip(&mut self, error: RegistrationError) {
        warn!("{error}");
        self.skipped.push(error);
    }

    /// Decides for each command whether its handler receives a context, drops commands whose
    /// handler takes anything else, and exports every remaining identifier to `table`.
    pub fn build(mut self, table: &mut dyn CommandTable) -> Dispatcher {
        let mut live = Vec::with_capacity(self.commands.len());

        for mut command in std::mem::take(&mut self.commands) {
            match command.handler.parameter_shape() {
                ParameterShape::None => command.descriptor.set_send_context(false),
                ParameterShape::Context => command.descriptor.set_send_context(true),
                ParameterShape::Unsupported(signature) => {
                    let error = RegistrationError::UnsupportedParameters {
                        command: command.descriptor.name().to_owned(),
                        signature,
                    };
                    err!("{error}");
                    self.skipped.push(error);
                    continue;
                },
            }

            let mut identifiers = command.descriptor.identifiers().iter().collect::<Vec<_>>();
            identifiers.sort_unstable();

            for identifier in identifiers {
                if let Err(e) = table.register(&self.namespace, identifier) {
                    err!(
                        "failed to export '{identifier}' for command '{}': {e:#}",
                        command.descriptor.name()
                    );
                }
            }

            live.push(command);
        }

        info!(
            "built {} command(s) for '{}' ({} skipped)",
            live.len(),
            self.namespace,
            self.skipped.len()
        );

        Dispatcher::new(self.namespace, live, self.skipped)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn commands(&self) -> &[RegisteredCommand] {
        &self.commands
    }

    /// Handlers refused so far, in the order they were refused.
    pub fn skipped(&self) -> &[RegistrationError] {
        &self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::metadata::CommandMetadata;
    use crate::command::table::InMemoryCommandTable;
    use crate::command::test_util::{Behaviour, RecordingHandler, RecordingSender};

    fn handler(builder: &mut crate::command::metadata::CommandMetadataBuilder) -> TCommandHandler {
        RecordingHandler::new(builder.build()).handler()
    }

    #[tokio::test]
    async fn duplicate_name_rejects_second() {
        let first = RecordingHandler::new(CommandMetadata::builder("build").description("first").build());
        let second = RecordingHandler::new(CommandMetadata::builder("build").description("second").build());

        let mut registry = CommandRegistry::new("test");
        registry.register(&[first.handler(), second.handler()]);

        assert_eq!(registry.commands().len(), 1);
        assert_eq!(registry.commands()[0].descriptor().description(), "first");
        assert_eq!(
            registry.skipped(),
            &[RegistrationError::DuplicateIdentifier {
                command: "build".to_owned(),
                identifier: "build".to_owned(),
            }]
        );

        let dispatcher = registry.build(&mut InMemoryCommandTable::new());
        let outcome = dispatcher.execute(RecordingSender::player(&[]), "build", &[]).await;

        assert!(outcome.is_completed());
        assert_eq!(first.calls().len(), 1);
        assert!(second.calls().is_empty());
    }

    #[test]
    fn alias_collision_rejects_whole_command() {
        let mut registry = CommandRegistry::new("test");
        registry
            .register(&[handler(CommandMetadata::builder("teleport").alias("tp"))])
            .register(&[handler(CommandMetadata::builder("tpa").aliases(&["tp", "tpask"]))]);

        assert_eq!(registry.commands().len(), 1);
        assert!(!registry.commands().iter().any(|c| c.descriptor().identify("tpask")));
        assert!(matches!(
            &registry.skipped()[0],
            RegistrationError::DuplicateIdentifier { identifier, .. } if identifier == "tp"
        ));
    }

    #[test]
    fn scanning_continues_after_rejection() {
        let mut registry = CommandRegistry::new("test");
        registry.register(&[
            handler(&mut CommandMetadata::builder("a")),
            handler(&mut CommandMetadata::builder("a")),
            handler(CommandMetadata::builder("b").min_args(-4)),
            handler(&mut CommandMetadata::builder("c")),
        ]);

        let names = registry
            .commands()
            .iter()
            .map(|c| c.descriptor().name())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(registry.skipped().len(), 2);
        assert_eq!(registry.skipped()[1].command(), "b");
    }

    #[test]
    fn identifiers_are_pairwise_disjoint() {
        let mut registry = CommandRegistry::new("test");
        registry.register(&[
            handler(CommandMetadata::builder("home").aliases(&["h", "base"])),
            handler(CommandMetadata::builder("help").aliases(&["h", "?"])),
            handler(CommandMetadata::builder("hub").aliases(&["lobby", "base"])),
            handler(CommandMetadata::builder("spawn").aliases(&["s"])),
        ]);

        let commands = registry.commands();
        for (i, a) in commands.iter().enumerate() {
            for b in &commands[i + 1..] {
                assert!(a.descriptor().identifiers().is_disjoint(b.descriptor().identifiers()));
            }
        }
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn build_exports_identifiers_and_sets_context() {
        let with_ctx = RecordingHandler::new(CommandMetadata::builder("give").alias("g").build());
        let without_ctx = RecordingHandler::with(
            CommandMetadata::builder("ping").build(),
            ParameterShape::None,
            Behaviour::Succeed,
        );

        let mut registry = CommandRegistry::new("shop");
        registry.register(&[with_ctx.handler(), without_ctx.handler()]);

        let mut table = InMemoryCommandTable::new();
        let dispatcher = registry.build(&mut table);

        assert_eq!(table.routes(), vec!["g", "give", "ping", "shop:g", "shop:give", "shop:ping"]);
        assert!(dispatcher.find("give").unwrap().descriptor().sends_context());
        assert!(!dispatcher.find("ping").unwrap().descriptor().sends_context());
    }

    #[test]
    fn build_drops_unsupported_handlers() {
        let bad = RecordingHandler::with(
            CommandMetadata::builder("bad").build(),
            ParameterShape::Unsupported("String, u32".to_owned()),
            Behaviour::Succeed,
        );
        let good = RecordingHandler::new(CommandMetadata::builder("good").build());

        let mut registry = CommandRegistry::new("test");
        registry.register(&[bad.handler(), good.handler()]);

        let mut table = InMemoryCommandTable::new();
        let dispatcher = registry.build(&mut table);

        assert!(dispatcher.find("bad").is_none());
        assert!(dispatcher.find("good").is_some());
        assert!(table.resolve("bad").is_none());
        assert_eq!(
            dispatcher.skipped(),
            &[RegistrationError::UnsupportedParameters {
                command: "bad".to_owned(),
                signature: "String, u32".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn rejected_export_keeps_command_live() {
        let go = RecordingHandler::new(CommandMetadata::builder("go").alias("go now").build());

        let mut registry = CommandRegistry::new("test");
        registry.register(&[go.handler()]);

        let mut table = InMemoryCommandTable::new();
        let dispatcher = registry.build(&mut table);

        assert_eq!(table.routes(), vec!["go", "test:go"]);
        assert!(table.resolve("go now").is_none());
        assert!(dispatcher.skipped().is_empty());
        assert_eq!(dispatcher.descriptors().map(|d| d.name()).collect::<Vec<_>>(), vec!["go"]);

        let outcome = dispatcher.execute(RecordingSender::player(&[]), "go now", &[]).await;
        assert!(outcome.is_completed());
        assert_eq!(go.calls().len(), 1);
    }
}
