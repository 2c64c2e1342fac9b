use std::collections::HashMap;
use std::sync::Arc;

use cmdframe_common::config::CONFIG;
use cmdframe_common::ok_or_break;
use cmdframe_common::util::tracing_init;
use cmdframe_core::command::dispatcher::Dispatcher;
use cmdframe_core::command::registry::CommandRegistry;
use cmdframe_core::command::sender::TCommandSender;
use cmdframe_core::command::table::InMemoryCommandTable;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::sender::{ConsoleSender, PlayerSession};

mod commands;
mod sender;

/// One line of shell input: `[@player] [/]label [args...]`.
#[derive(Debug, PartialEq)]
struct Input<'a> {
    player: Option<&'a str>,
    label: &'a str,
    args: Vec<String>,
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let mut words = line.split_ascii_whitespace().peekable();

        let player = words
            .next_if(|w| w.starts_with('@') && w.len() > 1)
            .map(|w| &w[1..]);

        let label = words.next()?;
        let label = label.strip_prefix('/').unwrap_or(label);
        if label.is_empty() {
            return None;
        }

        Some(Self {
            player,
            label,
            args: words.map(str::to_owned).collect(),
        })
    }
}

fn print_help(dispatcher: &Dispatcher) {
    println!("Commands:");
    let mut descriptors = dispatcher.descriptors().collect::<Vec<_>>();
    descriptors.sort_by(|a, b| a.name().cmp(b.name()));
    for descriptor in descriptors {
        let mut aliases = descriptor.aliases().iter().map(String::as_str).collect::<Vec<_>>();
        aliases.sort_unstable();
        println!("  {} - {}", descriptor.usage(), descriptor.description());
        if !aliases.is_empty() {
            println!("      aliases: {}", aliases.join(", "));
        }
    }
    println!("Prefix a command with @name to run it as a configured player. .quit exits.");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_init(&CONFIG.logging.filter);

    info!("Initialising");
    let mut registry = CommandRegistry::new(CONFIG.framework.namespace.clone());
    registry
        .register(&commands::GeneralCommands)
        .register(&commands::GameCommands);

    let mut table = InMemoryCommandTable::new();
    let dispatcher = registry.build(&mut table);

    let console: TCommandSender = Arc::new(ConsoleSender::new(&CONFIG.console.name));
    let players: HashMap<String, TCommandSender> = CONFIG
        .sessions
        .iter()
        .map(|s| (s.name.to_lowercase(), Arc::new(PlayerSession::new(s.clone())) as TCommandSender))
        .collect();

    info!("{} player session(s) configured", players.len());
    println!("Type .help for a list of commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        // a read error means stdin is gone
        let Some(line) = ok_or_break!(lines.next_line().await) else {
            break;
        };

        match line.trim() {
            "" => continue,
            ".quit" | ".exit" => break,
            ".help" => {
                print_help(&dispatcher);
                continue;
            },
            _ => {},
        }

        let Some(input) = Input::parse(&line) else {
            continue;
        };

        let sender = match input.player {
            Some(name) => match players.get(&name.to_lowercase()) {
                Some(player) => player.clone(),
                None => {
                    warn!("no session named '{name}' is configured");
                    continue;
                },
            },
            None => console.clone(),
        };

        let Some(label) = table.resolve(input.label) else {
            sender.send_message("Unknown command. Type \".help\" for help.");
            continue;
        };

        dispatcher.execute(sender, label, &input.args).await;
    }

    info!("Shutting down");
    Ok(())
}
