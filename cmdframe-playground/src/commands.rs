use anyhow::Context;
use cmdframe_core::command::CommandContext;
use cmdframe_core::{command, declare_commands};
use tracing::info;

declare_commands!(pub GeneralCommands => [ping_command, say_command, whoami_command]);
declare_commands!(pub GameCommands => [give_command, broadcast_command]);

#[command(description = "Checks that the shell is alive")]
fn ping() -> anyhow::Result<()> {
    info!("pong");
    Ok(())
}

#[command(
    aliases = ["echo"],
    usage = "<message...> [-to <name>]",
    description = "Repeats a message back",
    min_args = 1,
    flags = ["to:"]
)]
async fn say(ctxt: CommandContext) -> anyhow::Result<()> {
    let message = ctxt.args().join(" ");
    match ctxt.flag_value("to") {
        Some(to) => ctxt.reply(&format!("{} whispers to {to}: {message}", ctxt.sender().name())),
        None => ctxt.reply(&format!("{}: {message}", ctxt.sender().name())),
    }
    Ok(())
}

#[command(description = "Shows who you are to the shell", max_args = 0)]
async fn whoami(ctxt: CommandContext) -> anyhow::Result<()> {
    let sender = ctxt.sender();
    let mut permissions = sender.effective_permissions();
    permissions.sort();

    ctxt.reply(&format!(
        "{} ({}{}), permissions: [{}]",
        sender.name(),
        sender.kind(),
        if sender.is_operator() { ", operator" } else { "" },
        permissions.join(", ")
    ));
    Ok(())
}

#[command(
    aliases = ["g"],
    usage = "<item> [amount]",
    description = "Gives you an item",
    player_only,
    min_args = 1,
    max_args = 2,
    flags = ["silent"],
    permissions = ["playground.give", "playground.admin"]
)]
async fn give(ctxt: CommandContext) -> anyhow::Result<()> {
    let item = ctxt.arg(0).unwrap_or_default();
    let amount = match ctxt.arg(1) {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("'{raw}' is not a valid amount"))?,
        None => 1,
    };

    info!("gave {amount} x {item} to {}", ctxt.sender().name());
    if !ctxt.has_flag("silent") {
        ctxt.reply(&format!("You received {amount} x {item}."));
    }
    Ok(())
}

#[command(
    aliases = ["bc", "shout"],
    usage = "<message...>",
    description = "Announces a message to everyone",
    min_args = 1,
    flags = ["prefix:"],
    permissions = ["playground.admin"]
)]
async fn broadcast(ctxt: CommandContext) -> anyhow::Result<()> {
    let prefix = ctxt.flag_value("prefix").unwrap_or("Broadcast");
    println!("[{prefix}] {}", ctxt.args().join(" "));
    Ok(())
}
