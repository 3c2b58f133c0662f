use clap::{Args, Subcommand};
use tableside_app::context::AppContext;

mod categories;
mod edit;

#[derive(Debug, Args)]
pub(crate) struct MenuCommand {
    #[command(subcommand)]
    command: MenuSubcommand,
}

#[derive(Debug, Subcommand)]
enum MenuSubcommand {
    /// List menu categories
    Categories,
    /// Edit a menu item's details
    Edit(edit::EditItemArgs),
}

pub(crate) async fn run(ctx: &AppContext, command: MenuCommand) -> Result<(), String> {
    match command.command {
        MenuSubcommand::Categories => categories::run(ctx).await,
        MenuSubcommand::Edit(args) => edit::run(ctx, args).await,
    }
}
