use clap::{Args, Subcommand};
use tableside_app::context::AppContext;

mod list;
mod toggle;

#[derive(Debug, Args)]
pub(crate) struct StocksCommand {
    #[command(subcommand)]
    command: StocksSubcommand,
}

#[derive(Debug, Subcommand)]
enum StocksSubcommand {
    /// List menu items and combos with their availability
    List(list::ListStocksArgs),
    /// Flip one item's or combo's availability
    Toggle(toggle::ToggleArgs),
}

pub(crate) async fn run(ctx: &AppContext, command: StocksCommand) -> Result<(), String> {
    match command.command {
        StocksSubcommand::List(args) => list::run(ctx, args).await,
        StocksSubcommand::Toggle(args) => toggle::run(ctx, args).await,
    }
}
