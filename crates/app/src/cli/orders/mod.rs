use clap::{Args, Subcommand};
use tableside_app::context::AppContext;

mod list;
mod serve;
mod show;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List open carts grouped by serving progress
    List(list::ListOrdersArgs),
    /// Show every entry of one cart
    Show(show::ShowOrderArgs),
    /// Mark one item or combo as served
    Serve(serve::ServeArgs),
}

pub(crate) async fn run(ctx: &AppContext, command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List(args) => list::run(ctx, args).await,
        OrdersSubcommand::Show(args) => show::run(ctx, args).await,
        OrdersSubcommand::Serve(args) => serve::run(ctx, args).await,
    }
}
