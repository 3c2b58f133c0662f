use clap::{Args, Subcommand};
use tableside_app::context::AppContext;

mod pay;
mod show;

#[derive(Debug, Args)]
pub(crate) struct BillCommand {
    #[command(subcommand)]
    command: BillSubcommand,
}

#[derive(Debug, Subcommand)]
enum BillSubcommand {
    /// Show the merged bill for one table, or every table
    Show(show::ShowBillArgs),
    /// Mark a fully served table's bill as paid
    Pay(pay::PayBillArgs),
}

pub(crate) async fn run(ctx: &AppContext, command: BillCommand) -> Result<(), String> {
    match command.command {
        BillSubcommand::Show(args) => show::run(ctx, args).await,
        BillSubcommand::Pay(args) => pay::run(ctx, args).await,
    }
}
