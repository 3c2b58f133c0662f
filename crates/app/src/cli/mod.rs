use clap::{Parser, Subcommand};
use tableside_app::{config::AppConfig, context::AppContext, observability};

mod bill;
mod menu;
mod orders;
mod stocks;

#[derive(Debug, Parser)]
#[command(name = "tableside", about = "Tableside kitchen and billing CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Kitchen order board
    Orders(orders::OrdersCommand),
    /// Table bills
    Bill(bill::BillCommand),
    /// Menu item and combo availability
    Stocks(stocks::StocksCommand),
    /// Menu categories and item edits
    Menu(menu::MenuCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.config.logging)
            .map_err(|error| error.to_string())?;

        let ctx = AppContext::from_config(&self.config).map_err(|error| error.to_string())?;

        match self.command {
            Commands::Orders(command) => orders::run(&ctx, command).await,
            Commands::Bill(command) => bill::run(&ctx, command).await,
            Commands::Stocks(command) => stocks::run(&ctx, command).await,
            Commands::Menu(command) => menu::run(&ctx, command).await,
        }
    }
}
