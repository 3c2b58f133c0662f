use std::io;

use clap::Args;
use rusty_money::Money;
use tableside::{
    billing::{TableFilter, table_overview},
    receipt::Receipt,
};
use tableside_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ShowBillArgs {
    /// Table number, or `all`
    #[arg(long, default_value = "all")]
    table: TableFilter,

    /// Only print the table overview and total
    #[arg(long)]
    summary: bool,
}

pub(crate) async fn run(ctx: &AppContext, args: ShowBillArgs) -> Result<(), String> {
    let mut billing = ctx.billing();

    if let Some(error) = billing.refresh().await.load().error() {
        return Err(format!("failed to load orders: {error}"));
    }

    billing.set_filter(args.table);

    if !args.summary {
        billing.toggle();
    }

    let state = billing.state();

    let tables: Vec<String> = table_overview(state.occupied(), ctx.table_count)
        .into_iter()
        .map(|slot| {
            if slot.occupied {
                format!("[{}]", slot.number)
            } else {
                slot.number.to_string()
            }
        })
        .collect();

    println!("tables: {}", tables.join(" "));

    if state.expanded() {
        Receipt::new(state.filter(), state.lines(), ctx.currency)
            .write_to(io::stdout().lock())
            .map_err(|error| format!("failed to print bill: {error}"))?;
    } else {
        println!(
            "{}: {} lines, total {}",
            state.filter(),
            state.lines().len(),
            Money::from_decimal(state.total(), ctx.currency)
        );
    }

    if matches!(state.filter(), TableFilter::Table(_)) {
        println!(
            "ready to pay: {}",
            if state.can_mark_paid() { "yes" } else { "no" }
        );
    }

    Ok(())
}
