use clap::Args;
use tableside::billing::{PaidAt, TableFilter};
use tableside_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct PayBillArgs {
    /// Table number being settled
    #[arg(long)]
    table: u32,
}

pub(crate) async fn run(ctx: &AppContext, args: PayBillArgs) -> Result<(), String> {
    let mut billing = ctx.billing();

    if let Some(error) = billing.refresh().await.load().error() {
        return Err(format!("failed to load orders: {error}"));
    }

    billing.set_filter(TableFilter::Table(args.table));

    let paid_at = PaidAt::now();

    billing
        .mark_paid(paid_at.clone())
        .await
        .map_err(|error| format!("failed to mark table {} paid: {error}", args.table))?;

    if let Some(alert) = billing.state().alert() {
        println!("{alert}");
    }

    println!("paid_time: {}", paid_at.time);
    println!("paid_date: {}", paid_at.date);

    Ok(())
}
