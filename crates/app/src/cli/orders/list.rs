use clap::Args;
use tableside::{aggregation::AggregateStatus, orders::CartId};
use tableside_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ListOrdersArgs {
    /// Only list carts in this bucket (all-served, some-served, none-served)
    #[arg(long)]
    status: Option<String>,
}

pub(crate) async fn run(ctx: &AppContext, args: ListOrdersArgs) -> Result<(), String> {
    let mut kitchen = ctx.kitchen();
    let state = kitchen.refresh().await;

    if let Some(error) = state.load().error() {
        return Err(format!("failed to load orders: {error}"));
    }

    let partition = state.partition();
    let buckets: [(AggregateStatus, &[CartId]); 3] = [
        (AggregateStatus::NoneServed, &partition.none),
        (AggregateStatus::SomeServed, &partition.few),
        (AggregateStatus::AllServed, &partition.all),
    ];

    for (status, carts) in buckets {
        if args
            .status
            .as_deref()
            .is_some_and(|wanted| wanted != status.to_string())
        {
            continue;
        }

        println!("{status} ({})", carts.len());

        for id in carts {
            if let Some(cart) = state.cart(id) {
                println!(
                    "  table {:>3}  {id}  {} items, {} combos",
                    cart.table_number,
                    cart.items.len(),
                    cart.combos.len()
                );
            }
        }
    }

    Ok(())
}
