use clap::Args;
use tableside::stocks::{ComboStockId, StockItemId, StockRef};
use tableside_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ToggleArgs {
    #[command(flatten)]
    target: StockTarget,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct StockTarget {
    /// Menu item id
    #[arg(long)]
    item: Option<String>,

    /// Combo id
    #[arg(long)]
    combo: Option<String>,
}

impl StockTarget {
    fn into_ref(self) -> Result<StockRef, String> {
        match (self.item, self.combo) {
            (Some(item), None) => Ok(StockRef::Item(StockItemId::new(item))),
            (None, Some(combo)) => Ok(StockRef::Combo(ComboStockId::new(combo))),
            _ => Err("pass exactly one of --item or --combo".to_string()),
        }
    }
}

pub(crate) async fn run(ctx: &AppContext, args: ToggleArgs) -> Result<(), String> {
    let target = args.target.into_ref()?;

    let mut stocks = ctx.stocks();

    if let Some(error) = stocks.refresh().await.load().error() {
        return Err(format!("failed to load stocks: {error}"));
    }

    let availability = stocks
        .toggle(target.clone())
        .await
        .map_err(|error| format!("failed to update availability: {error}"))?;

    println!("{} is now {availability}", target.raw_id());

    Ok(())
}
