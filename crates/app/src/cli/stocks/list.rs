use clap::Args;
use tableside_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ListStocksArgs {
    /// Include image URLs
    #[arg(long)]
    images: bool,
}

pub(crate) async fn run(ctx: &AppContext, args: ListStocksArgs) -> Result<(), String> {
    let mut stocks = ctx.stocks();
    let state = stocks.refresh().await;

    if let Some(error) = state.load().error() {
        return Err(format!("failed to load stocks: {error}"));
    }

    println!("items ({})", state.items().len());

    for item in state.items() {
        println!(
            "  {}  {}  {}  stock {}  {}",
            item.id,
            item.name,
            item.price,
            item.stock
                .map_or_else(|| "-".to_string(), |stock| stock.to_string()),
            item.availability
        );

        if args.images
            && let Some(image_id) = &item.image_id
        {
            println!("      {}", ctx.http.item_image_url(image_id));
        }
    }

    println!("combos ({})", state.combos().len());

    for combo in state.combos() {
        println!(
            "  {}  {}  {}  {}",
            combo.id, combo.name, combo.price, combo.availability
        );

        if args.images
            && let Some(image_id) = &combo.image_id
        {
            println!("      {}", ctx.http.combo_image_url(image_id));
        }
    }

    Ok(())
}
