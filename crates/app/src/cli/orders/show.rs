use clap::Args;
use tableside::orders::CartId;
use tableside_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ShowOrderArgs {
    /// Cart id
    #[arg(long)]
    cart: String,
}

pub(crate) async fn run(ctx: &AppContext, args: ShowOrderArgs) -> Result<(), String> {
    let mut kitchen = ctx.kitchen();

    if let Some(error) = kitchen.refresh().await.load().error() {
        return Err(format!("failed to load orders: {error}"));
    }

    kitchen
        .select(&CartId::new(args.cart))
        .map_err(|error| error.to_string())?;

    let state = kitchen.state();
    let Some(cart) = state.selected() else {
        return Err("no cart selected".to_string());
    };

    println!("cart: {}", cart.id);
    println!("table: {}", cart.table_number);
    println!("status: {}", cart.aggregate_status());
    println!("pending: {}", cart.pending_entries().len());

    for item in &cart.items {
        println!(
            "  item   {}  {} x{}  {}",
            item.id, item.name, item.count, item.status
        );
    }

    for combo in &cart.combos {
        println!(
            "  combo  {}  {} x{}  {}",
            combo.id, combo.name, combo.count, combo.status
        );

        for component in &combo.components {
            println!("           {} x{}", component.name, component.quantity);
        }
    }

    Ok(())
}
