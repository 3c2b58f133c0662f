use clap::Args;
use rust_decimal::Decimal;
use tableside::{menu::FoodType, stocks::StockItemId};
use tableside_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct EditItemArgs {
    /// Menu item id
    #[arg(long)]
    item: String,

    /// New name
    #[arg(long)]
    name: Option<String>,

    /// New stock count
    #[arg(long)]
    stock: Option<u32>,

    /// New unit price
    #[arg(long)]
    price: Option<Decimal>,

    /// New food type (Veg, Non Veg)
    #[arg(long = "type")]
    food_type: Option<FoodType>,

    /// New category name
    #[arg(long)]
    category: Option<String>,
}

pub(crate) async fn run(ctx: &AppContext, args: EditItemArgs) -> Result<(), String> {
    let menu = ctx.menu();

    let mut edit = menu
        .edit_for(&StockItemId::new(args.item))
        .await
        .map_err(|error| format!("failed to load item: {error}"))?;

    if let Some(name) = args.name {
        edit.name = name;
    }

    if let Some(stock) = args.stock {
        edit.stock = stock;
    }

    if let Some(price) = args.price {
        edit.price = price;
    }

    if let Some(food_type) = args.food_type {
        edit.food_type = food_type;
    }

    if let Some(category) = args.category {
        edit.category_name = category;
    }

    let response = menu
        .edit_item(&edit)
        .await
        .map_err(|error| format!("failed to edit item: {error}"))?;

    if response.message.is_empty() {
        println!("item {} updated", edit.id);
    } else {
        println!("{}", response.message);
    }

    Ok(())
}
