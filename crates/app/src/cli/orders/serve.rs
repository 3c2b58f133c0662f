use clap::Args;
use tableside::orders::{CartId, ComboItemId, EntryRef, LineItemId};
use tableside_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ServeArgs {
    /// Cart holding the entry
    #[arg(long)]
    cart: String,

    #[command(flatten)]
    target: EntryTarget,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct EntryTarget {
    /// Line item id
    #[arg(long)]
    item: Option<String>,

    /// Combo id
    #[arg(long)]
    combo: Option<String>,
}

impl EntryTarget {
    fn into_entry(self) -> Result<EntryRef, String> {
        match (self.item, self.combo) {
            (Some(item), None) => Ok(EntryRef::Item(LineItemId::new(item))),
            (None, Some(combo)) => Ok(EntryRef::Combo(ComboItemId::new(combo))),
            _ => Err("pass exactly one of --item or --combo".to_string()),
        }
    }
}

pub(crate) async fn run(ctx: &AppContext, args: ServeArgs) -> Result<(), String> {
    let entry = args.target.into_entry()?;
    let cart = CartId::new(args.cart);

    let mut kitchen = ctx.kitchen();

    if let Some(error) = kitchen.refresh().await.load().error() {
        return Err(format!("failed to load orders: {error}"));
    }

    kitchen
        .mark_served(&cart, entry)
        .await
        .map_err(|error| format!("failed to mark served: {error}"))?;

    let status = kitchen
        .state()
        .status_of(&cart)
        .map_or_else(|| "unknown".to_string(), |status| status.to_string());

    println!("served; cart {cart} is now {status}");

    Ok(())
}
