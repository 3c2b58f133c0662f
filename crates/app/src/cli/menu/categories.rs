use tableside_app::context::AppContext;

pub(crate) async fn run(ctx: &AppContext) -> Result<(), String> {
    let categories = ctx
        .menu()
        .categories()
        .await
        .map_err(|error| format!("failed to list categories: {error}"))?;

    if categories.is_empty() {
        println!("no categories found");
        return Ok(());
    }

    for category in categories {
        println!("{}  {}", category.id, category.name);
    }

    Ok(())
}
