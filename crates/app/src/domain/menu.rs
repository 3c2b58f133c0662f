//! Menu edit service.

use std::sync::Arc;

use tableside::{
    menu::{Category, MenuEditResponse, MenuItemEdit},
    stocks::StockItemId,
};
use tracing::{debug, info};

use crate::{
    client::OrdersApi,
    domain::{ServiceError, read_outcome},
};

pub struct MenuService {
    api: Arc<dyn OrdersApi>,
}

impl MenuService {
    #[must_use]
    pub fn new(api: Arc<dyn OrdersApi>) -> Self {
        Self { api }
    }

    /// Categories offered by the edit form.
    ///
    /// # Errors
    ///
    /// Returns an error when the categories cannot be fetched.
    pub async fn categories(&self) -> Result<Vec<Category>, ServiceError> {
        read_outcome("categories", self.api.list_categories().await).map_err(ServiceError::Load)
    }

    /// Current listing of a menu item, to pre-fill an edit.
    ///
    /// # Errors
    ///
    /// Returns an error when the stock list cannot be fetched or the item is not on it.
    pub async fn edit_for(&self, id: &StockItemId) -> Result<MenuItemEdit, ServiceError> {
        let items = read_outcome("stock items", self.api.list_stock_items().await)
            .map_err(ServiceError::Load)?;

        let item = items
            .iter()
            .find(|item| &item.id == id)
            .ok_or_else(|| ServiceError::NotListed(id.to_string()))?;

        Ok(MenuItemEdit::from_stock(item)?)
    }

    /// Submit an edit after checking it against the category list.
    ///
    /// # Errors
    ///
    /// Returns the validation failure without contacting the server, or the API error when
    /// the edit is rejected.
    pub async fn edit_item(&self, edit: &MenuItemEdit) -> Result<MenuEditResponse, ServiceError> {
        let categories = self.categories().await?;

        edit.validate(&categories)?;

        debug!(id = %edit.id, "submitting menu edit");

        let response = self.api.edit_menu_item(edit).await?;

        info!(id = %edit.id, message = %response.message, "menu item updated");

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use tableside::{
        fixtures::{Fixture, FixtureError},
        menu::{FoodType, MenuEditError},
    };
    use testresult::TestResult;

    use crate::client::MockOrdersApi;

    use super::*;

    fn with_menu(mut api: MockOrdersApi) -> Result<MockOrdersApi, FixtureError> {
        let fixture = Fixture::with_base_path("../../fixtures");
        let categories = fixture.load_categories("menu")?;
        let items = fixture.load_stock_items("menu")?;

        api.expect_list_categories()
            .returning(move || Ok(categories.clone()));
        api.expect_list_stock_items()
            .returning(move || Ok(items.clone()));

        Ok(api)
    }

    #[tokio::test]
    async fn edit_for_prefills_from_listing() -> TestResult {
        let service = MenuService::new(Arc::new(with_menu(MockOrdersApi::new())?));

        let edit = service.edit_for(&StockItemId::new("st-2")).await?;

        assert_eq!(edit.name, "Chicken Curry");
        assert_eq!(edit.food_type, FoodType::NonVeg);
        assert_eq!(edit.price, Decimal::new(1125, 2));

        Ok(())
    }

    #[tokio::test]
    async fn valid_edit_is_submitted() -> TestResult {
        let mut api = with_menu(MockOrdersApi::new())?;
        api.expect_edit_menu_item()
            .withf(|edit| edit.name == "Butter Chicken" && edit.category_name == "Mains")
            .times(1)
            .returning(|_| {
                Ok(MenuEditResponse {
                    message: "Item updated".to_string(),
                })
            });

        let service = MenuService::new(Arc::new(api));
        let mut edit = service.edit_for(&StockItemId::new("st-2")).await?;
        edit.name = "Butter Chicken".to_string();

        let response = service.edit_item(&edit).await?;

        assert_eq!(response.message, "Item updated");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_category_is_refused_locally() -> TestResult {
        let mut api = with_menu(MockOrdersApi::new())?;
        api.expect_edit_menu_item().never();

        let service = MenuService::new(Arc::new(api));
        let mut edit = service.edit_for(&StockItemId::new("st-1")).await?;
        edit.category_name = "Desserts".to_string();

        let result = service.edit_item(&edit).await;

        assert!(matches!(
            result,
            Err(ServiceError::MenuEdit(MenuEditError::UnknownCategory(_)))
        ));

        Ok(())
    }
}
