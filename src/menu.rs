//! Menu Edits

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ids::TypedId,
    stocks::{StockItem, StockItemId},
};

/// Category Id
pub type CategoryId = TypedId<Category>;

/// A menu category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Server id
    pub id: CategoryId,

    /// Display name, also used as the reference from menu items
    pub name: String,
}

/// Dietary type of a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    /// Vegetarian
    #[serde(rename = "Veg")]
    Veg,

    /// Non-vegetarian
    #[serde(rename = "Non Veg")]
    NonVeg,
}

impl Display for FoodType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Veg => f.write_str("Veg"),
            Self::NonVeg => f.write_str("Non Veg"),
        }
    }
}

impl FromStr for FoodType {
    type Err = MenuEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");

        match normalised.as_str() {
            "veg" => Ok(Self::Veg),
            "non veg" | "nonveg" => Ok(Self::NonVeg),
            _ => Err(MenuEditError::UnknownFoodType(s.to_string())),
        }
    }
}

/// Reasons an edit is rejected before it reaches the server.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuEditError {
    /// Name is blank.
    #[error("name cannot be empty")]
    EmptyName,

    /// Category is blank.
    #[error("a category must be selected")]
    EmptyCategory,

    /// Category is not in the server's list.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Type is neither `Veg` nor `Non Veg`.
    #[error("unknown food type: {0} (expected Veg or Non Veg)")]
    UnknownFoodType(String),

    /// The item has no type yet and none was given.
    #[error("a food type must be selected")]
    MissingFoodType,

    /// Price is below zero.
    #[error("price cannot be negative")]
    NegativePrice,
}

/// Body of a menu item edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemEdit {
    /// Item being edited
    #[serde(rename = "_id")]
    pub id: StockItemId,

    /// New name
    pub name: String,

    /// New stock count
    pub stock: u32,

    /// New unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// New dietary type
    #[serde(rename = "type")]
    pub food_type: FoodType,

    /// New category name
    pub category_name: String,
}

impl MenuItemEdit {
    /// Pre-fill an edit from the item's current listing.
    ///
    /// # Errors
    ///
    /// Returns an error when the listing has no usable food type.
    pub fn from_stock(item: &StockItem) -> Result<Self, MenuEditError> {
        let food_type = item
            .food_type
            .as_deref()
            .ok_or(MenuEditError::MissingFoodType)?
            .parse()?;

        Ok(Self {
            id: item.id.clone(),
            name: item.name.clone(),
            stock: item.stock.unwrap_or_default(),
            price: item.price,
            food_type,
            category_name: item.category_name.clone().unwrap_or_default(),
        })
    }

    /// Check the edit against the form's required fields.
    ///
    /// When `categories` is non-empty the category must be one of them.
    ///
    /// # Errors
    ///
    /// Returns the first rule the edit breaks.
    pub fn validate(&self, categories: &[Category]) -> Result<(), MenuEditError> {
        if self.name.trim().is_empty() {
            return Err(MenuEditError::EmptyName);
        }

        if self.price.is_sign_negative() {
            return Err(MenuEditError::NegativePrice);
        }

        if self.category_name.trim().is_empty() {
            return Err(MenuEditError::EmptyCategory);
        }

        if !categories.is_empty()
            && !categories
                .iter()
                .any(|category| category.name == self.category_name)
        {
            return Err(MenuEditError::UnknownCategory(self.category_name.clone()));
        }

        Ok(())
    }
}

/// Server reply to an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MenuEditResponse {
    /// Human-readable outcome
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::stocks::Availability;

    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: "cat1".into(),
                name: "Starters".to_string(),
            },
            Category {
                id: "cat2".into(),
                name: "Mains".to_string(),
            },
        ]
    }

    fn listing() -> StockItem {
        StockItem {
            id: "m1".into(),
            name: "Paneer Tikka".to_string(),
            image_id: None,
            price: Decimal::new(899, 2),
            category_name: Some("Starters".to_string()),
            food_type: Some("Veg".to_string()),
            stock: Some(12),
            availability: Availability::Available,
        }
    }

    #[test]
    fn food_type_parses_loose_spellings() -> TestResult {
        assert_eq!("Veg".parse::<FoodType>()?, FoodType::Veg);
        assert_eq!("non-veg".parse::<FoodType>()?, FoodType::NonVeg);
        assert_eq!("Non Veg".parse::<FoodType>()?, FoodType::NonVeg);
        assert!("vegan".parse::<FoodType>().is_err());

        Ok(())
    }

    #[test]
    fn edit_prefills_from_listing_and_validates() -> TestResult {
        let edit = MenuItemEdit::from_stock(&listing())?;

        assert_eq!(edit.stock, 12);
        assert_eq!(edit.food_type, FoodType::Veg);
        assert_eq!(edit.validate(&categories()), Ok(()));

        Ok(())
    }

    #[test]
    fn validate_rejects_blank_and_unknown_fields() -> TestResult {
        let edit = MenuItemEdit::from_stock(&listing())?;

        let blank_name = MenuItemEdit {
            name: "  ".to_string(),
            ..edit.clone()
        };
        assert_eq!(blank_name.validate(&[]), Err(MenuEditError::EmptyName));

        let no_category = MenuItemEdit {
            category_name: String::new(),
            ..edit.clone()
        };
        assert_eq!(no_category.validate(&[]), Err(MenuEditError::EmptyCategory));

        let unknown = MenuItemEdit {
            category_name: "Desserts".to_string(),
            ..edit.clone()
        };
        assert_eq!(
            unknown.validate(&categories()),
            Err(MenuEditError::UnknownCategory("Desserts".to_string()))
        );
        assert_eq!(unknown.validate(&[]), Ok(()));

        let negative = MenuItemEdit {
            price: Decimal::new(-1, 0),
            ..edit
        };
        assert_eq!(negative.validate(&[]), Err(MenuEditError::NegativePrice));

        Ok(())
    }

    #[test]
    fn edit_serialises_to_server_shape() -> TestResult {
        let edit = MenuItemEdit::from_stock(&listing())?;

        assert_eq!(
            serde_json::to_value(&edit)?,
            serde_json::json!({
                "_id": "m1",
                "name": "Paneer Tikka",
                "stock": 12,
                "price": 8.99,
                "type": "Veg",
                "categoryName": "Starters",
            })
        );

        Ok(())
    }
}
