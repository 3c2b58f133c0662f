//! Fixtures
//!
//! YAML snapshots of server responses, decoded through the same boundary as live data.
//! Files live at `<base>/<set>/<name>.yml`, where `set` is one of `carts`, `stocks`,
//! `combos` or `categories`.

use std::{fs, path::PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::{
    menu::Category,
    orders::CartRecord,
    stocks::{ComboStock, StockItem},
    wire::{self, DataShapeError},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The document does not have the response's shape
    #[error(transparent)]
    Shape(#[from] DataShapeError),
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a fixture reader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture reader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Read a fixture file as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn load_value(&self, set: &str, name: &str) -> Result<Value, FixtureError> {
        let file_path = self.base_path.join(set).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }

    /// Load a cart list fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or is not a list.
    pub fn load_carts(&self, name: &str) -> Result<Vec<CartRecord>, FixtureError> {
        Ok(wire::decode_carts(self.load_value("carts", name)?)?)
    }

    /// Load a stock item list fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or is not a list.
    pub fn load_stock_items(&self, name: &str) -> Result<Vec<StockItem>, FixtureError> {
        Ok(wire::decode_stock_items(self.load_value("stocks", name)?)?)
    }

    /// Load a combo stock list fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or is not a list.
    pub fn load_combo_stocks(&self, name: &str) -> Result<Vec<ComboStock>, FixtureError> {
        Ok(wire::decode_combo_stocks(self.load_value("combos", name)?)?)
    }

    /// Load a category list fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or is not a list.
    pub fn load_categories(&self, name: &str) -> Result<Vec<Category>, FixtureError> {
        Ok(wire::decode_categories(self.load_value("categories", name)?)?)
    }
}
