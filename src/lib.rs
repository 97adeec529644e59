//! Ingredient search - a debounced search box over an in-memory product catalog.
//!
//! Typing updates the query immediately and shows a loading indicator. The
//! search runs once input has been quiet for the debounce window, after a
//! simulated network delay, and its results replace the product list.

pub mod app;
pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod search;
pub mod ui;

pub use app::IngredientSearchApp;
pub use catalog::{Catalog, Product, Resolver};
pub use config::AppConfig;
pub use error::{IngredientSearchError, Result};
pub use search::{SearchController, SearchTiming, SearchView, StalePolicy};
