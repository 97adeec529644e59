pub mod product;
pub mod resolver;
pub mod watcher;

pub use product::{Catalog, Product};
pub use resolver::{resolve_ingredient_search, Resolver};
pub use watcher::{CatalogEvent, CatalogWatcher};
