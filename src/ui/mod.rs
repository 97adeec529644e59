pub mod product_list;
pub mod search_window;

pub use product_list::ProductListState;
pub use search_window::SearchWindowState;
