pub mod controller;
pub mod debounce;
pub mod state;

pub use controller::{SearchController, SearchTiming, StalePolicy};
pub use debounce::{Debouncer, TimerHandle};
pub use state::{no_results_message, SearchState, SearchView};
