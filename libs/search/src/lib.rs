//! Headless product search page
//!
//! Everything the search page needs apart from markup: the raw form inputs,
//! debouncing, fetching through the storefront proxy and the state the page
//! renders (products, loading/error flags and derived counters).

pub mod client;
pub mod controller;
pub mod debounce;
pub mod state;

pub use client::{FETCH_FAILED_MESSAGE, FetchError, HttpProductSource, ProductSource};
pub use controller::SearchController;
pub use debounce::{Debounced, SEARCH_DEBOUNCE};
pub use state::{SearchEvent, SearchForm, SearchState, SearchStats, SearchStatus};
