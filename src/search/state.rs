use crate::catalog::Product;

/// What the search panel shows for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchView<'a> {
    Loading,
    NoResults { query: &'a str },
    Products(&'a [Product]),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub loading: bool,
    /// Raw text as typed, shown in the input.
    pub search_value: String,
    pub search_results: Vec<Product>,
}

impl SearchState {
    /// Loading wins over everything. The no-results message needs a non-empty
    /// raw query; an empty query always shows the (empty) list.
    pub fn view(&self) -> SearchView<'_> {
        if self.loading {
            SearchView::Loading
        } else if !self.search_value.is_empty() && self.search_results.is_empty() {
            SearchView::NoResults {
                query: &self.search_value,
            }
        } else {
            SearchView::Products(&self.search_results)
        }
    }
}

pub fn no_results_message(query: &str) -> (&'static str, String) {
    ("Sorry! Looks like we are fresh out of", format!("\"{}\"", query))
}
