//! Search state container
//!
//! [`SearchForm`] holds the raw inputs typed by the user, [`SearchState`]
//! holds what the page renders. State only moves through
//! [`SearchState::apply`], which also discards responses belonging to a
//! request that is no longer the latest one.

use common::error::UpstreamResult;
use common::models::{Category, Product, SearchQuery, Take};
use tracing::debug;

/// Lifecycle of the latest search request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    /// Last fetch failed; the message is shown in the error banner
    Error(String),
}

/// Counters shown above the result grid, derived from the latest results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Products currently shown
    pub total: usize,
    /// Products shown for the selected category, 0 without a category
    pub category_total: usize,
    /// Products matching the search text, 0 without search text
    pub search_total: usize,
}

impl SearchStats {
    pub fn from_results(query: &SearchQuery, products: &[Product]) -> Self {
        let total = products.len();
        Self {
            total,
            category_total: if query.category.is_some() { total } else { 0 },
            search_total: if query.has_search_term() { total } else { 0 },
        }
    }
}

/// Transitions driven by the search controller
#[derive(Debug, Clone)]
pub enum SearchEvent {
    Started { seq: u64, query: SearchQuery },
    Loaded { seq: u64, products: Vec<Product> },
    Failed { seq: u64, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    products: Vec<Product>,
    status: SearchStatus,
    stats: SearchStats,
    query: SearchQuery,
    current_seq: u64,
}

impl SearchState {
    /// Apply an event, returning whether the state changed
    pub fn apply(&mut self, event: SearchEvent) -> bool {
        match event {
            SearchEvent::Started { seq, query } => {
                if seq < self.current_seq {
                    return false;
                }
                self.current_seq = seq;
                self.query = query;
                self.status = SearchStatus::Loading;
                true
            }
            SearchEvent::Loaded { seq, products } => {
                if !self.is_current(seq) {
                    debug!(seq, current = self.current_seq, "Discarding stale results");
                    return false;
                }
                self.stats = SearchStats::from_results(&self.query, &products);
                self.products = products;
                self.status = SearchStatus::Success;
                true
            }
            SearchEvent::Failed { seq, message } => {
                if !self.is_current(seq) {
                    debug!(seq, current = self.current_seq, "Discarding stale failure");
                    return false;
                }
                self.status = SearchStatus::Error(message);
                true
            }
        }
    }

    fn is_current(&self, seq: u64) -> bool {
        seq == self.current_seq && self.status == SearchStatus::Loading
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Query of the latest request
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    /// Message for the error banner
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SearchStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Raw form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    search_term: String,
    category: Option<Category>,
    take: Take,
}

impl SearchForm {
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn take(&self) -> Take {
        self.take
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    /// Select a category by label; the empty label means "All Categories"
    pub fn select_category(&mut self, label: &str) -> UpstreamResult<Option<Category>> {
        let category = if label.is_empty() {
            None
        } else {
            Some(label.parse()?)
        };
        self.category = category;
        Ok(category)
    }

    pub fn increment_take(&mut self) -> Take {
        self.take = self.take.increment();
        self.take
    }

    pub fn decrement_take(&mut self) -> Take {
        self.take = self.take.decrement();
        self.take
    }

    /// Apply a typed limit; invalid input leaves the current limit untouched
    pub fn enter_take(&mut self, input: &str) -> UpstreamResult<Take> {
        let take = Take::parse_entry(input)?;
        self.take = take;
        Ok(take)
    }

    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            search_term: self.search_term.clone(),
            category: self.category,
            take: self.take,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::models::ProductOwner;

    fn product(id: i64) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            description: String::new(),
            price: 10.0,
            stock: 1,
            category: "Electronics".to_string(),
            user: ProductOwner {
                id: 1,
                name: "alice".to_string(),
            },
        }
    }

    fn query(term: &str, category: Option<Category>) -> SearchQuery {
        SearchQuery {
            search_term: term.to_string(),
            category,
            take: Take::DEFAULT,
        }
    }

    #[test]
    fn test_lifecycle_success() {
        let mut state = SearchState::default();
        assert_eq!(state.status(), &SearchStatus::Idle);

        assert!(state.apply(SearchEvent::Started {
            seq: 1,
            query: query("phone", Some(Category::Electronics)),
        }));
        assert!(state.is_loading());

        assert!(state.apply(SearchEvent::Loaded {
            seq: 1,
            products: vec![product(1), product(2)],
        }));
        assert_eq!(state.status(), &SearchStatus::Success);
        assert_eq!(
            state.stats(),
            SearchStats {
                total: 2,
                category_total: 2,
                search_total: 2,
            }
        );
    }

    #[test]
    fn test_stats_zero_without_filters() {
        let mut state = SearchState::default();
        state.apply(SearchEvent::Started {
            seq: 1,
            query: query("", None),
        });
        state.apply(SearchEvent::Loaded {
            seq: 1,
            products: vec![product(1)],
        });

        assert_eq!(
            state.stats(),
            SearchStats {
                total: 1,
                category_total: 0,
                search_total: 0,
            }
        );
    }

    #[test]
    fn test_loading_clears_error_and_keeps_products() {
        let mut state = SearchState::default();
        state.apply(SearchEvent::Started {
            seq: 1,
            query: query("", None),
        });
        state.apply(SearchEvent::Loaded {
            seq: 1,
            products: vec![product(1)],
        });
        state.apply(SearchEvent::Started {
            seq: 2,
            query: query("x", None),
        });
        state.apply(SearchEvent::Failed {
            seq: 2,
            message: "Failed to fetch products".to_string(),
        });

        assert_eq!(state.error(), Some("Failed to fetch products"));
        assert_eq!(state.products().len(), 1);

        state.apply(SearchEvent::Started {
            seq: 3,
            query: query("y", None),
        });
        assert_eq!(state.error(), None);
        assert!(state.is_loading());
    }

    #[test]
    fn test_stale_responses_are_discarded() {
        let mut state = SearchState::default();
        state.apply(SearchEvent::Started {
            seq: 1,
            query: query("", None),
        });
        state.apply(SearchEvent::Started {
            seq: 2,
            query: query("phone", None),
        });
        assert!(state.apply(SearchEvent::Loaded {
            seq: 2,
            products: vec![product(2)],
        }));

        assert!(!state.apply(SearchEvent::Loaded {
            seq: 1,
            products: vec![product(1), product(3)],
        }));
        assert!(!state.apply(SearchEvent::Failed {
            seq: 1,
            message: "late".to_string(),
        }));
        assert!(!state.apply(SearchEvent::Started {
            seq: 1,
            query: query("", None),
        }));

        assert_eq!(state.products(), &[product(2)]);
        assert_eq!(state.query().search_term, "phone");
        assert_eq!(state.status(), &SearchStatus::Success);
    }

    #[test]
    fn test_duplicate_response_is_ignored() {
        let mut state = SearchState::default();
        state.apply(SearchEvent::Started {
            seq: 1,
            query: query("", None),
        });
        assert!(state.apply(SearchEvent::Loaded {
            seq: 1,
            products: vec![product(1)],
        }));
        assert!(!state.apply(SearchEvent::Failed {
            seq: 1,
            message: "again".to_string(),
        }));
        assert_eq!(state.status(), &SearchStatus::Success);
    }

    #[test]
    fn test_form_take_controls() {
        let mut form = SearchForm::default();
        assert_eq!(form.take(), Take::MIN);

        assert_eq!(form.increment_take().get(), 11);
        assert_eq!(form.increment_take().get(), 21);
        assert_eq!(form.decrement_take().get(), 11);
        assert_eq!(form.decrement_take().get(), 1);
        assert_eq!(form.decrement_take().get(), 1);

        assert_eq!(form.enter_take("40").unwrap().get(), 40);
        assert!(form.enter_take("forty").is_err());
        assert_eq!(form.take().get(), 40);
        assert_eq!(form.enter_take("-3").unwrap(), Take::MIN);
    }

    #[test]
    fn test_form_category_selection() {
        let mut form = SearchForm::default();
        assert_eq!(
            form.select_category("Books").unwrap(),
            Some(Category::Books)
        );
        assert!(form.select_category("Weapons").is_err());
        assert_eq!(form.category(), Some(Category::Books));
        assert_eq!(form.select_category("").unwrap(), None);
        assert_eq!(form.query().category, None);
    }
}
