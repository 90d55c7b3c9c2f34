//! Search controller
//!
//! Ties the form, the debouncer and a [`ProductSource`] together. A driver
//! task fetches once on start, then once per settled query. Every fetch gets
//! a sequence number and its outcome goes back through the driver, which is
//! the only writer of [`SearchState`]; responses to superseded requests are
//! dropped there.

use std::sync::Arc;
use std::time::Duration;

use common::error::UpstreamResult;
use common::models::{Category, SearchQuery, Take};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use crate::client::ProductSource;
use crate::debounce::Debounced;
use crate::state::{SearchEvent, SearchForm, SearchState};

pub struct SearchController {
    form: SearchForm,
    query: Debounced<SearchQuery>,
    state: watch::Receiver<SearchState>,
    driver: JoinHandle<()>,
}

impl SearchController {
    /// Start the controller; must be called inside a tokio runtime
    pub fn spawn<S: ProductSource>(source: S, quiet: Duration) -> Self {
        let form = SearchForm::default();
        let query = Debounced::new(form.query(), quiet);
        let (state_tx, state) = watch::channel(SearchState::default());
        let driver = tokio::spawn(drive(Arc::new(source), query.subscribe(), state_tx));

        info!("Search controller started");
        Self {
            form,
            query,
            state,
            driver,
        }
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.form.set_search_term(term);
        self.sync();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.form.set_category(category);
        self.sync();
    }

    /// Select a category by label; unknown labels are ignored
    pub fn select_category(&mut self, label: &str) -> UpstreamResult<Option<Category>> {
        let selected = self.form.select_category(label).inspect_err(|e| {
            warn!("Ignoring category selection: {}", e);
        })?;
        self.sync();
        Ok(selected)
    }

    pub fn increment_take(&mut self) -> Take {
        let take = self.form.increment_take();
        self.sync();
        take
    }

    pub fn decrement_take(&mut self) -> Take {
        let take = self.form.decrement_take();
        self.sync();
        take
    }

    /// Apply a typed limit; invalid input is ignored
    pub fn enter_take(&mut self, input: &str) -> UpstreamResult<Take> {
        let take = self.form.enter_take(input).inspect_err(|e| {
            debug!("Ignoring limit entry: {}", e);
        })?;
        self.sync();
        Ok(take)
    }

    /// Query that last settled
    pub fn settled_query(&self) -> SearchQuery {
        self.query.get()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    fn sync(&self) {
        self.query.set(self.form.query());
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

async fn drive<S: ProductSource>(
    source: Arc<S>,
    mut queries: watch::Receiver<SearchQuery>,
    state: watch::Sender<SearchState>,
) {
    let (events_tx, mut events) = mpsc::unbounded_channel();
    // Dropped with the driver, which aborts fetches still in flight.
    let mut in_flight = JoinSet::new();
    let mut seq = 0u64;

    let mut next = Some(queries.borrow_and_update().clone());
    loop {
        if let Some(query) = next.take() {
            seq += 1;
            debug!(seq, ?query, "Starting product fetch");
            state.send_if_modified(|s| {
                s.apply(SearchEvent::Started {
                    seq,
                    query: query.clone(),
                })
            });

            let source = Arc::clone(&source);
            let events_tx = events_tx.clone();
            in_flight.spawn(async move {
                let event = match source.fetch(&query).await {
                    Ok(products) => SearchEvent::Loaded { seq, products },
                    Err(e) => SearchEvent::Failed {
                        seq,
                        message: e.to_string(),
                    },
                };
                let _ = events_tx.send(event);
            });
        }

        tokio::select! {
            changed = queries.changed() => {
                if changed.is_err() {
                    debug!("Query channel closed, stopping search driver");
                    return;
                }
                next = Some(queries.borrow_and_update().clone());
            }
            Some(event) = events.recv() => {
                state.send_if_modified(|s| s.apply(event));
            }
            Some(_) = in_flight.join_next() => {}
        }
    }
}
