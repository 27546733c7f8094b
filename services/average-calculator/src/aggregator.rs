//! Request orchestration: validate kind, fetch, merge, average

use std::sync::Arc;
use tracing::info;

use crate::{
    errors::CalculatorError,
    kind::{FetchStrategy, NumberKind},
    models::AggregateResponse,
    provider::NumberProvider,
    utils::{mean, round_two_places},
    window::WindowStore,
};

/// Runs one `/numbers/{kind}` request end to end
#[derive(Clone)]
pub struct AverageAggregator {
    store: Arc<WindowStore>,
    provider: Arc<dyn NumberProvider>,
}

impl AverageAggregator {
    pub fn new(store: Arc<WindowStore>, provider: Arc<dyn NumberProvider>) -> Self {
        Self { store, provider }
    }

    #[must_use]
    pub fn store(&self) -> &WindowStore {
        &self.store
    }

    /// Validate `label` and aggregate. An unknown label touches neither provider nor window.
    pub async fn aggregate_label(&self, label: &str) -> Result<AggregateResponse, CalculatorError> {
        let kind: NumberKind = label.parse()?;
        Ok(self.aggregate(kind).await)
    }

    /// Fetch numbers for `kind`, merge them into the window and report the new average.
    ///
    /// The provider call happens before the window lock is taken. If this future is dropped
    /// mid-fetch, the window is untouched.
    pub async fn aggregate(&self, kind: NumberKind) -> AggregateResponse {
        let known = match kind.strategy() {
            FetchStrategy::Derived => self.store.snapshot(),
            FetchStrategy::Unconditional => Vec::new(),
        };

        let numbers = self.provider.fetch(kind, &known).await;
        let transition = self.store.merge(&numbers);
        let avg = round_two_places(mean(&transition.curr));

        info!(
            kind = %kind,
            fetched = numbers.len(),
            window_len = transition.curr.len(),
            avg,
            "Window updated"
        );

        AggregateResponse {
            window_prev_state: transition.prev,
            window_curr_state: transition.curr,
            numbers,
            avg,
        }
    }
}

impl std::fmt::Debug for AverageAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AverageAggregator")
            .field("store", &self.store)
            .field("provider", &"Arc<dyn NumberProvider>")
            .finish()
    }
}
