use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use super::state::{ordered, FilterState, Tab};
use super::fallback_providers;
use crate::catalog::Catalog;
use crate::domain::product::ProductId;
use crate::observer::{NoopObserver, RecommendationObserver};
use crate::recommend::{ProviderMatch, Recommendation, RecommendationResult};

/// What the active tab displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterView<'a> {
    Products(&'a [Recommendation]),
    Providers(&'a [ProviderMatch]),
}

/// Entries passing the current filters, per tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabCounts {
    pub all: usize,
    pub providers: usize,
    pub by_category: BTreeMap<String, usize>,
}

/// Holds a loaded result and a [`FilterState`] and keeps the filtered view
/// current. Every mutator recomputes the view and counts before returning.
pub struct FilterEngine {
    result: RecommendationResult,
    providers: Vec<ProviderMatch>,
    state: FilterState,
    default_state: FilterState,
    tab: Tab,
    filtered: Vec<Recommendation>,
    counts: TabCounts,
    /// Catalog index per product; empty unless [`Self::with_catalog`] was used.
    catalog_positions: HashMap<ProductId, usize>,
    observer: Arc<dyn RecommendationObserver>,
}

impl FilterEngine {
    pub fn new(result: RecommendationResult) -> Self {
        let mut engine = Self {
            result: RecommendationResult::default(),
            providers: Vec::new(),
            state: FilterState::default(),
            default_state: FilterState::default(),
            tab: Tab::All,
            filtered: Vec::new(),
            counts: TabCounts::default(),
            catalog_positions: HashMap::new(),
            observer: Arc::new(NoopObserver),
        };
        engine.load(result);
        engine
    }

    /// Reports dangling entries of the already loaded result to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn RecommendationObserver>) -> Self {
        self.observer = observer;
        self.report_dangling();
        self
    }

    /// Break score ties on the "all" tab by position in `catalog`.
    pub fn with_catalog(mut self, catalog: &Catalog) -> Self {
        self.catalog_positions =
            catalog.products().iter().enumerate().map(|(position, product)| (product.id.clone(), position)).collect();
        self.recompute();
        self
    }

    /// Replace both the current state and the [`Self::reset`] target.
    pub fn with_default_state(mut self, state: FilterState) -> Self {
        self.default_state = state.clone();
        self.state = state;
        self.recompute();
        self
    }

    /// Swap in a new result, keeping tab and filter state.
    pub fn load(&mut self, result: RecommendationResult) {
        self.providers = if result.recommended_providers.is_empty() {
            fallback_providers()
        } else {
            result.recommended_providers.clone()
        };
        self.result = result;
        self.report_dangling();
        self.recompute();
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.recompute();
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.state.price_range = ordered(min, max);
        self.recompute();
    }

    pub fn toggle_brand(&mut self, brand: &str) {
        toggle(&mut self.state.brands, brand);
        self.recompute();
    }

    pub fn toggle_compatibility(&mut self, standard: &str) {
        toggle(&mut self.state.compatibility, standard);
        self.recompute();
    }

    pub fn set_show_contract(&mut self, show: bool) {
        self.state.show_contract = show;
        self.recompute();
    }

    pub fn set_show_no_contract(&mut self, show: bool) {
        self.state.show_no_contract = show;
        self.recompute();
    }

    /// Restore the default filters. The active tab is kept.
    pub fn reset(&mut self) {
        self.state = self.default_state.clone();
        self.recompute();
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tab
    }

    pub fn view(&self) -> FilterView<'_> {
        match self.tab {
            Tab::Providers => FilterView::Providers(self.providers()),
            _ => FilterView::Products(&self.filtered),
        }
    }

    /// Filtered products for a product tab; empty on the providers tab.
    pub fn filtered_products(&self) -> &[Recommendation] {
        &self.filtered
    }

    /// Providers from the result, or the built-in list when it has none.
    pub fn providers(&self) -> &[ProviderMatch] {
        &self.providers
    }

    pub fn counts(&self) -> &TabCounts {
        &self.counts
    }

    pub fn available_brands(&self) -> BTreeSet<String> {
        self.products().map(|entry| entry.brand.clone()).collect()
    }

    pub fn available_compatibility(&self) -> BTreeSet<String> {
        self.products().flat_map(|entry| entry.compatibility.iter().cloned()).collect()
    }

    fn products(&self) -> impl Iterator<Item = &crate::domain::product::Product> {
        self.result.bucket_entries().filter_map(|(_, entry)| entry.product.as_ref())
    }

    fn report_dangling(&self) {
        for (category, entry) in self.result.bucket_entries() {
            if entry.product.is_none() {
                self.observer.dangling_reference_skipped(category);
            }
        }
    }

    fn recompute(&mut self) {
        self.filtered = match &self.tab {
            Tab::Providers => Vec::new(),
            tab => self.apply(self.candidates(tab)),
        };

        self.counts = TabCounts {
            all: self.apply(self.candidates(&Tab::All)).len(),
            providers: self.providers.len(),
            by_category: self
                .result
                .recommendations_by_category
                .keys()
                .map(|category| {
                    let tab = Tab::Category(category.clone());
                    (category.clone(), self.apply(self.candidates(&tab)).len())
                })
                .collect(),
        };
    }

    /// Base list for a product tab, dangling entries skipped.
    fn candidates(&self, tab: &Tab) -> Vec<&Recommendation> {
        match tab {
            Tab::All => {
                let mut seen = HashSet::new();
                let mut entries: Vec<&Recommendation> = self
                    .result
                    .bucket_entries()
                    .map(|(_, entry)| entry)
                    .filter(|entry| entry.product_id().is_some_and(|id| seen.insert(id.clone())))
                    .collect();
                // Buckets flatten in category order; put ties back in rank order.
                entries.sort_by_key(|entry| self.tie_rank(entry));
                entries
            }
            Tab::Category(category) => self
                .result
                .recommendations_by_category
                .get(category)
                .map(|entries| entries.iter().filter(|entry| entry.product.is_some()).collect())
                .unwrap_or_default(),
            Tab::Providers => Vec::new(),
        }
    }

    /// Catalog position when known, otherwise position among the top picks.
    /// Entries outside the top picks keep their flattened order.
    fn tie_rank(&self, entry: &Recommendation) -> usize {
        let Some(id) = entry.product_id() else {
            return usize::MAX;
        };
        if self.catalog_positions.is_empty() {
            let top = &self.result.top_recommendations;
            top.iter().position(|pick| pick.product_id() == Some(id)).unwrap_or(top.len())
        } else {
            self.catalog_positions.get(id).copied().unwrap_or(usize::MAX)
        }
    }

    fn apply(&self, candidates: Vec<&Recommendation>) -> Vec<Recommendation> {
        let mut kept: Vec<Recommendation> =
            candidates.into_iter().filter(|entry| self.state.matches(entry)).cloned().collect();
        kept.sort_by(|a, b| b.score.total_cmp(&a.score));
        kept
    }
}

fn toggle(selection: &mut BTreeSet<String>, value: &str) {
    if !selection.remove(value) {
        selection.insert(value.to_owned());
    }
}
