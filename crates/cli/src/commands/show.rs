use std::sync::Arc;

use advisor_core::filter::{FilterEngine, FilterView, Tab};
use serde_json::{json, Value};

use super::{build_recommender, open_store, to_json, CommandResult, Failure, Invocation};

#[derive(Debug, Clone, Default)]
pub struct ShowArgs {
    pub tab: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub brands: Vec<String>,
    pub compatibility: Vec<String>,
    pub hide_contract: bool,
    pub hide_no_contract: bool,
    /// Regenerate from the saved answers when the result blob is unusable.
    pub recover: bool,
}

pub fn run(invocation: &Invocation, args: &ShowArgs) -> CommandResult {
    match execute(invocation, args) {
        Ok((message, data)) => CommandResult::success_with_data("show", message, Some(data)),
        Err(failure) => CommandResult::from_failure("show", failure),
    }
}

fn execute(invocation: &Invocation, args: &ShowArgs) -> Result<(String, Value), Failure> {
    let config = invocation.load_config()?;
    let recommender = Arc::new(build_recommender(&config, invocation.load_catalog()?));
    let store = open_store(&config, Arc::clone(&recommender))?;

    let result = if args.recover { store.recover() } else { store.load() };

    let mut engine = FilterEngine::new(result)
        .with_observer(recommender.observer())
        .with_catalog(recommender.catalog())
        .with_default_state(config.filters.default_state());

    if args.min_price.is_some() || args.max_price.is_some() {
        let (default_min, default_max) = engine.state().price_range;
        engine.set_price_range(args.min_price.unwrap_or(default_min), args.max_price.unwrap_or(default_max));
    }
    for brand in &args.brands {
        engine.toggle_brand(brand);
    }
    for standard in &args.compatibility {
        engine.toggle_compatibility(standard);
    }
    if args.hide_contract {
        engine.set_show_contract(false);
    }
    if args.hide_no_contract {
        engine.set_show_no_contract(false);
    }
    let tab: Tab = args.tab.as_deref().unwrap_or("all").parse().unwrap_or_default();
    engine.set_tab(tab);

    let (message, items) = match engine.view() {
        FilterView::Products(products) => {
            (format!("{} products on tab `{}`", products.len(), engine.active_tab()), to_json(&products)?)
        }
        FilterView::Providers(providers) => (format!("{} providers", providers.len()), to_json(&providers)?),
    };

    let data = json!({
        "tab": engine.active_tab().to_string(),
        "filters": to_json(engine.state())?,
        "counts": to_json(engine.counts())?,
        "availableBrands": to_json(&engine.available_brands())?,
        "availableCompatibility": to_json(&engine.available_compatibility())?,
        "items": items,
    });
    Ok((message, data))
}
