use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::{to_json, CommandResult, Failure, Invocation};

pub fn run(invocation: &Invocation) -> CommandResult {
    match execute(invocation) {
        Ok((message, data)) => CommandResult::success_with_data("catalog", message, Some(data)),
        Err(failure) => CommandResult::from_failure("catalog", failure),
    }
}

fn execute(invocation: &Invocation) -> Result<(String, Value), Failure> {
    let catalog = invocation.load_catalog()?;

    let products: Vec<Value> = catalog
        .products()
        .iter()
        .map(|product| {
            json!({
                "id": product.id.as_str(),
                "name": product.name,
                "brand": product.brand,
                "category": product.category,
                "price": product.price,
                "serviceProvider": product.service_provider.as_ref().map(|id| id.as_str()),
            })
        })
        .collect();
    let providers: Vec<Value> = catalog
        .providers()
        .iter()
        .map(|provider| {
            json!({
                "id": provider.id.as_str(),
                "name": provider.name,
                "requiresContract": provider.requires_contract,
                "packages": provider.packages.len(),
            })
        })
        .collect();
    let goals: Vec<&str> = catalog.goal_mapping().goals().map(|(goal, _)| goal).collect();
    let ecosystems: BTreeMap<&str, &str> = catalog
        .ecosystem_terms()
        .ecosystems()
        .map(|(tag, profile)| (tag, profile.display_name.as_str()))
        .collect();

    let message = format!("{} products, {} providers", products.len(), providers.len());
    Ok((
        message,
        json!({
            "products": products,
            "providers": providers,
            "goals": goals,
            "ecosystems": to_json(&ecosystems)?,
        }),
    ))
}
