//! Immutable product/provider catalog plus the lookup tables scoring reads.
//!
//! A [`Catalog`] is built once and passed by reference into scoring and
//! assembly. Product order is significant: it is the deterministic
//! tie-break when scores are equal.

mod seed;

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};
use crate::domain::provider::{ProviderId, ServiceProvider};
use crate::errors::DomainError;

/// Categories, subcategories and feature keywords relevant to one goal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProfile {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub sub_categories: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl GoalProfile {
    pub fn matches_category(&self, category: &str) -> bool {
        self.categories.iter().any(|candidate| candidate.eq_ignore_ascii_case(category))
    }

    pub fn matches_sub_category(&self, sub_category: &str) -> bool {
        !sub_category.is_empty()
            && self.sub_categories.iter().any(|candidate| candidate.eq_ignore_ascii_case(sub_category))
    }
}

/// Goal name to [`GoalProfile`]; lookups ignore ASCII case.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalMapping {
    goals: BTreeMap<String, GoalProfile>,
}

impl GoalMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_goal(mut self, goal: &str, profile: GoalProfile) -> Self {
        self.insert(goal, profile);
        self
    }

    pub fn insert(&mut self, goal: &str, profile: GoalProfile) {
        self.goals.insert(goal.trim().to_ascii_lowercase(), profile);
    }

    pub fn resolve(&self, goal: &str) -> Option<&GoalProfile> {
        self.goals.get(&goal.trim().to_ascii_lowercase())
    }

    pub fn goals(&self) -> impl Iterator<Item = (&str, &GoalProfile)> {
        self.goals.iter().map(|(goal, profile)| (goal.as_str(), profile))
    }
}

/// Display name and compatibility search terms for one ecosystem.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcosystemProfile {
    pub display_name: String,
    #[serde(default)]
    pub terms: Vec<String>,
}

/// Ecosystem tag to [`EcosystemProfile`]; lookups ignore ASCII case.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EcosystemTerms {
    ecosystems: BTreeMap<String, EcosystemProfile>,
}

impl EcosystemTerms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ecosystem(mut self, ecosystem: &str, profile: EcosystemProfile) -> Self {
        self.insert(ecosystem, profile);
        self
    }

    pub fn insert(&mut self, ecosystem: &str, profile: EcosystemProfile) {
        self.ecosystems.insert(ecosystem.trim().to_ascii_lowercase(), profile);
    }

    pub fn resolve(&self, ecosystem: &str) -> Option<&EcosystemProfile> {
        self.ecosystems.get(&ecosystem.trim().to_ascii_lowercase())
    }

    pub fn terms(&self, ecosystem: &str) -> &[String] {
        self.resolve(ecosystem).map(|profile| profile.terms.as_slice()).unwrap_or(&[])
    }

    pub fn ecosystems(&self) -> impl Iterator<Item = (&str, &EcosystemProfile)> {
        self.ecosystems.iter().map(|(tag, profile)| (tag.as_str(), profile))
    }

    /// Human-facing name, falling back to the tag as given.
    pub fn display_name<'a>(&'a self, ecosystem: &'a str) -> &'a str {
        self.resolve(ecosystem).map(|profile| profile.display_name.as_str()).unwrap_or(ecosystem)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    providers: Vec<ServiceProvider>,
    goals: GoalMapping,
    ecosystems: EcosystemTerms,
    product_index: HashMap<ProductId, usize>,
    provider_index: HashMap<ProviderId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and dangling provider links.
    pub fn new(
        products: Vec<Product>,
        providers: Vec<ServiceProvider>,
        goals: GoalMapping,
        ecosystems: EcosystemTerms,
    ) -> Result<Self, DomainError> {
        let mut seen_providers = HashSet::new();
        for provider in &providers {
            if !seen_providers.insert(provider.id.clone()) {
                return Err(DomainError::DuplicateProvider(provider.id.0.clone()));
            }
        }

        let mut seen_products = HashSet::new();
        for product in &products {
            if !seen_products.insert(product.id.clone()) {
                return Err(DomainError::DuplicateProduct(product.id.0.clone()));
            }
            if let Some(provider) = &product.service_provider {
                if !seen_providers.contains(provider) {
                    return Err(DomainError::UnknownProvider {
                        product: product.id.0.clone(),
                        provider: provider.0.clone(),
                    });
                }
            }
        }

        Ok(Self::from_parts(products, providers, goals, ecosystems))
    }

    /// The bundled smart-home catalog used by the CLI and as the default.
    pub fn builtin() -> Self {
        Self::from_parts(
            seed::products(),
            seed::providers(),
            seed::goal_mapping(),
            seed::ecosystem_terms(),
        )
    }

    /// Parse a catalog document and validate it like [`Catalog::new`].
    ///
    /// Tables omitted from the document fall back to the built-in goal
    /// mapping and ecosystem terms.
    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        let document: CatalogDocument =
            serde_json::from_str(raw).map_err(|error| DomainError::InvalidCatalog(error.to_string()))?;

        let goals = match document.goals {
            Some(goals) => goals.into_iter().fold(GoalMapping::new(), |mapping, (goal, profile)| {
                mapping.with_goal(&goal, profile)
            }),
            None => seed::goal_mapping(),
        };
        let ecosystems = match document.ecosystems {
            Some(ecosystems) => ecosystems
                .into_iter()
                .fold(EcosystemTerms::new(), |terms, (tag, profile)| terms.with_ecosystem(&tag, profile)),
            None => seed::ecosystem_terms(),
        };

        Self::new(document.products, document.providers, goals, ecosystems)
    }

    fn from_parts(
        products: Vec<Product>,
        providers: Vec<ServiceProvider>,
        goals: GoalMapping,
        ecosystems: EcosystemTerms,
    ) -> Self {
        let product_index =
            products.iter().enumerate().map(|(position, product)| (product.id.clone(), position)).collect();
        let provider_index =
            providers.iter().enumerate().map(|(position, provider)| (provider.id.clone(), position)).collect();

        Self { products, providers, goals, ecosystems, product_index, provider_index }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn providers(&self) -> &[ServiceProvider] {
        &self.providers
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.product_index.get(id).map(|position| &self.products[*position])
    }

    pub fn provider(&self, id: &ProviderId) -> Option<&ServiceProvider> {
        self.provider_index.get(id).map(|position| &self.providers[*position])
    }

    /// Whether the product's linked provider requires a contract.
    pub fn requires_contract(&self, product: &Product) -> bool {
        product
            .service_provider
            .as_ref()
            .and_then(|id| self.provider(id))
            .map(|provider| provider.requires_contract)
            .unwrap_or(false)
    }

    pub fn goal_mapping(&self) -> &GoalMapping {
        &self.goals
    }

    pub fn ecosystem_terms(&self) -> &EcosystemTerms {
        &self.ecosystems
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    providers: Vec<ServiceProvider>,
    goals: Option<BTreeMap<String, GoalProfile>>,
    ecosystems: Option<BTreeMap<String, EcosystemProfile>>,
}
