use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::recommend::Recommendation;

pub const DEFAULT_PRICE_RANGE: (f64, f64) = (0.0, 1000.0);

/// User-selected facets applied on top of a loaded result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Inclusive `(min, max)` bounds.
    pub price_range: (f64, f64),
    pub compatibility: BTreeSet<String>,
    pub brands: BTreeSet<String>,
    pub show_contract: bool,
    pub show_no_contract: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_price_range(DEFAULT_PRICE_RANGE.0, DEFAULT_PRICE_RANGE.1)
    }
}

impl FilterState {
    /// Default facets with custom price bounds; reversed bounds are swapped.
    pub fn with_price_range(min: f64, max: f64) -> Self {
        Self {
            price_range: ordered(min, max),
            compatibility: BTreeSet::new(),
            brands: BTreeSet::new(),
            show_contract: true,
            show_no_contract: true,
        }
    }

    /// All active predicates, checked in order. Entries without a product
    /// never match.
    pub fn matches(&self, entry: &Recommendation) -> bool {
        let Some(product) = &entry.product else {
            return false;
        };

        let (min, max) = self.price_range;
        if product.price < min || product.price > max {
            return false;
        }
        if !self.compatibility.is_empty() && !product.shares_compatibility(&self.compatibility) {
            return false;
        }
        if !self.brands.is_empty() && !self.brands.contains(&product.brand) {
            return false;
        }
        if entry.contract_required {
            self.show_contract
        } else {
            self.show_no_contract
        }
    }
}

pub(super) fn ordered(min: f64, max: f64) -> (f64, f64) {
    if min <= max {
        (min, max)
    } else {
        (max, min)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    All,
    Category(String),
    Providers,
}

impl FromStr for Tab {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim() {
            "" | "all" => Self::All,
            "providers" => Self::Providers,
            category => Self::Category(category.to_owned()),
        })
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(category) => f.write_str(category),
            Self::Providers => f.write_str("providers"),
        }
    }
}
