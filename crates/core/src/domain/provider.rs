use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProviderId(pub String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub features: Vec<String>,
}

/// An installation or monitoring company that products may link to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProvider {
    pub id: ProviderId,
    pub name: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub compatible_ecosystems: Vec<String>,
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default)]
    pub requires_contract: bool,
    /// Contract term in months, when one is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_length: Option<u32>,
    #[serde(default)]
    pub installation_fee: f64,
}

impl ServiceProvider {
    pub fn serves_location(&self, location: &str) -> bool {
        self.locations.iter().any(|code| code.eq_ignore_ascii_case(location))
    }

    pub fn supports_ecosystem(&self, ecosystem: &str) -> bool {
        self.compatible_ecosystems.iter().any(|tag| tag.eq_ignore_ascii_case(ecosystem))
    }

    /// Packages priced at or below `budget`, in authored order.
    pub fn affordable_packages(&self, budget: f64) -> Vec<Package> {
        self.packages.iter().filter(|package| package.price <= budget).cloned().collect()
    }
}
