use crate::catalog::{EcosystemProfile, EcosystemTerms, GoalMapping, GoalProfile};
use crate::domain::product::{price_range_label, Product, ProductId};
use crate::domain::provider::{Package, ProviderId, ServiceProvider};

#[derive(Debug, Clone, Copy)]
struct ProductSeed {
    id: &'static str,
    name: &'static str,
    brand: &'static str,
    category: &'static str,
    sub_category: &'static str,
    price: f64,
    features: &'static [&'static str],
    compatibility: &'static [&'static str],
    ecosystems: &'static [&'static str],
    service_provider: Option<&'static str>,
    rating: f64,
    review_count: u32,
}

const PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "ring-video-doorbell",
        name: "Video Doorbell (2nd Gen)",
        brand: "Ring",
        category: "security",
        sub_category: "doorbells",
        price: 99.99,
        features: &["DIY easy setup in minutes", "Motion-activated alerts", "Two-way talk"],
        compatibility: &["Works with Alexa", "Amazon Sidewalk"],
        ecosystems: &["alexa"],
        service_provider: None,
        rating: 4.5,
        review_count: 48_211,
    },
    ProductSeed {
        id: "arlo-pro-camera",
        name: "Pro 5S 2K Camera",
        brand: "Arlo",
        category: "security",
        sub_category: "cameras",
        price: 179.99,
        features: &["Wire-free easy setup", "2K HDR video", "Color night vision", "Motion detection"],
        compatibility: &["Works with Alexa", "Google Assistant", "Apple HomeKit"],
        ecosystems: &["alexa", "google", "apple"],
        service_provider: None,
        rating: 4.3,
        review_count: 9_874,
    },
    ProductSeed {
        id: "august-smart-lock",
        name: "Wi-Fi Smart Lock",
        brand: "August",
        category: "security",
        sub_category: "smart-locks",
        price: 229.99,
        features: &["DIY install in 10 minutes", "Auto-lock and unlock", "Remote access"],
        compatibility: &["Works with Alexa", "Google Assistant", "Apple HomeKit"],
        ecosystems: &["alexa", "google", "apple"],
        service_provider: None,
        rating: 4.2,
        review_count: 12_530,
    },
    ProductSeed {
        id: "simplisafe-essentials",
        name: "Essentials Security Kit",
        brand: "SimpliSafe",
        category: "security",
        sub_category: "alarm-systems",
        price: 249.99,
        features: &["Self-install kit", "Optional 24/7 monitoring", "Entry sensors"],
        compatibility: &["Works with Alexa", "Google Assistant"],
        ecosystems: &["alexa", "google"],
        service_provider: None,
        rating: 4.6,
        review_count: 21_007,
    },
    ProductSeed {
        id: "guardian-pro-alarm",
        name: "Pro Alarm System",
        brand: "Guardian Home",
        category: "security",
        sub_category: "alarm-systems",
        price: 199.0,
        features: &["Professional installation included", "24/7 professional monitoring", "Cellular backup"],
        compatibility: &["Works with Alexa", "Google Assistant"],
        ecosystems: &["alexa", "google"],
        service_provider: Some("guardian-home"),
        rating: 4.1,
        review_count: 3_412,
    },
    ProductSeed {
        id: "vantage-outdoor-camera",
        name: "Outdoor Camera Pro",
        brand: "Vantage",
        category: "security",
        sub_category: "cameras",
        price: 299.0,
        features: &["Professional installation", "Smart deter lighting", "24/7 monitoring"],
        compatibility: &["Works with Alexa", "Google Assistant"],
        ecosystems: &["alexa", "google"],
        service_provider: Some("vantage-smart-home"),
        rating: 4.0,
        review_count: 1_986,
    },
    ProductSeed {
        id: "nest-learning-thermostat",
        name: "Learning Thermostat (4th Gen)",
        brand: "Google Nest",
        category: "climate",
        sub_category: "thermostats",
        price: 249.0,
        features: &["Learns your schedule", "Energy savings reports", "Easy setup"],
        compatibility: &["Google Assistant", "Works with Alexa"],
        ecosystems: &["google", "alexa"],
        service_provider: None,
        rating: 4.6,
        review_count: 30_118,
    },
    ProductSeed {
        id: "ecobee-smart-thermostat",
        name: "Smart Thermostat Premium",
        brand: "ecobee",
        category: "climate",
        sub_category: "thermostats",
        price: 219.99,
        features: &["Built-in Alexa", "Room sensors", "Energy savings up to 26%"],
        compatibility: &["Works with Alexa", "Apple HomeKit", "Google Assistant", "SmartThings"],
        ecosystems: &["alexa", "apple", "google", "smartthings"],
        service_provider: None,
        rating: 4.5,
        review_count: 14_602,
    },
    ProductSeed {
        id: "kasa-smart-plug",
        name: "Smart Plug Mini (4-pack)",
        brand: "TP-Link Kasa",
        category: "energy",
        sub_category: "smart-plugs",
        price: 24.99,
        features: &["Energy monitoring", "Schedules and timers", "Easy setup"],
        compatibility: &["Works with Alexa", "Google Assistant", "SmartThings"],
        ecosystems: &["alexa", "google", "smartthings"],
        service_provider: None,
        rating: 4.7,
        review_count: 88_490,
    },
    ProductSeed {
        id: "sense-energy-monitor",
        name: "Home Energy Monitor",
        brand: "Sense",
        category: "energy",
        sub_category: "energy-monitors",
        price: 299.0,
        features: &["Professional installation recommended", "Real-time energy usage"],
        compatibility: &["Works with Alexa", "Google Assistant"],
        ecosystems: &["alexa", "google"],
        service_provider: Some("brightpath-electric"),
        rating: 4.0,
        review_count: 2_744,
    },
    ProductSeed {
        id: "philips-hue-starter",
        name: "White and Color Starter Kit",
        brand: "Philips Hue",
        category: "lighting",
        sub_category: "smart-bulbs",
        price: 179.99,
        features: &["Millions of colors", "Schedules and scenes", "Easy setup with bridge"],
        compatibility: &["Works with Alexa", "Google Assistant", "Apple HomeKit", "SmartThings", "Matter"],
        ecosystems: &["alexa", "google", "apple", "smartthings"],
        service_provider: None,
        rating: 4.7,
        review_count: 41_305,
    },
    ProductSeed {
        id: "lutron-caseta-switch",
        name: "Caseta Smart Dimmer Kit",
        brand: "Lutron",
        category: "lighting",
        sub_category: "switches",
        price: 99.95,
        features: &["Professional installation optional", "Dimmer control", "Geofencing"],
        compatibility: &["Works with Alexa", "Apple HomeKit", "Google Assistant"],
        ecosystems: &["alexa", "apple", "google"],
        service_provider: None,
        rating: 4.8,
        review_count: 19_223,
    },
    ProductSeed {
        id: "sonos-era-100",
        name: "Era 100",
        brand: "Sonos",
        category: "entertainment",
        sub_category: "speakers",
        price: 249.0,
        features: &["Built-in voice control", "Trueplay tuning", "Easy setup"],
        compatibility: &["Works with Alexa", "Apple AirPlay 2"],
        ecosystems: &["alexa", "apple"],
        service_provider: None,
        rating: 4.6,
        review_count: 7_751,
    },
    ProductSeed {
        id: "echo-show-8",
        name: "Echo Show 8",
        brand: "Amazon",
        category: "entertainment",
        sub_category: "smart-displays",
        price: 149.99,
        features: &["Built-in Alexa", "Video calling", "Smart home hub"],
        compatibility: &["Works with Alexa", "Zigbee", "Matter"],
        ecosystems: &["alexa"],
        service_provider: None,
        rating: 4.6,
        review_count: 65_120,
    },
    ProductSeed {
        id: "homepod-mini",
        name: "HomePod mini",
        brand: "Apple",
        category: "entertainment",
        sub_category: "speakers",
        price: 99.0,
        features: &["Siri voice control", "Home hub", "Easy setup"],
        compatibility: &["Apple HomeKit", "Thread", "Matter"],
        ecosystems: &["apple"],
        service_provider: None,
        rating: 4.7,
        review_count: 25_880,
    },
    ProductSeed {
        id: "eero-pro-6e",
        name: "Pro 6E Mesh System",
        brand: "eero",
        category: "networking",
        sub_category: "mesh-wifi",
        price: 299.0,
        features: &["Mesh WiFi coverage up to 6,000 sq ft", "Easy setup", "Built-in Zigbee hub"],
        compatibility: &["Works with Alexa", "Zigbee", "Matter"],
        ecosystems: &["alexa"],
        service_provider: None,
        rating: 4.4,
        review_count: 6_430,
    },
    ProductSeed {
        id: "nest-wifi-pro",
        name: "Wifi Pro 6E",
        brand: "Google Nest",
        category: "networking",
        sub_category: "mesh-wifi",
        price: 199.99,
        features: &["Mesh WiFi 6E coverage", "Thread border router", "Easy setup"],
        compatibility: &["Google Assistant", "Thread", "Matter"],
        ecosystems: &["google"],
        service_provider: None,
        rating: 4.3,
        review_count: 4_902,
    },
];

#[derive(Debug, Clone, Copy)]
struct ProviderSeed {
    id: &'static str,
    name: &'static str,
    locations: &'static [&'static str],
    services: &'static [&'static str],
    compatible_ecosystems: &'static [&'static str],
    packages: &'static [(&'static str, f64, &'static [&'static str])],
    requires_contract: bool,
    contract_length: Option<u32>,
    installation_fee: f64,
}

const PROVIDER_SEEDS: &[ProviderSeed] = &[
    ProviderSeed {
        id: "guardian-home",
        name: "Guardian Home Security",
        locations: &["CA", "NY", "TX", "FL", "WA"],
        services: &["security", "monitoring", "installation"],
        compatible_ecosystems: &["alexa", "google"],
        packages: &[
            ("Basic Monitoring", 29.99, &["24/7 monitoring", "Mobile app"]),
            ("Interactive", 44.99, &["24/7 monitoring", "Smart home automation"]),
            ("Premium Video", 59.99, &["24/7 monitoring", "Video verification", "Cloud storage"]),
        ],
        requires_contract: true,
        contract_length: Some(36),
        installation_fee: 99.0,
    },
    ProviderSeed {
        id: "vantage-smart-home",
        name: "Vantage Smart Home",
        locations: &["CA", "AZ", "NV", "TX", "UT"],
        services: &["security", "automation", "installation"],
        compatible_ecosystems: &["alexa", "google", "apple"],
        packages: &[
            ("Smart Security", 39.99, &["Alarm monitoring", "Door sensors"]),
            ("Smart Home", 59.99, &["Alarm monitoring", "Lighting automation", "Thermostat control"]),
            ("Ultimate", 89.99, &["Everything in Smart Home", "Outdoor cameras", "Priority support"]),
        ],
        requires_contract: true,
        contract_length: Some(60),
        installation_fee: 199.0,
    },
    ProviderSeed {
        id: "brightpath-electric",
        name: "BrightPath Electric",
        locations: &["CA", "OR", "WA"],
        services: &["energy", "lighting", "installation"],
        compatible_ecosystems: &["alexa", "google", "smartthings"],
        packages: &[
            ("Single Device Install", 149.0, &["One device", "Same-week scheduling"]),
            ("Whole Home Energy", 349.0, &["Panel monitor install", "Energy audit"]),
        ],
        requires_contract: false,
        contract_length: None,
        installation_fee: 0.0,
    },
    ProviderSeed {
        id: "homeconnect-installers",
        name: "HomeConnect Installers",
        locations: &["CA", "NY", "TX", "FL", "IL", "WA", "MA"],
        services: &["installation", "networking", "entertainment", "lighting"],
        compatible_ecosystems: &["alexa", "google", "apple", "smartthings"],
        packages: &[
            ("Standard Setup", 99.0, &["Up to 3 devices", "Network check"]),
            ("Whole Home Setup", 249.0, &["Up to 10 devices", "Mesh WiFi tuning"]),
            ("Concierge", 499.0, &["Unlimited devices", "Follow-up visit"]),
        ],
        requires_contract: false,
        contract_length: None,
        installation_fee: 0.0,
    },
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

pub(super) fn products() -> Vec<Product> {
    PRODUCT_SEEDS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_owned(),
            brand: seed.brand.to_owned(),
            category: seed.category.to_owned(),
            sub_category: seed.sub_category.to_owned(),
            price: seed.price,
            price_range: price_range_label(seed.price).to_owned(),
            features: owned(seed.features),
            compatibility: owned(seed.compatibility),
            ecosystems: owned(seed.ecosystems),
            service_provider: seed.service_provider.map(ProviderId::new),
            rating: seed.rating,
            review_count: seed.review_count,
            affiliate_url: format!("https://shop.example.com/go/{}", seed.id),
        })
        .collect()
}

pub(super) fn providers() -> Vec<ServiceProvider> {
    PROVIDER_SEEDS
        .iter()
        .map(|seed| ServiceProvider {
            id: ProviderId::new(seed.id),
            name: seed.name.to_owned(),
            locations: owned(seed.locations),
            services: owned(seed.services),
            compatible_ecosystems: owned(seed.compatible_ecosystems),
            packages: seed
                .packages
                .iter()
                .map(|(name, price, features)| Package {
                    name: (*name).to_owned(),
                    price: *price,
                    features: owned(features),
                })
                .collect(),
            requires_contract: seed.requires_contract,
            contract_length: seed.contract_length,
            installation_fee: seed.installation_fee,
        })
        .collect()
}

pub(super) fn goal_mapping() -> GoalMapping {
    let goal = |categories: &[&str], sub_categories: &[&str], keywords: &[&str]| GoalProfile {
        categories: owned(categories),
        sub_categories: owned(sub_categories),
        keywords: owned(keywords),
    };

    GoalMapping::new()
        .with_goal(
            "security",
            goal(
                &["security"],
                &["cameras", "doorbells", "smart-locks", "alarm-systems"],
                &["security", "motion", "alarm", "lock", "camera", "monitoring", "night vision"],
            ),
        )
        .with_goal(
            "energy",
            goal(
                &["energy", "climate"],
                &["thermostats", "smart-plugs", "energy-monitors"],
                &["energy", "schedule", "savings", "usage"],
            ),
        )
        .with_goal(
            "convenience",
            goal(
                &["lighting", "entertainment"],
                &["smart-bulbs", "switches", "smart-displays"],
                &["voice", "schedule", "remote", "scenes", "hub"],
            ),
        )
        .with_goal(
            "entertainment",
            goal(&["entertainment"], &["speakers", "smart-displays"], &["audio", "voice", "video", "airplay"]),
        )
        .with_goal("lighting", goal(&["lighting"], &["smart-bulbs", "switches"], &["dimmer", "colors", "scenes"]))
        .with_goal(
            "networking",
            goal(&["networking"], &["mesh-wifi", "routers"], &["wifi", "mesh", "coverage", "thread"]),
        )
}

pub(super) fn ecosystem_terms() -> EcosystemTerms {
    let ecosystem = |display_name: &str, terms: &[&str]| EcosystemProfile {
        display_name: display_name.to_owned(),
        terms: owned(terms),
    };

    EcosystemTerms::new()
        .with_ecosystem("alexa", ecosystem("Alexa", &["Alexa", "Amazon"]))
        .with_ecosystem("google", ecosystem("Google", &["Google"]))
        .with_ecosystem("apple", ecosystem("Apple HomeKit", &["HomeKit", "Apple"]))
        .with_ecosystem("smartthings", ecosystem("SmartThings", &["SmartThings"]))
}
