//! Keyword rules turning event names and headlines into impact/category tags.

use crate::{
    config::PROVIDERS,
    domain::{EconomicCategory, GoldBias, Impact, NewsCategory},
};

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn contains_any_ci(text: &str, keywords: &[&str]) -> bool {
    let text = text.to_lowercase();
    keywords.iter().any(|k| text.contains(&k.to_lowercase()))
}

/// How hard a calendar release tends to move gold. Case-sensitive on the release name.
pub fn gold_impact(event_name: &str) -> Impact {
    if contains_any(event_name, PROVIDERS.keywords.high_impact) {
        Impact::High
    } else if contains_any(event_name, PROVIDERS.keywords.medium_impact) {
        Impact::Medium
    } else {
        Impact::Low
    }
}

/// Importance assumed for a release entered by hand when none is given.
pub fn importance_level(event_name: &str) -> Impact {
    if contains_any(event_name, PROVIDERS.keywords.high_importance) {
        Impact::High
    } else if contains_any(event_name, PROVIDERS.keywords.medium_importance) {
        Impact::Medium
    } else {
        Impact::Low
    }
}

pub fn category(event_name: &str) -> EconomicCategory {
    if contains_any(event_name, &["Federal Funds", "FOMC"]) {
        EconomicCategory::MonetaryPolicy
    } else if contains_any(event_name, &["Employment", "Unemployment"]) {
        EconomicCategory::Employment
    } else if contains_any(event_name, &["CPI", "Inflation", "PPI"]) {
        EconomicCategory::Inflation
    } else if event_name.contains("GDP") {
        EconomicCategory::Gdp
    } else {
        EconomicCategory::Other
    }
}

/// Release names worth keeping from a broad calendar feed.
pub fn is_gold_relevant(event_name: &str) -> bool {
    contains_any_ci(event_name, PROVIDERS.keywords.gold_calendar_keywords)
}

/// Impact rating used by the scraper and the custom endpoint ("High", "medium", ...).
pub fn impact_from_label(label: &str) -> Impact {
    match label.trim().to_lowercase().as_str() {
        "high" => Impact::High,
        "medium" => Impact::Medium,
        _ => Impact::Low,
    }
}

// Headlines: `text` is title + description

pub fn news_category(text: &str) -> NewsCategory {
    let text = text.to_lowercase();
    if contains_any(&text, &["election", "political", "government"]) {
        NewsCategory::Political
    } else if contains_any(&text, &["economic", "recession", "inflation", "federal reserve"]) {
        NewsCategory::Economic
    } else if contains_any(&text, &["geopolitical", "tension", "war", "sanctions"]) {
        NewsCategory::Geopolitical
    } else {
        NewsCategory::Other
    }
}

pub fn news_gold_bias(text: &str) -> GoldBias {
    let text = text.to_lowercase();
    if contains_any(&text, &["inflation", "crisis", "tension", "recession"]) {
        GoldBias::Bullish
    } else if contains_any(&text, &["strong economy", "rate hike", "dollar strength"]) {
        GoldBias::Bearish
    } else {
        GoldBias::Neutral
    }
}

pub fn news_impact(source_name: &str) -> Impact {
    if PROVIDERS.keywords.high_impact_sources.contains(&source_name) {
        Impact::High
    } else {
        Impact::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_rules() {
        assert_eq!(gold_impact("FOMC Statement"), Impact::High);
        assert_eq!(gold_impact("Retail Sales m/m"), Impact::Medium);
        assert_eq!(gold_impact("Crude Oil Inventories"), Impact::Low);

        assert_eq!(category("Federal Funds Rate"), EconomicCategory::MonetaryPolicy);
        assert_eq!(category("Non-Farm Employment Change"), EconomicCategory::Employment);
        assert_eq!(category("Core PPI m/m"), EconomicCategory::Inflation);
        assert_eq!(category("Advance GDP q/q"), EconomicCategory::Gdp);
        assert_eq!(category("Building Permits"), EconomicCategory::Other);

        assert_eq!(importance_level("ISM Services PMI"), Impact::Medium);
    }

    #[test]
    fn relevance_filter_ignores_case() {
        assert!(is_gold_relevant("core cpi m/m"));
        assert!(!is_gold_relevant("Natural Gas Storage"));
    }

    #[test]
    fn headline_rules_follow_priority() {
        // "election" wins over "inflation" for the category, "inflation" drives the bias.
        let text = "Election results stoke inflation fears";
        assert_eq!(news_category(text), NewsCategory::Political);
        assert_eq!(news_gold_bias(text), GoldBias::Bullish);
        assert_eq!(news_gold_bias("Dollar strength weighs on metals"), GoldBias::Bearish);
        assert_eq!(news_category("Company earnings beat"), NewsCategory::Other);
        assert_eq!(news_impact("Reuters"), Impact::High);
        assert_eq!(news_impact("Some Blog"), Impact::Medium);
    }

    #[test]
    fn impact_labels() {
        assert_eq!(impact_from_label("High"), Impact::High);
        assert_eq!(impact_from_label(" medium "), Impact::Medium);
        assert_eq!(impact_from_label("Non-Economic"), Impact::Low);
    }
}
