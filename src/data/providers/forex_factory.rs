use {
    super::{EconomicCalendarProvider, classify, http_client, value_text},
    crate::{
        config::{PROVIDERS, api_key},
        domain::EconomicEvent,
    },
    anyhow::{Context, Result},
    async_trait::async_trait,
    chrono::{Datelike, NaiveDate},
    serde::Deserialize,
    serde_json::Value,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Row returned by the Forex Factory scraper on RapidAPI.
#[derive(Debug, Deserialize)]
pub struct ScraperRow {
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub forecast: Value,
    #[serde(default)]
    pub previous: Value,
    #[serde(default)]
    pub actual: Value,
    #[serde(default, alias = "Link")]
    pub link: Option<String>,
}

pub struct ForexFactoryProvider {
    api_key: Option<String>,
}

impl ForexFactoryProvider {
    pub fn from_env() -> Self {
        Self {
            api_key: api_key(PROVIDERS.endpoints.rapidapi_forex_factory_key_env),
        }
    }
}

pub fn map_rows(rows: Vec<ScraperRow>) -> Vec<EconomicEvent> {
    rows.into_iter()
        .take(PROVIDERS.client.max_economic_events)
        .enumerate()
        .map(|(i, r)| {
            let name = r.event_name.unwrap_or_else(|| "Economic Event".to_string());
            EconomicEvent {
                id: format!("rapidapi-{}", i),
                country: r.country.unwrap_or_else(|| "US".to_string()),
                date: r.date.unwrap_or_default(),
                time: r.time.unwrap_or_default(),
                importance: classify::impact_from_label(r.impact.as_deref().unwrap_or_default()),
                forecast: value_text(&r.forecast),
                previous: value_text(&r.previous),
                actual: value_text(&r.actual),
                gold_impact: classify::gold_impact(&name),
                category: classify::category(&name),
                link: r.link.filter(|l| !l.is_empty()),
                name,
            }
        })
        .collect()
}

#[async_trait]
impl EconomicCalendarProvider for ForexFactoryProvider {
    fn signature(&self) -> &'static str {
        "rapidapi"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// The scraper is queried for a single day: `from`.
    async fn fetch_events(&self, from: NaiveDate, _to: NaiveDate) -> Result<Vec<EconomicEvent>> {
        let key = self
            .api_key
            .as_deref()
            .context("RapidAPI Forex Factory key not configured")?;

        #[cfg(debug_assertions)]
        if DF.log_providers {
            log::info!("Fetching Forex Factory calendar for {}", from);
        }

        let (year, month, day) = (
            from.year().to_string(),
            from.month().to_string(),
            from.day().to_string(),
        );
        let body: Value = http_client()?
            .get(PROVIDERS.endpoints.rapidapi_forex_factory_base_url)
            .header("x-rapidapi-key", key)
            .header("x-rapidapi-host", PROVIDERS.endpoints.rapidapi_forex_factory_host)
            .query(&[
                ("year", year.as_str()),
                ("month", month.as_str()),
                ("day", day.as_str()),
                ("currency", "ALL"),
                ("event_name", "ALL"),
                ("timezone", "GMT-06:00 Central Time (US & Canada)"),
                ("time_format", "12h"),
            ])
            .send()
            .await
            .context("Forex Factory request failed")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to decode Forex Factory response")?;

        // Anything but a list means no events for the day
        if !body.is_array() {
            return Ok(Vec::new());
        }
        let rows: Vec<ScraperRow> = serde_json::from_value(body)?;
        Ok(map_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EconomicCategory, Impact};

    #[test]
    fn maps_impact_and_link() {
        let rows: Vec<ScraperRow> = serde_json::from_str(
            r#"[
                {"event_name": "Unemployment Rate", "country": "USD", "date": "2024-01-26",
                 "time": "8:30am", "impact": "High", "forecast": "3.8%", "previous": "3.7%",
                 "Link": "https://example.test/ev/1"},
                {"event_name": "Bank Holiday", "impact": "Non-Economic"}
            ]"#,
        )
        .unwrap();

        let events = map_rows(rows);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].importance, Impact::High);
        assert_eq!(events[0].gold_impact, Impact::Medium);
        assert_eq!(events[0].category, EconomicCategory::Employment);
        assert_eq!(events[0].link.as_deref(), Some("https://example.test/ev/1"));
        assert_eq!(events[1].importance, Impact::Low);
        assert_eq!(events[1].country, "US");
    }

    #[test]
    fn caps_at_configured_maximum() {
        let rows = (0..40)
            .map(|_| ScraperRow {
                event_name: Some("CPI".to_string()),
                country: None,
                date: None,
                time: None,
                impact: None,
                forecast: Value::Null,
                previous: Value::Null,
                actual: Value::Null,
                link: None,
            })
            .collect();
        assert_eq!(map_rows(rows).len(), PROVIDERS.client.max_economic_events);
    }
}
