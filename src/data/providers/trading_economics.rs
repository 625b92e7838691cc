use {
    super::{EconomicCalendarProvider, classify, http_client, value_text},
    crate::{
        config::{PROVIDERS, api_key},
        domain::{EconomicEvent, Impact},
        utils::date_to_string,
    },
    anyhow::{Context, Result},
    async_trait::async_trait,
    chrono::NaiveDate,
    serde::Deserialize,
    serde_json::Value,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// One row of the Trading Economics calendar feed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TeCalendarRow {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// "2024-01-22T13:30:00"
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub importance: Option<i64>,
    #[serde(default)]
    pub forecast: Value,
    #[serde(default)]
    pub previous: Value,
    #[serde(default)]
    pub actual: Value,
}

pub struct TradingEconomicsProvider {
    api_key: Option<String>,
}

impl TradingEconomicsProvider {
    pub fn from_env() -> Self {
        Self {
            api_key: api_key(PROVIDERS.endpoints.trading_economics_key_env),
        }
    }
}

/// Keep top-importance releases that matter for gold, capped.
pub fn map_rows(rows: Vec<TeCalendarRow>) -> Vec<EconomicEvent> {
    rows.into_iter()
        .filter(|r| r.importance == Some(3))
        .filter(|r| r.event.as_deref().is_some_and(classify::is_gold_relevant))
        .take(PROVIDERS.client.max_economic_events)
        .enumerate()
        .map(|(i, r)| {
            let name = r.event.unwrap_or_else(|| "Economic Event".to_string());
            let (date, time) = match r.date.as_deref().and_then(|d| d.split_once('T')) {
                Some((d, t)) => (d.to_string(), t.chars().take(5).collect()),
                None => (r.date.clone().unwrap_or_default(), String::new()),
            };
            EconomicEvent {
                id: format!("te-{}", i),
                country: r.country.unwrap_or_else(|| "US".to_string()),
                date,
                time,
                importance: Impact::High,
                forecast: value_text(&r.forecast),
                previous: value_text(&r.previous),
                actual: value_text(&r.actual),
                gold_impact: classify::gold_impact(&name),
                category: classify::category(&name),
                link: None,
                name,
            }
        })
        .collect()
}

#[async_trait]
impl EconomicCalendarProvider for TradingEconomicsProvider {
    fn signature(&self) -> &'static str {
        "trading-economics"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_events(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<EconomicEvent>> {
        let key = self
            .api_key
            .as_deref()
            .context("Trading Economics API key not configured")?;

        #[cfg(debug_assertions)]
        if DF.log_providers {
            log::info!("Fetching Trading Economics calendar {} -> {}", from, to);
        }

        let (start, end) = (date_to_string(from), date_to_string(to));
        let rows: Vec<TeCalendarRow> = http_client()?
            .get(PROVIDERS.endpoints.trading_economics_base_url)
            .query(&[
                ("country", "united states"),
                ("importance", "3"),
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("c", key),
            ])
            .send()
            .await
            .context("Trading Economics request failed")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to decode Trading Economics response")?;

        Ok(map_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_important_gold_events_only() {
        let rows: Vec<TeCalendarRow> = serde_json::from_str(
            r#"[
                {"Event": "Core CPI m/m", "Country": "United States", "Date": "2024-01-23T13:30:00",
                 "Importance": 3, "Forecast": "0.3%", "Previous": 0.2, "Actual": ""},
                {"Event": "Crude Oil Inventories", "Country": "United States", "Date": "2024-01-23T15:30:00",
                 "Importance": 3},
                {"Event": "FOMC Member Speaks", "Country": "United States", "Date": "2024-01-24T18:00:00",
                 "Importance": 2}
            ]"#,
        )
        .unwrap();

        let events = map_rows(rows);
        assert_eq!(events.len(), 1);
        let cpi = &events[0];
        assert_eq!(cpi.id, "te-0");
        assert_eq!(cpi.date, "2024-01-23");
        assert_eq!(cpi.time, "13:30");
        assert_eq!(cpi.importance, Impact::High);
        assert_eq!(cpi.forecast.as_deref(), Some("0.3%"));
        assert_eq!(cpi.previous.as_deref(), Some("0.2"));
        assert_eq!(cpi.actual, None);
        assert_eq!(cpi.category, crate::domain::EconomicCategory::Inflation);
    }
}
