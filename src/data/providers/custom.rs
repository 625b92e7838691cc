use {
    super::{EconomicCalendarProvider, classify, http_client, value_text},
    crate::{
        config::PROVIDERS,
        domain::EconomicEvent,
    },
    anyhow::{Context, Result},
    async_trait::async_trait,
    chrono::NaiveDate,
    serde::Deserialize,
    serde_json::Value,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Optional query filters forwarded to the self-hosted calendar endpoint.
#[derive(Debug, Clone, Default)]
pub struct CustomFilters {
    pub currency: Option<String>,
    pub importance: Option<String>,
    pub event: Option<String>,
}

impl CustomFilters {
    fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("currency", self.currency.as_deref()),
            ("importance", self.importance.as_deref()),
            ("event", self.event.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct CustomResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub events: Vec<CustomRow>,
}

#[derive(Debug, Deserialize)]
pub struct CustomRow {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub importance: Option<String>,
    #[serde(default)]
    pub forecast: Value,
    #[serde(default)]
    pub previous: Value,
    #[serde(default)]
    pub actual: Value,
    #[serde(default, alias = "Link")]
    pub link: Option<String>,
}

pub struct CustomCalendarProvider {
    url: String,
    filters: CustomFilters,
}

impl CustomCalendarProvider {
    /// Endpoint from the environment, else the local default.
    pub fn from_env(filters: CustomFilters) -> Self {
        let url = crate::config::api_key(PROVIDERS.endpoints.custom_calendar_url_env)
            .unwrap_or_else(|| PROVIDERS.endpoints.custom_calendar_default_url.to_string());
        Self { url, filters }
    }

    pub fn explicitly_configured() -> bool {
        crate::config::api_key(PROVIDERS.endpoints.custom_calendar_url_env).is_some()
    }
}

/// Only a `parsed` response carries events; every other status is an empty calendar.
pub fn map_response(response: CustomResponse) -> Vec<EconomicEvent> {
    if response.status != "parsed" {
        return Vec::new();
    }
    response
        .events
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            let name = r.event.unwrap_or_else(|| "Economic Event".to_string());
            let importance =
                classify::impact_from_label(r.importance.as_deref().unwrap_or_default());
            EconomicEvent {
                id: format!("custom-{}", i),
                country: r.currency.unwrap_or_default(),
                date: r.date.unwrap_or_default(),
                time: r.time.unwrap_or_default(),
                importance,
                forecast: value_text(&r.forecast),
                previous: value_text(&r.previous),
                actual: value_text(&r.actual),
                gold_impact: importance,
                category: classify::category(&name),
                link: r.link.filter(|l| !l.is_empty()),
                name,
            }
        })
        .collect()
}

#[async_trait]
impl EconomicCalendarProvider for CustomCalendarProvider {
    fn signature(&self) -> &'static str {
        "custom"
    }

    fn is_configured(&self) -> bool {
        Self::explicitly_configured()
    }

    async fn fetch_events(&self, _from: NaiveDate, _to: NaiveDate) -> Result<Vec<EconomicEvent>> {
        #[cfg(debug_assertions)]
        if DF.log_providers {
            log::info!("Fetching custom calendar from {}", self.url);
        }

        let response: CustomResponse = http_client()?
            .get(&self.url)
            .query(&self.filters.query_pairs())
            .send()
            .await
            .with_context(|| format!("Custom calendar request to {} failed", self.url))?
            .error_for_status()?
            .json()
            .await
            .context("Failed to decode custom calendar response")?;

        Ok(map_response(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Impact;

    #[test]
    fn unparsed_status_yields_nothing() {
        let response: CustomResponse =
            serde_json::from_str(r#"{"status": "error", "events": [{"event": "CPI"}]}"#).unwrap();
        assert!(map_response(response).is_empty());
    }

    #[test]
    fn importance_drives_gold_impact() {
        let response: CustomResponse = serde_json::from_str(
            r#"{"status": "parsed", "events": [
                {"event": "Federal Funds Rate", "currency": "USD", "date": "2024-01-31",
                 "time": "19:00", "importance": "HIGH", "forecast": "5.50%"},
                {"event": "Pending Home Sales", "currency": "USD", "importance": "low"}
            ]}"#,
        )
        .unwrap();
        let events = map_response(response);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "custom-0");
        assert_eq!(events[0].country, "USD");
        assert_eq!(events[0].gold_impact, Impact::High);
        assert_eq!(events[1].gold_impact, Impact::Low);
    }

    #[test]
    fn only_set_filters_are_sent() {
        let filters = CustomFilters {
            currency: Some("USD".to_string()),
            importance: None,
            event: Some("CPI".to_string()),
        };
        assert_eq!(filters.query_pairs(), vec![("currency", "USD"), ("event", "CPI")]);
    }
}
