pub mod classify;
mod custom;
mod forex_factory;
mod news_api;
mod sample;
mod trading_economics;

use {
    crate::{
        config::PROVIDERS,
        domain::{EconomicEvent, NewsEvent},
        utils::today_utc,
    },
    anyhow::{Context, Result},
    async_trait::async_trait,
    chrono::{Duration, NaiveDate},
    serde_json::Value,
    strum_macros::{Display, EnumIter, EnumString},
};

pub use {
    custom::{CustomCalendarProvider, CustomFilters},
    forex_factory::ForexFactoryProvider,
    news_api::NewsApiProvider,
    sample::{SampleProvider, sample_economic_events, sample_news_events},
    trading_economics::TradingEconomicsProvider,
};

/// A source of upcoming economic releases.
#[async_trait]
pub trait EconomicCalendarProvider: Send + Sync {
    fn signature(&self) -> &'static str;
    /// Whether the provider has what it needs (key, endpoint) to be tried.
    fn is_configured(&self) -> bool;
    async fn fetch_events(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<EconomicEvent>>;
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    fn signature(&self) -> &'static str;
    fn is_configured(&self) -> bool;
    async fn fetch_news(&self) -> Result<Vec<NewsEvent>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum CalendarSource {
    /// Configured providers in order, then sample data
    #[default]
    Auto,
    TradingEconomics,
    #[strum(serialize = "rapidapi")]
    RapidApi,
    Custom,
    Sample,
}

pub(crate) fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(PROVIDERS.client.timeout_ms))
        .build()
        .context("Failed to build HTTP client")
}

/// Provider fields arrive as strings, numbers or null. Empty text counts as absent.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn provider_chain(filters: &CustomFilters) -> Vec<Box<dyn EconomicCalendarProvider>> {
    vec![
        Box::new(TradingEconomicsProvider::from_env()),
        Box::new(ForexFactoryProvider::from_env()),
        Box::new(CustomCalendarProvider::from_env(filters.clone())),
    ]
}

fn calendar_window() -> (NaiveDate, NaiveDate) {
    let today = today_utc();
    (
        today,
        today + Duration::days(PROVIDERS.client.calendar_window_days),
    )
}

/// Calendar for the coming week.
///
/// `Auto` walks the configured providers and settles on sample data when none answers.
/// An explicitly chosen provider that fails yields an empty calendar instead.
pub async fn fetch_economic_events(
    source: CalendarSource,
    filters: CustomFilters,
) -> Vec<EconomicEvent> {
    let (from, to) = calendar_window();

    let provider: Box<dyn EconomicCalendarProvider> = match source {
        CalendarSource::Auto => {
            for provider in provider_chain(&filters).iter().filter(|p| p.is_configured()) {
                match provider.fetch_events(from, to).await {
                    Ok(events) if !events.is_empty() => {
                        log::info!("{} events from {}", events.len(), provider.signature());
                        return events;
                    }
                    Ok(_) => log::warn!("{} returned no events", provider.signature()),
                    Err(e) => log::warn!("{} failed: {:#}", provider.signature(), e),
                }
            }
            log::warn!("No calendar provider answered, using sample events");
            return sample_economic_events();
        }
        CalendarSource::TradingEconomics => Box::new(TradingEconomicsProvider::from_env()),
        CalendarSource::RapidApi => Box::new(ForexFactoryProvider::from_env()),
        CalendarSource::Custom => Box::new(CustomCalendarProvider::from_env(filters)),
        CalendarSource::Sample => Box::new(SampleProvider),
    };

    match provider.fetch_events(from, to).await {
        Ok(events) => events,
        Err(e) => {
            log::error!("{} failed: {:#}", provider.signature(), e);
            Vec::new()
        }
    }
}

/// Headlines of the past week, or the bundled sample when the news API is unavailable.
pub async fn fetch_news_events() -> Vec<NewsEvent> {
    fetch_news_with(&NewsApiProvider::from_env()).await
}

pub async fn fetch_news_with(provider: &dyn NewsProvider) -> Vec<NewsEvent> {
    if !provider.is_configured() {
        log::info!("{} not configured, using sample news", provider.signature());
        return sample_news_events();
    }
    match provider.fetch_news().await {
        Ok(news) => news,
        Err(e) => {
            log::warn!("{} failed, using sample news: {:#}", provider.signature(), e);
            sample_news_events()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    struct BrokenNews;

    #[async_trait]
    impl NewsProvider for BrokenNews {
        fn signature(&self) -> &'static str {
            "broken"
        }
        fn is_configured(&self) -> bool {
            true
        }
        async fn fetch_news(&self) -> Result<Vec<NewsEvent>> {
            anyhow::bail!("connection refused")
        }
    }

    #[test]
    fn source_names_parse() {
        assert_eq!(CalendarSource::from_str("auto").unwrap(), CalendarSource::Auto);
        assert_eq!(
            CalendarSource::from_str("trading-economics").unwrap(),
            CalendarSource::TradingEconomics
        );
        assert_eq!(CalendarSource::from_str("rapidapi").unwrap(), CalendarSource::RapidApi);
        assert_eq!(CalendarSource::RapidApi.to_string(), "rapidapi");
        assert!(CalendarSource::from_str("bloomberg").is_err());
    }

    #[test]
    fn value_text_handles_mixed_types() {
        assert_eq!(value_text(&Value::Null), None);
        assert_eq!(value_text(&serde_json::json!("")), None);
        assert_eq!(value_text(&serde_json::json!("3.1%")).as_deref(), Some("3.1%"));
        assert_eq!(value_text(&serde_json::json!(1.5)).as_deref(), Some("1.5"));
    }

    #[tokio::test]
    async fn sample_source_never_touches_the_network() {
        let events = fetch_economic_events(CalendarSource::Sample, CustomFilters::default()).await;
        assert_eq!(events.len(), 5);
    }

    #[tokio::test]
    async fn failing_news_provider_falls_back_to_sample() {
        let news = fetch_news_with(&BrokenNews).await;
        assert_eq!(news, sample_news_events());
    }
}
