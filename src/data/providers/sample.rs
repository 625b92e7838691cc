use {
    crate::{
        domain::{EconomicCategory, EconomicEvent, GoldBias, Impact, NewsCategory, NewsEvent},
        utils::{date_to_string, days_from_today, today_utc},
    },
    anyhow::Result,
    async_trait::async_trait,
    chrono::NaiveDate,
};

use super::{EconomicCalendarProvider, NewsProvider};

/// Bundled events dated relative to today. Always available, never fails.
pub struct SampleProvider;

fn economic(
    id: &str,
    name: &str,
    days_ahead: i64,
    time: &str,
    importance: Impact,
    forecast: &str,
    previous: &str,
    gold_impact: Impact,
    category: EconomicCategory,
) -> EconomicEvent {
    let text = |s: &str| (!s.is_empty()).then(|| s.to_string());
    EconomicEvent {
        id: id.to_string(),
        name: name.to_string(),
        country: "US".to_string(),
        date: days_from_today(days_ahead),
        time: time.to_string(),
        importance,
        forecast: text(forecast),
        previous: text(previous),
        actual: None,
        gold_impact,
        category,
        link: None,
    }
}

pub fn sample_economic_events() -> Vec<EconomicEvent> {
    use crate::domain::{EconomicCategory::*, Impact::*};
    vec![
        economic(
            "sample-1",
            "Federal Funds Rate Decision",
            2,
            "19:00",
            High,
            "5.25%",
            "5.25%",
            High,
            MonetaryPolicy,
        ),
        economic(
            "sample-2",
            "Non-Farm Employment Change",
            4,
            "13:30",
            High,
            "180K",
            "199K",
            High,
            Employment,
        ),
        economic(
            "sample-3",
            "Consumer Price Index (CPI)",
            3,
            "13:30",
            High,
            "3.2%",
            "3.1%",
            High,
            Inflation,
        ),
        economic(
            "sample-4",
            "FOMC Meeting Minutes",
            5,
            "19:00",
            Medium,
            "",
            "",
            Medium,
            MonetaryPolicy,
        ),
        economic(
            "sample-5",
            "Advance GDP q/q",
            6,
            "13:30",
            High,
            "2.1%",
            "2.0%",
            Medium,
            Gdp,
        ),
    ]
}

pub fn sample_news_events() -> Vec<NewsEvent> {
    let today = date_to_string(today_utc());
    let news = |id: &str,
                title: &str,
                description: &str,
                time: &str,
                category,
                impact,
                gold_impact| NewsEvent {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        date: today.clone(),
        time: time.to_string(),
        category,
        impact,
        gold_impact,
    };
    vec![
        news(
            "sample-1",
            "Federal Reserve Signals Potential Rate Cuts",
            "Fed officials indicate possible monetary policy easing in response to economic data.",
            "14:00",
            NewsCategory::Economic,
            Impact::High,
            GoldBias::Bullish,
        ),
        news(
            "sample-2",
            "Geopolitical Tensions Rise in Middle East",
            "Escalating conflicts affecting global markets and safe-haven demand.",
            "09:00",
            NewsCategory::Geopolitical,
            Impact::High,
            GoldBias::Bullish,
        ),
        news(
            "sample-3",
            "Political Uncertainty in Major Economies",
            "Election outcomes and policy changes creating market volatility.",
            "12:00",
            NewsCategory::Political,
            Impact::Medium,
            GoldBias::Neutral,
        ),
    ]
}

#[async_trait]
impl EconomicCalendarProvider for SampleProvider {
    fn signature(&self) -> &'static str {
        "sample"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn fetch_events(&self, _from: NaiveDate, _to: NaiveDate) -> Result<Vec<EconomicEvent>> {
        Ok(sample_economic_events())
    }
}

#[async_trait]
impl NewsProvider for SampleProvider {
    fn signature(&self) -> &'static str {
        "sample"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn fetch_news(&self) -> Result<Vec<NewsEvent>> {
        Ok(sample_news_events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_date;

    #[test]
    fn sample_calendar_lies_in_the_coming_week() {
        let today = today_utc();
        let events = sample_economic_events();
        assert_eq!(events.len(), 5);
        for e in &events {
            let d = parse_date(&e.date).unwrap();
            assert!(d > today && d <= today + chrono::Duration::days(7));
        }
        assert!(events[3].forecast.is_none());
    }

    #[test]
    fn sample_news_is_dated_today() {
        let today = date_to_string(today_utc());
        assert!(sample_news_events().iter().all(|n| n.date == today));
    }
}
