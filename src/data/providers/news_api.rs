use {
    super::{NewsProvider, classify, http_client},
    crate::{
        config::{PROVIDERS, api_key},
        domain::NewsEvent,
        utils::{TimeUtils, date_to_string, today_utc},
    },
    anyhow::{Context, Result, bail},
    async_trait::async_trait,
    chrono::{DateTime, Duration},
    serde::Deserialize,
};

#[cfg(debug_assertions)]
use crate::config::DF;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
pub struct NewsApiSource {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiArticle {
    pub source: NewsApiSource,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published_at: String,
}

pub struct NewsApiProvider {
    api_key: Option<String>,
}

impl NewsApiProvider {
    pub fn from_env() -> Self {
        Self {
            api_key: api_key(PROVIDERS.endpoints.news_api_key_env),
        }
    }
}

pub fn map_articles(articles: Vec<NewsApiArticle>) -> Vec<NewsEvent> {
    articles
        .into_iter()
        .take(PROVIDERS.client.max_news_articles)
        .enumerate()
        .map(|(i, a)| {
            let description = a
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "No description available".to_string());
            let text = format!("{} {}", a.title, description);
            let (date, time) = match DateTime::parse_from_rfc3339(&a.published_at) {
                Ok(ts) => (
                    ts.format(TimeUtils::STANDARD_TIME_FORMAT).to_string(),
                    ts.format(TimeUtils::CLOCK_FORMAT).to_string(),
                ),
                Err(_) => (String::new(), String::new()),
            };
            NewsEvent {
                id: format!("api-{}", i),
                category: classify::news_category(&text),
                impact: classify::news_impact(&a.source.name),
                gold_impact: classify::news_gold_bias(&text),
                title: a.title,
                description,
                date,
                time,
            }
        })
        .collect()
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    fn signature(&self) -> &'static str {
        "newsapi"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_news(&self) -> Result<Vec<NewsEvent>> {
        let key = self
            .api_key
            .as_deref()
            .context("News API key not configured")?;

        let today = today_utc();
        let from = date_to_string(today - Duration::days(PROVIDERS.client.news_lookback_days));
        let to = date_to_string(today);
        let query = PROVIDERS.keywords.news_query.join(" OR ");

        #[cfg(debug_assertions)]
        if DF.log_providers {
            log::info!("Fetching headlines {} -> {}", from, to);
        }

        let response: NewsApiResponse = http_client()?
            .get(format!("{}/everything", PROVIDERS.endpoints.news_api_base_url))
            .query(&[
                ("q", query.as_str()),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("sortBy", "relevancy"),
                ("language", "en"),
                ("apiKey", key),
            ])
            .send()
            .await
            .context("News API request failed")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to decode News API response")?;

        if response.status != "ok" {
            bail!("News API returned status '{}'", response.status);
        }
        Ok(map_articles(response.articles))
    }
}
