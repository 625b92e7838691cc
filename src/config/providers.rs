pub struct ClientDefaults {
    pub timeout_ms: u64,
    /// Days covered by a calendar fetch, starting today
    pub calendar_window_days: i64,
    /// Days of headlines looked back over
    pub news_lookback_days: i64,
    pub max_economic_events: usize,
    pub max_news_articles: usize,
}

/// Base URLs and the environment variables holding each provider's key.
pub struct Endpoints {
    pub news_api_base_url: &'static str,
    pub news_api_key_env: &'static str,
    pub trading_economics_base_url: &'static str,
    pub trading_economics_key_env: &'static str,
    pub rapidapi_forex_factory_base_url: &'static str,
    pub rapidapi_forex_factory_host: &'static str,
    pub rapidapi_forex_factory_key_env: &'static str,
    pub custom_calendar_url_env: &'static str,
    pub custom_calendar_default_url: &'static str,
}

pub struct KeywordLists {
    /// Event names that move gold, used to filter Trading Economics results
    pub gold_calendar_keywords: &'static [&'static str],
    pub high_impact: &'static [&'static str],
    pub medium_impact: &'static [&'static str],
    pub high_importance: &'static [&'static str],
    pub medium_importance: &'static [&'static str],
    /// Search terms OR-ed together for the news query
    pub news_query: &'static [&'static str],
    pub high_impact_sources: &'static [&'static str],
}

pub struct ProvidersConfig {
    pub client: ClientDefaults,
    pub endpoints: Endpoints,
    pub keywords: KeywordLists,
}

pub const PROVIDERS: ProvidersConfig = ProvidersConfig {
    client: ClientDefaults {
        timeout_ms: 10_000,
        calendar_window_days: 7,
        news_lookback_days: 7,
        max_economic_events: 15,
        max_news_articles: 10,
    },
    endpoints: Endpoints {
        news_api_base_url: "https://newsapi.org/v2",
        news_api_key_env: "NEWS_API_KEY",
        trading_economics_base_url: "https://api.tradingeconomics.com/calendar",
        trading_economics_key_env: "TRADING_ECONOMICS_API_KEY",
        rapidapi_forex_factory_base_url: "https://forex-factory-scraper1.p.rapidapi.com/get_calendar_details",
        rapidapi_forex_factory_host: "forex-factory-scraper1.p.rapidapi.com",
        rapidapi_forex_factory_key_env: "RAPIDAPI_FOREX_FACTORY_KEY",
        custom_calendar_url_env: "CUSTOM_ECONOMIC_CALENDAR_API_URL",
        custom_calendar_default_url: "http://localhost/economic-calendar-api-master/index.php",
    },
    keywords: KeywordLists {
        gold_calendar_keywords: &[
            "Federal Reserve",
            "FOMC",
            "Non-Farm Payrolls",
            "Unemployment",
            "CPI",
            "Inflation",
            "GDP",
            "PPI",
            "Retail Sales",
            "ISM",
            "Treasury",
            "Interest Rate",
        ],
        high_impact: &["Federal Funds Rate", "FOMC", "Non-Farm Employment", "CPI", "GDP"],
        medium_impact: &["Unemployment", "Retail Sales", "ISM", "PPI", "Treasury"],
        high_importance: &["Federal Funds Rate", "FOMC", "Non-Farm Employment", "CPI", "GDP"],
        medium_importance: &["Unemployment", "Retail Sales", "ISM", "PPI"],
        news_query: &[
            "federal reserve",
            "central bank",
            "monetary policy",
            "economic crisis",
            "recession",
            "inflation",
            "geopolitical tension",
            "trade war",
            "sanctions",
            "election",
            "political crisis",
            "gold price",
            "commodities",
            "forex market",
        ],
        high_impact_sources: &[
            "Reuters",
            "Bloomberg",
            "Financial Times",
            "Wall Street Journal",
            "CNBC",
        ],
    },
};

/// Reads a provider key from the environment. Empty values count as unset.
pub fn api_key(env_name: &str) -> Option<String> {
    std::env::var(env_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
