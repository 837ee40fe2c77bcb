use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, ReqwestHttpClient};
use crate::provider::{MarketDataProvider, ProviderError};
use crate::{
    format_iso_date, AggregateBar, CompanyDetails, Credential, DateRange, FinancialSnapshot,
    Symbol,
};

/// Upper bound on `next_url` hops for one aggregates query.
const MAX_AGGREGATE_PAGES: usize = 500;
/// Polygon caps aggregate pages at 50 000 results.
const AGGREGATE_PAGE_LIMIT: &str = "50000";
const ERROR_EXCERPT_CHARS: usize = 200;

/// Polygon.io REST adapter.
///
/// Ticker details, previous close and aggregates authenticate with a bearer
/// header. The financial statements lookup is a direct request that passes
/// the key as the `apiKey` query parameter.
#[derive(Clone)]
pub struct PolygonProvider {
    http_client: Arc<dyn HttpClient>,
    config: ProviderConfig,
}

impl Default for PolygonProvider {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}

impl PolygonProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let http_client = Arc::new(ReqwestHttpClient::new(&config.user_agent));
        Self {
            http_client,
            config,
        }
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: ProviderConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn request(&self, path: &str) -> HttpRequest {
        HttpRequest::get(self.config.endpoint(path)).with_timeout_ms(self.config.timeout_ms)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ProviderError> {
        debug!(endpoint = request.endpoint(), "polygon request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| {
                ProviderError::transport(format!("polygon transport error: {}", error.message()))
            })?;

        if !response.is_success() {
            return Err(status_error(response.status, &response.body));
        }

        serde_json::from_str(&response.body).map_err(|error| {
            ProviderError::decode(format!("failed to parse polygon response: {error}"))
        })
    }
}

impl MarketDataProvider for PolygonProvider {
    fn ticker_details<'a>(
        &'a self,
        symbol: &'a Symbol,
        credential: &'a Credential,
    ) -> Pin<Box<dyn Future<Output = Result<CompanyDetails, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let path = format!(
                "/v3/reference/tickers/{}",
                urlencoding::encode(symbol.as_str())
            );
            let request = self.request(&path).with_auth(&bearer(credential));
            let response: TickerDetailsResponse = self.get_json(request).await?;

            let payload = response.results.ok_or_else(|| {
                ProviderError::not_found(format!("polygon has no ticker details for '{symbol}'"))
            })?;
            Ok(normalize_details(payload))
        })
    }

    fn previous_close<'a>(
        &'a self,
        symbol: &'a Symbol,
        credential: &'a Credential,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<AggregateBar>, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let path = format!(
                "/v2/aggs/ticker/{}/prev",
                urlencoding::encode(symbol.as_str())
            );
            let request = self
                .request(&path)
                .with_query("adjusted", "true")
                .with_auth(&bearer(credential));
            let response: AggregatesResponse = self.get_json(request).await?;

            Ok(normalize_bars(symbol, response))
        })
    }

    fn daily_aggregates<'a>(
        &'a self,
        symbol: &'a Symbol,
        credential: &'a Credential,
        range: DateRange,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<AggregateBar>, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let auth = bearer(credential);
            let path = format!(
                "/v2/aggs/ticker/{}/range/1/day/{}/{}",
                urlencoding::encode(symbol.as_str()),
                format_iso_date(range.from),
                format_iso_date(range.to)
            );
            let mut request = self
                .request(&path)
                .with_query("adjusted", "true")
                .with_query("sort", "asc")
                .with_query("limit", AGGREGATE_PAGE_LIMIT)
                .with_auth(&auth);

            let mut bars = Vec::new();
            for page in 1..=MAX_AGGREGATE_PAGES {
                let mut response: AggregatesResponse = self.get_json(request).await?;
                let next_url = response.next_url.take().filter(|url| !url.is_empty());
                bars.extend(normalize_bars(symbol, response));
                debug!(page, collected = bars.len(), "polygon aggregates page");

                match next_url {
                    Some(url) => {
                        request = HttpRequest::get(url)
                            .with_timeout_ms(self.config.timeout_ms)
                            .with_auth(&auth);
                    }
                    None => return Ok(bars),
                }
            }

            Err(ProviderError::invalid_data(format!(
                "polygon aggregates for '{symbol}' exceeded {MAX_AGGREGATE_PAGES} pages"
            )))
        })
    }

    fn latest_financials<'a>(
        &'a self,
        symbol: &'a Symbol,
        credential: &'a Credential,
    ) -> Pin<Box<dyn Future<Output = Result<Option<FinancialSnapshot>, ProviderError>> + Send + 'a>>
    {
        Box::pin(async move {
            let request = self
                .request("/vX/reference/financials")
                .with_query("ticker", symbol.as_str())
                .with_query("limit", "1")
                .with_auth(&HttpAuth::QueryParam {
                    name: String::from("apiKey"),
                    value: credential.expose().to_owned(),
                });
            let response: FinancialsResponse = self.get_json(request).await?;

            let Some(mut latest) = response.results.into_iter().flatten().next() else {
                return Ok(None);
            };
            match latest.get_mut("financials").map(Value::take) {
                Some(financials @ Value::Object(_)) => Ok(Some(FinancialSnapshot::new(financials))),
                _ => Err(ProviderError::invalid_data(
                    "polygon statement result has no 'financials' object",
                )),
            }
        })
    }
}

fn bearer(credential: &Credential) -> HttpAuth {
    HttpAuth::BearerToken(credential.expose().to_owned())
}

/// Status error with Polygon's `error`/`message` field, or a body excerpt.
fn status_error(status: u16, body: &str) -> ProviderError {
    let detail = serde_json::from_str::<PolygonErrorBody>(body)
        .ok()
        .and_then(|payload| payload.error.or(payload.message))
        .unwrap_or_else(|| body.chars().take(ERROR_EXCERPT_CHARS).collect());

    if detail.trim().is_empty() {
        ProviderError::status(status, format!("polygon returned status {status}"))
    } else {
        ProviderError::status(status, format!("polygon returned status {status}: {detail}"))
    }
}

fn normalize_details(payload: TickerDetailsPayload) -> CompanyDetails {
    CompanyDetails {
        ticker: payload.ticker,
        name: payload.name,
        market_cap: payload
            .market_cap
            .filter(|value| value.is_finite() && *value >= 0.0)
            .map(|value| value.round() as u64),
        homepage_url: payload.homepage_url,
    }
}

fn normalize_bars(symbol: &Symbol, response: AggregatesResponse) -> Vec<AggregateBar> {
    let fallback_ticker = response
        .ticker
        .unwrap_or_else(|| symbol.as_str().to_owned());

    response
        .results
        .unwrap_or_default()
        .into_iter()
        .map(|payload| AggregateBar {
            ticker: payload.ticker.unwrap_or_else(|| fallback_ticker.clone()),
            open: payload.open,
            high: payload.high,
            low: payload.low,
            close: payload.close,
            volume: payload.volume,
            timestamp_ms: payload.timestamp,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct PolygonErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TickerDetailsResponse {
    #[serde(default)]
    results: Option<TickerDetailsPayload>,
}

#[derive(Debug, Deserialize)]
struct TickerDetailsPayload {
    ticker: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    market_cap: Option<f64>,
    #[serde(default)]
    homepage_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    #[serde(default)]
    ticker: Option<String>,
    #[serde(default)]
    results: Option<Vec<AggregatePayload>>,
    #[serde(default)]
    next_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AggregatePayload {
    #[serde(rename = "T", default)]
    ticker: Option<String>,
    #[serde(rename = "o")]
    open: f64,
    #[serde(rename = "h")]
    high: f64,
    #[serde(rename = "l")]
    low: f64,
    #[serde(rename = "c")]
    close: f64,
    #[serde(rename = "v", default)]
    volume: f64,
    #[serde(rename = "t")]
    timestamp: i64,
}

#[derive(Debug, Deserialize)]
struct FinancialsResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}
