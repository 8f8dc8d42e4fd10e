//! AMap v3 REST client.
//!
//! Provides async lookups against the AMap web service API.
//! Handles key authentication, concurrency limiting, and conversion to
//! provider types.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::trace;

use crate::domain::{Category, Point};
use crate::provider::{GeoProvider, LineDetail, Poi, ProviderError, RawLine};

use super::convert::{convert_line_detail, convert_pois, convert_raw_line};
use super::types::{BusLineResponse, GeocodeResponse, HasEnvelope, PlaceAroundResponse};

/// Default base URL for the AMap REST API.
const DEFAULT_BASE_URL: &str = "https://restapi.amap.com/v3";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// POI type code for subway stations.
const RAIL_POI_TYPE: &str = "150500";

/// POI type code for bus stops.
const SURFACE_POI_TYPE: &str = "150700";

/// Status codes AMap uses for key problems.
const UNAUTHORIZED_INFOCODES: &[&str] = &["10001", "10009"];

/// Status codes AMap uses for quota and frequency limits.
const RATE_LIMITED_INFOCODES: &[&str] = &["10003", "10004", "10044"];

/// Configuration for the AMap client.
#[derive(Debug, Clone)]
pub struct AmapConfig {
    /// Web service API key
    pub api_key: String,
    /// Base URL for the API (defaults to production AMap)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// POIs requested per nearby search
    pub nearby_page_size: u8,
    /// Lines requested per station name search
    pub line_page_size: u8,
}

impl AmapConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
            nearby_page_size: 50,
            line_page_size: 20,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// AMap REST API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct AmapClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
    nearby_page_size: u8,
    line_page_size: u8,
}

impl AmapClient {
    /// Create a new AMap client with the given configuration.
    pub fn new(config: AmapConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "AMap API key is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
            nearby_page_size: config.nearby_page_size,
            line_page_size: config.line_page_size,
        })
    }

    /// Issue a GET request and decode an enveloped response.
    async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ProviderError>
    where
        T: DeserializeOwned + HasEnvelope,
    {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);
        trace!(%url, "AMap request");

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("output", "json")])
            .query(query)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let decoded: T = serde_json::from_str(&body).map_err(|e| ProviderError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        check_envelope(&decoded)?;
        Ok(decoded)
    }
}

/// Map a failed AMap envelope to an error.
fn check_envelope<T: HasEnvelope>(response: &T) -> Result<(), ProviderError> {
    let envelope = response.envelope();
    if envelope.is_ok() {
        return Ok(());
    }

    let code = envelope.infocode.as_str();
    if UNAUTHORIZED_INFOCODES.contains(&code) {
        return Err(ProviderError::Unauthorized);
    }
    if RATE_LIMITED_INFOCODES.contains(&code) {
        return Err(ProviderError::RateLimited);
    }

    Err(ProviderError::Api {
        status: 200,
        message: format!("{} ({})", envelope.info, envelope.infocode),
    })
}

/// POI type code for a station category.
fn poi_type(category: Category) -> &'static str {
    match category {
        Category::Rail => RAIL_POI_TYPE,
        Category::Surface => SURFACE_POI_TYPE,
    }
}

impl GeoProvider for AmapClient {
    async fn geocode(&self, address: &str, city: &str) -> Result<Option<Point>, ProviderError> {
        let response: GeocodeResponse = self
            .get(
                "/geocode/geo",
                &[("address", address.to_string()), ("city", city.to_string())],
            )
            .await?;

        Ok(response
            .geocodes
            .first()
            .and_then(|g| g.location.as_deref())
            .and_then(|loc| Point::parse_lng_lat(loc).ok()))
    }

    async fn search_nearby(
        &self,
        center: Point,
        radius_m: u32,
        category: Category,
        city: &str,
    ) -> Result<Vec<Poi>, ProviderError> {
        let response: PlaceAroundResponse = self
            .get(
                "/place/around",
                &[
                    ("location", center.to_string()),
                    ("radius", radius_m.to_string()),
                    ("types", poi_type(category).to_string()),
                    ("city", city.to_string()),
                    ("offset", self.nearby_page_size.to_string()),
                    ("page", "1".to_string()),
                    ("extensions", "base".to_string()),
                ],
            )
            .await?;

        Ok(convert_pois(response.pois))
    }

    async fn search_lines_by_station(
        &self,
        keyword: &str,
        city: &str,
    ) -> Result<Vec<RawLine>, ProviderError> {
        let response: BusLineResponse = self
            .get(
                "/bus/linename",
                &[
                    ("keywords", keyword.to_string()),
                    ("city", city.to_string()),
                    ("offset", self.line_page_size.to_string()),
                    ("page", "1".to_string()),
                    ("extensions", "base".to_string()),
                ],
            )
            .await?;

        Ok(response.buslines.into_iter().map(convert_raw_line).collect())
    }

    async fn line_detail(
        &self,
        line_id: &str,
        city: &str,
    ) -> Result<Option<LineDetail>, ProviderError> {
        let response: BusLineResponse = self
            .get(
                "/bus/lineid",
                &[
                    ("id", line_id.to_string()),
                    ("city", city.to_string()),
                    ("extensions", "all".to_string()),
                ],
            )
            .await?;

        Ok(response.buslines.into_iter().next().map(convert_line_detail))
    }
}
