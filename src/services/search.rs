// src/services/search.rs

//! Recent-post search client.
//!
//! Issues a single bounded keyword query against the provider's recent
//! search endpoint and returns the posts in provider order.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{PROVIDER_MAX_RESULTS, Post, SearchConfig};
use crate::utils::http;

/// Smallest page size the provider accepts.
const PROVIDER_MIN_RESULTS: u32 = 10;

/// Fields requested for every post.
const TWEET_FIELDS: &str = "created_at,author_id,lang,public_metrics";

const SEARCH_PATH: &str = "2/tweets/search/recent";

/// A bounded keyword query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    /// Maximum number of posts returned to the caller
    pub max_results: u32,
    pub language: String,
    pub exclude_reshares: bool,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>, max_results: u32) -> Self {
        Self {
            keyword: keyword.into(),
            max_results,
            language: "en".to_string(),
            exclude_reshares: true,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            keyword: config.keyword.clone(),
            max_results: config.max_results,
            language: config.language.clone(),
            exclude_reshares: config.exclude_reshares,
        }
    }

    /// Provider query string, e.g. `AWS lang:en -is:retweet`.
    pub fn query_string(&self) -> String {
        let mut query = format!("{} lang:{}", self.keyword.trim(), self.language);
        if self.exclude_reshares {
            query.push_str(" -is:retweet");
        }
        query
    }

    /// Page size sent to the provider, which rejects values outside 10..=100.
    pub fn page_size(&self) -> u32 {
        self.max_results
            .clamp(PROVIDER_MIN_RESULTS, PROVIDER_MAX_RESULTS)
    }
}

/// Source of posts for the pipeline.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Run one query. An empty result is `Ok(vec![])`, not an error.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Post>>;
}

/// Search response envelope.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Post>,
    #[serde(default)]
    meta: Option<SearchMeta>,
    #[serde(default)]
    errors: Vec<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct SearchMeta {
    #[serde(default)]
    result_count: usize,
}

/// Error body shape shared by failed responses and partial errors.
#[derive(Debug, Default, Deserialize)]
struct ProviderError {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ProviderError>,
}

impl ProviderError {
    fn describe(&self) -> Option<String> {
        let mut parts: Vec<&str> = [&self.title, &self.detail, &self.message]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .collect();
        parts.extend(self.errors.iter().filter_map(|e| e.message.as_deref()));
        parts.dedup();
        (!parts.is_empty()).then(|| parts.join(": "))
    }
}

/// Client for the provider's recent search endpoint.
pub struct TwitterClient {
    client: Client,
    base_url: Url,
    bearer_token: String,
}

impl TwitterClient {
    /// Resolve credentials and build the client.
    ///
    /// Fails with an authentication error before any network call when no
    /// token is available.
    pub fn authenticate(config: &SearchConfig) -> Result<Self> {
        let token = config.resolve_bearer_token()?;
        Self::with_token(config, token)
    }

    /// Build a client with an explicit bearer token.
    pub fn with_token(config: &SearchConfig, bearer_token: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(&format!("{}/", config.api_base_url.trim_end_matches('/')))?;
        let client = http::create_async_client(config)?;

        log::info!("Search client ready for {}", base_url);

        Ok(Self {
            client,
            base_url,
            bearer_token: bearer_token.into(),
        })
    }

    /// Full request URL for a query.
    fn search_url(&self, query: &SearchQuery) -> Result<Url> {
        let mut url = self.base_url.join(SEARCH_PATH)?;
        url.query_pairs_mut()
            .append_pair("query", &query.query_string())
            .append_pair("max_results", &query.page_size().to_string())
            .append_pair("tweet.fields", TWEET_FIELDS);
        Ok(url)
    }

    /// Map a failed response to the error taxonomy.
    fn status_error(status: StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<ProviderError>(body)
            .ok()
            .and_then(|e| e.describe())
            .unwrap_or_else(|| status.to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                AppError::auth(format!("provider rejected credentials ({status}): {detail}"))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                AppError::query(format!("rate limited ({status}): {detail}"))
            }
            _ => AppError::query(format!("search failed ({status}): {detail}")),
        }
    }
}

#[async_trait]
impl PostSource for TwitterClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Post>> {
        let url = self.search_url(query)?;
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| AppError::query(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::query(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::query(format!("malformed search response: {e}")))?;

        if parsed.data.is_empty() {
            if let Some(detail) = parsed.errors.iter().find_map(|e| e.describe()) {
                return Err(AppError::query(detail));
            }
            let reported = parsed.meta.map_or(0, |m| m.result_count);
            log::info!("Provider reported {} matches for '{}'", reported, query.keyword);
            return Ok(Vec::new());
        }

        let mut posts = parsed.data;
        posts.truncate(query.max_results as usize);
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> SearchConfig {
        SearchConfig {
            api_base_url: server.uri(),
            bearer_token: Some("test-token".into()),
            ..SearchConfig::default()
        }
    }

    fn tweet(id: &str, text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "text": text,
            "created_at": "2024-04-15T10:21:33.000Z",
            "author_id": "42",
            "lang": "en",
            "public_metrics": {"retweet_count": 1, "reply_count": 0, "like_count": 4, "quote_count": 0}
        })
    }

    #[test]
    fn test_query_string() {
        let query = SearchQuery::new("AWS", 10);
        assert_eq!(query.query_string(), "AWS lang:en -is:retweet");

        let query = SearchQuery {
            exclude_reshares: false,
            language: "de".into(),
            ..SearchQuery::new("rust", 10)
        };
        assert_eq!(query.query_string(), "rust lang:de");
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(SearchQuery::new("x", 3).page_size(), 10);
        assert_eq!(SearchQuery::new("x", 50).page_size(), 50);
        assert_eq!(SearchQuery::new("x", 500).page_size(), 100);
    }

    #[test]
    fn test_authenticate_without_token_fails() {
        let config = SearchConfig {
            bearer_token: None,
            bearer_token_env: "TWEET_SENTIMENT_TEST_UNSET_VAR".into(),
            ..SearchConfig::default()
        };
        assert!(matches!(
            TwitterClient::authenticate(&config),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn test_provider_error_describe() {
        let body = r#"{"title":"Invalid Request","detail":"One or more parameters to your request was invalid.","errors":[{"message":"max_results out of range"}]}"#;
        let err: ProviderError = serde_json::from_str(body).unwrap();
        let text = err.describe().unwrap();
        assert!(text.starts_with("Invalid Request"));
        assert!(text.contains("max_results out of range"));
    }

    #[tokio::test]
    async fn test_search_returns_posts_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/tweets/search/recent"))
            .and(query_param("query", "AWS lang:en -is:retweet"))
            .and(query_param("max_results", "10"))
            .and(query_param("tweet.fields", TWEET_FIELDS))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [tweet("3", "AWS is great!"), tweet("2", "AWS outage again"), tweet("1", "Just using AWS")],
                "meta": {"result_count": 3}
            })))
            .mount(&server)
            .await;

        let client = TwitterClient::authenticate(&config_for(&server)).unwrap();
        let posts = client.search(&SearchQuery::new("AWS", 3)).await.unwrap();

        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(posts[0].like_count(), 4);
    }

    #[tokio::test]
    async fn test_search_truncates_to_requested_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/tweets/search/recent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [tweet("1", "a"), tweet("2", "b"), tweet("3", "c"), tweet("4", "d")],
                "meta": {"result_count": 4}
            })))
            .mount(&server)
            .await;

        let client = TwitterClient::authenticate(&config_for(&server)).unwrap();
        let posts = client.search(&SearchQuery::new("AWS", 2)).await.unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[tokio::test]
    async fn test_search_without_matches_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/tweets/search/recent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"meta": {"result_count": 0}})),
            )
            .mount(&server)
            .await;

        let client = TwitterClient::authenticate(&config_for(&server)).unwrap();
        let posts = client.search(&SearchQuery::new("nothing", 10)).await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/tweets/search/recent"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "title": "Unauthorized",
                "type": "about:blank",
                "status": 401,
                "detail": "Unauthorized"
            })))
            .mount(&server)
            .await;

        let client = TwitterClient::authenticate(&config_for(&server)).unwrap();
        let err = client.search(&SearchQuery::new("AWS", 10)).await.unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_query_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/tweets/search/recent"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let client = TwitterClient::authenticate(&config_for(&server)).unwrap();
        let err = client.search(&SearchQuery::new("AWS", 10)).await.unwrap_err();
        match err {
            AppError::Query(message) => assert!(message.contains("rate limited")),
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_query_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/tweets/search/recent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = TwitterClient::authenticate(&config_for(&server)).unwrap();
        let err = client.search(&SearchQuery::new("AWS", 10)).await.unwrap_err();
        assert!(matches!(err, AppError::Query(_)));
    }
}
