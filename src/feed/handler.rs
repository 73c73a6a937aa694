//! Feed Lambda handler. Fail-open: every path answers 200 with a post list.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use super::graph::{GraphMediaSource, MediaSource};
use super::normalize::normalize_posts;
use super::sample::sample_raw_posts;
use crate::api::helpers;
use crate::api::parsing::InboundRequest;
use crate::clients::http_client;
use crate::core::config::{FeedConfig, INSTAGRAM_PROFILE_URL};
use crate::core::models::{FeedPost, FeedQuery};

pub use self::function_handler as handler;

pub struct FeedService {
    source: Option<Box<dyn MediaSource>>,
    profile_url: String,
}

impl FeedService {
    /// A service that only ever serves the sample posts.
    #[must_use]
    pub fn sample_only() -> Self {
        Self {
            source: None,
            profile_url: INSTAGRAM_PROFILE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &FeedConfig) -> Self {
        let mut service = Self {
            source: None,
            profile_url: config.profile_url.clone(),
        };
        if let Some((user_id, token)) = config.credentials() {
            service = service.with_source(GraphMediaSource::new(
                http_client(config.upstream_timeout),
                config.graph_base_url.clone(),
                user_id.to_string(),
                token.to_string(),
            ));
        }
        service
    }

    #[must_use]
    pub fn with_source(mut self, source: impl MediaSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Live posts when available, otherwise the sample set; never more than `query.limit`.
    pub async fn posts(&self, query: FeedQuery) -> Vec<FeedPost> {
        let Some(source) = &self.source else {
            info!("Instagram credentials not configured, serving sample posts");
            return self.fallback(query);
        };

        match source.recent_media(query.limit).await {
            Ok(raw) if raw.is_empty() => {
                info!("Instagram returned no posts, serving sample posts");
                self.fallback(query)
            }
            Ok(raw) => normalize_posts(&raw, query.limit, &self.profile_url),
            Err(e) => {
                error!("Unable to fetch Instagram feed: {}", e);
                self.fallback(query)
            }
        }
    }

    fn fallback(&self, query: FeedQuery) -> Vec<FeedPost> {
        normalize_posts(&sample_raw_posts(), query.limit, &self.profile_url)
    }

    pub async fn handle(&self, request: &InboundRequest) -> Value {
        let query = FeedQuery::from_limit_param(request.query_param("limit"));
        let posts = self.posts(query).await;
        helpers::public_json_response(200, &posts)
    }
}

/// Lambda handler for the feed endpoint.
///
/// # Errors
///
/// Never returns an error; upstream problems are absorbed into the sample feed.
#[tracing::instrument(level = "info", skip(event), fields(correlation_id = %Uuid::new_v4()))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = FeedConfig::from_env();
    let service = FeedService::from_config(&config);
    let request = InboundRequest::from_event(&event.payload);

    info!(
        limit = ?request.query_param("limit"),
        live = config.credentials().is_some(),
        "Feed Lambda received request"
    );

    Ok(service.handle(&request).await)
}
