//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: the tweet CRUD endpoints, the health probes, and the
//! shared error envelope. The generated document backs Swagger UI in debug
//! builds.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tweets backend API",
        description = "CRUD interface for tweets with a uniform JSON error envelope."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tweets::list_tweets,
        crate::inbound::http::tweets::get_tweet,
        crate::inbound::http::tweets::create_tweet,
        crate::inbound::http::tweets::update_tweet,
        crate::inbound::http::tweets::delete_tweet,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::inbound::http::tweets::TweetPayload,
        crate::inbound::http::tweets::TweetBody,
        crate::inbound::http::tweets::TweetListResponse,
        crate::inbound::http::tweets::TweetResponse,
        crate::inbound::http::tweets::UpdatedTweetResponse,
        crate::inbound::http::error::ErrorBody,
    )),
    tags(
        (name = "tweets", description = "Tweet CRUD operations"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
