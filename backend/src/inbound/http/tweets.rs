//! Tweet CRUD handlers.
//!
//! ```text
//! GET    /tweets        List every tweet
//! GET    /tweets/{id}   Fetch one tweet (digits only)
//! POST   /tweets        Create a tweet
//! PUT    /tweets/{id}   Replace a tweet's message (digits only)
//! DELETE /tweets/{id}   Remove a tweet (digits only)
//! ```
//!
//! Each handler is a thin orchestration of a store call and a
//! success/error branch; failures are raised as domain errors and rendered
//! by the terminal translator, never formatted here.

use actix_web::{HttpResponse, Scope, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, MESSAGE_MAX_CHARS, Tweet, TweetId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Constraint, FieldName, FieldRule, check_rules};

const MESSAGE_FIELD: FieldName = FieldName::new("message");

/// Validation rules applied to tweet payloads, in reporting order.
const TWEET_RULES: [FieldRule; 2] = [
    FieldRule::new(
        MESSAGE_FIELD,
        Constraint::Present,
        "Please provide a value for Message",
    ),
    FieldRule::new(
        MESSAGE_FIELD,
        Constraint::MaxLength(MESSAGE_MAX_CHARS),
        "Title must not be more than 280 characters long",
    ),
];

/// Request payload for creating or updating a tweet.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TweetPayload {
    /// Tweet text, 1–280 characters.
    #[serde(default)]
    pub message: Option<String>,
}

/// Wire representation of one tweet.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TweetBody {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Tweet text.
    #[schema(example = "hello")]
    pub message: String,
}

impl From<Tweet> for TweetBody {
    fn from(tweet: Tweet) -> Self {
        Self {
            id: tweet.id.as_i64(),
            message: tweet.message,
        }
    }
}

/// Response envelope for the list endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct TweetListResponse {
    /// Every tweet in the store's return order.
    pub tweets: Vec<TweetBody>,
}

/// Response envelope for single-tweet endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct TweetResponse {
    /// The requested or created tweet.
    pub tweet: TweetBody,
}

/// Response envelope for the update endpoint.
///
/// The key is `oldTweet` for compatibility with existing clients, although
/// it carries the record after mutation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedTweetResponse {
    /// The mutated tweet.
    pub old_tweet: TweetBody,
}

/// Uniform not-found error shared by the get/update/delete handlers.
///
/// All three call sites must agree on wording and status, so the message is
/// interpolated in exactly one place.
fn tweet_not_found(id: TweetId) -> Error {
    Error::not_found(format!("The tweet of {id} could not be found."))
        .with_title("Tweet not found")
}

/// Run the tweet rules against a payload and extract the validated message.
fn validated_message(payload: &TweetPayload) -> Result<String, Error> {
    check_rules(&TWEET_RULES, |field| match field.as_str() {
        "message" => payload.message.as_deref(),
        _ => None,
    })?;
    Ok(payload.message.clone().unwrap_or_default())
}

/// List every tweet.
#[utoipa::path(
    get,
    path = "/tweets",
    responses(
        (status = 200, description = "All tweets", body = TweetListResponse),
        (status = 500, description = "Store failure", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["tweets"],
    operation_id = "listTweets"
)]
#[get("")]
pub async fn list_tweets(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let tweets = state.tweets.find_all().await?;
    let tweets = tweets.into_iter().map(TweetBody::from).collect();
    Ok(HttpResponse::Ok().json(TweetListResponse { tweets }))
}

/// Fetch one tweet by identifier.
#[utoipa::path(
    get,
    path = "/tweets/{id}",
    params(("id" = i64, Path, description = "Tweet identifier")),
    responses(
        (status = 200, description = "The tweet", body = TweetResponse),
        (status = 404, description = "No such tweet", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["tweets"],
    operation_id = "getTweet"
)]
#[get("/{id:\\d+}")]
pub async fn get_tweet(state: web::Data<HttpState>, path: web::Path<i64>) -> ApiResult<HttpResponse> {
    let id = TweetId::new(path.into_inner());
    match state.tweets.find_by_id(id).await? {
        Some(tweet) => Ok(HttpResponse::Ok().json(TweetResponse {
            tweet: TweetBody::from(tweet),
        })),
        None => Err(tweet_not_found(id)),
    }
}

/// Create a tweet.
#[utoipa::path(
    post,
    path = "/tweets",
    request_body = TweetPayload,
    responses(
        (status = 200, description = "The created tweet", body = TweetResponse),
        (status = 400, description = "Validation failure", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["tweets"],
    operation_id = "createTweet"
)]
#[post("")]
pub async fn create_tweet(
    state: web::Data<HttpState>,
    payload: web::Json<TweetPayload>,
) -> ApiResult<HttpResponse> {
    let message = validated_message(&payload)?;
    let tweet = state.tweets.create(&message).await?;
    Ok(HttpResponse::Ok().json(TweetResponse {
        tweet: TweetBody::from(tweet),
    }))
}

/// Replace a tweet's message.
#[utoipa::path(
    put,
    path = "/tweets/{id}",
    params(("id" = i64, Path, description = "Tweet identifier")),
    request_body = TweetPayload,
    responses(
        (status = 200, description = "The mutated tweet", body = UpdatedTweetResponse),
        (status = 400, description = "Validation failure", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "No such tweet", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["tweets"],
    operation_id = "updateTweet"
)]
#[put("/{id:\\d+}")]
pub async fn update_tweet(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<TweetPayload>,
) -> ApiResult<HttpResponse> {
    let message = validated_message(&payload)?;
    let id = TweetId::new(path.into_inner());
    match state.tweets.update_message(id, &message).await? {
        Some(tweet) => Ok(HttpResponse::Ok().json(UpdatedTweetResponse {
            old_tweet: TweetBody::from(tweet),
        })),
        None => Err(tweet_not_found(id)),
    }
}

/// Remove a tweet.
///
/// Deletes carry no body, so no message validation runs here; a miss is
/// reported with the same not-found error as the read paths.
#[utoipa::path(
    delete,
    path = "/tweets/{id}",
    params(("id" = i64, Path, description = "Tweet identifier")),
    responses(
        (status = 204, description = "Tweet removed"),
        (status = 404, description = "No such tweet", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["tweets"],
    operation_id = "deleteTweet"
)]
#[delete("/{id:\\d+}")]
pub async fn delete_tweet(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = TweetId::new(path.into_inner());
    if state.tweets.delete(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(tweet_not_found(id))
    }
}

/// Tweet routes mounted under `/tweets`.
///
/// The id segment matches digits only; anything else falls through to the
/// application's route fallback.
pub fn routes() -> Scope {
    web::scope("/tweets")
        .service(list_tweets)
        .service(get_tweet)
        .service(create_tweet)
        .service(update_tweet)
        .service(delete_tweet)
}
