//! Posting HTTP handlers.
//!
//! ```text
//! GET  /posting?bike=&frame=&color=&skip=&limit=
//! POST /posting
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Classification, NewPosting, Page, Posting, PostingFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AdminKey, ApiKey};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Classifier output, nested under `prediction` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct PredictionDto {
    #[schema(example = "road")]
    pub bike: String,
    #[schema(example = "aluminium")]
    pub frame: String,
    #[schema(example = "black")]
    pub color: String,
}

impl From<Classification> for PredictionDto {
    fn from(value: Classification) -> Self {
        Self {
            bike: value.bike,
            frame: value.frame,
            color: value.color,
        }
    }
}

impl From<PredictionDto> for Classification {
    fn from(value: PredictionDto) -> Self {
        Self {
            bike: value.bike,
            frame: value.frame,
            color: value.color,
        }
    }
}

/// Posting submitted by the crawler.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewPostingDto {
    pub title: String,
    pub url: String,
    pub img_url: String,
    pub location: String,
    /// Search query that produced the posting.
    pub query: String,
    /// Location filter of that search.
    pub location_query: String,
    /// Listing timestamp (RFC 3339).
    pub date: DateTime<Utc>,
    pub prediction: PredictionDto,
}

impl From<NewPostingDto> for NewPosting {
    fn from(value: NewPostingDto) -> Self {
        Self {
            title: value.title,
            url: value.url,
            img_url: value.img_url,
            location: value.location,
            query: value.query,
            location_query: value.location_query,
            date: value.date,
            prediction: value.prediction.into(),
        }
    }
}

/// Stored posting as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PostingDto {
    #[schema(example = 11)]
    pub id: i64,
    pub title: String,
    pub url: String,
    pub img_url: String,
    pub location: String,
    pub query: String,
    pub location_query: String,
    pub date: DateTime<Utc>,
    pub prediction: PredictionDto,
}

impl From<Posting> for PostingDto {
    fn from(value: Posting) -> Self {
        Self {
            id: value.id.as_i64(),
            title: value.title,
            url: value.url,
            img_url: value.img_url,
            location: value.location,
            query: value.query,
            location_query: value.location_query,
            date: value.date,
            prediction: value.prediction.into(),
        }
    }
}

/// Batch of postings to insert.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NewPostingList {
    pub data: Vec<NewPostingDto>,
}

/// Page of postings.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PostingList {
    pub data: Vec<PostingDto>,
}

/// Filters and window for the posting listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostingListParams {
    /// Exact bike type.
    pub bike: Option<String>,
    /// Exact frame material.
    pub frame: Option<String>,
    /// Exact colour.
    pub color: Option<String>,
    /// Rows to skip (default 0).
    pub skip: Option<u32>,
    /// Rows to return (default 10).
    pub limit: Option<u32>,
}

impl PostingListParams {
    fn into_parts(self) -> (PostingFilter, Page) {
        let filter = PostingFilter {
            bike: self.bike,
            frame: self.frame,
            color: self.color,
        };
        (filter, Page::new(self.skip, self.limit))
    }
}

/// List postings, newest first.
#[utoipa::path(
    get,
    path = "/posting",
    params(PostingListParams),
    responses(
        (status = 200, description = "Matching postings", body = PostingList),
        (status = 400, description = "Invalid query string", body = ErrorSchema),
        (status = 403, description = "Missing or invalid API key", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "listPostings"
)]
#[get("/posting")]
pub async fn list_postings(
    state: web::Data<HttpState>,
    _key: ApiKey,
    params: web::Query<PostingListParams>,
) -> ApiResult<web::Json<PostingList>> {
    let (filter, page) = params.into_inner().into_parts();
    let postings = state.listing.list_postings(filter, page).await?;
    Ok(web::Json(PostingList {
        data: postings.into_iter().map(PostingDto::from).collect(),
    }))
}

/// Insert a batch of postings, evicting the oldest rows when the table
/// budget would overflow.
#[utoipa::path(
    post,
    path = "/posting",
    request_body = NewPostingList,
    responses(
        (status = 201, description = "Postings stored"),
        (status = 400, description = "Invalid request body", body = ErrorSchema),
        (status = 403, description = "Missing or invalid admin key", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "addPostings"
)]
#[post("/posting")]
pub async fn add_postings(
    state: web::Data<HttpState>,
    _key: AdminKey,
    payload: web::Json<NewPostingList>,
) -> ApiResult<HttpResponse> {
    let postings = payload
        .into_inner()
        .data
        .into_iter()
        .map(NewPosting::from)
        .collect();
    state.ingestion.add_postings(postings).await?;
    Ok(HttpResponse::Created().finish())
}
