//! Correction HTTP handlers.
//!
//! ```text
//! GET  /correction
//! POST /correction
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CorrectedPosting, Correction, NewCorrection, PostingId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AdminKey, ApiKey};
use crate::inbound::http::postings::{PostingDto, PredictionDto};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Human override of a posting's classification.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CorrectionRequest {
    #[schema(example = 1)]
    pub posting_id: i64,
    pub correction: PredictionDto,
}

impl From<CorrectionRequest> for NewCorrection {
    fn from(value: CorrectionRequest) -> Self {
        Self {
            posting_id: PostingId::new(value.posting_id),
            classification: value.correction.into(),
        }
    }
}

/// One stored correction.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CorrectionDto {
    pub id: i64,
    pub bike: String,
    pub frame: String,
    pub color: String,
}

impl From<Correction> for CorrectionDto {
    fn from(value: Correction) -> Self {
        Self {
            id: value.id,
            bike: value.classification.bike,
            frame: value.classification.frame,
            color: value.classification.color,
        }
    }
}

/// Posting together with every correction submitted for it.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CorrectedPostingDto {
    #[serde(flatten)]
    pub posting: PostingDto,
    pub corrections: Vec<CorrectionDto>,
}

impl From<CorrectedPosting> for CorrectedPostingDto {
    fn from(value: CorrectedPosting) -> Self {
        Self {
            posting: value.posting.into(),
            corrections: value
                .corrections
                .into_iter()
                .map(CorrectionDto::from)
                .collect(),
        }
    }
}

/// Corrected postings for review.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CorrectedPostingList {
    pub data: Vec<CorrectedPostingDto>,
}

/// List postings that have corrections, newest first.
#[utoipa::path(
    get,
    path = "/correction",
    responses(
        (status = 200, description = "Corrected postings", body = CorrectedPostingList),
        (status = 403, description = "Missing or invalid admin key", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["corrections"],
    operation_id = "listCorrections"
)]
#[get("/correction")]
pub async fn list_corrections(
    state: web::Data<HttpState>,
    _key: AdminKey,
) -> ApiResult<web::Json<CorrectedPostingList>> {
    let corrected = state.listing.list_corrected_postings().await?;
    Ok(web::Json(CorrectedPostingList {
        data: corrected.into_iter().map(CorrectedPostingDto::from).collect(),
    }))
}

/// Submit a correction for an existing posting.
///
/// An unknown posting answers 500 with `Posting with ID {id} not found`.
#[utoipa::path(
    post,
    path = "/correction",
    request_body = CorrectionRequest,
    responses(
        (status = 201, description = "Correction stored"),
        (status = 400, description = "Invalid request body", body = ErrorSchema),
        (status = 403, description = "Missing or invalid API key", body = ErrorSchema),
        (status = 500, description = "Referenced posting does not exist", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["corrections"],
    operation_id = "addCorrection"
)]
#[post("/correction")]
pub async fn add_correction(
    state: web::Data<HttpState>,
    _key: ApiKey,
    payload: web::Json<CorrectionRequest>,
) -> ApiResult<HttpResponse> {
    state
        .ingestion
        .add_correction(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().finish())
}
