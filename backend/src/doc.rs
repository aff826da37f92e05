//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`], and three security schemes describing
//! where the `access_token` credential may travel. The document is served at
//! `/openapi.json` and rendered by the Swagger page at `/docs`.

use crate::inbound::http::auth::ACCESS_TOKEN;
use crate::inbound::http::corrections::{
    CorrectedPostingDto, CorrectedPostingList, CorrectionDto, CorrectionRequest,
};
use crate::inbound::http::postings::{
    NewPostingDto, NewPostingList, PostingDto, PostingList, PredictionDto,
};
use crate::inbound::http::root::RootMessage;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Security scheme for the key in the query string.
pub const API_KEY_QUERY: &str = "APIKeyQuery";
/// Security scheme for the key in a header.
pub const API_KEY_HEADER: &str = "APIKeyHeader";
/// Security scheme for the key in a cookie.
pub const API_KEY_COOKIE: &str = "APIKeyCookie";

/// Enrich the generated document with the `access_token` security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            API_KEY_QUERY,
            SecurityScheme::ApiKey(ApiKey::Query(ApiKeyValue::with_description(
                ACCESS_TOKEN,
                "API key as a query parameter.",
            ))),
        );
        components.add_security_scheme(
            API_KEY_HEADER,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                ACCESS_TOKEN,
                "API key, or the admin key for admin endpoints, as a header.",
            ))),
        );
        components.add_security_scheme(
            API_KEY_COOKIE,
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                ACCESS_TOKEN,
                "API key cookie issued by GET /docs.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Find-My-Bike API",
        version = "0.1.0",
        description = "Classified bike postings with human corrections, stored under a fixed row budget."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("APIKeyQuery" = []), ("APIKeyHeader" = []), ("APIKeyCookie" = [])),
    paths(
        crate::inbound::http::root::root,
        crate::inbound::http::postings::list_postings,
        crate::inbound::http::postings::add_postings,
        crate::inbound::http::corrections::list_corrections,
        crate::inbound::http::corrections::add_correction,
        crate::inbound::http::docs::openapi_json,
        crate::inbound::http::docs::docs,
        crate::inbound::http::docs::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RootMessage,
        PredictionDto,
        NewPostingDto,
        NewPostingList,
        PostingDto,
        PostingList,
        CorrectionRequest,
        CorrectionDto,
        CorrectedPostingDto,
        CorrectedPostingList,
    )),
    tags(
        (name = "root", description = "Service banner"),
        (name = "postings", description = "Classified postings"),
        (name = "corrections", description = "Human corrections of predictions"),
        (name = "documentation", description = "API documentation and credential cookie"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
