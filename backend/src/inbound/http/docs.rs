//! API documentation and the credential cookie.
//!
//! ```text
//! GET /openapi.json  OpenAPI document
//! GET /docs          Swagger UI; stores the API key in a cookie
//! GET /logout        Drops the cookie and redirects to /
//! ```
//!
//! `/docs` is gated by the API key, which `utoipa-swagger-ui`'s `SwaggerUi`
//! service cannot express: it mounts its own unauthenticated routes and has
//! no hook for setting the `access_token` cookie. The page is therefore a
//! small HTML shell that loads Swagger UI from a CDN. Once the cookie is set
//! the page can fetch `/openapi.json` and call the API without the user
//! retyping the key.

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use utoipa::OpenApi;

use crate::doc::ApiDoc;
use crate::inbound::http::auth::{ApiKey, access_token_cookie, removal_cookie};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const SWAGGER_UI_VERSION: &str = "5";

fn swagger_page() -> String {
    format!(
        r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>docs</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{SWAGGER_UI_VERSION}/swagger-ui.css">
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{SWAGGER_UI_VERSION}/swagger-ui-bundle.js"></script>
<script>
window.ui = SwaggerUIBundle({{
    url: "/openapi.json",
    dom_id: "#swagger-ui",
    layout: "BaseLayout",
    deepLinking: true
}});
</script>
</body>
</html>
"##
    )
}

/// Serve the OpenAPI document.
#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document"),
        (status = 403, description = "Missing or invalid API key", body = ErrorSchema)
    ),
    tags = ["documentation"],
    operation_id = "openapiDocument"
)]
#[get("/openapi.json")]
pub async fn openapi_json(_key: ApiKey) -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve Swagger UI and remember the API key in an HttpOnly cookie.
#[utoipa::path(
    get,
    path = "/docs",
    responses(
        (status = 200, description = "Swagger UI page", body = String, content_type = "text/html"),
        (status = 403, description = "Missing or invalid API key", body = ErrorSchema)
    ),
    tags = ["documentation"],
    operation_id = "docs"
)]
#[get("/docs")]
pub async fn docs(state: web::Data<HttpState>, key: ApiKey) -> HttpResponse {
    let cookie = access_token_cookie(key.secret(), &state.credentials.cookie_domain);
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .cookie(cookie)
        .body(swagger_page())
}

/// Remove the API key cookie and go back to `/`.
#[utoipa::path(
    get,
    path = "/logout",
    security([]),
    responses((status = 307, description = "Redirect to /")),
    tags = ["documentation"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, "/"))
        .cookie(removal_cookie(&state.credentials.cookie_domain))
        .finish()
}
