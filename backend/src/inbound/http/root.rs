//! Service banner at `/`.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Greeting returned by the root endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RootMessage {
    #[schema(example = "This is the Find-My-Bike API")]
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    security([]),
    responses((status = 200, description = "Service banner", body = RootMessage)),
    tags = ["root"],
    operation_id = "root"
)]
#[get("/")]
pub async fn root() -> web::Json<RootMessage> {
    web::Json(RootMessage {
        message: "This is the Find-My-Bike API".to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test as actix_test};

    use super::*;

    #[actix_web::test]
    async fn greets_without_credentials() {
        let app = actix_test::init_service(App::new().service(root)).await;
        let req = actix_test::TestRequest::get().uri("/").to_request();
        let body: RootMessage = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.message, "This is the Find-My-Bike API");
    }
}
