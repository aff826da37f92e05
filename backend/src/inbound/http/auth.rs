//! API key and admin key extractors.
//!
//! Both keys travel under the credential name `access_token`. The API key is
//! looked up in the query string, then the header, then the cookie; the
//! first source holding the configured key wins. The admin key is only read
//! from the header.

use actix_web::cookie::{Cookie, time::Duration};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use serde::Deserialize;
use tracing::debug;

use crate::domain::Error;
use crate::settings::Secret;

use super::state::{Credentials, HttpState};

/// Name of the query parameter, header and cookie carrying a key.
pub const ACCESS_TOKEN: &str = "access_token";

/// Lifetime of the cookie set by the docs page.
const COOKIE_MAX_AGE_SECS: i64 = 1800;

const INVALID_API_KEY: &str = "Credential invalid or not available";
const MISSING_ADMIN_KEY: &str = "Not authenticated";
const INVALID_ADMIN_KEY: &str = "This endpoint needs admin rights";

#[derive(Deserialize)]
struct AccessTokenQuery {
    access_token: Option<String>,
}

fn credentials(req: &HttpRequest) -> Result<&Credentials, Error> {
    req.app_data::<web::Data<HttpState>>()
        .map(|state| &state.credentials)
        .ok_or_else(|| Error::internal("HTTP state is not configured"))
}

fn query_key(req: &HttpRequest) -> Option<String> {
    web::Query::<AccessTokenQuery>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.into_inner().access_token)
}

fn header_key(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(ACCESS_TOKEN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

fn cookie_key(req: &HttpRequest) -> Option<String> {
    req.cookie(ACCESS_TOKEN)
        .map(|cookie| cookie.value().to_owned())
}

/// Proof that the request carried the configured API key.
///
/// Holds the accepted key so handlers can hand it back as a cookie.
#[derive(Debug)]
pub struct ApiKey(Secret);

impl ApiKey {
    /// The accepted key.
    pub fn secret(&self) -> &Secret {
        &self.0
    }

    fn check(req: &HttpRequest) -> Result<Self, Error> {
        let expected = &credentials(req)?.api_key;
        let candidates = [query_key(req), header_key(req), cookie_key(req)];
        candidates
            .into_iter()
            .flatten()
            .find(|candidate| candidate == expected.expose())
            .map(|key| Self(Secret::new(key)))
            .ok_or_else(|| {
                debug!(path = req.path(), "rejected API key");
                Error::forbidden(INVALID_API_KEY)
            })
    }
}

impl FromRequest for ApiKey {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::check(req))
    }
}

/// Proof that the request carried the configured admin key in its header.
#[derive(Debug)]
pub struct AdminKey;

impl AdminKey {
    fn check(req: &HttpRequest) -> Result<Self, Error> {
        let expected = &credentials(req)?.admin_key;
        let Some(candidate) = header_key(req) else {
            return Err(Error::forbidden(MISSING_ADMIN_KEY));
        };
        if candidate == expected.expose() {
            Ok(Self)
        } else {
            debug!(path = req.path(), "rejected admin key");
            Err(Error::forbidden(INVALID_ADMIN_KEY))
        }
    }
}

impl FromRequest for AdminKey {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::check(req))
    }
}

/// HttpOnly cookie carrying `key` for `domain`.
pub fn access_token_cookie(key: &Secret, domain: &str) -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN, key.expose().to_owned())
        .domain(domain.to_owned())
        .path("/")
        .http_only(true)
        .max_age(Duration::seconds(COOKIE_MAX_AGE_SECS))
        .finish()
}

/// Cookie that removes the access token for `domain`.
pub fn removal_cookie(domain: &str) -> Cookie<'static> {
    let mut cookie = Cookie::build(ACCESS_TOKEN, "")
        .domain(domain.to_owned())
        .path("/")
        .finish();
    cookie.make_removal();
    cookie
}
