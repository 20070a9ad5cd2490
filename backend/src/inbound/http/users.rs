//! Login handler establishing the session principal.
//!
//! ```text
//! POST /login  username=...&password=...
//! ```
//!
//! Real account management is an external collaborator; this handler only
//! validates the submitted credentials against the development fixture and
//! persists the resulting principal into the session.

use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::ApiResult;

const FIXTURE_USERNAME: &str = "admin";
const FIXTURE_PASSWORD: &str = "password";
const FIXTURE_USER_ID: i64 = 1;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Account name.
    #[serde(default)]
    pub username: String,
    /// Account password.
    #[serde(default)]
    pub password: String,
}

fn empty_field_error(field: &str) -> Error {
    Error::invalid_request(format!("{field} must not be empty"))
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

fn authenticate(username: &str, password: &str) -> Result<UserId, Error> {
    if username == FIXTURE_USERNAME && password == FIXTURE_PASSWORD {
        UserId::new(FIXTURE_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
    } else {
        Err(Error::unauthorized("invalid credentials"))
    }
}

/// Authenticate and establish a session.
#[post("/login")]
pub async fn login(
    session: SessionContext,
    payload: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = payload.into_inner();
    let username = form.username.trim();
    if username.is_empty() {
        return Err(empty_field_error("username"));
    }
    if form.password.is_empty() {
        return Err(empty_field_error("password"));
    }

    let user_id = authenticate(username, &form.password)?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::Ok().finish())
}
