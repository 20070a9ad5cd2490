//! Endpoint-level flows across the campaign handlers.
//!
//! Exercises the full HTTP surface against in-memory adapters: signature
//! submission with duplicate prevention, flash consumption across the
//! redirect, campaign creation with Markdown rendering, and the
//! authenticated list.

mod support;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::Value;

use petition_backend::inbound::http::campaigns::{
    create_campaign, list_campaigns, new_campaign, show_campaign, sign,
};
use petition_backend::inbound::http::state::HttpState;
use petition_backend::inbound::http::users::login;
use support::{campaign, signature, test_backend, test_session_middleware};

fn app_for(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(login)
        .service(show_campaign)
        .service(sign)
        .service(new_campaign)
        .service(create_campaign)
        .service(list_campaigns)
}

fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

fn location<B>(res: &ServiceResponse<B>) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect carries a location")
        .to_owned()
}

async fn envelope<B: actix_web::body::MessageBody>(res: ServiceResponse<B>) -> Value {
    let body = test::read_body(res).await;
    serde_json::from_slice(&body).expect("fixture renderer emits JSON")
}

#[actix_web::test]
async fn signing_updates_the_count_and_shows_the_flash_once() {
    let backend = test_backend();
    backend.campaigns.seed(campaign(5, 7));
    backend.signatures.seed(signature(1, 5, "Ada"));
    backend.signatures.seed(signature(2, 5, "Grace"));
    backend.signatures.seed(signature(3, 5, "Edsger"));
    let app = test::init_service(app_for(backend.state.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/campaign/5/signatures")
            .set_form(&[("name", "Alice"), ("comment", "count me in")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/campaign/5");
    let cookie = session_cookie(&res).expect("flash stored in session");
    assert_eq!(backend.signatures.stored().len(), 4);

    let shown = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/campaign/5")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(shown.status(), StatusCode::OK);
    // Consuming the flash rewrites the session cookie.
    let cleared = session_cookie(&shown).expect("session cookie rewritten");
    let page = envelope(shown).await;
    assert_eq!(
        page.pointer("/context/message").and_then(Value::as_str),
        Some("Thank you for signing!")
    );
    assert_eq!(
        page.pointer("/context/signatureCount").and_then(Value::as_i64),
        Some(4)
    );

    let again = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/campaign/5")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    let page = envelope(again).await;
    assert!(page
        .pointer("/context/message")
        .is_none_or(Value::is_null));
}

#[actix_web::test]
async fn duplicate_submission_redirects_without_inserting() {
    let backend = test_backend();
    backend.campaigns.seed(campaign(5, 7));
    backend.signatures.seed(signature(1, 5, "Alice"));
    backend.signatures.seed(signature(2, 5, "Grace"));
    backend.signatures.seed(signature(3, 5, "Edsger"));
    let app = test::init_service(app_for(backend.state.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/campaign/5/signatures")
            .set_form(&[("name", "Alice")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/campaign/5");
    let cookie = session_cookie(&res).expect("flash stored in session");
    assert_eq!(backend.signatures.stored().len(), 3);

    let shown = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/campaign/5")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let page = envelope(shown).await;
    assert_eq!(
        page.pointer("/context/message").and_then(Value::as_str),
        Some("You have already signed this campaign.")
    );
    assert_eq!(
        page.pointer("/context/signatureCount").and_then(Value::as_i64),
        Some(3)
    );
}

#[actix_web::test]
async fn invalid_submission_re_renders_with_errors_and_input() {
    let backend = test_backend();
    backend.campaigns.seed(campaign(5, 7));
    let app = test::init_service(app_for(backend.state.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/campaign/5/signatures")
            .set_form(&[("name", "   "), ("comment", "still here")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let page = envelope(res).await;
    assert_eq!(
        page.get("view").and_then(Value::as_str),
        Some("campaign/index")
    );
    assert!(page.pointer("/context/errors/name").is_some());
    assert_eq!(
        page.pointer("/context/signature/comment")
            .and_then(Value::as_str),
        Some("still here")
    );
    assert!(backend.signatures.stored().is_empty());
}

#[actix_web::test]
async fn malformed_and_unknown_ids_use_the_error_envelope() {
    let backend = test_backend();
    let app = test::init_service(app_for(backend.state.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/campaign/abc").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(res).await;
    let value: Value = serde_json::from_slice(&body).expect("error payload");
    assert_eq!(
        value.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/campaign/99").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

async fn login_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(&[("username", "admin"), ("password", "password")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    session_cookie(&res).expect("login establishes a session")
}

#[actix_web::test]
async fn creating_a_campaign_renders_markdown_and_redirects() {
    let backend = test_backend();
    let app = test::init_service(app_for(backend.state.clone())).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/campaigns")
            .cookie(cookie)
            .set_form(&[
                ("title", "T"),
                ("statement", "**bold**"),
                ("goal", "100"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let target = location(&res);
    let cookie = session_cookie(&res).expect("flash stored in session");

    let stored = backend.campaigns.stored();
    assert_eq!(stored.len(), 1);
    let created = stored.first().expect("one campaign");
    assert!(created.statement.as_str().contains("<strong>bold</strong>"));
    assert_eq!(created.goal.get(), 100);
    assert_eq!(created.create_user_id.get(), 1);
    assert_eq!(target, format!("/campaign/{}", created.id.get()));

    let shown = test::call_service(
        &app,
        test::TestRequest::get().uri(&target).cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(shown.status(), StatusCode::OK);
    let page = envelope(shown).await;
    assert_eq!(
        page.pointer("/context/message").and_then(Value::as_str),
        Some("Campaign created.")
    );
}

#[actix_web::test]
async fn creating_with_a_non_numeric_goal_is_rejected() {
    let backend = test_backend();
    let app = test::init_service(app_for(backend.state.clone())).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/campaigns")
            .cookie(cookie)
            .set_form(&[("title", "T"), ("statement", "body"), ("goal", "abc")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let page = envelope(res).await;
    assert_eq!(
        page.get("view").and_then(Value::as_str),
        Some("campaign/new")
    );
    assert!(page.pointer("/context/errors/goal").is_some());
    assert!(backend.campaigns.stored().is_empty());
}

#[actix_web::test]
async fn listing_returns_only_the_principals_campaigns() {
    let backend = test_backend();
    backend.campaigns.seed(campaign(1, 1));
    backend.campaigns.seed(campaign(2, 2));
    backend.campaigns.seed(campaign(3, 1));
    let app = test::init_service(app_for(backend.state.clone())).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/campaigns/mine")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let page = envelope(res).await;
    assert_eq!(
        page.get("view").and_then(Value::as_str),
        Some("campaign/list")
    );
    let listed = page
        .pointer("/context/campaigns")
        .and_then(Value::as_array)
        .expect("campaign array");
    assert_eq!(listed.len(), 2);
    assert!(listed
        .iter()
        .all(|c| c.get("createUserId").and_then(Value::as_i64) == Some(1)));
}

#[actix_web::test]
async fn the_creation_form_page_renders_empty() {
    let backend = test_backend();
    let app = test::init_service(app_for(backend.state.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/campaigns/new").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let page = envelope(res).await;
    assert_eq!(
        page.get("view").and_then(Value::as_str),
        Some("campaign/new")
    );
    assert_eq!(
        page.pointer("/context/form/goal").and_then(Value::as_str),
        Some("")
    );
}
