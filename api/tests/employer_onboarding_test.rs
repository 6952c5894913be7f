//! Onboarding walk-through over HTTP

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::{api_key_header, bearer, context};
use jb_api::create_app;

macro_rules! post_json {
    ($app:expr, $uri:expr, $token:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .insert_header(bearer($token))
            .set_json($body)
            .to_request();
        test::call_service($app, req).await
    }};
}

macro_rules! get {
    ($app:expr, $uri:expr, $token:expr) => {{
        let req = test::TestRequest::get()
            .uri($uri)
            .insert_header(bearer($token))
            .to_request();
        test::call_service($app, req).await
    }};
}

#[actix_web::test]
async fn test_full_onboarding_reaches_registration_complete() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/employer/signup")
        .insert_header(api_key_header())
        .set_json(json!({"firstname": "Jane", "lastname": "Doe", "email": "jane@example.com"}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let token = body["token"].as_str().unwrap().to_string();
    let temporary = ctx.mailer.last_password().unwrap();

    let resp = post_json!(
        &app,
        "/api/v1/employer/update-password",
        &token,
        json!({"password": temporary, "newpassword": "a-better-password"})
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["registrationstep"], "personal-information");

    let resp = post_json!(
        &app,
        "/api/v1/employer/update-account",
        &token,
        json!({"phonenumber": "555-0100", "role": "Recruiter"})
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["firstname"], "Jane");
    assert_eq!(body["role"], "Recruiter");
    assert_eq!(body["registrationstep"], "company-details");

    let resp = post_json!(
        &app,
        "/api/v1/employer/update-company",
        &token,
        json!({"name": "Acme", "city": "Springfield", "website": "https://acme.example"})
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["registrationstep"], "payment-method");

    let resp = post_json!(
        &app,
        "/api/v1/employer/update-payment-method",
        &token,
        json!({"method": "invoice"})
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["registrationstep"], "payment-details");

    let resp = post_json!(
        &app,
        "/api/v1/employer/update-payment-details",
        &token,
        json!({"billingname": "Acme Ltd", "billingaddress": "1 Main St"})
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["registrationstep"], "registration-complete");

    let resp = get!(&app, "/api/v1/employer/get", &token);
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "jane@example.com");
    assert_eq!(body["registrationstep"], "registration-complete");

    let resp = get!(&app, "/api/v1/employer/get/company", &token);
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Acme");
    assert_eq!(body["website"], "https://acme.example");

    let req = test::TestRequest::post()
        .uri("/api/v1/employer/login")
        .insert_header(api_key_header())
        .set_json(json!({"email": "jane@example.com", "password": "a-better-password"}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["registrationstep"], "registration-complete");
}

#[actix_web::test]
async fn test_out_of_order_action_keeps_step() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/employer/signup")
        .insert_header(api_key_header())
        .set_json(json!({"firstname": "Jane", "lastname": "Doe", "email": "jane@example.com"}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let token = body["token"].as_str().unwrap().to_string();

    let resp = post_json!(
        &app,
        "/api/v1/employer/update-company",
        &token,
        json!({"name": "Acme"})
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["registrationstep"], "change-password");
}

#[actix_web::test]
async fn test_update_password_rejects_wrong_current_password() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/employer/signup")
        .insert_header(api_key_header())
        .set_json(json!({"firstname": "Jane", "lastname": "Doe", "email": "jane@example.com"}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let token = body["token"].as_str().unwrap().to_string();

    let resp = post_json!(
        &app,
        "/api/v1/employer/update-password",
        &token,
        json!({"password": "not-the-temporary", "newpassword": "whatever"})
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = get!(&app, "/api/v1/employer/get", &token);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["registrationstep"], "change-password");
}

#[actix_web::test]
async fn test_company_and_payment_validation() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/employer/signup")
        .insert_header(api_key_header())
        .set_json(json!({"firstname": "Jane", "lastname": "Doe", "email": "jane@example.com"}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let token = body["token"].as_str().unwrap().to_string();

    let resp = get!(&app, "/api/v1/employer/get/company", &token);
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = post_json!(&app, "/api/v1/employer/update-company", &token, json!({"city": "Springfield"}));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = post_json!(
        &app,
        "/api/v1/employer/update-payment-method",
        &token,
        json!({"method": "barter"})
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = post_json!(
        &app,
        "/api/v1/employer/update-payment-details",
        &token,
        json!({"billingname": "Acme Ltd"})
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
