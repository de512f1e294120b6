//! End-to-end authentication and authorization tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use talentgate_web::{create_app, AppState, WebConfig};

/// Test helper to create an optionally authenticated request
fn create_request(method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    if let Some(body) = body {
        builder = builder.header("Content-Type", "application/json");
        builder
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    }
}

/// Test helper to extract a JSON response body
async fn extract_json_response(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn test_app() -> (axum::Router, AppState) {
    let state = AppState::new(WebConfig::default()).await.unwrap();
    (create_app(state.clone()), state)
}

/// Register a user and return (access_token, refresh_token, user_id)
async fn register(app: &axum::Router, email: &str, roles: Value) -> (String, String, i64) {
    let request = create_request(
        "POST",
        "/api/auth/register",
        Some(json!({ "email": email, "password": "password123", "roles": roles })),
        None,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json_response(response).await;
    (
        body["access_token"].as_str().unwrap().to_string(),
        body["refresh_token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_i64().unwrap(),
    )
}

#[tokio::test]
async fn default_super_admin_can_log_in() {
    let (app, _) = test_app().await;

    let request = create_request(
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "admin@talentgate.local", "password": "admin123" })),
        None,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json_response(response).await;
    assert_eq!(body["user"]["email"], "admin@talentgate.local");
    assert_eq!(body["user"]["roles"][0], "ROLE_SUPER_ADMIN");
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
}

#[tokio::test]
async fn register_then_me_round_trips_identity() {
    let (app, _) = test_app().await;
    let (access, _, user_id) = register(&app, "jean@example.com", json!(["ROLE_CANDIDAT"])).await;

    let response = app
        .oneshot(create_request("GET", "/api/auth/me", None, Some(&access)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json_response(response).await;
    assert_eq!(body["id"].as_i64().unwrap(), user_id);
    assert_eq!(body["email"], "jean@example.com");
    assert_eq!(body["roles"], json!(["ROLE_CANDIDAT"]));
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let (app, _) = test_app().await;
    register(&app, "jean@example.com", json!(["ROLE_CANDIDAT"])).await;

    let request = create_request(
        "POST",
        "/api/auth/register",
        Some(json!({ "email": "jean@example.com", "password": "password456" })),
        None,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = extract_json_response(response).await;
    assert_eq!(body["error"], "duplicate_email");
}

#[tokio::test]
async fn wrong_password_is_a_coarse_401() {
    let (app, _) = test_app().await;
    register(&app, "jean@example.com", json!(["ROLE_CANDIDAT"])).await;

    let request = create_request(
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "jean@example.com", "password": "wrong" })),
        None,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = extract_json_response(response).await;
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn admin_endpoint_distinguishes_401_from_403() {
    let (app, _) = test_app().await;
    let (candidate_token, _, _) =
        register(&app, "candidate@example.com", json!(["ROLE_CANDIDAT"])).await;

    // No credential at all -> 401
    let response = app
        .clone()
        .oneshot(create_request("GET", "/api/admin/users", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = extract_json_response(response).await;
    assert_eq!(body["error"], "missing_token");

    // Verified candidate credential -> 403, do not retry with the same one
    let response = app
        .clone()
        .oneshot(create_request(
            "GET",
            "/api/admin/users",
            None,
            Some(&candidate_token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = extract_json_response(response).await;
    assert_eq!(body["error"], "insufficient_role");

    // Garbage credential -> 401 with the coarse message
    let response = app
        .oneshot(create_request("GET", "/api/admin/users", None, Some("garbage")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = extract_json_response(response).await;
    assert_eq!(body["error"], "invalid_token");
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn empty_roles_token_is_authenticated_but_privilege_less() {
    let (app, _) = test_app().await;
    let (token, _, _) = register(&app, "nobody@example.com", json!([])).await;

    // Authenticated: who-am-I works
    let response = app
        .clone()
        .oneshot(create_request("GET", "/api/auth/me", None, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Privilege-less: every role predicate fails with 403, not 401
    let response = app
        .oneshot(create_request("GET", "/api/admin/users", None, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn session_probe_tells_absent_apart_from_invalid() {
    let (app, _) = test_app().await;
    let (token, _, _) = register(&app, "jean@example.com", json!(["ROLE_CANDIDAT"])).await;

    // No credential at all is a valid anonymous session, not an error
    let response = app
        .clone()
        .oneshot(create_request("GET", "/api/auth/session", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json_response(response).await;
    assert_eq!(body["authenticated"], false);

    // A valid credential identifies the session
    let response = app
        .clone()
        .oneshot(create_request("GET", "/api/auth/session", None, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json_response(response).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["email"], "jean@example.com");

    // A present-but-invalid credential is still rejected outright
    let response = app
        .oneshot(create_request(
            "GET",
            "/api/auth/session",
            None,
            Some("garbage"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_access_token_is_rejected() {
    let (app, state) = test_app().await;

    // Craft an already-expired token signed with the same secret
    let now = chrono::Utc::now().timestamp();
    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({
            "sub": 1,
            "email": "admin@talentgate.local",
            "roles": ["ROLE_SUPER_ADMIN"],
            "iat": now - 3600,
            "exp": now - 60,
            "type": "access",
        }),
        &jsonwebtoken::EncodingKey::from_secret(state.config.auth.jwt_secret.as_bytes()),
    )
    .unwrap();

    let response = app
        .oneshot(create_request("GET", "/api/auth/me", None, Some(&expired)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_mints_a_usable_access_token() {
    let (app, _) = test_app().await;
    let (_, refresh_token, user_id) =
        register(&app, "jean@example.com", json!(["ROLE_CANDIDAT"])).await;

    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": refresh_token })),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json_response(response).await;
    let new_access = body["access_token"].as_str().unwrap();
    assert_eq!(body["token_type"], "Bearer");

    let response = app
        .oneshot(create_request("GET", "/api/auth/me", None, Some(new_access)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json_response(response).await;
    assert_eq!(body["id"].as_i64().unwrap(), user_id);
}

#[tokio::test]
async fn access_token_cannot_be_used_as_refresh_token() {
    let (app, _) = test_app().await;
    let (access, _, _) = register(&app, "jean@example.com", json!(["ROLE_CANDIDAT"])).await;

    let response = app
        .oneshot(create_request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": access })),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn revoked_refresh_token_never_mints_again() {
    let (app, _) = test_app().await;
    let (access, refresh_token, _) =
        register(&app, "jean@example.com", json!(["ROLE_CANDIDAT"])).await;

    // Logout revokes the session
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/api/auth/logout",
            Some(json!({ "refresh_token": refresh_token })),
            Some(&access),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The refresh token is unexpired by its own claims, yet must fail
    let response = app
        .oneshot(create_request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": refresh_token })),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_all_revokes_every_session_of_the_account() {
    let (app, _) = test_app().await;
    let (access, first_refresh, jean_id) =
        register(&app, "jean@example.com", json!(["ROLE_CANDIDAT"])).await;

    // A second login opens a second session
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "jean@example.com", "password": "password123" })),
            None,
        ))
        .await
        .unwrap();
    let second_refresh = extract_json_response(response).await["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    // A stranger cannot revoke someone else's sessions
    let (other_access, _, _) =
        register(&app, "other@example.com", json!(["ROLE_CANDIDAT"])).await;
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/api/auth/logout-all",
            Some(json!({ "user_id": jean_id })),
            Some(&other_access),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The owner revokes both sessions in one call
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/api/auth/logout-all",
            Some(json!({})),
            Some(&access),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json_response(response).await;
    assert_eq!(body["revoked_sessions"], 2);

    for refresh_token in [&first_refresh, &second_refresh] {
        let response = app
            .clone()
            .oneshot(create_request(
                "POST",
                "/api/auth/refresh",
                Some(json!({ "refresh_token": refresh_token })),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn logout_requires_session_ownership_or_admin() {
    let (app, _) = test_app().await;
    let (_, refresh_token, _) = register(&app, "owner@example.com", json!(["ROLE_CANDIDAT"])).await;
    let (other_access, _, _) =
        register(&app, "other@example.com", json!(["ROLE_CANDIDAT"])).await;

    // A stranger cannot revoke someone else's session
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/api/auth/logout",
            Some(json!({ "refresh_token": refresh_token })),
            Some(&other_access),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = extract_json_response(response).await;
    assert_eq!(body["error"], "not_resource_owner");

    // A platform admin can
    let (admin_access, _, _) = register(&app, "ops@example.com", json!(["ROLE_ADMIN"])).await;
    let response = app
        .oneshot(create_request(
            "POST",
            "/api/auth/logout",
            Some(json!({ "refresh_token": refresh_token })),
            Some(&admin_access),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn company_authorization_uses_memberships() {
    let (app, _) = test_app().await;
    let (owner_access, _, _) =
        register(&app, "owner@example.com", json!(["ROLE_RECRUITER"])).await;
    let (member_access, _, member_id) =
        register(&app, "member@example.com", json!(["ROLE_CANDIDAT"])).await;

    // A candidate cannot create a company
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/api/companies",
            Some(json!({ "name": "Acme" })),
            Some(&member_access),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A recruiter can, and becomes an active member
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/api/companies",
            Some(json!({ "name": "Acme" })),
            Some(&owner_access),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json_response(response).await;
    let company_id = body["company"]["id"].as_i64().unwrap();

    // A non-member cannot read the company
    let uri = format!("/api/companies/{}", company_id);
    let response = app
        .clone()
        .oneshot(create_request("GET", &uri, None, Some(&member_access)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = extract_json_response(response).await;
    assert_eq!(body["error"], "not_company_member");

    // A non-admin cannot invite members
    let members_uri = format!("/api/companies/{}/members", company_id);
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            &members_uri,
            Some(json!({ "user_id": member_id, "role": "RECRUTEUR" })),
            Some(&member_access),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = extract_json_response(response).await;
    assert_eq!(body["error"], "not_company_admin");

    // The owner invites; the membership starts pending so reads still fail
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            &members_uri,
            Some(json!({ "user_id": member_id, "role": "RECRUTEUR" })),
            Some(&owner_access),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json_response(response).await;
    assert_eq!(body["membership"]["status"], "pending");

    let response = app
        .clone()
        .oneshot(create_request("GET", &uri, None, Some(&member_access)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Activation is a single-row update; reads open up afterwards
    let status_uri = format!("/api/companies/{}/members/{}", company_id, member_id);
    let response = app
        .clone()
        .oneshot(create_request(
            "PATCH",
            &status_uri,
            Some(json!({ "status": "active" })),
            Some(&owner_access),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(create_request("GET", &uri, None, Some(&member_access)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Super admin bypasses membership entirely
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "admin@talentgate.local", "password": "admin123" })),
            None,
        ))
        .await
        .unwrap();
    let super_admin = extract_json_response(response).await;
    let super_token = super_admin["access_token"].as_str().unwrap().to_string();

    let response = app
        .oneshot(create_request("GET", &uri, None, Some(&super_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
