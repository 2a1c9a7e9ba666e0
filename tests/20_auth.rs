mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use common::{clears_auth_cookies, location, set_cookies, start_server, start_server_without_backend};

#[tokio::test]
async fn login_relays_backend_answer_and_mints_cookies() -> Result<()> {
    let server = start_server().await?;
    server.backend.on_with_cookies(
        Method::POST,
        "/api/auth/login",
        200,
        json!({"idToken": "id-1", "refreshToken": "refresh-1", "email": "ana@example.com"}),
        &["session=backend-session; Path=/; HttpOnly"],
    );

    let res = server
        .post("/api/auth/login", None, json!({"email": "ana@example.com", "password": "secret"}))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let cookies = set_cookies(&res);
    assert!(cookies.contains(&"session=backend-session; Path=/; HttpOnly".to_string()));
    assert!(cookies.contains(&"idToken=id-1; Path=/; Max-Age=3600; HttpOnly; SameSite=Lax".to_string()));
    assert!(cookies.contains(&"refreshToken=refresh-1; Path=/; Max-Age=2592000; HttpOnly; SameSite=Lax".to_string()));

    let body = res.json::<Value>().await?;
    assert_eq!(body["email"], "ana@example.com");

    let call = server.backend.only_call();
    assert_eq!(call.body, Some(json!({"email": "ana@example.com", "password": "secret"})));
    assert_eq!(call.cookie, None);
    Ok(())
}

#[tokio::test]
async fn login_rejection_keeps_backend_status_and_body() -> Result<()> {
    let server = start_server().await?;
    server
        .backend
        .on(Method::POST, "/api/auth/login", 401, json!({"error": {"message": "INVALID_PASSWORD"}}));

    let res = server.post("/api/auth/login", None, json!({"email": "a@b.c", "password": "x"})).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&res).is_empty());
    assert_eq!(res.json::<Value>().await?["error"]["message"], "INVALID_PASSWORD");
    Ok(())
}

#[tokio::test]
async fn login_action_requires_email_and_password() -> Result<()> {
    let server = start_server().await?;

    for body in [json!({}), json!({"email": "a@b.c"}), json!({"email": "", "password": "x"})] {
        let res = server.post("/api/auth/login-action", None, body).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(res.json::<Value>().await?["message"], "Missing email or password");
    }
    assert!(server.backend.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn login_action_sets_token_cookies() -> Result<()> {
    let server = start_server().await?;
    server.backend.on(
        Method::POST,
        "/api/auth/login",
        200,
        json!({"idToken": "id-2", "refreshToken": "refresh-2"}),
    );

    let res = server
        .post("/api/auth/login-action", None, json!({"email": "a@b.c", "password": "pw"}))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cookies = set_cookies(&res);
    assert_eq!(cookies.len(), 2);
    assert!(cookies[0].starts_with("idToken=id-2;"));
    assert!(cookies[1].starts_with("refreshToken=refresh-2;"));
    assert!(cookies.iter().all(|c| !c.contains("Secure")));
    assert_eq!(res.json::<Value>().await?, json!({"status": "success"}));

    let call = server.backend.only_call();
    assert_eq!(call.body.unwrap()["returnSecureToken"], true);
    Ok(())
}

#[tokio::test]
async fn login_action_without_tokens_is_unauthorized() -> Result<()> {
    let server = start_server().await?;
    server
        .backend
        .on(Method::POST, "/api/auth/login", 200, json!({"idToken": "only-one"}));

    let res = server
        .post("/api/auth/login-action", None, json!({"email": "a@b.c", "password": "pw"}))
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&res).is_empty());
    assert_eq!(res.json::<Value>().await?["message"], "Login failed, no tokens received");
    Ok(())
}

#[tokio::test]
async fn login_action_relays_backend_rejection() -> Result<()> {
    let server = start_server().await?;
    server.backend.on_raw(Method::POST, "/api/auth/login", 403, "forbidden");

    let res = server
        .post("/api/auth/login-action", None, json!({"email": "a@b.c", "password": "pw"}))
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>().await?["message"], "Login failed");
    Ok(())
}

#[tokio::test]
async fn logoff_without_session_skips_backend() -> Result<()> {
    let server = start_server().await?;

    let res = server.post("/api/auth/logoff", None, json!({})).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(clears_auth_cookies(&res));
    assert_eq!(res.json::<Value>().await?["message"], "No active session");
    assert!(server.backend.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn logoff_forwards_session_and_clears_cookies() -> Result<()> {
    let server = start_server().await?;
    server.backend.on(Method::POST, "/api/auth/logoff", 200, json!({"ok": true}));

    let res = server.post("/api/auth/logoff", Some("idToken=tok"), json!({})).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(clears_auth_cookies(&res));
    assert_eq!(res.json::<Value>().await?["message"], "Logout successful");
    assert_eq!(server.backend.only_call().cookie.as_deref(), Some("session=tok"));
    Ok(())
}

#[tokio::test]
async fn logoff_succeeds_even_when_backend_fails() -> Result<()> {
    let server = start_server().await?;
    server.backend.on(Method::POST, "/api/auth/logoff", 500, json!({"error": "boom"}));

    let res = server.post("/api/auth/logoff", Some("session=abc"), json!({})).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(clears_auth_cookies(&res));
    assert_eq!(res.json::<Value>().await?["message"], "Logout completed with errors");

    let offline = start_server_without_backend().await?;
    let res = offline.post("/api/auth/logoff", Some("session=abc"), json!({})).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(clears_auth_cookies(&res));
    assert_eq!(res.json::<Value>().await?["message"], "Logout completed with errors");
    Ok(())
}

#[tokio::test]
async fn logout_redirects_home_and_clears_cookies() -> Result<()> {
    let server = start_server().await?;

    let res = server.get("/api/auth/logout", Some("session=abc")).await?;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), Some(format!("{}/", server.base_url)));
    assert!(clears_auth_cookies(&res));
    assert!(server.backend.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn change_password_validates_then_forwards() -> Result<()> {
    let server = start_server().await?;

    let res = server.post("/api/auth/change-password", None, json!({"newPassword": "n3w"})).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["message"], "Unauthorized");

    let res = server.post("/api/auth/change-password", Some("session=abc"), json!({})).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["message"], "New password is required");
    assert!(server.backend.calls().is_empty());

    server
        .backend
        .on(Method::POST, "/api/auth/change-password", 200, json!({"message": "Password updated"}));
    let res = server
        .post("/api/auth/change-password", Some("idToken=legacy"), json!({"newPassword": "n3w"}))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["message"], "Password updated");

    let call = server.backend.only_call();
    assert_eq!(call.cookie.as_deref(), Some("session=legacy"));
    assert_eq!(call.body, Some(json!({"newPassword": "n3w"})));
    Ok(())
}

#[tokio::test]
async fn forgot_password_relays_backend_answer() -> Result<()> {
    let server = start_server().await?;

    let res = server.post("/api/auth/forgot-password", None, json!({})).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    server.backend.on(
        Method::POST,
        "/api/auth/forgot-password",
        202,
        json!({"message": "Recovery email sent"}),
    );
    let res = server
        .post("/api/auth/forgot-password", None, json!({"email": "ana@example.com"}))
        .await?;
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    assert_eq!(res.json::<Value>().await?["message"], "Recovery email sent");
    Ok(())
}

#[tokio::test]
async fn session_status_reflects_cookie_presence() -> Result<()> {
    let server = start_server().await?;

    let res = server.get("/api/auth/session", Some("session=abc")).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"isAuthenticated": true}));

    let res = server.get("/api/auth/session", None).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
