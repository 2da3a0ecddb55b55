mod common;

use admin_console::application_port::*;
use admin_console::domain_model::*;
use admin_console::domain_port::TransportError;
use common::*;
use serde_json::json;

fn fixed(body: serde_json::Value) -> std::sync::Arc<FakeBackend> {
    FakeBackend::new(move |_| {
        let body = body.clone();
        Box::pin(async move { ok(body) })
    })
}

fn query_of(request: &admin_console::domain_port::HttpRequest) -> Vec<(&str, &str)> {
    request
        .query
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

#[tokio::test]
async fn list_users_sends_paging_and_trimmed_search() {
    let harness = Harness::new(fixed(users_page()), Some(session("acc", "ref")));

    let page = harness
        .console
        .user_service
        .list_users(&UserQuery {
            page: 2,
            page_size: 25,
            search: "  ann ".into(),
        })
        .await
        .unwrap();
    assert_eq!(page.users[0].email, "ann@example.com");

    let request = &harness.backend.requests()[0];
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.path, "/admindb/users/");
    assert_eq!(
        query_of(request),
        vec![("page", "2"), ("page_size", "25"), ("search", "ann")]
    );
}

#[tokio::test]
async fn invalid_input_never_reaches_the_backend() {
    let harness = Harness::new(fixed(json!({})), Some(session("acc", "ref")));
    let console = &harness.console;

    let zero_page = console
        .user_service
        .list_users(&UserQuery {
            page: 0,
            ..UserQuery::default()
        })
        .await;
    assert!(matches!(
        zero_page,
        Err(ApiError::Validation(ValidationError::ZeroPaging("page")))
    ));

    let login = console
        .auth_service
        .login(LoginInput {
            email: "".into(),
            password: "".into(),
        })
        .await;
    assert!(matches!(
        login,
        Err(ApiError::Validation(ValidationError::MissingCredentials))
    ));

    let otp = console
        .auth_service
        .verify_password_reset_otp("ops@example.com", "12ab")
        .await;
    assert!(matches!(
        otp,
        Err(ApiError::Validation(ValidationError::InvalidOtp))
    ));

    let empty = console
        .administrator_service
        .update_administrator(&RecordId::from(3), &AdministratorPatch::default())
        .await;
    assert!(matches!(
        empty,
        Err(ApiError::Validation(ValidationError::EmptyUpdate))
    ));

    assert!(harness.backend.requests().is_empty());
}

#[tokio::test]
async fn administrator_lifecycle_paths() {
    let harness = Harness::new(
        fixed(json!({ "success": true, "message": "Done" })),
        Some(session("acc", "ref")),
    );
    let admins = &harness.console.administrator_service;
    let id = RecordId::from(3);

    let created = admins
        .create_administrator(&NewAdministrator {
            email: "staff@example.com".into(),
            full_name: "Staff Person".into(),
            phone: "(201) 555-0124".into(),
            role: Role::StaffAdmin,
            password: "changeme1".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.message, "Done");

    admins
        .update_administrator(
            &id,
            &AdministratorPatch {
                full_name: Some("Staff P.".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    admins.delete_administrator(&id).await.unwrap();

    let requests = harness.backend.requests();
    let calls: Vec<_> = requests
        .iter()
        .map(|r| (r.method, r.path.as_str()))
        .collect();
    assert_eq!(
        calls,
        vec![
            (HttpMethod::Post, "/admindb/administrators/create/"),
            (HttpMethod::Put, "/admindb/administrators/3/"),
            (HttpMethod::Delete, "/admindb/administrators/3/delete/"),
        ]
    );
    assert_eq!(
        requests[0].body,
        Some(json!({
            "email": "staff@example.com",
            "full_name": "Staff Person",
            "phone": "(201) 555-0124",
            "role": "staffadmin",
            "password": "changeme1"
        }))
    );
    assert_eq!(requests[1].body, Some(json!({ "full_name": "Staff P." })));
    assert!(requests.iter().all(|r| bearer(r) == Some("acc")));
}

#[tokio::test]
async fn default_message_when_backend_sends_none() {
    let harness = Harness::new(fixed(json!({ "id": 7 })), Some(session("acc", "ref")));

    let deleted = harness
        .console
        .user_service
        .delete_user(&RecordId::from(7))
        .await
        .unwrap();

    assert_eq!(deleted.message, "User deleted successfully");
    let request = &harness.backend.requests()[0];
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.path, "/admindb/users/7/");
}

#[tokio::test]
async fn unsuccessful_envelope_is_an_error() {
    let harness = Harness::new(
        fixed(json!({ "success": false, "message": "Administrator not found" })),
        Some(session("acc", "ref")),
    );

    let error = harness
        .console
        .administrator_service
        .delete_administrator(&RecordId::from(99))
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(200));
    assert_eq!(
        error.to_string(),
        "Administrator not found (status 200)"
    );
}

#[tokio::test]
async fn profile_update_refreshes_cached_user() {
    let harness = Harness::new(
        fixed(json!({ "message": "Profile updated successfully" })),
        Some(session("acc", "ref")),
    );

    let message = harness
        .console
        .profile_service
        .update_profile(&ProfilePatch {
            full_name: Some("Renamed Admin".into()),
            phone: Some("555-0100".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(message.message, "Profile updated successfully");

    let request = &harness.backend.requests()[0];
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.path, "/admindb/profile/");
    assert_eq!(
        request.body,
        Some(json!({ "full_name": "Renamed Admin", "phone": "555-0100" }))
    );

    let user = harness.console.auth_service.current_user().await.unwrap().unwrap();
    assert_eq!(user.full_name, "Renamed Admin");
    assert_eq!(user.email, "ops@example.com");
}

#[tokio::test]
async fn profile_is_read_from_wrapped_data() {
    let harness = Harness::new(
        fixed(json!({
            "success": true,
            "data": {
                "email": "ops@example.com",
                "full_name": "Ops Admin",
                "phone": "555-0100",
                "role": "admin",
                "username": "ops"
            }
        })),
        Some(session("acc", "ref")),
    );

    let profile = harness.console.profile_service.get_profile().await.unwrap();

    assert_eq!(profile.full_name, "Ops Admin");
    assert_eq!(profile.role, Some(Role::Admin));
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_is_unreachable() {
    let backend = FakeBackend::new(|_| {
        Box::pin(async { Err(TransportError::Connect("connection refused".into())) })
    });
    let harness = Harness::new(backend, Some(session("acc", "ref")));
    let mut events = harness.console.subscribe();

    let result = harness.console.auth_service.logout().await;

    assert!(matches!(result, Err(ApiError::Network(_))), "{result:?}");
    assert!(harness.stored().await.is_none());
    assert_eq!(
        drain(&mut events),
        vec![SessionEvent::Ended {
            reason: EndReason::LoggedOut
        }]
    );
    let request = &harness.backend.requests()[0];
    assert_eq!(request.path, "/auth/logout/");
    assert_eq!(bearer(request), Some("acc"));
}

#[tokio::test]
async fn logout_reports_backend_message() {
    let harness = Harness::new(
        fixed(json!({ "success": true, "message": "Successfully logged out" })),
        Some(session("acc", "ref")),
    );

    let message = harness.console.auth_service.logout().await.unwrap();

    assert_eq!(message.message, "Successfully logged out");
    assert!(!harness.console.auth_service.is_authenticated().await.unwrap());
}

#[tokio::test]
async fn login_starts_a_session_and_announces_it() {
    let harness = Harness::new(
        fixed(json!({
            "success": true,
            "message": "Login successful",
            "data": {
                "access_token": "acc",
                "refresh": "ref",
                "user_id": 1,
                "email": "ops@example.com",
                "full_name": "Ops Admin",
                "role": "admin",
                "is_verified": true
            }
        })),
        None,
    );
    let mut events = harness.console.subscribe();

    let outcome = harness
        .console
        .auth_service
        .login(LoginInput {
            email: " ops@example.com ".into(),
            password: "secret-pass".into(),
        })
        .await
        .unwrap();

    assert_eq!(outcome.message, "Login successful");
    let request = &harness.backend.requests()[0];
    assert_eq!(request.path, "/auth/login/");
    assert_eq!(bearer(request), None);
    assert_eq!(
        request.body,
        Some(json!({ "email": "ops@example.com", "password": "secret-pass" }))
    );

    let stored = harness.stored().await.unwrap();
    assert_eq!(stored.access_token.as_str(), "acc");
    assert_eq!(stored.refresh_token.as_str(), "ref");
    assert_eq!(
        drain(&mut events),
        vec![SessionEvent::Started {
            user: stored.user.clone()
        }]
    );
}

#[tokio::test]
async fn password_reset_calls_are_public() {
    let harness = Harness::new(fixed(json!({})), Some(session("acc", "ref")));
    let auth = &harness.console.auth_service;

    let sent = auth.request_password_reset("ops@example.com").await.unwrap();
    assert_eq!(sent.message, "OTP sent successfully");
    auth.verify_password_reset_otp("ops@example.com", "123456")
        .await
        .unwrap();
    auth.confirm_password_reset(PasswordResetConfirm {
        email: "ops@example.com".into(),
        otp_code: "123456".into(),
        new_password: "new-secret".into(),
    })
    .await
    .unwrap();
    auth.resend_otp("ops@example.com", OtpPurpose::PasswordReset)
        .await
        .unwrap();

    let requests = harness.backend.requests();
    assert!(requests.iter().all(|r| bearer(r).is_none()));
    let paths: Vec<_> = requests.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/auth/password-reset-request/",
            "/auth/password-reset-verify-otp/",
            "/auth/password-reset-confirm/",
            "/auth/resend-otp/",
        ]
    );
    assert_eq!(
        requests[2].body,
        Some(json!({
            "email": "ops@example.com",
            "otp_code": "123456",
            "new_password": "new-secret"
        }))
    );
    assert_eq!(
        requests[3].body,
        Some(json!({ "email": "ops@example.com", "purpose": "password_reset" }))
    );
}

#[tokio::test]
async fn change_password_rides_on_the_session() {
    let harness = Harness::new(fixed(json!({})), Some(session("acc", "ref")));

    let changed = harness
        .console
        .auth_service
        .change_password("old-secret", "new-secret")
        .await
        .unwrap();

    assert_eq!(changed.message, "Password changed successfully");
    let request = &harness.backend.requests()[0];
    assert_eq!(request.path, "/auth/change-password/");
    assert_eq!(bearer(request), Some("acc"));
}

#[tokio::test]
async fn check_email_exposes_extra_fields() {
    let harness = Harness::new(
        fixed(json!({ "success": true, "exists": true })),
        None,
    );

    let envelope = harness
        .console
        .auth_service
        .check_email("ops@example.com")
        .await
        .unwrap();

    assert_eq!(envelope.extra.get("exists"), Some(&json!(true)));
}

#[tokio::test]
async fn record_ids_cannot_redirect_to_another_endpoint() {
    let harness = Harness::new(fixed(json!({})), Some(session("acc", "ref")));
    let console = &harness.console;

    for raw in ["../administrators/3/delete", "7?x=1", "7#top", "..", ""] {
        let id = RecordId::from(raw);
        let deleted = console.user_service.delete_user(&id).await;
        assert!(
            matches!(deleted, Err(ApiError::Validation(ValidationError::InvalidId(_)))),
            "{raw}: {deleted:?}"
        );
        let removed = console.administrator_service.delete_administrator(&id).await;
        assert!(removed.is_err(), "{raw}");
        let updated = console
            .administrator_service
            .update_administrator(
                &id,
                &AdministratorPatch {
                    phone: Some("555-0100".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(updated.is_err(), "{raw}");
    }

    assert!(harness.backend.requests().is_empty());
}

#[tokio::test]
async fn unsuccessful_envelope_keeps_its_http_status() {
    let backend = FakeBackend::new(|_| {
        Box::pin(async {
            status(
                201,
                json!({ "success": false, "message": "Administrator already exists" }),
            )
        })
    });
    let harness = Harness::new(backend, Some(session("acc", "ref")));

    let error = harness
        .console
        .administrator_service
        .create_administrator(&NewAdministrator {
            email: "staff@example.com".into(),
            full_name: "Staff Person".into(),
            phone: "555-0100".into(),
            role: Role::StaffAdmin,
            password: "changeme1".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(201));
    assert_eq!(
        error.to_string(),
        "Administrator already exists (status 201)"
    );
}

#[tokio::test]
async fn logout_with_dead_refresh_token_announces_the_end_once() {
    let backend = FakeBackend::new(|request| {
        Box::pin(async move {
            if request.path == admin_console::application_impl::REFRESH_PATH {
                return status(401, json!({ "detail": "Token is invalid or expired" }));
            }
            unauthorized()
        })
    });
    let harness = Harness::new(backend, Some(session("acc", "ref")));
    let mut events = harness.console.subscribe();

    let result = harness.console.auth_service.logout().await;

    assert!(matches!(result, Err(ApiError::SessionExpired)), "{result:?}");
    assert!(harness.stored().await.is_none());
    assert_eq!(
        drain(&mut events),
        vec![SessionEvent::Ended {
            reason: EndReason::RefreshFailed
        }]
    );
}

#[tokio::test]
async fn account_profile_lives_under_auth() {
    let harness = Harness::new(
        fixed(json!({ "email": "ops@example.com", "full_name": "Ops Admin", "username": "ops" })),
        Some(session("acc", "ref")),
    );
    let profiles = &harness.console.profile_service;

    let profile = profiles.get_user_profile().await.unwrap();
    assert_eq!(profile.username, "ops");

    profiles
        .update_user_profile(&ProfilePatch {
            email: Some("ops2@example.com".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let requests = harness.backend.requests();
    let calls: Vec<_> = requests
        .iter()
        .map(|r| (r.method, r.path.as_str(), bearer(r)))
        .collect();
    assert_eq!(
        calls,
        vec![
            (HttpMethod::Get, "/auth/profile/", Some("acc")),
            (HttpMethod::Put, "/auth/profile/", Some("acc")),
        ]
    );
    assert_eq!(requests[1].body, Some(json!({ "email": "ops2@example.com" })));

    let user = harness.console.auth_service.current_user().await.unwrap().unwrap();
    assert_eq!(user.email, "ops2@example.com");
}
