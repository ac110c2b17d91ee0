use axum::extract::{Extension, Path, State};
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use headers::{authorization::Bearer, Authorization};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dealer_cell::handlers::*;
use dealer_cell::models::{Invitation, InvitationStatus};
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::test_utils::{JwtTestUtils, MockPlatformResponses, TestConfig, TestUser};

fn user_extension(role: &str, id: &str) -> Extension<User> {
    Extension(User {
        id: id.to_string(),
        email: Some(format!("{}@example.com", role)),
        role: Some(role.to_string()),
        metadata: None,
        created_at: Some(chrono::Utc::now()),
    })
}

fn auth_header(token: &str) -> TypedHeader<Authorization<Bearer>> {
    TypedHeader(Authorization::bearer(token).unwrap())
}

async fn mount_invitation(
    mock_server: &MockServer,
    invitation_id: &str,
    dealer_id: &str,
    status: &str,
    expires_at: &str,
) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/dealer_invitations"))
        .and(query_param("id", format!("eq.{}", invitation_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockPlatformResponses::invitation_response(invitation_id, dealer_id, status, expires_at)
        ])))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn resend_reissues_a_pending_invitation() {
    let mock_server = MockServer::start().await;
    let admin = TestUser::admin("ops@example.com");
    let invitation_id = Uuid::new_v4();
    let dealer_id = Uuid::new_v4();

    let future_expiry = (Utc::now() + Duration::hours(1)).to_rfc3339();
    mount_invitation(
        &mock_server,
        &invitation_id.to_string(),
        &dealer_id.to_string(),
        "pending",
        &future_expiry,
    )
    .await;

    let reissued_expiry = (Utc::now() + Duration::hours(72)).to_rfc3339();
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/dealer_invitations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockPlatformResponses::invitation_response(
                &invitation_id.to_string(),
                &dealer_id.to_string(),
                "pending",
                &reissued_expiry
            )
        ])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_platform_url(&mock_server.uri());
    let token = JwtTestUtils::create_test_token(&admin, &config.jwt_secret, Some(1));

    let response = resend_invitation(
        State(config.to_arc()),
        Path(invitation_id),
        auth_header(&token),
        user_extension("admin", &admin.id),
    )
    .await
    .expect("resend should succeed");

    assert_eq!(response.0["success"], true);
    let invitation: Invitation =
        serde_json::from_value(response.0["invitation"].clone()).unwrap();
    assert_eq!(invitation.status, InvitationStatus::Pending);
    assert!(invitation.expires_at > Utc::now() + Duration::hours(24));
}

#[tokio::test]
async fn resend_rejects_accepted_invitations() {
    let mock_server = MockServer::start().await;
    let admin = TestUser::admin("ops@example.com");
    let invitation_id = Uuid::new_v4();

    let future_expiry = (Utc::now() + Duration::hours(1)).to_rfc3339();
    mount_invitation(
        &mock_server,
        &invitation_id.to_string(),
        &Uuid::new_v4().to_string(),
        "accepted",
        &future_expiry,
    )
    .await;

    let config = TestConfig::with_platform_url(&mock_server.uri());
    let token = JwtTestUtils::create_test_token(&admin, &config.jwt_secret, Some(1));

    let result = resend_invitation(
        State(config.to_arc()),
        Path(invitation_id),
        auth_header(&token),
        user_extension("admin", &admin.id),
    )
    .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn cancel_is_idempotent_for_cancelled_invitations() {
    let mock_server = MockServer::start().await;
    let staff = TestUser::staff("desk@example.com");
    let invitation_id = Uuid::new_v4();

    let past_expiry = (Utc::now() - Duration::hours(1)).to_rfc3339();
    mount_invitation(
        &mock_server,
        &invitation_id.to_string(),
        &Uuid::new_v4().to_string(),
        "cancelled",
        &past_expiry,
    )
    .await;

    let config = TestConfig::with_platform_url(&mock_server.uri());
    let token = JwtTestUtils::create_test_token(&staff, &config.jwt_secret, Some(1));

    // No PATCH mock mounted: an already-cancelled invitation must not
    // trigger a write.
    let response = cancel_invitation(
        State(config.to_arc()),
        Path(invitation_id),
        auth_header(&token),
        user_extension("staff", &staff.id),
    )
    .await
    .expect("cancel should be a no-op");

    assert_eq!(response.0["invitation"]["status"], "cancelled");
}

#[tokio::test]
async fn dealers_cannot_manage_invitations() {
    let mock_server = MockServer::start().await;
    let dealer = TestUser::dealer("dealer@example.com");
    let invitation_id = Uuid::new_v4();

    let config = TestConfig::with_platform_url(&mock_server.uri());
    let token = JwtTestUtils::create_test_token(&dealer, &config.jwt_secret, Some(1));

    let result = cancel_invitation(
        State(config.to_arc()),
        Path(invitation_id),
        auth_header(&token),
        user_extension("dealer", &dealer.id),
    )
    .await;

    assert!(matches!(result, Err(AppError::Auth(_))));
}

#[tokio::test]
async fn deactivation_warning_counts_open_work() {
    let mock_server = MockServer::start().await;
    let admin = TestUser::admin("ops@example.com");
    let dealer_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": Uuid::new_v4() }, { "id": Uuid::new_v4() }])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/dealer_invitations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": Uuid::new_v4() }])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_platform_url(&mock_server.uri());
    let token = JwtTestUtils::create_test_token(&admin, &config.jwt_secret, Some(1));

    let response = get_deactivation_warning(
        State(config.to_arc()),
        Path(dealer_id),
        auth_header(&token),
        user_extension("admin", &admin.id),
    )
    .await
    .expect("warning should be computed");

    assert_eq!(response.0["warning"]["open_appointments"], 2);
    assert_eq!(response.0["warning"]["pending_invitations"], 1);
    assert_eq!(response.0["requires_confirmation"], true);
}

#[tokio::test]
async fn lapsed_pending_invitation_reports_as_expired() {
    let dealer_id = Uuid::new_v4();
    let invitation = Invitation {
        id: Uuid::new_v4(),
        dealer_id,
        email: "invitee@example.com".to_string(),
        status: InvitationStatus::Pending,
        expires_at: Utc::now() - Duration::minutes(5),
        created_at: None,
        updated_at: None,
    };

    assert!(invitation.is_expired());
    assert_eq!(invitation.effective_status(), InvitationStatus::Expired);
}
