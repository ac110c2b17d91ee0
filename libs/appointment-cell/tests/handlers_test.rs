use axum::extract::{Extension, Path, Query, State};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::handlers::*;
use appointment_cell::models::*;
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

fn list_params() -> AppointmentListParams {
    AppointmentListParams {
        dealer_id: None,
        status: None,
        sort: None,
        page: None,
        per_page: None,
        sibling_count: None,
        from_date: None,
        to_date: None,
    }
}

async fn mount_appointments(mock_server: &MockServer, dealer_id: &str, rows: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("dealer_id", format!("eq.{}", dealer_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn list_appointments_runs_the_full_pipeline() {
    let mock_server = MockServer::start().await;
    let dealer = TestUser::dealer("pipeline@example.com");
    let dealer_id = dealer.id.clone();

    mount_appointments(
        &mock_server,
        &dealer_id,
        json!([
            MockPlatformResponses::appointment_response(
                &dealer_id,
                "Brightway Auto",
                "confirmed",
                "2026-08-12T10:00:00Z",
                45
            ),
            MockPlatformResponses::appointment_response(
                &dealer_id,
                "Apex Motors",
                "pending",
                "2026-08-10T09:00:00Z",
                30
            ),
            MockPlatformResponses::appointment_response(
                &dealer_id,
                "Cedar Lane Cars",
                "pending",
                "2026-08-14T14:00:00Z",
                60
            ),
        ]),
    )
    .await;

    let config = TestConfig::with_platform_url(&mock_server.uri());
    let token = JwtTestUtils::create_test_token(&dealer, &config.jwt_secret, Some(1));

    let mut params = list_params();
    params.status = Some(StatusFilter::Pending);
    params.sort = Some("date_asc".to_string());

    let response = list_appointments(
        State(config.to_arc()),
        auth_header(&token),
        user_extension("dealer", &dealer_id),
        Query(params),
    )
    .await
    .expect("pipeline should succeed");

    let body = response.0;
    let appointments = body["appointments"].as_array().unwrap();
    assert_eq!(appointments.len(), 2);
    assert_eq!(appointments[0]["dealer_name"], "Apex Motors");
    assert_eq!(appointments[1]["dealer_name"], "Cedar Lane Cars");

    let counts = body["status_counts"].as_array().unwrap();
    let pending = counts.iter().find(|c| c["value"] == "pending").unwrap();
    assert_eq!(pending["count"], 2);
    let all = counts.iter().find(|c| c["value"] == "all").unwrap();
    assert_eq!(all["count"], 3);

    assert_eq!(body["total_pages"], 1);
    assert!(body["page_items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_sort_key_is_ignored_not_rejected() {
    let mock_server = MockServer::start().await;
    let dealer = TestUser::dealer("fallback@example.com");
    let dealer_id = dealer.id.clone();

    mount_appointments(
        &mock_server,
        &dealer_id,
        json!([
            MockPlatformResponses::appointment_response(
                &dealer_id,
                "Second In Store Order",
                "pending",
                "2026-08-20T10:00:00Z",
                30
            ),
            MockPlatformResponses::appointment_response(
                &dealer_id,
                "First In Store Order",
                "pending",
                "2026-08-01T10:00:00Z",
                30
            ),
        ]),
    )
    .await;

    let config = TestConfig::with_platform_url(&mock_server.uri());
    let token = JwtTestUtils::create_test_token(&dealer, &config.jwt_secret, Some(1));

    let mut params = list_params();
    params.sort = Some("horsepower_desc".to_string());

    let response = list_appointments(
        State(config.to_arc()),
        auth_header(&token),
        user_extension("dealer", &dealer_id),
        Query(params),
    )
    .await
    .expect("unknown sort keys fall back to input order");

    let appointments = response.0["appointments"].as_array().unwrap().clone();
    assert_eq!(appointments[0]["dealer_name"], "Second In Store Order");
}

#[tokio::test]
async fn dealer_cannot_scope_to_another_dealer() {
    let mock_server = MockServer::start().await;
    let dealer = TestUser::dealer("scoped@example.com");

    let config = TestConfig::with_platform_url(&mock_server.uri());
    let token = JwtTestUtils::create_test_token(&dealer, &config.jwt_secret, Some(1));

    let mut params = list_params();
    params.dealer_id = Some(Uuid::new_v4());

    let result = list_appointments(
        State(config.to_arc()),
        auth_header(&token),
        user_extension("dealer", &dealer.id),
        Query(params),
    )
    .await;

    assert!(matches!(result, Err(AppError::Auth(_))));
}

#[tokio::test]
async fn admin_may_scope_to_any_dealer() {
    let mock_server = MockServer::start().await;
    let admin = TestUser::admin("ops@example.com");
    let target_dealer = Uuid::new_v4();

    mount_appointments(&mock_server, &target_dealer.to_string(), json!([])).await;

    let config = TestConfig::with_platform_url(&mock_server.uri());
    let token = JwtTestUtils::create_test_token(&admin, &config.jwt_secret, Some(1));

    let mut params = list_params();
    params.dealer_id = Some(target_dealer);

    let response = list_appointments(
        State(config.to_arc()),
        auth_header(&token),
        user_extension("admin", &admin.id),
        Query(params),
    )
    .await
    .expect("admin scope should be allowed");

    assert_eq!(response.0["total_count"], 0);
}

#[tokio::test]
async fn get_appointment_checks_ownership() {
    let mock_server = MockServer::start().await;
    let owner_id = Uuid::new_v4();
    let stranger = TestUser::dealer("stranger@example.com");
    let appointment_id = Uuid::new_v4();

    let mut row = MockPlatformResponses::appointment_response(
        &owner_id.to_string(),
        "Apex Motors",
        "confirmed",
        "2026-08-12T10:00:00Z",
        30,
    );
    row["id"] = json!(appointment_id);

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", appointment_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_platform_url(&mock_server.uri());
    let token = JwtTestUtils::create_test_token(&stranger, &config.jwt_secret, Some(1));

    let result = get_appointment(
        State(config.to_arc()),
        Path(appointment_id),
        auth_header(&token),
        user_extension("dealer", &stranger.id),
    )
    .await;

    assert!(matches!(result, Err(AppError::Auth(_))));
}

#[tokio::test]
async fn missing_appointment_maps_to_not_found() {
    let mock_server = MockServer::start().await;
    let admin = TestUser::admin("ops@example.com");
    let appointment_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_platform_url(&mock_server.uri());
    let token = JwtTestUtils::create_test_token(&admin, &config.jwt_secret, Some(1));

    let result = get_appointment(
        State(config.to_arc()),
        Path(appointment_id),
        auth_header(&token),
        user_extension("admin", &admin.id),
    )
    .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
