use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;

pub struct TestConfig {
    pub jwt_secret: String,
    pub platform_url: String,
    pub platform_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            platform_url: "http://localhost:54321".to_string(),
            platform_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_platform_url(url: &str) -> Self {
        Self {
            platform_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            platform_url: self.platform_url.clone(),
            platform_anon_key: self.platform_anon_key.clone(),
            platform_jwt_secret: self.jwt_secret.clone(),
            refresh_threshold_secs: 300,
            invite_ttl_hours: 72,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "dealer".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn dealer(email: &str) -> Self {
        Self::new(email, "dealer")
    }

    pub fn staff(email: &str) -> Self {
        Self::new(email, "staff")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "admin")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            metadata: None,
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub struct MockPlatformResponses;

impl MockPlatformResponses {
    pub fn appointment_response(
        dealer_id: &str,
        dealer_name: &str,
        status: &str,
        starts_at: &str,
        duration_minutes: i32,
    ) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
            "dealer_id": dealer_id,
            "dealer_name": dealer_name,
            "dealer_contact": "sales@example.com",
            "starts_at": starts_at,
            "ends_at": null,
            "duration_minutes": duration_minutes,
            "status": status,
            "notes": null,
            "location": "Showroom A",
            "meeting_type": "in_person",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": null
        })
    }

    pub fn dealer_response(dealer_id: &str, name: &str, status: &str) -> serde_json::Value {
        json!({
            "id": dealer_id,
            "name": name,
            "email": "dealer@example.com",
            "phone": "+1-555-0100",
            "status": status,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": null
        })
    }

    pub fn invitation_response(
        invitation_id: &str,
        dealer_id: &str,
        status: &str,
        expires_at: &str,
    ) -> serde_json::Value {
        json!({
            "id": invitation_id,
            "dealer_id": dealer_id,
            "email": "invitee@example.com",
            "status": status,
            "expires_at": expires_at,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": null
        })
    }

    pub fn report_point(period_start: &str, count: i64, total: f64) -> serde_json::Value {
        json!({
            "period_start": period_start,
            "count": count,
            "total": total
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "error": {
                "message": message,
                "code": code
            }
        })
    }
}
