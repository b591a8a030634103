use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth_service::domain::user::models::UserStatus;
use auth_service::domain::user::models::UserId;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::outbound::revocation::InMemoryRevocationStore;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Issuer sharing the server's secret, for forging tokens in tests
fn test_issuer() -> TokenIssuer {
    TokenIssuer::new(TEST_SECRET, chrono::Duration::minutes(15))
}

/// Test application that spawns a real server over the in-memory repository
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryUserRepository>,
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    /// Spawn with logout revocation enabled
    pub async fn spawn_with_revocation() -> Self {
        Self::spawn_with(true).await
    }

    async fn spawn_with(revoke_on_logout: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::new());

        // Minimal Argon2 parameters keep the suite fast.
        let hasher = PasswordHasher::with_memory(1, 1024).expect("Failed to build hasher");
        let authenticator = Arc::new(Authenticator::new(hasher, test_issuer()));

        let service = AuthService::new(Arc::clone(&repository), authenticator);
        let router = if revoke_on_logout {
            create_router(Arc::new(
                service.with_revocation_store(Arc::new(InMemoryRevocationStore::new())),
            ))
        } else {
            create_router(Arc::new(service))
        };

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            repository,
            token_issuer: test_issuer(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Registers a user and returns the response body
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Logs in and returns the bearer token
    pub async fn login(&self, identifier: &str, password: &str) -> String {
        let response = self
            .post("/auth/login")
            .json(&json!({ "identifier": identifier, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Flips an account's status directly in the store
    pub async fn set_status(&self, user_id: &str, status: UserStatus) {
        let id = UserId::from_string(user_id).expect("Invalid user id");
        self.repository
            .set_status(&id, status)
            .await
            .expect("Failed to update status");
    }
}
