use std::sync::Arc;

use auth::Authenticator;
use auth::HashingConfig;
use auth::PasswordHasher;
use auth::SecretKey;
use auth::TokenIssuer;
use serde_json::json;
use serde_json::Value;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-token-signing-at-least-32-bytes";

/// Default password used by `register_default_user`
pub const TEST_PASSWORD: &str = "Valid123!";

/// Test application that spawns a real server backed by the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap cost parameters keep the suite fast
        let password_hasher = PasswordHasher::with_config(HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
            ..HashingConfig::default()
        })
        .expect("Failed to build password hasher");

        let authenticator = Arc::new(
            Authenticator::new(SecretKey::new(TEST_SECRET).expect("Invalid test secret"))
                .with_password_hasher(password_hasher),
        );

        let user_repo = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(user_repo, Arc::clone(&authenticator)));

        let router = create_router(user_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let token_issuer = TokenIssuer::new(SecretKey::new(TEST_SECRET).unwrap());

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            token_issuer,
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

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/register")
            .json(&json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register `ada@example.com` and return (user id, token)
    pub async fn register_default_user(&self) -> (i64, String) {
        let body: Value = self
            .register("ada@example.com", TEST_PASSWORD)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        (
            body["data"]["user"]["id"].as_i64().expect("Missing user id"),
            body["data"]["token"]
                .as_str()
                .expect("Missing token")
                .to_string(),
        )
    }

    /// Log in and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
