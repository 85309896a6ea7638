use std::sync::Arc;

use admin_service::domain::admin::service::AdminService;
use admin_service::inbound::http::router::create_router;
use admin_service::inbound::http::router::RESET_PASSWORD_PATH;
use admin_service::outbound::BackendClient;
use admin_service::outbound::HostedIdentityProvider;
use admin_service::outbound::RestRoleRepository;
use secrecy::Secret;
use serde_json::json;
use wiremock::matchers::body_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

pub const SERVICE_KEY: &str = "test-service-role-key";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const ADMIN_ID: &str = "admin-1";
pub const MEMBER_TOKEN: &str = "member-token";
pub const MEMBER_ID: &str = "member-1";

/// Test application that spawns a real server against a mocked hosted backend
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub backend: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_backend_http(reqwest::Client::new()).await
    }

    /// Spawn with `http` as the client the application uses to reach the backend
    pub async fn spawn_with_backend_http(http: reqwest::Client) -> Self {
        let backend = MockServer::start().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let backend_client = BackendClient::new(
            &backend.uri(),
            Secret::new(SERVICE_KEY.to_string()),
            http,
        )
        .expect("Failed to create backend client");

        let admin_service = Arc::new(AdminService::new(
            Arc::new(HostedIdentityProvider::new(backend_client.clone())),
            Arc::new(RestRoleRepository::new(backend_client)),
        ));

        let router = create_router(admin_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            backend,
            api_client: reqwest::Client::new(),
        }
    }

    /// Spawn with an admin and a regular member known to the backend
    pub async fn spawn_with_users() -> Self {
        let app = Self::spawn().await;
        app.mock_users().await;
        app
    }

    /// Register the admin and member tokens and their role rows
    pub async fn mock_users(&self) {
        self.mock_user(ADMIN_TOKEN, ADMIN_ID).await;
        self.mock_user(MEMBER_TOKEN, MEMBER_ID).await;
        self.mock_roles(ADMIN_ID, json!([{ "role": "admin" }])).await;
        self.mock_roles(MEMBER_ID, json!([])).await;
    }

    /// Helper to make POST request to the reset endpoint
    pub fn post_reset(&self) -> reqwest::RequestBuilder {
        self.api_client
            .post(format!("{}{}", self.address, RESET_PASSWORD_PATH))
    }

    /// Helper to make POST request to the reset endpoint with Bearer token
    pub fn post_reset_authenticated(&self, token: &str) -> reqwest::RequestBuilder {
        self.post_reset().bearer_auth(token)
    }

    /// Token `token` resolves to user `user_id`
    pub async fn mock_user(&self, token: &str, user_id: &str) {
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": user_id,
                "email": format!("{}@example.com", user_id),
                "aud": "authenticated"
            })))
            .mount(&self.backend)
            .await;
    }

    /// Admin role lookup for `user_id` answers with `rows`
    pub async fn mock_roles(&self, user_id: &str, rows: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/user_roles"))
            .and(query_param("user_id", format!("eq.{}", user_id).as_str()))
            .and(query_param("role", "eq.admin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(rows))
            .mount(&self.backend)
            .await;
    }

    /// Expect exactly `times` admin updates of `user_id` to `password`, answered with `response`
    pub async fn expect_password_update(
        &self,
        user_id: &str,
        password: &str,
        response: ResponseTemplate,
        times: u64,
    ) {
        Mock::given(method("PUT"))
            .and(path(format!("/auth/v1/admin/users/{}", user_id).as_str()))
            .and(header("authorization", format!("Bearer {}", SERVICE_KEY).as_str()))
            .and(body_json(json!({ "password": password })))
            .respond_with(response)
            .expect(times)
            .mount(&self.backend)
            .await;
    }

    /// Fail the test if any admin update reaches the backend
    pub async fn forbid_password_updates(&self) {
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.backend)
            .await;
    }
}
