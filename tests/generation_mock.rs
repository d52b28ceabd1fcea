//! End-to-end generation against a mocked OpenAI-compatible endpoint.

use ash_compose::{
    Catalog, ComposeGenerator, GenerationRequest, GenerationResult, GeneratorConfig,
};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use std::time::Duration;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Mock server plus a generator pointed at it.
struct MockServerFixture {
    server: ServerGuard,
}

impl MockServerFixture {
    async fn new() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    fn generator(&self, api_key: Option<&str>) -> ComposeGenerator {
        let mut builder = GeneratorConfig::builder().base_url(self.server.url());
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        let config = builder.build().expect("valid config");
        ComposeGenerator::new(config).expect("http client")
    }

    async fn mock_completion(&mut self, content: &str, total_tokens: u64, hits: usize) -> Mock {
        let body = json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "model": "gpt-4.1-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 100, "completion_tokens": 50, "total_tokens": total_tokens}
        });
        self.server
            .mock("POST", COMPLETIONS_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(hits)
            .create_async()
            .await
    }

    async fn mock_error(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", COMPLETIONS_PATH)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    async fn mock_untouched(&mut self) -> Mock {
        self.server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await
    }
}

fn vaultwarden_request() -> GenerationRequest {
    let catalog = Catalog::builtin().unwrap();
    let template = catalog.get("vaultwarden").unwrap();
    let mut values = template.default_values();
    values.insert("admin_token".into(), "s3cret".into());
    template.validate_values(&values).unwrap();
    template.to_request(values)
}

#[tokio::test]
async fn vaultwarden_compose_is_generated_and_unfenced() {
    let mut fixture = MockServerFixture::new().await;
    let compose = "services:\n  vaultwarden:\n    image: vaultwarden/server:latest\n    ports:\n      - \"8222:80\"";
    let mock = fixture
        .server
        .mock("POST", COMPLETIONS_PATH)
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({
                "model": "gpt-4.1-mini",
                "temperature": 0.3,
                "max_tokens": 4096
            })),
            Matcher::Regex("You are a Docker Compose expert".into()),
            Matcher::Regex("- port: 8222".into()),
            Matcher::Regex("- admin_token: s3cret".into()),
            Matcher::Regex("vaultwarden/server".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": format!("```yaml\n{compose}\n```")}}],
                "usage": {"total_tokens": 150}
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let generator = fixture.generator(Some("test-key"));
    let result = generator.generate(&vaultwarden_request()).await;

    mock.assert_async().await;
    assert_eq!(
        result,
        GenerationResult::success(compose, "gpt-4.1-mini", 150)
    );
}

#[tokio::test]
async fn provider_error_body_never_reaches_the_caller() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error(429, r#"{"error":{"message":"Rate limit reached for org-SECRET"}}"#)
        .await;

    let result = fixture
        .generator(Some("test-key"))
        .generate(&vaultwarden_request())
        .await;

    assert_eq!(
        result.error(),
        Some("AI generation failed. Please try again.")
    );
}

#[tokio::test]
async fn server_error_maps_to_generic_failure() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_error(500, "upstream exploded").await;

    let result = fixture
        .generator(Some("test-key"))
        .generate(&vaultwarden_request())
        .await;

    assert_eq!(
        result,
        GenerationResult::failure("AI generation failed. Please try again.")
    );
}

#[tokio::test]
async fn transport_error_maps_to_generic_failure() {
    let config = GeneratorConfig::builder()
        .base_url("http://127.0.0.1:1")
        .api_key("test-key")
        .build()
        .unwrap();
    let result = ComposeGenerator::new(config)
        .unwrap()
        .generate(&vaultwarden_request())
        .await;

    assert_eq!(
        result,
        GenerationResult::failure("AI generation failed. Please try again.")
    );
}

#[tokio::test]
async fn timeout_maps_to_generic_failure() {
    // Accepts connections but never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let silent = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = GeneratorConfig::builder()
        .base_url(format!("http://{addr}"))
        .api_key("test-key")
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let result = ComposeGenerator::new(config)
        .unwrap()
        .generate(&vaultwarden_request())
        .await;
    silent.abort();

    assert_eq!(
        result.error(),
        Some("AI generation failed. Please try again.")
    );
}

#[tokio::test]
async fn malformed_success_body_is_a_provider_failure() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_error(200, "<html>not json</html>").await;

    let result = fixture
        .generator(Some("test-key"))
        .generate(&vaultwarden_request())
        .await;

    assert_eq!(
        result.error(),
        Some("AI generation failed. Please try again.")
    );
}

#[tokio::test]
async fn blank_completion_is_reported_as_empty() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_completion("   \n", 12, 1).await;

    let result = fixture
        .generator(Some("test-key"))
        .generate(&vaultwarden_request())
        .await;

    assert_eq!(result.error(), Some("AI returned empty response."));
}

#[tokio::test]
async fn fence_only_completion_is_reported_as_empty() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_completion("```yaml\n```", 12, 1).await;

    let result = fixture
        .generator(Some("test-key"))
        .generate(&vaultwarden_request())
        .await;

    assert_eq!(result.error(), Some("AI returned empty response."));
}

#[tokio::test]
async fn missing_credential_makes_no_request() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_untouched().await;

    let result = fixture.generator(None).generate(&vaultwarden_request()).await;

    mock.assert_async().await;
    assert_eq!(result.error(), Some("OpenAI API key not configured."));
}

#[tokio::test]
async fn invalid_request_makes_no_request() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_untouched().await;
    let generator = fixture.generator(Some("test-key"));

    let result = generator
        .generate(&GenerationRequest::new("", "Vaultwarden"))
        .await;
    assert_eq!(result.error(), Some("templateSlug must not be empty"));

    let result = generator
        .generate_json(json!({"templateSlug": "vaultwarden", "templateName": "  ", "configValues": {}}))
        .await;
    assert_eq!(result.error(), Some("templateName must not be empty"));

    mock.assert_async().await;
}

#[tokio::test]
async fn repeated_calls_hit_the_provider_each_time() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_completion("services: {}", 7, 2).await;
    let generator = fixture.generator(Some("test-key"));
    let request = vaultwarden_request();

    let (first, second) = tokio::join!(generator.generate(&request), generator.generate(&request));

    mock.assert_async().await;
    assert_eq!(first.compose(), Some("services: {}"));
    assert_eq!(second.compose(), Some("services: {}"));
}
