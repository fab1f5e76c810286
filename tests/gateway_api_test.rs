//! ゲートウェイHTTP統合テスト
//!
//! モックモデルを挿したルーターに oneshot でリクエストを送って検証

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use circle_grid::config::{Config, GatewayCredentials};
use circle_grid::gateway::{ContentBlock, ModelCallError, ModelReply, VisionModel, VisionRequest};
use circle_grid::server::{build_router, AppState, MAX_BODY_BYTES};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const PNG_URI: &str = "data:image/png;base64,aGVsbG8=";

/// 決まった応答を返し、呼び出し回数を数える
struct MockModel {
    reply: Result<ModelReply, u16>,
    calls: AtomicUsize,
    last_media_type: std::sync::Mutex<Option<&'static str>>,
}

impl MockModel {
    fn text(text: &str) -> Arc<Self> {
        Self::with_reply(ModelReply {
            content: vec![ContentBlock::Text { text: text.to_string() }],
            usage: json!({"input_tokens": 1200, "output_tokens": 40}),
        })
    }

    fn with_reply(reply: ModelReply) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply),
            calls: AtomicUsize::new(0),
            last_media_type: std::sync::Mutex::new(None),
        })
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(status),
            calls: AtomicUsize::new(0),
            last_media_type: std::sync::Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionModel for MockModel {
    fn model_id(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        _credentials: &GatewayCredentials,
        request: &VisionRequest,
    ) -> Result<ModelReply, ModelCallError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_media_type.lock().unwrap() = Some(request.media_type);
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(status) => Err(ModelCallError::Status {
                status: *status,
                body: "upstream said no".into(),
            }),
        }
    }
}

fn configured() -> Config {
    Config {
        api_key: Some("sk-ant-test".into()),
        account_id: Some("acct".into()),
        gateway_name: Some("gw".into()),
        ..Config::default()
    }
}

fn app(config: Config, model: Arc<MockModel>) -> Router {
    build_router(AppState::new(config, model))
}

fn analyze_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze-photo")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// =============================================
// 正常系
// =============================================

#[tokio::test]
async fn test_analyze_photo_success() {
    let model = MockModel::text(r#"{"title":"動物篇","words":["狗","貓","狗","鳥"]}"#);
    let app = app(configured(), model.clone());

    let (status, body) = send(app, analyze_request(json!({ "image": PNG_URI }).to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "動物篇");
    assert_eq!(body["words"], json!(["狗", "貓", "鳥"]));
    assert_eq!(body["usage"]["input_tokens"], 1200);
    assert_eq!(model.calls(), 1);
    assert_eq!(*model.last_media_type.lock().unwrap(), Some("image/png"));
}

#[tokio::test]
async fn test_analyze_photo_with_surrounding_prose() {
    let model = MockModel::text(
        "Here is the data:\n{\"title\": \"水果\", \"words\": [\"蘋果\", \"香蕉\"]}\nHope this helps!",
    );
    let (status, body) = send(
        app(configured(), model),
        analyze_request(json!({ "image": "data:image/jpg;base64,aGVsbG8=" }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "水果");
    assert_eq!(body["words"], json!(["蘋果", "香蕉"]));
}

// =============================================
// 入力エラー（モデルは呼ばない）
// =============================================

#[tokio::test]
async fn test_missing_image_is_400() {
    let model = MockModel::text("{}");
    let (status, body) = send(app(configured(), model.clone()), analyze_request("{}".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image provided");
    assert_eq!(body["kind"], "missing_input");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_non_json_body_is_missing_input() {
    let model = MockModel::text("{}");
    let (status, body) = send(app(configured(), model.clone()), analyze_request("not json".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "missing_input");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_body_without_content_type_is_accepted() {
    let model = MockModel::text(r#"{"title":"動物篇","words":["狗"]}"#);
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze-photo")
        .body(Body::from(json!({ "image": PNG_URI }).to_string()))
        .unwrap();

    let (status, body) = send(app(configured(), model.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["words"], json!(["狗"]));
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let model = MockModel::text("{}");
    let payload = "A".repeat(MAX_BODY_BYTES + 1024);
    let body = format!(r#"{{"image": "data:image/png;base64,{}"}}"#, payload);

    let (status, body) = send(app(configured(), model.clone()), analyze_request(body)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["kind"], "payload_too_large");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_non_string_image_is_invalid_format() {
    let model = MockModel::text("{}");
    let (status, body) = send(
        app(configured(), model.clone()),
        analyze_request(json!({ "image": 5 }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_format");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_invalid_formats_are_400() {
    let cases = [
        "data:image/gif;base64,aGVsbG8=",
        "data:image/png;base64,not base64!",
        "aGVsbG8=",
        "data:text/plain;base64,aGVsbG8=",
    ];

    for image in cases {
        let model = MockModel::text("{}");
        let (status, body) = send(
            app(configured(), model.clone()),
            analyze_request(json!({ "image": image }).to_string()),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", image);
        assert_eq!(body["kind"], "invalid_format", "{}", image);
        assert_eq!(model.calls(), 0, "{}", image);
    }
}

// =============================================
// サーバー側エラー
// =============================================

#[tokio::test]
async fn test_misconfigured_is_500_without_call() {
    let model = MockModel::text("{}");
    let config = Config {
        gateway_name: None,
        ..configured()
    };
    let (status, body) = send(app(config, model.clone()), analyze_request(json!({ "image": PNG_URI }).to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "misconfigured");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_invalid_format_checked_before_configuration() {
    let model = MockModel::text("{}");
    let (status, body) = send(
        app(Config::default(), model),
        analyze_request(json!({ "image": "garbage" }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_format");
}

#[tokio::test]
async fn test_upstream_failure_hides_detail() {
    let model = MockModel::failing(401);
    let (status, body) = send(app(configured(), model.clone()), analyze_request(json!({ "image": PNG_URI }).to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "upstream_failure");
    assert_eq!(body["error"], "Failed to analyze photo");
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_non_text_reply_is_unexpected() {
    let model = MockModel::with_reply(ModelReply {
        content: vec![ContentBlock::Other],
        usage: Value::Null,
    });
    let (status, body) = send(app(configured(), model), analyze_request(json!({ "image": PNG_URI }).to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "unexpected_model_output");
}

#[tokio::test]
async fn test_reply_without_json_object() {
    let model = MockModel::text("I cannot read this worksheet.");
    let (status, body) = send(app(configured(), model), analyze_request(json!({ "image": PNG_URI }).to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "extraction_failed");
}

#[tokio::test]
async fn test_reply_missing_title() {
    let model = MockModel::text(r#"{"words": ["狗"]}"#);
    let (status, body) = send(app(configured(), model), analyze_request(json!({ "image": PNG_URI }).to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "invalid_model_response");
}

// =============================================
// ヘルスチェック
// =============================================

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(Config::default(), MockModel::text("{}")), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "circle-grid");
    assert_eq!(body["configured"], false);
}
