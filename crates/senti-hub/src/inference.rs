//! Hosted inference client for HuggingFace text-classification models.

use async_trait::async_trait;
use senti_core::{ApiToken, Prediction, SentimentBackend};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::HubError;

/// Base URL of the hosted inference router.
pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/hf-inference/models";

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a [&'a str],
}

/// Error body the server sends while a cold model is being loaded.
#[derive(Deserialize)]
struct LoadingResponse {
    #[serde(default)]
    estimated_time: Option<f64>,
}

/// The server answers a batch with one score list per input, but collapses a
/// single input to a flat list on some deployments.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Batched(Vec<Vec<Prediction>>),
    Flat(Vec<Prediction>),
}

/// HTTP client for the hosted text-classification endpoint.
pub struct InferenceClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    token: Option<ApiToken>,
}

impl InferenceClient {
    /// Create a client for `model` (a hub repo id) behind `endpoint`.
    ///
    /// `endpoint` should have no trailing slash; one is stripped if present.
    pub fn new(endpoint: String, model: String, token: Option<ApiToken>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            token,
        }
    }

    fn url(&self) -> String {
        format!("{}/{}", self.endpoint, self.model)
    }

    /// Classify a batch of texts, returning the top-scoring label for each.
    pub async fn classify_texts(&self, texts: &[&str]) -> Result<Vec<Prediction>, HubError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let url = self.url();
        info!(url = %url, count = texts.len(), "requesting hosted inference");

        let mut req = self.client.post(&url).json(&ClassifyRequest { inputs: texts });
        if let Some(token) = &self.token {
            req = req.bearer_auth(token.expose());
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::SERVICE_UNAVAILABLE
                && let Ok(LoadingResponse {
                    estimated_time: Some(estimated_secs),
                }) = serde_json::from_str(&body)
            {
                return Err(HubError::ModelLoading { estimated_secs });
            }
            return Err(HubError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let predictions = parse_response(&body)?;
        debug!(count = predictions.len(), "hosted inference complete");
        Ok(predictions)
    }
}

#[async_trait]
impl SentimentBackend for InferenceClient {
    fn name(&self) -> &str {
        "remote"
    }

    async fn classify(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Prediction>> {
        Ok(self.classify_texts(texts).await?)
    }
}

/// Reduce a classification response to the best label per input.
pub(crate) fn parse_response(body: &str) -> Result<Vec<Prediction>, HubError> {
    let per_input = match serde_json::from_str::<ClassifyResponse>(body)? {
        ClassifyResponse::Batched(lists) => lists,
        ClassifyResponse::Flat(list) => vec![list],
    };

    per_input
        .into_iter()
        .enumerate()
        .map(|(i, scores)| {
            scores
                .into_iter()
                .max_by(|a, b| a.score.total_cmp(&b.score))
                .ok_or(HubError::EmptyResponse(i))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "distilbert/distilbert-base-uncased-finetuned-sst-2-english";

    fn client(server: &MockServer, token: Option<&str>) -> InferenceClient {
        InferenceClient::new(
            format!("{}/models/", server.uri()),
            MODEL.into(),
            token.map(|t| ApiToken::new(t).unwrap()),
        )
    }

    #[test]
    fn parses_batched_response() {
        let body = r#"[
            [{"label": "POSITIVE", "score": 0.9998}, {"label": "NEGATIVE", "score": 0.0002}],
            [{"label": "NEGATIVE", "score": 0.9995}, {"label": "POSITIVE", "score": 0.0005}]
        ]"#;
        let preds = parse_response(body).unwrap();
        assert_eq!(preds.len(), 2);
        assert_eq!(preds[0].label, "POSITIVE");
        assert_eq!(preds[1].label, "NEGATIVE");
        assert_eq!(preds[1].score, 0.9995);
    }

    #[test]
    fn parses_flat_single_response() {
        let body = r#"[{"label": "NEGATIVE", "score": 0.31}, {"label": "POSITIVE", "score": 0.69}]"#;
        let preds = parse_response(body).unwrap();
        assert_eq!(preds, vec![Prediction::new("POSITIVE", 0.69)]);
    }

    #[test]
    fn empty_score_list_rejected() {
        let err = parse_response(r#"[[{"label": "POSITIVE", "score": 0.9}], []]"#).unwrap_err();
        assert!(matches!(err, HubError::EmptyResponse(1)));
    }

    #[test]
    fn garbage_is_json_error() {
        assert!(matches!(
            parse_response(r#"{"error": "nope"}"#),
            Err(HubError::Json(_))
        ));
    }

    #[test]
    fn endpoint_trailing_slash_trimmed() {
        let client = InferenceClient::new(
            "https://example.test/models/".into(),
            "org/model".into(),
            None,
        );
        assert_eq!(client.url(), "https://example.test/models/org/model");
    }

    #[tokio::test]
    async fn sends_bearer_token_and_inputs() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/models/{MODEL}")))
            .and(header("authorization", "Bearer hf_test"))
            .and(body_json(serde_json::json!({
                "inputs": ["I love this tutorial!", "This is terrible."]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                [{"label": "POSITIVE", "score": 0.99}, {"label": "NEGATIVE", "score": 0.01}],
                [{"label": "NEGATIVE", "score": 0.98}, {"label": "POSITIVE", "score": 0.02}]
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, Some("hf_test"));
        let preds = client
            .classify_texts(&["I love this tutorial!", "This is terrible."])
            .await
            .unwrap();
        assert_eq!(preds[0].label, "POSITIVE");
        assert_eq!(preds[1].label, "NEGATIVE");
    }

    #[tokio::test]
    async fn model_loading_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "error": "Model is currently loading",
                "estimated_time": 20.5
            })))
            .mount(&server)
            .await;

        let err = client(&server, None)
            .classify_texts(&["hello"])
            .await
            .unwrap_err();
        match err {
            HubError::ModelLoading { estimated_secs } => assert_eq!(estimated_secs, 20.5),
            other => panic!("expected ModelLoading, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unavailable_without_estimate_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&server)
            .await;

        let err = client(&server, None)
            .classify_texts(&["hello"])
            .await
            .unwrap_err();
        match err {
            HubError::Server { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "Service Unavailable");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unavailable_json_without_estimate_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(serde_json::json!({ "error": "overloaded" })),
            )
            .mount(&server)
            .await;

        let err = client(&server, None)
            .classify_texts(&["hello"])
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::Server { status: 503, .. }));
    }

    #[tokio::test]
    async fn unauthorized_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
            .mount(&server)
            .await;

        let err = client(&server, Some("hf_bad"))
            .classify_texts(&["hello"])
            .await
            .unwrap_err();
        match err {
            HubError::Server { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "Invalid credentials");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_batch_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let preds = client(&server, None).classify_texts(&[]).await.unwrap();
        assert!(preds.is_empty());
    }

    #[tokio::test]
    async fn analyze_through_backend_trait() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                [{"label": "POSITIVE", "score": 0.99}],
                [{"label": "NEGATIVE", "score": 0.97}],
                [{"label": "POSITIVE", "score": 0.61}]
            ])))
            .mount(&server)
            .await;

        let mut backend = client(&server, None);
        let results = senti_core::analyze(&mut backend, &senti_core::DEFAULT_TEXTS)
            .await
            .unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].text, "I'm feeling okay.");
        assert_eq!(results[2].prediction.score, 0.61);
    }
}
