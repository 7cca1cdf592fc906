use crate::config::ClientConfig;
use crate::dto::{
    AckDto, AssistanceRequest, AssistanceResponse, AuthStatusDto, HistoryEntryDto, LoginRequest,
    LoginResponse, PredictionDto, PredictionKind, RegisterRequest, ResourceDto,
};
use crate::form::FormFields;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Predict(PredictionKind),
    AiAssistance,
    EducationalResources,
    PredictionHistory,
    Register,
    Login,
    Logout,
    CheckAuth,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Predict(PredictionKind::SymptomBased) => "/predict/symptom-based",
            Endpoint::Predict(PredictionKind::Technical) => "/predict/technical",
            Endpoint::AiAssistance => "/ai-assistance",
            Endpoint::EducationalResources => "/educational-resources",
            Endpoint::PredictionHistory => "/prediction-history",
            Endpoint::Register => "/register",
            Endpoint::Login => "/login",
            Endpoint::Logout => "/logout",
            Endpoint::CheckAuth => "/check-auth",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::EducationalResources | Endpoint::PredictionHistory | Endpoint::CheckAuth => {
                Method::Get
            }
            _ => Method::Post,
        }
    }
}

/// A fully resolved HTTP call, independent of how it gets sent.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
    pub with_credentials: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Server { status: u16, message: Option<String> },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// What the user sees: the server's own message when it sent one,
    /// otherwise `fallback`.
    pub fn alert_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                message: Some(m), ..
            } if !m.trim().is_empty() => m.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Sends a request and hands back the raw status and body. Implemented by the
/// browser `fetch` bridge and by test doubles.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<RawResponse, ApiError>>;
}

#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn request<B: Serialize>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> Result<ApiRequest, ApiError> {
        let body = body
            .map(|b| serde_json::to_string(b).map_err(|e| ApiError::Transport(e.to_string())))
            .transpose()?;
        Ok(ApiRequest {
            method: endpoint.method(),
            url: self.config.url(endpoint.path()),
            body,
            with_credentials: self.config.variant.sends_credentials(),
        })
    }

    pub async fn call<B, R>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let request = self.request(endpoint, body)?;
        tracing::debug!(method = request.method.as_str(), url = %request.url, "api request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(endpoint = endpoint.path(), "transport failure: {e}");
            e
        })?;

        if !response.ok() {
            let message = serde_json::from_str::<serde_json::Value>(&response.body)
                .ok()
                .and_then(|v| {
                    v.get("error")
                        .and_then(serde_json::Value::as_str)
                        .map(ToString::to_string)
                });
            tracing::warn!(
                endpoint = endpoint.path(),
                status = response.status,
                "server rejected request"
            );
            return Err(ApiError::Server {
                status: response.status,
                message,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| {
            tracing::warn!(endpoint = endpoint.path(), "undecodable response: {e}");
            ApiError::Decode(e.to_string())
        })
    }

    pub async fn get<R: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<R, ApiError> {
        self.call::<(), R>(endpoint, None).await
    }

    pub async fn predict(
        &self,
        kind: PredictionKind,
        fields: &FormFields,
    ) -> Result<PredictionDto, ApiError> {
        self.call(Endpoint::Predict(kind), Some(fields)).await
    }

    pub async fn ask(&self, question: &str) -> Result<AssistanceResponse, ApiError> {
        let body = AssistanceRequest {
            question: question.to_string(),
        };
        self.call(Endpoint::AiAssistance, Some(&body)).await
    }

    pub async fn educational_resources(&self) -> Result<Vec<ResourceDto>, ApiError> {
        self.get(Endpoint::EducationalResources).await
    }

    pub async fn prediction_history(&self) -> Result<Vec<HistoryEntryDto>, ApiError> {
        self.get(Endpoint::PredictionHistory).await
    }

    pub async fn register(&self, body: &RegisterRequest) -> Result<AckDto, ApiError> {
        self.call(Endpoint::Register, Some(body)).await
    }

    pub async fn login(&self, body: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.call(Endpoint::Login, Some(body)).await
    }

    pub async fn logout(&self) -> Result<AckDto, ApiError> {
        self.call(Endpoint::Logout, Some(&serde_json::json!({}))).await
    }

    pub async fn check_auth(&self) -> Result<AuthStatusDto, ApiError> {
        self.get(Endpoint::CheckAuth).await
    }
}
