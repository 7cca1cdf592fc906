pub mod api;
pub mod config;
pub mod controller;
pub mod dto;
pub mod form;
pub mod render;
pub mod session;
pub mod view;

pub use api::{ApiClient, ApiError, ApiRequest, Endpoint, Method, RawResponse, Transport};
pub use config::{ClientConfig, Variant};
pub use controller::{ChatMessage, ChatRole, Controller, Screen};
pub use form::FormFields;
pub use session::Session;
pub use view::{Page, PageLoad, PredictTab, ViewState};
