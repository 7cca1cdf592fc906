//! Browser plumbing: `fetch`, form serialization and blocking alerts.

use js_sys::Array;
use risk_core::{ApiError, ApiRequest, FormFields, RawResponse, Transport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, HtmlFormElement, Request, RequestCredentials, RequestInit, Response};

fn js_error(context: &str, err: JsValue) -> ApiError {
    ApiError::Transport(format!("{context}: {err:?}"))
}

/// `window.fetch` with JSON content type. Credentials are included when the
/// request asks for them so the server's session cookie travels along.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let window =
            web_sys::window().ok_or_else(|| ApiError::Transport("window not available".into()))?;

        let headers = Headers::new().map_err(|e| js_error("headers", e))?;
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| js_error("headers", e))?;

        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_headers(&headers);
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }
        if request.with_credentials {
            init.set_credentials(RequestCredentials::Include);
        }

        let req = Request::new_with_str_and_init(&request.url, &init)
            .map_err(|e| js_error("invalid request", e))?;
        let resp = JsFuture::from(window.fetch_with_request(&req))
            .await
            .map_err(|e| js_error("fetch rejected", e))?;
        let resp: Response = resp
            .dyn_into()
            .map_err(|_| ApiError::Transport("fetch did not return a Response".into()))?;

        let status = resp.status();
        let text = resp.text().map_err(|e| js_error("read body", e))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|e| js_error("read body", e))?
            .as_string()
            .unwrap_or_default();

        Ok(RawResponse { status, body })
    }
}

/// Flattens every named text field of `form` into key/value pairs.
pub fn form_fields(form: &HtmlFormElement) -> Result<FormFields, String> {
    let data = FormData::new_with_form(form).map_err(|e| format!("form data: {e:?}"))?;
    let entries = js_sys::try_iter(&data)
        .map_err(|e| format!("form data: {e:?}"))?
        .ok_or_else(|| "form data is not iterable".to_string())?;

    let mut fields = FormFields::new();
    for entry in entries {
        let pair: Array = entry.map_err(|e| format!("form entry: {e:?}"))?.unchecked_into();
        let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) else {
            continue;
        };
        fields.insert(key, &value);
    }
    Ok(fields)
}

pub fn alert(message: &str) {
    match web_sys::window() {
        Some(w) => {
            if let Err(e) = w.alert_with_message(message) {
                tracing::error!("alert failed: {e:?}");
            }
        }
        None => tracing::error!("no window for alert: {message}"),
    }
}
