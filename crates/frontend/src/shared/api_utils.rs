//! API utilities for frontend-backend communication
//!
//! One place that knows the backend base URL, the request timeout and how
//! to turn any failure into a message a user can read.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Ошибка обращения к бэкенду
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Сеть недоступна, CORS, обрыв соединения
    #[error("{0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    /// Запрос отменён вызывающей стороной
    #[error("Request cancelled")]
    Cancelled,

    /// Бэкенд ответил не-2xx; в `body` JSON или сырой текст ответа
    #[error("Request failed with status code {status}")]
    Http { status: u16, body: Option<Value> },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Можно ли автоматически повторить запрос.
    ///
    /// 4xx (не найдено, ошибка валидации) никогда не повторяется.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout | Self::Decode(_) => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Cancelled | Self::Encode(_) => false,
        }
    }
}

/// Human-readable message for any API error.
///
/// Order: raw string payload, `detail` field, `message` field, the generic
/// transport message, "Unknown error". Never panics.
pub fn describe(error: &ApiError) -> String {
    if let ApiError::Http { body: Some(body), .. } = error {
        if let Some(message) = body_message(body) {
            return message;
        }
    }
    let generic = error.to_string();
    if generic.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        generic
    }
}

fn body_message(body: &Value) -> Option<String> {
    match body {
        Value::String(raw) => Some(raw.clone()).filter(|s| !s.trim().is_empty()),
        Value::Object(map) => ["detail", "message"].iter().find_map(|field| {
            map.get(*field)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        }),
        _ => None,
    }
}

/// Тело ошибки: JSON, если разбирается, иначе сырой текст
fn parse_error_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

fn build_url(base: &str, path: &str, query: &str) -> String {
    let mut url = format!("{}{}", base.trim_end_matches('/'), path);
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Encode query parameters; `None` fields are skipped by the param types.
pub fn encode_query<Q: Serialize + ?Sized>(query: &Q) -> Result<String, ApiError> {
    serde_qs::to_string(&query).map_err(|e| ApiError::Encode(e.to_string()))
}

/// GET `path` with query parameters and decode the JSON body
pub async fn get_json<T, Q>(path: &str, query: &Q, cancel: &CancellationToken) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    let query = encode_query(query)?;
    request_json(HttpMethod::Get, path, &query, cancel).await
}

/// HTTP methods the backend contract uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// Perform a request against the backend.
///
/// The request is aborted when `cancel` fires or the configured timeout
/// elapses; both abort the underlying browser fetch.
#[cfg(target_arch = "wasm32")]
pub async fn request_json<T: DeserializeOwned>(
    method: HttpMethod,
    path: &str,
    query: &str,
    cancel: &CancellationToken,
) -> Result<T, ApiError> {
    use gloo_net::http::{Method, RequestBuilder};
    use gloo_timers::callback::Timeout;
    use std::cell::Cell;
    use std::rc::Rc;

    if cancel.is_cancelled() {
        return Err(ApiError::Cancelled);
    }

    let config = crate::shared::config::app_config();
    let url = build_url(&config.api_base, path, query);

    let controller =
        web_sys::AbortController::new().map_err(|e| ApiError::Network(format!("{e:?}")))?;

    let timed_out = Rc::new(Cell::new(false));
    // Dropping the guard clears the timer once the request is done.
    let _timeout_guard = {
        let controller = controller.clone();
        let timed_out = timed_out.clone();
        Timeout::new(config.request_timeout_ms(), move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    let classify = |message: String| {
        if timed_out.get() {
            ApiError::Timeout
        } else {
            ApiError::Network(message)
        }
    };

    let method = match method {
        HttpMethod::Get => Method::GET,
    };
    let signal = controller.signal();
    let request = RequestBuilder::new(&url)
        .method(method)
        .header("Accept", "application/json")
        .abort_signal(Some(&signal))
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let response = until_cancelled(request.send(), cancel, || controller.abort())
        .await?
        .map_err(|e| classify(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let body = until_cancelled(response.text(), cancel, || controller.abort())
            .await?
            .ok()
            .and_then(|text| parse_error_body(&text));
        log::warn!("GET {} -> HTTP {}", url, status);
        return Err(ApiError::Http { status, body });
    }

    until_cancelled(response.json::<T>(), cancel, || controller.abort())
        .await?
        .map_err(|e| match classify(String::new()) {
            ApiError::Network(_) => ApiError::Decode(e.to_string()),
            other => other,
        })
}

/// Ждёт `step`, пока не сработает `cancel`; при отмене вызывает `abort`.
#[cfg(any(target_arch = "wasm32", test))]
async fn until_cancelled<F: std::future::Future>(
    step: F,
    cancel: &CancellationToken,
    abort: impl FnOnce(),
) -> Result<F::Output, ApiError> {
    use futures::FutureExt;

    futures::select! {
        output = step.fuse() => Ok(output),
        _ = cancel.cancelled().fuse() => {
            abort();
            Err(ApiError::Cancelled)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn request_json<T: DeserializeOwned>(
    method: HttpMethod,
    path: &str,
    query: &str,
    cancel: &CancellationToken,
) -> Result<T, ApiError> {
    if cancel.is_cancelled() {
        return Err(ApiError::Cancelled);
    }
    log::warn!("{:?} {}?{} skipped: no browser fetch outside wasm", method, path, query);
    Err(ApiError::Network(
        "HTTP transport is only available in the browser".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http(status: u16, body: Option<Value>) -> ApiError {
        ApiError::Http { status, body }
    }

    #[test]
    fn describe_prefers_raw_string_payload() {
        let err = http(500, Some(Value::String("Internal Server Error".into())));
        assert_eq!(describe(&err), "Internal Server Error");
    }

    #[test]
    fn describe_uses_detail_then_message() {
        let both = http(404, Some(json!({"detail": "Product not found", "message": "nope"})));
        assert_eq!(describe(&both), "Product not found");

        let only_message = http(400, Some(json!({"message": "Bad city id"})));
        assert_eq!(describe(&only_message), "Bad city id");
    }

    #[test]
    fn describe_ignores_non_string_detail() {
        let validation = http(422, Some(json!({"detail": [{"loc": ["query", "page"]}]})));
        assert_eq!(describe(&validation), "Request failed with status code 422");
    }

    #[test]
    fn describe_falls_back_to_transport_and_unknown() {
        assert_eq!(describe(&ApiError::Timeout), "Request timed out");
        assert_eq!(
            describe(&ApiError::Network("TypeError: Failed to fetch".into())),
            "TypeError: Failed to fetch"
        );
        assert_eq!(describe(&ApiError::Network("  ".into())), "Unknown error");
    }

    #[test]
    fn cancellation_aborts_pending_step() {
        use futures::executor::LocalPool;
        use futures::task::LocalSpawnExt;
        use std::cell::{Cell, RefCell};
        use std::rc::Rc;

        let mut pool = LocalPool::new();
        let cancel = CancellationToken::new();
        let aborted = Rc::new(Cell::new(false));
        let result: Rc<RefCell<Option<Result<u8, ApiError>>>> = Rc::default();
        let (_tx, rx) = futures::channel::oneshot::channel::<u8>();

        {
            let cancel = cancel.clone();
            let aborted = aborted.clone();
            let result = result.clone();
            pool.spawner()
                .spawn_local(async move {
                    let outcome = until_cancelled(rx, &cancel, || aborted.set(true))
                        .await
                        .map(|received| received.unwrap_or_default());
                    *result.borrow_mut() = Some(outcome);
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert!(result.borrow().is_none());

        cancel.cancel();
        pool.run_until_stalled();
        assert!(aborted.get());
        assert_eq!(*result.borrow(), Some(Err(ApiError::Cancelled)));
    }

    #[test]
    fn finished_step_is_not_aborted() {
        let cancel = CancellationToken::new();
        let aborted = std::cell::Cell::new(false);
        let out = futures::executor::block_on(until_cancelled(
            async { 7u8 },
            &cancel,
            || aborted.set(true),
        ));
        assert_eq!(out, Ok(7));
        assert!(!aborted.get());
    }

    #[test]
    fn cancelled_token_short_circuits_request() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let out = futures::executor::block_on(request_json::<u8>(
            HttpMethod::Get,
            "/api/products/list",
            "",
            &cancel,
        ));
        assert_eq!(out, Err(ApiError::Cancelled));
    }

    #[test]
    fn retry_classification() {
        assert!(ApiError::Timeout.is_retryable());
        assert!(ApiError::Network("x".into()).is_retryable());
        assert!(http(503, None).is_retryable());
        assert!(!http(404, None).is_retryable());
        assert!(!http(422, None).is_retryable());
        assert!(!ApiError::Cancelled.is_retryable());
    }

    #[test]
    fn error_body_keeps_raw_text() {
        assert_eq!(parse_error_body(""), None);
        assert_eq!(parse_error_body("oops"), Some(Value::String("oops".into())));
        assert_eq!(parse_error_body(r#"{"detail":"x"}"#), Some(json!({"detail": "x"})));
    }

    #[test]
    fn url_building() {
        assert_eq!(build_url("http://h:3000/", "/api/products/list", ""), "http://h:3000/api/products/list");
        assert_eq!(
            build_url("", "/api/products/list", "page=1&size=8"),
            "/api/products/list?page=1&size=8"
        );
    }

    #[test]
    fn optional_query_params_are_skipped() {
        let query = contracts::domain::a001_product::request::ProductListQuery::new(2, 20, "");
        assert_eq!(encode_query(&query).unwrap(), "page=2&size=20");
    }
}
