use reqwest::Response;

use crate::error::{Result, WeatherError};

const MAX_BODY_IN_ERROR: usize = 200;

/// Read the whole body, then fail with `ApiStatus` unless the status is 200.
/// The body is returned untouched on success so callers decide how to parse.
pub(crate) async fn read_ok_body(res: Response, service: &str) -> Result<String> {
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|err| WeatherError::Transport(err.without_url()))?;

    if status != reqwest::StatusCode::OK {
        tracing::warn!(service, status = status.as_u16(), body = %body, "request failed");
        return Err(WeatherError::ApiStatus {
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    Ok(body)
}

pub(crate) fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_BODY_IN_ERROR {
        return body.to_string();
    }

    let mut end = MAX_BODY_IN_ERROR;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
