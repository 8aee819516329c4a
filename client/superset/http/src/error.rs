//! Decode API responses and convert failures into errors.
use anyhow::Result;
use reqwest::Response;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;

use superset_client::error::AuthError;
use superset_client::error::EmptyResponse;
use superset_client::error::HttpStatusError;
use superset_client::error::InvalidResponse;
use superset_client::error::RemoteError;
use superset_client::error::ResourceNotFound;

/// Decode the body of an HTTP response and correctly handle errors in the process.
///
/// Responses with a status code not in `expected` are converted into errors carrying
/// an [`HttpStatusError`] for the given operation.
pub async fn inspect<T>(
    operation: &'static str,
    expected: &[StatusCode],
    response: Response,
) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let accepted = expected.contains(&response.status());
    decode(operation, accepted, response).await
}

/// Like [`inspect`] but accepting any `2xx` status code.
pub async fn inspect_success<T>(operation: &'static str, response: Response) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let accepted = response.status().is_success();
    decode(operation, accepted, response).await
}

async fn decode<T>(
    operation: &'static str,
    accepted: bool,
    response: Response,
) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let code = response.status();
    let text = response.text().await?;

    if !accepted {
        let error = remote_error(text);
        let error = match code {
            StatusCode::NOT_FOUND => error.context(ResourceNotFound),
            StatusCode::UNAUTHORIZED => error.context(AuthError::Rejected),
            _ => error,
        };
        let status = HttpStatusError {
            operation,
            status: code.as_u16(),
        };
        return Err(error.context(status));
    }

    // On success decode the payload, if any, into the requested type.
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<T>(&text)
        .map_err(|error| {
            let decode = InvalidResponse { response: text };
            anyhow::anyhow!(error).context(decode)
        })
        .map(Some)
}

/// Extract the error reported by the server from a response body, if possible.
fn remote_error(text: String) -> anyhow::Error {
    if text.trim().is_empty() {
        return anyhow::anyhow!(EmptyResponse);
    }
    let payload = match serde_json::from_str::<Json>(&text) {
        Ok(payload) => payload,
        Err(error) => {
            let decode = InvalidResponse { response: text };
            return anyhow::anyhow!(error).context(decode);
        }
    };
    let message = payload.get("message").or_else(|| payload.get("msg"));
    match message {
        Some(Json::String(message)) => anyhow::anyhow!(RemoteError {
            message: message.clone(),
        }),
        Some(message) => anyhow::anyhow!(RemoteError {
            message: message.to_string(),
        }),
        None => anyhow::anyhow!(InvalidResponse { response: text }),
    }
}

#[cfg(test)]
mod tests {
    use superset_client::error::EmptyResponse;
    use superset_client::error::InvalidResponse;
    use superset_client::error::RemoteError;

    use super::remote_error;

    #[test]
    fn remote_message_string() {
        let error = remote_error(r#"{"message": "Forbidden"}"#.into());
        let remote = error.downcast_ref::<RemoteError>().unwrap();
        assert_eq!(remote.message, "Forbidden");
    }

    #[test]
    fn remote_message_object() {
        let error = remote_error(r#"{"message": {"email": ["Not a valid email."]}}"#.into());
        let remote = error.downcast_ref::<RemoteError>().unwrap();
        assert_eq!(remote.message, r#"{"email":["Not a valid email."]}"#);
    }

    #[test]
    fn remote_msg_field() {
        let error = remote_error(r#"{"msg": "Token has expired"}"#.into());
        assert_eq!(error.to_string(), "Token has expired");
    }

    #[test]
    fn remote_not_json() {
        let error = remote_error("<html>Bad Gateway</html>".into());
        assert!(error.is::<InvalidResponse>());
    }

    #[test]
    fn remote_empty() {
        let error = remote_error(String::new());
        assert!(error.is::<EmptyResponse>());
    }
}
