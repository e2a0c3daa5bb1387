use folio_chat_service::ErrorKind;
use mime::Mime;
use reqwest::{RequestBuilder, Response, header};
use serde::de::DeserializeOwned;

use crate::Error;

/// Sends the request and decodes a JSON body.
///
/// Transport problems and non-2xx statuses are [`ErrorKind::Transport`];
/// a 2xx answer that is not JSON or doesn't decode into `T` is
/// [`ErrorKind::MalformedResponse`].
pub async fn send_json<T: DeserializeOwned>(
    req: RequestBuilder,
) -> Result<T, Error> {
    let resp = req
        .send()
        .await
        .and_then(Response::error_for_status)
        .map_err(|err| Error::new(format!("{err}"), ErrorKind::Transport))?;

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    if !is_json(content_type.as_deref()) {
        return Err(Error::new(
            format!("Unexpected content type: {content_type:?}"),
            ErrorKind::MalformedResponse,
        ));
    }

    let body = resp
        .bytes()
        .await
        .map_err(|err| Error::new(format!("{err}"), ErrorKind::Transport))?;
    trace!("got body: {}", String::from_utf8_lossy(&body));

    serde_json::from_slice(&body).map_err(|err| {
        Error::new(format!("{err}"), ErrorKind::MalformedResponse)
    })
}

#[inline]
pub fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|v| v.parse().ok())
        .map(|m: Mime| {
            m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json() {
        assert!(is_json(Some("application/json")));
        assert!(is_json(Some("application/json; charset=utf-8")));
        assert!(is_json(Some("application/problem+json")));
        assert!(!is_json(Some("text/html")));
        assert!(!is_json(Some("not a mime")));
        assert!(!is_json(None));
    }
}
