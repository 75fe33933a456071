use axum::http::HeaderValue;

use crate::config::Disposition;

/// `Content-Disposition` value for a served file.
///
/// The plain `filename` parameter only carries printable ASCII; everything
/// else is replaced by `_` there and sent exactly in `filename*` (RFC 5987).
pub(crate) fn content_disposition(disposition: Disposition, name: &str) -> HeaderValue {
    let fallback: String = name
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let value = format!(
        "{}; filename=\"{fallback}\"; filename*=UTF-8''{}",
        disposition.as_str(),
        urlencoding::encode(name)
    );

    HeaderValue::from_str(&value).unwrap_or_else(|err| {
        tracing::warn!("[content_disposition] dropping file name {name:?}: {err}");
        HeaderValue::from_static(disposition.as_str())
    })
}
