// forms/mod.rs - Submitted form data
//
// Browsers submit the property editor either url-encoded or as multipart
// (when the form carries an image input). Both are collapsed into one ordered
// multi-map so the field mapping never cares which encoding was used.

pub mod mapping;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub use mapping::{map_property_input, Cardinality, FieldMapping, Target, PROPERTY_FIELDS};

/// Flat key/value pairs in submission order. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// First value submitted for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted for `key`, in submission order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Parse an `application/x-www-form-urlencoded` body
    pub fn from_urlencoded(body: &[u8]) -> Self {
        url::form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Why a request body could not be read as form data
#[derive(Debug, Error)]
pub enum FormRejection {
    #[error("Expected a form-encoded or multipart body, got {0:?}")]
    UnsupportedContentType(Option<String>),

    #[error("Failed to read request body: {0}")]
    Body(String),

    #[error("Malformed multipart body: {0}")]
    Multipart(String),
}

impl IntoResponse for FormRejection {
    fn into_response(self) -> Response {
        let status = match self {
            FormRejection::UnsupportedContentType(_) => axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
            FormRejection::Body(_) | FormRejection::Multipart(_) => axum::http::StatusCode::BAD_REQUEST,
        };
        crate::middleware::response::Envelope::text(status, self.to_string()).into_response()
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = FormRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase());

        match content_type.as_deref() {
            Some(ct) if ct.starts_with("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| FormRejection::Multipart(e.body_text()))?;
                read_multipart(multipart).await
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let body = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| FormRejection::Body(e.body_text()))?;
                Ok(FormData::from_urlencoded(&body))
            }
            other => Err(FormRejection::UnsupportedContentType(other.map(str::to_string))),
        }
    }
}

/// Text parts are kept in order; file parts (listing images) are skipped.
async fn read_multipart(mut multipart: Multipart) -> Result<FormData, FormRejection> {
    let mut form = FormData::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FormRejection::Multipart(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if field.file_name().is_some() {
            tracing::debug!(field = %name, "Skipping file part in property form");
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| FormRejection::Multipart(e.body_text()))?;
        form.append(name, value);
    }

    Ok(form)
}
