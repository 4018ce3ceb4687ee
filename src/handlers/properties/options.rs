// handlers/properties/options.rs - OPTIONS /properties/:id (CORS preflight)

use axum::http::StatusCode;

use crate::middleware::response::Envelope;

/// Empty 204; the envelope supplies the CORS headers
pub async fn property_options() -> Envelope {
    Envelope::empty(StatusCode::NO_CONTENT)
}
