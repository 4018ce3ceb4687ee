pub mod response;
pub mod session;

pub use response::{attach_cors_headers, panic_response, update_panic_response, Envelope, CORS_HEADERS};
pub use session::{JwtSessionResolver, Session, SessionResolver, SessionUser};
