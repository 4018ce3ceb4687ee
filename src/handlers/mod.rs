// handlers/mod.rs - HTTP handlers
//
// Property endpoints are public for reads; mutations resolve the session
// identity and prove ownership before touching the store.

pub mod health;
pub mod properties;

pub use health::health;
