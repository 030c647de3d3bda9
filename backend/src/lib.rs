//! Procore relay services
//!
//! Two small HTTP services in front of the Procore API: one that reports
//! accident types tagged in accident log comments, and one that exchanges
//! OAuth authorization codes for access tokens.

pub mod accidents;
pub mod api;
pub mod oauth;

#[cfg(test)]
pub mod test;
