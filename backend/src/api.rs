//! HTTP APIs for the accident-type and auth-token services.
//!
//! This module is organized into:
//! - [`definition`] - API contracts (traits and types)
//! - [`implementation`] - Production implementations that call Procore
//! - [`mock`] - Mock implementations for testing
//! - [`response`] - Helpers for building raw responses

pub mod definition;
pub mod implementation;
pub mod mock;
pub mod response;

// Re-export commonly used items from definition
pub use definition::{
    AccidentsApi, AccidentsBase, AuthApi, AuthBase, HealthResponse,
};

// Re-export the generated modules containing API description functions
pub use definition::{accidents_api_mod, auth_api_mod};

// Re-export commonly used items from implementation
pub use implementation::{
    AccidentsApiImpl, AccidentsState, AuthApiImpl, AuthState,
};
