//! OAuth authorization code exchange.

mod errors;
pub use errors::*;

mod exchange;
pub use exchange::*;
