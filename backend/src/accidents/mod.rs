//! Accident logs and the accident types tagged in their comments.

mod errors;
pub use errors::*;

mod extract;
pub use extract::*;

mod fetch;
pub use fetch::*;

mod model;
pub use model::*;

mod query;
pub use query::*;
