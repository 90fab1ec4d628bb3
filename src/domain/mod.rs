pub mod errors;
pub mod filter;
pub mod models;
pub mod session;
pub mod store;
pub mod validation;

pub use errors::*;
pub use filter::*;
pub use models::*;
pub use session::*;
pub use store::*;
pub use validation::*;
