mod error;
mod payload;
mod responder;
mod response_factory;
pub mod status;

pub use error::PayloadError;
pub use payload::Payload;
pub use responder::{DEFAULT_VIEW_DATA_KEY, PayloadResponder};
pub use response_factory::ResponseFactory;
