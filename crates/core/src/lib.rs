//! Response payloads: a status, an optionally wrapped output and a list of
//! messages, plus the shim that hands them to a response builder.

pub mod domain;

pub use domain::{
    DEFAULT_VIEW_DATA_KEY, Payload, PayloadError, PayloadResponder, ResponseFactory, status,
};
