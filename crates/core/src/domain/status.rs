//! Named status codes for payloads.
//!
//! A payload accepts any `u16`; these constants only name the common ones.

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const ACCEPTED: u16 = 202;
pub const NO_CONTENT: u16 = 204;

pub const BAD_REQUEST: u16 = 400;
pub const UNAUTHORIZED: u16 = 401;
pub const FORBIDDEN: u16 = 403;
pub const NOT_FOUND: u16 = 404;
pub const CONFLICT: u16 = 409;
pub const UNPROCESSABLE_ENTITY: u16 = 422;

pub const INTERNAL_SERVER_ERROR: u16 = 500;

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

pub fn is_client_error(status: u16) -> bool {
    (400..500).contains(&status)
}

pub fn is_server_error(status: u16) -> bool {
    (500..600).contains(&status)
}
