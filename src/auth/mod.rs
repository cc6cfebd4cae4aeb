//! Stateless session authentication
//!
//! Sessions are HMAC-signed tokens carried in an HTTP-only cookie, paired
//! with a double-submit CSRF nonce echoed back in a custom header. The
//! server keeps no session table: verification is a pure function of the
//! token, the signing secret and the current time.

pub mod token;

pub use token::{Claims, IssuedToken, TokenError, TokenSigner, CSRF_HEADER, TOKEN_COOKIE};
