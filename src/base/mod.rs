//! Base types and error handling.
//!
//! - [`CookieError`](cookieerror::CookieError): error taxonomy for loading,
//!   saving and backend storage
//! - [`IoResultExt`](context::IoResultExt): path context for IO failures

pub mod context;
pub mod cookieerror;
