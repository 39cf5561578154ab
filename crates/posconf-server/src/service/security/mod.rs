//! Password hashing, token signing keys and the session cookie.

mod password_hasher;
mod session_cookie;
mod session_keys;

pub use password_hasher::PasswordHasher;
pub use session_cookie::SessionCookie;
pub use session_keys::{SessionKeys, SessionKeysConfig};

#[cfg(test)]
pub(crate) use session_keys::tests::test_keys;
