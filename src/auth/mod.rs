//! Credential checks for `POST /api/v1/login`: bcrypt password hashes and
//! HS256 bearer tokens.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenIssuer};
