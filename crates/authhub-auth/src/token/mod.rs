//! Signed token codec and opaque refresh-token generation.

pub mod claims;
pub mod codec;
pub mod opaque;

pub use claims::{TokenPayload, TokenPurpose};
pub use codec::{AccessToken, OpaqueRefreshToken, TokenCodec, TokenPair};
pub use opaque::{generate_opaque_token, sha256_hex};
