//! Re-issuing identity tokens with group membership claims.
//!
//! An inbound token is parsed without checking its signature, its claims are
//! extended with the groups of the user named in its `email` claim, and the
//! result is signed with RS256 using the currently active key.

mod augment;
mod error;
mod keys;
mod service;
mod signer;
mod verify;

pub use augment::{Augmentation, ClaimsAugmenter, GroupsOutcome};
pub use error::{AugmentationError, KeyError, SigningError, VerificationError};
pub use keys::{KeyMaterial, KeyProvider, KeyStore};
pub use service::TokenService;
pub use signer::{ALGORITHM, MIN_KEY_BITS, TOKEN_TYPE, sign};
pub use verify::verify;
