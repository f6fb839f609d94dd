//! Claim sets and unverified identity tokens.

mod claim_set;
mod token;

pub use claim_set::{ClaimSet, EMAIL_CLAIM, GROUPS_CLAIM, UnsupportedClaim};
pub use token::{IdentityToken, MalformedToken};
