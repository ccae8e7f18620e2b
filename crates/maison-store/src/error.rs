//! Store error types.

use maison_cache::CacheError;
use maison_commerce::CommerceError;
use thiserror::Error;

/// Errors raised while updating shopper state.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing persisted state failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The edit breaks a cart or checkout rule.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// The action needs a signed-in user.
    #[error("Please sign in to continue")]
    SignInRequired,

    /// The action needs an administrator.
    #[error("You do not have access to this page")]
    Forbidden,
}
