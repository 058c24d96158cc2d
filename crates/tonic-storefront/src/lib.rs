pub mod client;
pub mod error;
pub mod normalize;
pub mod queries;
pub mod types;

pub use client::{CartLineInput, CartLineUpdate, CartMutation, StorefrontClient, UserError};
pub use error::StorefrontError;
