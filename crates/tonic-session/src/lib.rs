//! Client-side cart session and catalog view state for the storefront.

pub mod catalog;
pub mod drawer;
pub mod error;
pub mod session;
pub mod storage;

pub use drawer::{DrawerBody, DrawerFooter, DrawerView, LineRow};
pub use error::SessionError;
pub use session::{BootstrapOutcome, CartSession, CartState, MutationOutcome, OrderingPolicy};
pub use storage::{CartIdStore, FileCartIdStore, MemoryCartIdStore, CART_ID_KEY};
