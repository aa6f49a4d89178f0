//! Resource dimensions, group resolution and appointment colors.

mod dimension;
mod resolver;
mod store;

pub use dimension::ResourceDimension;
pub use resolver::{GroupMember, ResourceResolver};
pub use store::ResourceStore;
