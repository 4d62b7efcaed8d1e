//! Cart value objects.

mod owner;

pub use owner::CartOwner;
