//! Various utilities
pub(crate) mod alloc;
pub(crate) mod synchsafe;
pub mod text;
