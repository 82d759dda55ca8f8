//! Option classification and completion script generation
//!
//! Descriptors flow one way: classification decides what kind of value completion an
//! option needs, `emit` turns that into a fish directive, and the `fish` and `bash`
//! modules assemble whole scripts.

pub mod bash;
pub mod classify;
pub mod descriptor;
pub mod emit;
pub mod fish;
pub mod introspect;
pub mod text;

// Re-export main types
pub use bash::*;
pub use classify::*;
pub use descriptor::*;
pub use emit::*;
pub use fish::*;
pub use introspect::*;
pub use text::*;
