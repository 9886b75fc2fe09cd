//! Scene (draw stream) types.
//!
//! The stage records one `DrawList` per frame; renderers consume it in paint order.
//! - renderer-agnostic draw commands
//! - deterministic ordering (depth + insertion order)
//! - shape-specific payloads and push helpers live under `scene::shapes`

mod cmd;
mod list;
mod order;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use order::{SortKey, ZIndex};
pub use shapes::Border;
