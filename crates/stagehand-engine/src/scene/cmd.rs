use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Circle(CircleCmd),
    Text(TextCmd),
}

impl DrawCmd {
    /// Short name used by trace output and text renderers.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCmd::Rect(_) => "rect",
            DrawCmd::Circle(_) => "circle",
            DrawCmd::Text(_) => "text",
        }
    }
}
