use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Text draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font_family: String,
    /// Font size in world units.
    pub size: f32,
    pub color: Color,
    /// Top-left of the text block.
    pub origin: Vec2,
}

impl DrawList {
    /// Records a text draw command.
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font_family: impl Into<String>,
        size: f32,
        color: Color,
        origin: Vec2,
    ) {
        self.push(z, DrawCmd::Text(TextCmd {
            text: text.into(),
            font_family: font_family.into(),
            size,
            color,
            origin,
        }));
    }
}
