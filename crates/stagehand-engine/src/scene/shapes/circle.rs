use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Circle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Option<Color>,
    pub border: Option<Border>,
}

impl DrawList {
    /// Records a circle draw command.
    #[inline]
    pub fn push_circle(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        fill: Option<Color>,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::Circle(CircleCmd { center, radius, fill, border }));
    }

    /// Records a solid circle.
    #[inline]
    pub fn push_solid_circle(&mut self, z: ZIndex, center: Vec2, radius: f32, color: Color) {
        self.push_circle(z, center, radius, Some(color), None);
    }
}
