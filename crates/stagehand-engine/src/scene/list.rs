use super::{DrawCmd, SortKey, ZIndex};

/// One recorded command and where it sits in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Draw stream recorded by [`Stage::draw`](crate::stage::Stage::draw) for one frame.
///
/// Items are sorted lazily, in place, the first time paint order is requested
/// after a push.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    pushed: u32,
    sorted: bool,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every item but keeps the allocation for the next frame.
    pub fn clear(&mut self) {
        self.items.clear();
        self.pushed = 0;
        self.sorted = true;
    }

    /// Items as currently stored: insertion order until paint order is requested.
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let key = SortKey::new(z, self.pushed);
        self.pushed = self.pushed.wrapping_add(1);
        self.sorted = self.sorted && self.items.last().is_none_or(|last| last.key <= key);
        self.items.push(DrawItem { key, cmd });
    }

    /// Back-to-front iteration: by depth, then by push order.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if !self.sorted {
            self.items.sort_by_key(|item| item.key);
            self.sorted = true;
        }
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    #[test]
    fn paint_order_sorts_by_depth_then_insertion() {
        let mut list = DrawList::new();
        list.push_solid_circle(ZIndex(5), Vec2::zero(), 1.0, Color::white());
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 2.0, Color::white());
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 3.0, Color::white());

        let radii: Vec<f32> = list
            .iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Circle(c) => c.radius,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(radii, vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn pushes_in_depth_order_stay_in_insertion_order() {
        let mut list = DrawList::new();
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 1.0, Color::white());
        list.push_solid_circle(ZIndex(1), Vec2::zero(), 2.0, Color::white());
        let before: Vec<_> = list.items().to_vec();
        assert!(list.iter_in_paint_order().eq(before.iter()));
    }

    #[test]
    fn clear_resets_items() {
        let mut list = DrawList::new();
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 1.0, Color::white());
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter_in_paint_order().count(), 0);
    }
}
