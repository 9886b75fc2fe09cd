//! Terminal renderer: rasterizes draw lists into a character grid.

use anyhow::{ensure, Result};

use stagehand_engine::coords::{Rect, Vec2};
use stagehand_engine::render::Renderer;
use stagehand_engine::scene::{DrawCmd, DrawList};
use stagehand_engine::stage::Camera;

const EMPTY: char = ' ';
const CIRCLE: char = 'o';
const RECT: char = '#';
const OVERLAY: char = '+';

/// Prints every `every`-th frame as ASCII art and keeps the latest one.
pub struct AsciiRenderer {
    columns: usize,
    rows: usize,
    /// Screen area mapped onto the grid.
    viewport: Rect,
    every: u64,
    frames: u64,
    last: String,
}

impl AsciiRenderer {
    pub fn new(viewport: Rect, columns: usize, rows: usize) -> Self {
        Self { columns, rows, viewport, every: 0, frames: 0, last: String::new() }
    }

    /// Print one frame out of every `n`; `0` prints nothing.
    pub fn every(mut self, n: u64) -> Self {
        self.every = n;
        self
    }

    /// The most recently rasterized frame.
    pub fn last_frame(&self) -> &str {
        &self.last
    }

    fn cell_size(&self) -> Vec2 {
        Vec2::new(self.viewport.size.x / self.columns as f32, self.viewport.size.y / self.rows as f32)
    }

    /// Grid cell containing screen point `p`, if it is on screen.
    fn cell_of(&self, p: Vec2) -> Option<(usize, usize)> {
        let local = (p - self.viewport.origin).scale(Vec2::new(1.0 / self.cell_size().x, 1.0 / self.cell_size().y));
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let (col, row) = (local.x as usize, local.y as usize);
        (col < self.columns && row < self.rows).then_some((col, row))
    }

    /// Screen-space centre of a grid cell.
    fn cell_centre(&self, col: usize, row: usize) -> Vec2 {
        let cell = self.cell_size();
        self.viewport.origin + Vec2::new((col as f32 + 0.5) * cell.x, (row as f32 + 0.5) * cell.y)
    }

    fn rasterize(&self, camera: &Camera, list: &mut DrawList) -> String {
        let mut grid = vec![vec![EMPTY; self.columns]; self.rows];
        let zoom = camera.zoom;

        for item in list.iter_in_paint_order() {
            match &item.cmd {
                DrawCmd::Circle(c) => {
                    let centre = camera.world_to_screen(c.center);
                    let radius = c.radius * zoom;
                    self.fill(&mut grid, CIRCLE, |p| {
                        let d = p - centre;
                        d.x * d.x + d.y * d.y <= radius * radius
                    });
                }
                DrawCmd::Rect(r) => {
                    let rect = Rect::from_origin_size(camera.world_to_screen(r.rect.origin), r.rect.size * zoom);
                    let ch = if r.fill.is_some() { RECT } else { OVERLAY };
                    self.fill(&mut grid, ch, |p| rect.contains(p));
                }
                DrawCmd::Text(t) => {
                    if let Some((col, row)) = self.cell_of(camera.world_to_screen(t.origin)) {
                        for (i, ch) in t.text.chars().enumerate().take(self.columns - col) {
                            grid[row][col + i] = ch;
                        }
                    }
                }
            }
        }

        let mut out = String::with_capacity((self.columns + 3) * (self.rows + 2));
        let border = format!("+{}+\n", "-".repeat(self.columns));
        out.push_str(&border);
        for row in grid {
            out.push('|');
            out.extend(row);
            out.push_str("|\n");
        }
        out.push_str(&border);
        out
    }

    fn fill(&self, grid: &mut [Vec<char>], ch: char, inside: impl Fn(Vec2) -> bool) {
        for (row, line) in grid.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                if inside(self.cell_centre(col, row)) {
                    *cell = ch;
                }
            }
        }
    }
}

impl Renderer for AsciiRenderer {
    fn render(&mut self, camera: &Camera, list: &mut DrawList) -> Result<()> {
        ensure!(self.columns > 0 && self.rows > 0, "ascii grid must have at least one cell");

        self.last = self.rasterize(camera, list);
        if self.every > 0 && self.frames % self.every == 0 {
            println!("frame {}\n{}", self.frames, self.last);
        }
        self.frames += 1;
        Ok(())
    }
}
