//! 2D canvas painter (browser only)

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{RenderScene, SpriteKind};
use crate::sim::ItemKind;

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: &str = "#0b0d17";
    pub const GRID: &str = "#151a2b";
    pub const SNAKE_HEAD: &str = "#7dff9b";
    pub const SNAKE_BODY: &str = "#33c96b";
    pub const FOOD: &str = "#ff5a5f";
    pub const ITEM_SLOW: &str = "#5ab0ff";
    pub const ITEM_GHOST: &str = "#d9d9ff";
    pub const ITEM_MULTIPLIER: &str = "#ffd23f";
    pub const OBSTACLE: &str = "#8a8fa3";
    pub const OBSTACLE_WARNING: &str = "#ff9f1c";
}

fn sprite_color(kind: SpriteKind) -> &'static str {
    match kind {
        SpriteKind::SnakeHead => colors::SNAKE_HEAD,
        SpriteKind::SnakeBody => colors::SNAKE_BODY,
        SpriteKind::Food => colors::FOOD,
        SpriteKind::Item(ItemKind::Slow) => colors::ITEM_SLOW,
        SpriteKind::Item(ItemKind::Ghost) => colors::ITEM_GHOST,
        SpriteKind::Item(ItemKind::Multiplier) => colors::ITEM_MULTIPLIER,
        SpriteKind::Obstacle => colors::OBSTACLE,
        SpriteKind::ObstacleWarning => colors::OBSTACLE_WARNING,
    }
}

/// Paints render scenes onto a canvas element
pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    /// Size of one grid cell in canvas pixels
    fn cell_size(&self, scene: &RenderScene) -> f64 {
        let w = self.canvas.width() as f64 / scene.cols as f64;
        let h = self.canvas.height() as f64 / scene.rows as f64;
        w.min(h).floor().max(1.0)
    }

    pub fn paint(&self, scene: &RenderScene) {
        let size = self.cell_size(scene);
        let ctx = &self.ctx;

        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(colors::BACKGROUND);
        ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );

        // Checkerboard hint so the grid reads at a glance
        ctx.set_fill_style_str(colors::GRID);
        for y in 0..scene.rows {
            for x in 0..scene.cols {
                if (x + y) % 2 == 0 {
                    ctx.fill_rect(x as f64 * size, y as f64 * size, size, size);
                }
            }
        }

        let inset = (size * 0.08).max(1.0);
        for sprite in &scene.sprites {
            ctx.set_global_alpha(sprite.alpha as f64);
            ctx.set_fill_style_str(sprite_color(sprite.kind));

            let x = sprite.cell.x as f64 * size;
            let y = sprite.cell.y as f64 * size;
            match sprite.kind {
                SpriteKind::Food | SpriteKind::Item(_) => {
                    ctx.begin_path();
                    let r = size / 2.0 - inset;
                    let _ = ctx.arc(x + size / 2.0, y + size / 2.0, r, 0.0, std::f64::consts::TAU);
                    ctx.fill();
                }
                SpriteKind::ObstacleWarning => {
                    ctx.set_stroke_style_str(colors::OBSTACLE_WARNING);
                    ctx.set_line_width(inset * 2.0);
                    ctx.stroke_rect(x + inset, y + inset, size - inset * 2.0, size - inset * 2.0);
                }
                _ => {
                    ctx.fill_rect(x + inset, y + inset, size - inset * 2.0, size - inset * 2.0);
                }
            }
        }
        ctx.set_global_alpha(1.0);
    }
}
