//! Rendering module
//!
//! `scene` turns a game state into a flat sprite list; `canvas` paints that
//! list onto a 2D canvas in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use scene::{RenderScene, Sprite, SpriteKind};
