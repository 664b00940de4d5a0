//! Browser rendering module
//!
//! Draws the arena with the Canvas 2D API and drives the DOM HUD.

pub mod canvas;

pub use canvas::CanvasPresenter;
