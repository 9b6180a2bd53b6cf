// Presentation layer: request handling, console menu and text rendering.

pub mod handler;
pub mod menu;
pub mod render;
