//! # Badge Rendering
//!
//! Turns a [`PlaybackSnapshot`](crate::types::PlaybackSnapshot) and
//! [`RenderOptions`] into SVG markup. Nothing in here performs I/O.
//!
//! ```text
//! card.rs   layout: art tile | text column, equalizer, progress bar
//! theme.rs  dark/light palettes, wide/compact sizes, query parsing
//! svg.rs    typed node tree with centralized escaping
//! ```
//!
//! Styling is done exclusively with presentation attributes; the markup
//! contains no `<style>` element so it survives sanitizers that strip CSS.

mod card;
mod svg;
mod theme;

pub use card::{CONTENT_WIDTH, filled_width, render, render_error};
pub use svg::{Element, Node};
pub use theme::{Palette, RenderOptions, Size, Theme};
