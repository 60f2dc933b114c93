//! Graph model and classical graph algorithms for the graph editor.
//!
//! The [`Graph`] type is exported to JavaScript through `wasm-bindgen` and is
//! equally usable from Rust. Algorithms live in [`algorithms`] as free
//! functions that borrow the graph read-only and return plain values.

pub mod algorithms;
pub mod error;
pub mod graph;
pub mod model;

pub use algorithms::PathResult;
pub use error::{GraphError, Result};
pub use graph::Graph;
pub use model::{Edge, GraphKind, GraphSnapshot, Vertex};

use wasm_bindgen::prelude::*;

/// Install the panic hook so Rust panics show up in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
