// ABOUTME: Library module for the slidev-converter program.
// ABOUTME: Contains the slide model, deck and markup extraction, and Slidev rendering.

// Reexport modules
pub mod config;
pub mod convert;
pub mod deck;
pub mod document;
pub mod errors;
pub mod extract;
pub mod markup;
#[cfg(feature = "pptx")]
pub mod pptx;
pub mod render;
pub mod slide;
pub mod utils;

// Reexport common types and functions
pub use config::{Config, Presenter};
pub use convert::{BatchReport, Converter};
pub use deck::{ImageData, PresentationSource, ShapeSource, SlideSource, SourceParagraph};
pub use document::render_document;
pub use errors::{ConvertError, Result};
pub use extract::{extract_deck, Extraction, MediaAsset};
pub use markup::parse_markup;
#[cfg(feature = "pptx")]
pub use pptx::PptxDeck;
pub use render::{render_slide, RenderConfig};
pub use slide::{escape_markup, ContentEntry, Slide, SlideType};
pub use utils::sanitize_filename;
