// ABOUTME: Capability interface over a parsed presentation deck
// ABOUTME: Lets the extractor read slides, shapes, text, images and notes from any backend

use crate::errors::Result;

/// Binary image payload read from a shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    /// Extension hint from the source, such as the media part name
    pub extension: Option<String>,
}

/// One paragraph of a text frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceParagraph {
    /// Outline level, `None` when the source has no hierarchy
    pub level: Option<u32>,
    pub text: String,
}

impl SourceParagraph {
    pub fn new(level: Option<u32>, text: &str) -> Self {
        Self {
            level,
            text: text.to_string(),
        }
    }
}

/// A whole deck: an ordered sequence of slides
pub trait PresentationSource {
    type Slide: SlideSource;

    fn slides(&self) -> &[Self::Slide];
}

/// A single slide of a deck
pub trait SlideSource {
    type Shape: ShapeSource;

    /// Shapes in source order, the title shape included
    fn shapes(&self) -> &[Self::Shape];

    /// Speaker notes text, if the slide has a notes page
    fn notes_text(&self) -> Option<&str>;
}

/// A shape on a slide
pub trait ShapeSource {
    /// Whether the source marks this shape as the slide title
    fn is_title(&self) -> bool;

    /// `Some` for image-bearing shapes; the inner result carries read failures
    fn image(&self) -> Option<Result<ImageData>>;

    /// `Some` for shapes with paragraph-structured text
    fn paragraphs(&self) -> Option<Vec<SourceParagraph>>;

    /// Flat text for shapes without paragraph structure
    fn text(&self) -> Option<String>;
}
