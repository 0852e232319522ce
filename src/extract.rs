// ABOUTME: Deck extraction for the slidev-converter application
// ABOUTME: Turns any PresentationSource into classified slides plus staged media assets

use crate::deck::{ImageData, PresentationSource, ShapeSource, SlideSource};
use crate::slide::{collapse_whitespace, escape_markup, ContentEntry, Slide, SlideType, DEFAULT_LAYOUT};
use log::{debug, info, warn};

/// Extension used when neither the payload nor the source tells us the format
pub const FALLBACK_IMAGE_EXTENSION: &str = "png";

/// Image payload paired with the filename it will be written under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Result of extracting a deck: the slides and the media they reference
#[derive(Debug, Default)]
pub struct Extraction {
    pub slides: Vec<Slide>,
    pub media: Vec<MediaAsset>,
}

/// Extract every slide of a deck in source order
pub fn extract_deck<P: PresentationSource>(deck: &P) -> Extraction {
    let mut extraction = Extraction::default();

    for (ordinal, source_slide) in deck.slides().iter().enumerate() {
        let (slide, media) = extract_slide(source_slide, ordinal);
        extraction.slides.push(slide);
        extraction.media.extend(media);
    }

    info!(
        "Extracted {} slides and {} images",
        extraction.slides.len(),
        extraction.media.len()
    );
    extraction
}

/// Extract a single slide; `ordinal` is zero-based
pub fn extract_slide<S: SlideSource>(source: &S, ordinal: usize) -> (Slide, Vec<MediaAsset>) {
    let slide_num = ordinal + 1;
    let shapes = source.shapes();
    let title_index = shapes.iter().position(|shape| shape.is_title());

    let source_title = title_index
        .and_then(|i| shape_text(&shapes[i]))
        .map(|text| escape_markup(&collapse_whitespace(&text)))
        .unwrap_or_default();

    let mut content = Vec::new();
    let mut media: Vec<MediaAsset> = Vec::new();

    for (index, shape) in shapes.iter().enumerate() {
        if let Some(image) = shape.image() {
            match image {
                Ok(data) => {
                    let filename = format!(
                        "slide_{}_image_{}.{}",
                        slide_num,
                        media.len() + 1,
                        image_extension(&data)
                    );
                    debug!("Staged image {} ({} bytes)", filename, data.bytes.len());
                    media.push(MediaAsset {
                        filename,
                        data: data.bytes,
                    });
                }
                Err(e) => {
                    warn!("Could not extract image from slide {}: {}", slide_num, e);
                }
            }
            continue;
        }

        if Some(index) == title_index {
            continue;
        }

        if let Some(paragraphs) = shape.paragraphs() {
            for paragraph in paragraphs {
                let text = paragraph.text.trim();
                if !text.is_empty() {
                    content.push(ContentEntry::new(paragraph.level.unwrap_or(0), text));
                }
            }
        } else if let Some(text) = shape.text() {
            let text = text.trim();
            if text.contains('\n') {
                content.extend(
                    text.lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(|line| ContentEntry::new(0, line)),
                );
            } else if !text.is_empty() {
                content.push(ContentEntry::new(0, text));
            }
        }
    }

    let notes = source
        .notes_text()
        .map(|notes| escape_markup(notes.trim()))
        .unwrap_or_default();

    let slide_type = SlideType::classify(ordinal, &source_title, content.len());
    let title = if source_title.is_empty() {
        format!("Slide {}", slide_num)
    } else {
        source_title
    };

    debug!(
        "Slide {}: type={}, {} content lines, {} images",
        slide_num,
        slide_type,
        content.len(),
        media.len()
    );

    let slide = Slide {
        title,
        content,
        slide_type,
        layout: DEFAULT_LAYOUT.to_string(),
        notes,
        images: media.iter().map(|asset| asset.filename.clone()).collect(),
    };
    (slide, media)
}

/// Full text of a shape, paragraphs joined by newlines
fn shape_text<T: ShapeSource>(shape: &T) -> Option<String> {
    match shape.paragraphs() {
        Some(paragraphs) => Some(
            paragraphs
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        None => shape.text(),
    }
}

/// Pick a file extension for an image payload.
///
/// The payload's magic bytes win, then the source's hint, then `png`.
pub fn image_extension(data: &ImageData) -> String {
    if let Ok(format) = image::guess_format(&data.bytes) {
        if let Some(ext) = format.extensions_str().first() {
            return ext.to_string();
        }
    }

    data.extension
        .as_deref()
        .map(|ext| ext.trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| FALLBACK_IMAGE_EXTENSION.to_string())
}
