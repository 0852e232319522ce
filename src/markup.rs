// ABOUTME: Plain heading/bullet document parser for the slidev-converter application
// ABOUTME: Splits a lightweight markup document into slides, ignoring unrecognized lines

use crate::slide::{Slide, SlideType};
use log::debug;

/// Title given to a slide opened by a bullet with no heading before it
pub const ORPHAN_SLIDE_TITLE: &str = "Content";

/// Parse a heading/bullet document into slides.
///
/// `# ` starts a title slide, `## ` and `### ` start section slides, `* ` and
/// `- ` add bullets to the open slide. Anything else is skipped.
pub fn parse_markup(content: &str) -> Vec<Slide> {
    let mut slides = Vec::new();
    let mut current: Option<Slide> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(title) = line.strip_prefix("# ") {
            slides.extend(current.take());
            current = Some(Slide::new(title.trim(), SlideType::Title));
        } else if line.starts_with("## ") || line.starts_with("### ") {
            slides.extend(current.take());
            let title = line.replace('#', "");
            current = Some(Slide::new(title.trim(), SlideType::Section));
        } else if let Some(text) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
            let slide = current.get_or_insert_with(|| {
                debug!("Bullet outside any heading; opening a \"{}\" slide", ORPHAN_SLIDE_TITLE);
                Slide::new(ORPHAN_SLIDE_TITLE, SlideType::Bullets)
            });
            slide.push_content(0, text.trim());
        } else {
            debug!("Ignoring line: {}", line);
        }
    }

    slides.extend(current);
    slides
}
