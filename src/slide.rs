// ABOUTME: Slide model for the slidev-converter application
// ABOUTME: Defines slides, content entries, slide types and text normalization

use std::fmt;

/// Layout name assigned to every slide
pub const DEFAULT_LAYOUT: &str = "default";

/// Semantic type of a slide, derived from its position and content shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideType {
    Title,
    Section,
    Bullets,
    Default,
}

impl SlideType {
    /// Classify a deck slide.
    ///
    /// `source_title` is the title as found in the source, before any
    /// `"Slide N"` fallback is applied, so an untitled empty slide stays
    /// `Default` rather than becoming a section.
    pub fn classify(ordinal: usize, source_title: &str, content_len: usize) -> Self {
        if ordinal == 0 {
            SlideType::Title
        } else if content_len == 0 && !source_title.is_empty() {
            SlideType::Section
        } else if content_len > 3 {
            SlideType::Bullets
        } else {
            SlideType::Default
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlideType::Title => "title",
            SlideType::Section => "section",
            SlideType::Bullets => "bullets",
            SlideType::Default => "default",
        }
    }
}

impl fmt::Display for SlideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bullet or paragraph line with its indentation level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub level: u32,
    pub text: String,
}

impl ContentEntry {
    /// Create an entry, escaping the text
    pub fn new(level: u32, text: &str) -> Self {
        Self {
            level,
            text: escape_markup(text),
        }
    }
}

/// Normalized representation of one presentation page.
///
/// Every text field is escaped when the slide is built, so a slide can be
/// rendered any number of times without further escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub title: String,
    pub content: Vec<ContentEntry>,
    pub slide_type: SlideType,
    pub layout: String,
    pub notes: String,
    pub images: Vec<String>,
}

impl Slide {
    /// Create a slide with an escaped title and no content
    pub fn new(title: &str, slide_type: SlideType) -> Self {
        Self {
            title: escape_markup(title),
            content: Vec::new(),
            slide_type,
            layout: DEFAULT_LAYOUT.to_string(),
            notes: String::new(),
            images: Vec::new(),
        }
    }

    /// Append a content line
    pub fn push_content(&mut self, level: u32, text: &str) {
        self.content.push(ContentEntry::new(level, text));
    }

    /// Attach speaker notes
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = escape_markup(notes);
        self
    }
}

/// Rewrite `<` and `>` to their entity forms so the renderer never sees raw tags.
pub fn escape_markup(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Collapse every run of whitespace, including newlines, into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_first_slide_is_title() {
        assert_eq!(SlideType::classify(0, "", 0), SlideType::Title);
        assert_eq!(SlideType::classify(0, "Intro", 10), SlideType::Title);
    }

    #[test]
    fn test_classify_section_needs_title_and_no_content() {
        assert_eq!(SlideType::classify(2, "Part Two", 0), SlideType::Section);
        assert_eq!(SlideType::classify(2, "", 0), SlideType::Default);
    }

    #[test]
    fn test_classify_bullets_threshold() {
        assert_eq!(SlideType::classify(1, "List", 3), SlideType::Default);
        assert_eq!(SlideType::classify(1, "List", 4), SlideType::Bullets);
    }

    #[test]
    fn test_classify_is_stable() {
        for ordinal in 0..4 {
            for title in ["", "Heading"] {
                for len in 0..6 {
                    let first = SlideType::classify(ordinal, title, len);
                    let again = SlideType::classify(ordinal, title, len);
                    assert_eq!(first, again);
                }
            }
        }
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup("List<String>"), "List&lt;String&gt;");
        assert_eq!(escape_markup("a -> b"), "a -&gt; b");
        assert_eq!(escape_markup("plain"), "plain");
    }

    #[test]
    fn test_escape_markup_is_idempotent() {
        for s in ["<T>", "x < y && y > z", "&lt;already&gt;", "", "<<>>"] {
            let once = escape_markup(s);
            assert_eq!(escape_markup(&once), once);
            assert!(!once.contains('<') && !once.contains('>'));
        }
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Hello\n  World\t!  "), "Hello World !");
        assert_eq!(collapse_whitespace("\n\n"), "");
    }

    #[test]
    fn test_slide_new_escapes_fields() {
        let mut slide = Slide::new("Generics <T>", SlideType::Default).with_notes("say <this>");
        slide.push_content(1, "Vec<u8>");

        assert_eq!(slide.title, "Generics &lt;T&gt;");
        assert_eq!(slide.notes, "say &lt;this&gt;");
        assert_eq!(slide.content, vec![ContentEntry { level: 1, text: "Vec&lt;u8&gt;".to_string() }]);
        assert_eq!(slide.layout, "default");
        assert!(slide.images.is_empty());
    }

    #[test]
    fn test_slide_type_display() {
        assert_eq!(SlideType::Bullets.to_string(), "bullets");
        assert_eq!(SlideType::Section.as_str(), "section");
    }
}
