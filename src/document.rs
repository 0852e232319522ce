// ABOUTME: Document assembly for the slidev-converter application
// ABOUTME: Builds the Slidev frontmatter, joins slide fragments and appends the closing slide

use crate::config::{Config, Presenter};
use crate::render::{render_slide, RenderConfig};
use crate::slide::Slide;

/// Separator line between Slidev slides
pub const SLIDE_SEPARATOR: &str = "---";

/// Quote a string as a YAML double-quoted scalar
pub fn yaml_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Generate the Slidev frontmatter block
pub fn generate_frontmatter(title: &str, config: &Config) -> String {
    let presenter = &config.presenter;
    // Blank lines inside the `info` block scalar keep its indentation.
    let blank = "  ";
    [
        SLIDE_SEPARATOR.to_string(),
        format!("theme: {}", config.theme),
        format!("background: {}", config.background),
        "class: text-center".to_string(),
        format!("highlighter: {}", config.highlighter),
        "lineNumbers: false".to_string(),
        "info: |".to_string(),
        format!("  ## {}", title),
        blank.to_string(),
        format!("  By {}", presenter.name),
        blank.to_string(),
        format!(
            "  Learn more at [{}]({})",
            presenter.website_label, presenter.website_url
        ),
        "drawings:".to_string(),
        "  persist: false".to_string(),
        format!("transition: {}", config.transition),
        format!("title: {}", yaml_quote(title)),
        "mdc: true".to_string(),
        SLIDE_SEPARATOR.to_string(),
    ]
    .join("\n")
}

/// Closing "Thank You!" slide
pub fn closing_slide(presenter: &Presenter) -> String {
    format!(
        r#"
# Thank You!

<div class="text-center">

## Questions?

<div class="pt-12">
  <span class="text-6xl"><carbon:logo-github /></span>
</div>

**{name}**{hard_break}
*{tagline}*

[{host}]({url}) | [@{handle}](https://twitter.com/{handle})

</div>
"#,
        name = presenter.name,
        hard_break = "  ",
        tagline = presenter.tagline,
        host = presenter.website_host(),
        url = presenter.website_url,
        handle = presenter.social_handle,
    )
}

/// Render a full Slidev document.
///
/// The first slide shares its block with the frontmatter, so separators only
/// precede the second slide onwards, plus one before the closing slide.
pub fn render_document(title: &str, slides: &[Slide], config: &Config) -> String {
    let render_config = RenderConfig::from(config);
    let mut blocks = Vec::with_capacity(slides.len() * 2 + 3);

    blocks.push(generate_frontmatter(title, config));
    for (i, slide) in slides.iter().enumerate() {
        if i > 0 {
            blocks.push(SLIDE_SEPARATOR.to_string());
        }
        blocks.push(render_slide(slide, &render_config));
    }
    blocks.push(SLIDE_SEPARATOR.to_string());
    blocks.push(closing_slide(&config.presenter));

    blocks.join("\n")
}
