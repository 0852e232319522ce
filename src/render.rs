// ABOUTME: Slidev rendering module for the slidev-converter application
// ABOUTME: Renders slides to Slidev markdown fragments with click animations and images

use crate::config::Config;
use crate::slide::{Slide, SlideType};

/// Navigation hint shown under the title slide heading
const TITLE_NAV_HINT: &str = r#"<div class="pt-12">
  <span @click="$slidev.nav.next" class="px-2 py-1 rounded cursor-pointer" hover="bg-white bg-opacity-10">
    Press Space for next page <carbon:arrow-right class="inline"/>
  </span>
</div>
"#;

const IMAGE_STYLE: &str = "max-width: 80%; max-height: 400px; margin: 20px auto; display: block;";

/// Rendering options for slide fragments
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub include_notes: bool,
}

impl From<&Config> for RenderConfig {
    fn from(config: &Config) -> Self {
        Self {
            include_notes: config.include_notes,
        }
    }
}

/// Render one slide to a Slidev markdown fragment
pub fn render_slide(slide: &Slide, config: &RenderConfig) -> String {
    let mut fragment = match slide.slide_type {
        SlideType::Title => format!("\n# {}\n\n{}", slide.title, TITLE_NAV_HINT),
        SlideType::Section => {
            let content_md = if slide.content.is_empty() {
                String::new()
            } else {
                render_clicks(slide)
            };
            format!("\n# {}\n\n{}{}\n", slide.title, content_md, render_images(slide))
        }
        SlideType::Bullets | SlideType::Default => format!(
            "\n# {}\n\n{}{}\n",
            slide.title,
            render_clicks(slide),
            render_images(slide)
        ),
    };

    if config.include_notes && !slide.notes.is_empty() {
        fragment.push_str(&format!("\n<!--\n{}\n-->\n", slide.notes));
    }

    fragment
}

/// Content list wrapped in a `<v-clicks>` reveal block
fn render_clicks(slide: &Slide) -> String {
    let mut md = String::from("\n<v-clicks>\n\n");
    for entry in &slide.content {
        md.push_str(&"  ".repeat(entry.level as usize));
        md.push_str("- ");
        md.push_str(&entry.text);
        md.push('\n');
    }
    md.push_str("\n</v-clicks>");
    md
}

fn render_images(slide: &Slide) -> String {
    if slide.images.is_empty() {
        return String::new();
    }

    let mut md = String::from("\n\n");
    for image in &slide.images {
        md.push_str(&format!(
            "<img src=\"./{}\" alt=\"Image\" style=\"{}\" />\n\n",
            image, IMAGE_STYLE
        ));
    }
    md
}
