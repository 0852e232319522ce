// ABOUTME: Configuration module for the slidev-converter application
// ABOUTME: Provides presenter, theme and output settings with environment variable handling

use std::env;
use std::path::PathBuf;

const DEFAULT_AUTHOR: &str = "Kenneth Kousen";
const DEFAULT_TAGLINE: &str = "Author, Speaker, Java & AI Expert";
const DEFAULT_WEBSITE_LABEL: &str = "KouseniT";
const DEFAULT_WEBSITE_URL: &str = "https://kousenit.com";
const DEFAULT_SOCIAL_HANDLE: &str = "kenkousen";
const DEFAULT_THEME: &str = "seriph";
const DEFAULT_BACKGROUND: &str = "https://source.unsplash.com/1920x1080/?java,programming";
const DEFAULT_TRANSITION: &str = "slide-left";
const DEFAULT_HIGHLIGHTER: &str = "shiki";
const DEFAULT_OUTPUT_DIR: &str = "./slidev-presentations";

/// Presenter details shown in the header info block and the closing slide
#[derive(Debug, Clone)]
pub struct Presenter {
    pub name: String,
    pub tagline: String,
    pub website_label: String,
    pub website_url: String,
    pub social_handle: String,
}

impl Default for Presenter {
    fn default() -> Self {
        Self {
            name: DEFAULT_AUTHOR.to_string(),
            tagline: DEFAULT_TAGLINE.to_string(),
            website_label: DEFAULT_WEBSITE_LABEL.to_string(),
            website_url: DEFAULT_WEBSITE_URL.to_string(),
            social_handle: DEFAULT_SOCIAL_HANDLE.to_string(),
        }
    }
}

impl Presenter {
    /// Website URL without the scheme, as shown in link text
    pub fn website_host(&self) -> &str {
        self.website_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
    }
}

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub presenter: Presenter,
    pub theme: String,
    pub background: String,
    pub transition: String,
    pub highlighter: String,
    /// Emit speaker notes as Slidev note comments
    pub include_notes: bool,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            presenter: Presenter::default(),
            theme: DEFAULT_THEME.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            transition: DEFAULT_TRANSITION.to_string(),
            highlighter: DEFAULT_HIGHLIGHTER.to_string(),
            include_notes: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let presenter = Presenter {
            name: env_or("SLIDEV_AUTHOR", defaults.presenter.name),
            tagline: env_or("SLIDEV_TAGLINE", defaults.presenter.tagline),
            website_label: env_or("SLIDEV_WEBSITE_LABEL", defaults.presenter.website_label),
            website_url: env_or("SLIDEV_WEBSITE_URL", defaults.presenter.website_url),
            social_handle: env_or("SLIDEV_SOCIAL_HANDLE", defaults.presenter.social_handle),
        };
        let include_notes = env::var("SLIDEV_INCLUDE_NOTES")
            .ok()
            .map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.include_notes);
        let output_dir = env::var("SLIDEV_OUTPUT_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        Self {
            presenter,
            theme: env_or("SLIDEV_THEME", defaults.theme),
            background: env_or("SLIDEV_BACKGROUND", defaults.background),
            transition: env_or("SLIDEV_TRANSITION", defaults.transition),
            highlighter: env_or("SLIDEV_HIGHLIGHTER", defaults.highlighter),
            include_notes,
            output_dir,
        }
    }

    /// Override the presenter name
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.presenter.name = author.into();
        self
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).ok().filter(|s| !s.is_empty()).unwrap_or(default)
}
