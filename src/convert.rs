// ABOUTME: Conversion driver for the slidev-converter application
// ABOUTME: Runs extraction and rendering, then writes slides.md and media into the output directory

use crate::config::Config;
use crate::document::render_document;
use crate::errors::{ConvertError, Result};
use crate::extract::{Extraction, MediaAsset};
use crate::markup::parse_markup;
use crate::slide::Slide;
use crate::utils;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the generated Slidev entry file
pub const SLIDES_FILE_NAME: &str = "slides.md";

/// Directory name used when a title sanitizes to nothing
const FALLBACK_DIR_NAME: &str = "presentation";

/// Outcome of converting every deck in a directory
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Paths of the `slides.md` files written
    pub outputs: Vec<PathBuf>,
    /// Decks that failed, with the reason
    pub failures: Vec<(PathBuf, String)>,
}

/// Converts presentations into Slidev projects
pub struct Converter {
    config: Config,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert a `.pptx` file, returning the path of the written `slides.md`
    pub fn convert_pptx(&self, pptx_path: &Path, output_root: &Path) -> Result<PathBuf> {
        ensure_pptx_backend()?;
        utils::validate_file_exists(pptx_path)?;

        let extraction = load_deck(pptx_path)?;
        // Untitled decks fall back to "Slide 1" here and share an output directory
        let title = extraction
            .slides
            .first()
            .map(|slide| slide.title.clone())
            .unwrap_or_else(|| file_stem(pptx_path));

        self.write_presentation(&title, &extraction.slides, &extraction.media, output_root)
    }

    /// Convert a heading/bullet document, returning the path of the written `slides.md`
    pub fn convert_markup(&self, content: &str, title: &str, output_root: &Path) -> Result<PathBuf> {
        let slides = parse_markup(content);
        info!("Parsed {} slides from markup", slides.len());
        self.write_presentation(title, &slides, &[], output_root)
    }

    /// Convert every `.pptx` file in a directory.
    ///
    /// A deck that fails is logged and left out of the report's outputs; the
    /// rest are still converted. Setup problems are returned as errors.
    pub fn batch_convert(&self, pptx_dir: &Path, output_root: &Path) -> Result<BatchReport> {
        ensure_pptx_backend()?;
        utils::validate_directory_exists(pptx_dir)?;
        utils::validate_directory_writable(output_root)?;

        let pattern = format!("{}/*.pptx", glob::Pattern::escape(&pptx_dir.to_string_lossy()));
        let mut decks = Vec::new();
        for entry in glob::glob(&pattern)
            .map_err(|e| ConvertError::ValidationError(format!("Invalid glob pattern: {}", e)))?
        {
            match entry {
                Ok(path) => decks.push(path),
                Err(e) => warn!("Skipping unreadable entry {:?}: {}", e.path(), e.error()),
            }
        }
        decks.sort();
        info!("Found {} decks in {:?}", decks.len(), pptx_dir);

        let mut report = BatchReport::default();
        for deck in decks {
            match self.convert_pptx(&deck, output_root) {
                Ok(output) => report.outputs.push(output),
                Err(e) => {
                    warn!("Error converting {:?}: {}", deck, e);
                    report.failures.push((deck, e.to_string()));
                }
            }
        }

        Ok(report)
    }

    /// Write media and `slides.md` under `<output_root>/<sanitized title>/`
    fn write_presentation(
        &self,
        title: &str,
        slides: &[Slide],
        media: &[MediaAsset],
        output_root: &Path,
    ) -> Result<PathBuf> {
        let output_dir = output_root.join(presentation_dir_name(title));
        utils::ensure_directory_exists(&output_dir)?;

        if !media.is_empty() {
            info!("Saving {} images...", media.len());
        }
        for asset in media {
            let image_path = output_dir.join(&asset.filename);
            match fs::write(&image_path, &asset.data) {
                Ok(()) => info!("Saved {}", asset.filename),
                Err(e) => warn!("Failed to save {}: {}", asset.filename, e),
            }
        }

        let document = render_document(title, slides, &self.config);
        let output_path = output_dir.join(SLIDES_FILE_NAME);
        if output_path.exists() {
            warn!("Overwriting existing {:?}", output_path);
        }
        fs::write(&output_path, document).map_err(ConvertError::FileReadError)?;

        info!("Slidev presentation created: {:?}", output_path);
        info!("Converted {} slides into {:?}", slides.len(), output_dir);
        Ok(output_path)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Directory name for a presentation title
pub fn presentation_dir_name(title: &str) -> String {
    let slug = utils::sanitize_filename(title);
    if slug.is_empty() {
        FALLBACK_DIR_NAME.to_string()
    } else {
        slug
    }
}

/// Fail fast when the crate was built without a deck backend
pub fn ensure_pptx_backend() -> Result<()> {
    if cfg!(feature = "pptx") {
        Ok(())
    } else {
        Err(ConvertError::MissingDependency(
            "PowerPoint support is not compiled in; rebuild with `--features pptx`".to_string(),
        ))
    }
}

#[cfg(feature = "pptx")]
fn load_deck(path: &Path) -> Result<Extraction> {
    let deck = crate::pptx::PptxDeck::open(path)?;
    Ok(crate::extract::extract_deck(&deck))
}

#[cfg(not(feature = "pptx"))]
fn load_deck(_path: &Path) -> Result<Extraction> {
    ensure_pptx_backend().map(|()| Extraction::default())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| FALLBACK_DIR_NAME.to_string())
}
