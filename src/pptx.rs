// ABOUTME: PPTX reading module for the slidev-converter application
// ABOUTME: Loads slides, shapes, images and notes from an Office Open XML package

use crate::deck::{ImageData, PresentationSource, ShapeSource, SlideSource, SourceParagraph};
use crate::errors::{ConvertError, Result};
use log::{debug, info, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const NOTES_SLIDE_REL: &str = "/notesSlide";
/// Deepest outline level DrawingML allows on `a:pPr`
const MAX_OUTLINE_LEVEL: u32 = 8;

/// A parsed `.pptx` deck, fully loaded into memory
#[derive(Debug)]
pub struct PptxDeck {
    slides: Vec<PptxSlide>,
}

/// One slide of a `.pptx` deck
#[derive(Debug)]
pub struct PptxSlide {
    shapes: Vec<PptxShape>,
    notes: Option<String>,
}

/// A top-level shape of a slide
#[derive(Debug)]
pub struct PptxShape {
    placeholder: Option<String>,
    paragraphs: Option<Vec<SourceParagraph>>,
    image: Option<std::result::Result<ImageData, String>>,
}

impl PptxDeck {
    /// Open and parse a `.pptx` file
    pub fn open(path: &Path) -> Result<Self> {
        info!("Opening PPTX: {:?}", path);
        let file = File::open(path).map_err(ConvertError::FileReadError)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a `.pptx` package from any seekable reader
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let presentation = read_part(&mut archive, PRESENTATION_PART)?;
        let rels = read_relationships(&mut archive, &rels_path_for(PRESENTATION_PART))?;
        let slide_ids = parse_slide_ids(&presentation).map_err(|e| xml_error(PRESENTATION_PART, e))?;

        let mut slides = Vec::with_capacity(slide_ids.len());
        for id in slide_ids {
            let rel = rels.get(&id).ok_or_else(|| {
                ConvertError::PptxError(format!("Slide relationship {} not found", id))
            })?;
            let part = resolve_target(PRESENTATION_PART, &rel.target);
            slides.push(load_slide(&mut archive, &part)?);
        }

        info!("Loaded {} slides from PPTX", slides.len());
        Ok(Self { slides })
    }
}

impl PresentationSource for PptxDeck {
    type Slide = PptxSlide;

    fn slides(&self) -> &[PptxSlide] {
        &self.slides
    }
}

impl SlideSource for PptxSlide {
    type Shape = PptxShape;

    fn shapes(&self) -> &[PptxShape] {
        &self.shapes
    }

    fn notes_text(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

impl ShapeSource for PptxShape {
    fn is_title(&self) -> bool {
        matches!(self.placeholder.as_deref(), Some("title") | Some("ctrTitle"))
    }

    fn image(&self) -> Option<Result<ImageData>> {
        self.image
            .as_ref()
            .map(|image| image.clone().map_err(ConvertError::ImageError))
    }

    fn paragraphs(&self) -> Option<Vec<SourceParagraph>> {
        self.paragraphs.clone()
    }

    fn text(&self) -> Option<String> {
        None
    }
}

/// Package relationship from a `.rels` part
#[derive(Debug, Clone)]
struct Relationship {
    rel_type: String,
    target: String,
    external: bool,
}

/// Shape as found in slide XML, before images are resolved
#[derive(Debug, Default)]
struct RawShape {
    is_picture: bool,
    placeholder: Option<String>,
    paragraphs: Option<Vec<SourceParagraph>>,
    embed: Option<String>,
}

impl RawShape {
    fn picture() -> Self {
        Self {
            is_picture: true,
            ..Self::default()
        }
    }
}

fn load_slide<R: Read + Seek>(archive: &mut ZipArchive<R>, part: &str) -> Result<PptxSlide> {
    debug!("Parsing slide part {}", part);
    let xml = read_part(archive, part)?;
    let rels = read_relationships(archive, &rels_path_for(part))?;
    let raw_shapes = parse_shapes(&xml).map_err(|e| xml_error(part, e))?;

    let shapes = raw_shapes
        .into_iter()
        .map(|raw| {
            let image = if raw.is_picture {
                Some(load_image(archive, part, &rels, raw.embed.as_deref()))
            } else {
                None
            };
            PptxShape {
                placeholder: raw.placeholder,
                paragraphs: raw.paragraphs,
                image,
            }
        })
        .collect();

    let notes = match rels.values().find(|r| r.rel_type.ends_with(NOTES_SLIDE_REL)) {
        Some(rel) => {
            let notes_part = resolve_target(part, &rel.target);
            match load_notes(archive, &notes_part) {
                Ok(notes) => notes,
                Err(e) => {
                    warn!("Could not read notes for {}: {}", part, e);
                    None
                }
            }
        }
        None => None,
    };

    Ok(PptxSlide { shapes, notes })
}

/// Read the picture payload a shape points at
fn load_image<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    slide_part: &str,
    rels: &HashMap<String, Relationship>,
    embed: Option<&str>,
) -> std::result::Result<ImageData, String> {
    let id = embed.ok_or_else(|| "picture has no embedded image reference".to_string())?;
    let rel = rels
        .get(id)
        .ok_or_else(|| format!("relationship {} not found in {}", id, slide_part))?;
    if rel.external {
        return Err(format!("image {} is linked, not embedded", rel.target));
    }

    let media_part = resolve_target(slide_part, &rel.target);
    let bytes = read_part_bytes(archive, &media_part).map_err(|e| e.to_string())?;
    let extension = Path::new(&media_part)
        .extension()
        .map(|ext| ext.to_string_lossy().to_string());

    Ok(ImageData { bytes, extension })
}

/// Text of the body placeholder on a notes page
fn load_notes<R: Read + Seek>(archive: &mut ZipArchive<R>, part: &str) -> Result<Option<String>> {
    let xml = read_part(archive, part)?;
    let shapes = parse_shapes(&xml).map_err(|e| xml_error(part, e))?;

    Ok(shapes
        .into_iter()
        .find(|shape| shape.placeholder.as_deref() == Some("body"))
        .and_then(|shape| shape.paragraphs)
        .map(|paragraphs| {
            paragraphs
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        }))
}

/// Relationship ids of `p:sldIdLst`, in presentation order
fn parse_slide_ids(xml: &str) -> std::result::Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) | Event::Empty(ref e) if local_name(e.name().as_ref()) == b"sldId" => {
                if let Some(id) = relationship_id(e) {
                    ids.push(id);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ids)
}

/// Collect the top-level shapes of a slide or notes page.
///
/// Shapes nested in group shapes are skipped.
fn parse_shapes(xml: &str) -> std::result::Result<Vec<RawShape>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut shapes = Vec::new();
    let mut group_depth = 0usize;
    let mut current: Option<RawShape> = None;
    let mut paragraph: Option<SourceParagraph> = None;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match local_name(e.name().as_ref()) {
                b"grpSp" => group_depth += 1,
                b"sp" if group_depth == 0 => current = Some(RawShape::default()),
                b"pic" if group_depth == 0 => current = Some(RawShape::picture()),
                b"txBody" => {
                    if let Some(shape) = current.as_mut() {
                        shape.paragraphs.get_or_insert_with(Vec::new);
                    }
                }
                b"p" if current.as_ref().map_or(false, |s| s.paragraphs.is_some()) => {
                    paragraph = Some(SourceParagraph::new(None, ""));
                }
                b"t" if paragraph.is_some() => in_text = true,
                _ => apply_attributes(e, &mut current, &mut paragraph),
            },
            Event::Empty(ref e) => apply_attributes(e, &mut current, &mut paragraph),
            Event::Text(ref e) if in_text => {
                if let Some(p) = paragraph.as_mut() {
                    p.text.push_str(&e.unescape()?);
                }
            }
            Event::End(ref e) => match local_name(e.name().as_ref()) {
                b"grpSp" => group_depth = group_depth.saturating_sub(1),
                b"sp" | b"pic" if group_depth == 0 => shapes.extend(current.take()),
                b"p" => {
                    if let (Some(p), Some(shape)) = (paragraph.take(), current.as_mut()) {
                        shape.paragraphs.get_or_insert_with(Vec::new).push(p);
                    }
                }
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(shapes)
}

/// Pick up the attributes we care about from placeholder, paragraph, blip and break elements
fn apply_attributes(
    e: &BytesStart,
    current: &mut Option<RawShape>,
    paragraph: &mut Option<SourceParagraph>,
) {
    match local_name(e.name().as_ref()) {
        b"ph" => {
            if let Some(shape) = current.as_mut() {
                // A placeholder with no type is a generic object placeholder
                shape.placeholder = Some(attribute(e, b"type").unwrap_or_else(|| "obj".to_string()));
            }
        }
        b"pPr" => {
            if let Some(p) = paragraph.as_mut() {
                p.level = attribute(e, b"lvl")
                    .and_then(|lvl| lvl.parse::<u32>().ok())
                    .map(|lvl| lvl.min(MAX_OUTLINE_LEVEL));
            }
        }
        b"blip" => {
            if let Some(shape) = current.as_mut().filter(|s| s.is_picture) {
                shape.embed = attribute(e, b"embed");
            }
        }
        b"br" => {
            if let Some(p) = paragraph.as_mut() {
                p.text.push(' ');
            }
        }
        _ => {}
    }
}

fn read_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<HashMap<String, Relationship>> {
    let Some(xml) = read_optional_part(archive, path)? else {
        return Ok(HashMap::new());
    };

    let mut reader = Reader::from_str(&xml);
    let mut rels = HashMap::new();

    loop {
        match reader.read_event().map_err(|e| xml_error(path, e))? {
            Event::Start(ref e) | Event::Empty(ref e) if local_name(e.name().as_ref()) == b"Relationship" => {
                let (Some(id), Some(target)) = (attribute(e, b"Id"), attribute(e, b"Target")) else {
                    continue;
                };
                rels.insert(
                    id,
                    Relationship {
                        rel_type: attribute(e, b"Type").unwrap_or_default(),
                        target,
                        external: attribute(e, b"TargetMode").as_deref() == Some("External"),
                    },
                );
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(rels)
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    read_optional_part(archive, name)?
        .ok_or_else(|| ConvertError::PptxError(format!("Part not found in package: {}", name)))
}

fn read_optional_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| ConvertError::PptxError(format!("Failed to read '{}': {}", name, e)))?;
    Ok(Some(content))
}

fn read_part_bytes<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut file = archive
        .by_name(name)
        .map_err(|e| ConvertError::PptxError(format!("Part '{}' not readable: {}", name, e)))?;

    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|e| ConvertError::PptxError(format!("Failed to read '{}': {}", name, e)))?;
    Ok(data)
}

/// `ppt/slides/slide1.xml` -> `ppt/slides/_rels/slide1.xml.rels`
fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the directory of its source part
fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = source_part.split('/').collect();
    segments.pop();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// The `r:id` attribute, told apart from the plain numeric `id`
fn relationship_id(e: &BytesStart) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        let key = attr.key.as_ref();
        if key.contains(&b':') && local_name(key) == b"id" {
            attr.unescape_value().ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

/// Attribute value by local name, ignoring any namespace prefix
fn attribute(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == name)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Extract the local name from a potentially namespaced XML name
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

fn xml_error(part: &str, e: quick_xml::Error) -> ConvertError {
    ConvertError::XmlError {
        part: part.to_string(),
        message: e.to_string(),
    }
}
