// ABOUTME: Shared fixtures for integration tests
// ABOUTME: Writes minimal but well-formed .pptx packages with text, pictures and notes

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;
use zip::{write::FileOptions, ZipWriter};

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDRfixture";
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

/// Picture on a fixture slide
pub enum FixturePicture {
    /// Embedded media part with this name and payload
    Embedded(&'static str, &'static [u8]),
    /// Relationship to a media part that is absent from the package
    Missing(&'static str),
}

/// Description of one slide in a fixture deck
#[derive(Default)]
pub struct FixtureSlide {
    pub title: Option<&'static str>,
    /// Body paragraphs as (level, text)
    pub bullets: Vec<(u32, &'static str)>,
    pub pictures: Vec<FixturePicture>,
    pub notes: Option<&'static str>,
}

impl FixtureSlide {
    pub fn titled(title: &'static str) -> Self {
        Self {
            title: Some(title),
            ..Self::default()
        }
    }

    pub fn bullets(mut self, bullets: &[(u32, &'static str)]) -> Self {
        self.bullets = bullets.to_vec();
        self
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn title_shape(title: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>"#,
        xml_escape(title)
    )
}

fn body_shape(bullets: &[(u32, &str)]) -> String {
    let paragraphs: String = bullets
        .iter()
        .map(|(level, text)| {
            format!(
                r#"<a:p><a:pPr lvl="{}"/><a:r><a:t>{}</a:t></a:r></a:p>"#,
                level,
                xml_escape(text)
            )
        })
        .collect();
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content 2"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/>{}</p:txBody></p:sp>"#,
        paragraphs
    )
}

fn picture_shape(index: usize) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture {id}"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rIdImg{index}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr/></p:pic>"#,
        id = 10 + index,
        index = index
    )
}

fn notes_xml(notes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:notes xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree>
<p:sp><p:nvSpPr><p:cNvPr id="2" name="Slide Image"/><p:cNvSpPr/><p:nvPr><p:ph type="sldImg"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
<p:sp><p:nvSpPr><p:cNvPr id="3" name="Notes"/><p:cNvSpPr/><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>
</p:spTree></p:cSld></p:notes>"#,
        xml_escape(notes)
    )
}

/// Write a `.pptx` package describing `slides` to `path`
pub fn write_pptx(path: &Path, slides: &[FixtureSlide]) {
    let file = fs::File::create(path).expect("Failed to create fixture file");
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="jpeg" ContentType="image/jpeg"/></Types>"#,
    )
    .unwrap();

    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#,
    )
    .unwrap();

    // Slide ids are listed in reverse relationship-id order so ordering must
    // come from the id list rather than from the relationship numbers.
    let slide_ids: String = (1..=slides.len())
        .map(|n| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, 100 - n))
        .collect();
    zip.start_file("ppt/presentation.xml", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldIdLst>{}</p:sldIdLst><p:sldSz cx="9144000" cy="5143500"/></p:presentation>"#,
            slide_ids
        )
        .as_bytes(),
    )
    .unwrap();

    let pres_rels: String = (1..=slides.len())
        .map(|n| {
            format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                100 - n,
                n
            )
        })
        .collect();
    zip.start_file("ppt/_rels/presentation.xml.rels", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            pres_rels
        )
        .as_bytes(),
    )
    .unwrap();

    for (i, slide) in slides.iter().enumerate() {
        let slide_num = i + 1;
        let mut shapes = String::new();
        if let Some(title) = slide.title {
            shapes.push_str(&title_shape(title));
        }
        if !slide.bullets.is_empty() {
            shapes.push_str(&body_shape(&slide.bullets));
        }

        let mut rels = String::new();
        for (p, picture) in slide.pictures.iter().enumerate() {
            shapes.push_str(&picture_shape(p));
            let media_name = match picture {
                FixturePicture::Embedded(name, data) => {
                    zip.start_file(format!("ppt/media/{}", name), options).unwrap();
                    zip.write_all(data).unwrap();
                    *name
                }
                FixturePicture::Missing(name) => *name,
            };
            rels.push_str(&format!(
                r#"<Relationship Id="rIdImg{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/{}"/>"#,
                p, media_name
            ));
        }

        if let Some(notes) = slide.notes {
            zip.start_file(format!("ppt/notesSlides/notesSlide{}.xml", slide_num), options)
                .unwrap();
            zip.write_all(notes_xml(notes).as_bytes()).unwrap();
            rels.push_str(&format!(
                r#"<Relationship Id="rIdNotes" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide" Target="../notesSlides/notesSlide{}.xml"/>"#,
                slide_num
            ));
        }

        zip.start_file(format!("ppt/slides/slide{}.xml", slide_num), options)
            .unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
                shapes
            )
            .as_bytes(),
        )
        .unwrap();

        if !rels.is_empty() {
            zip.start_file(format!("ppt/slides/_rels/slide{}.xml.rels", slide_num), options)
                .unwrap();
            zip.write_all(
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                    rels
                )
                .as_bytes(),
            )
            .unwrap();
        }
    }

    zip.finish().expect("Failed to finish fixture archive");
}

/// A small three-slide deck: cover, a section break and a bulleted slide
pub fn sample_deck(title: &'static str) -> Vec<FixtureSlide> {
    vec![
        FixtureSlide::titled(title),
        FixtureSlide::titled("Background"),
        FixtureSlide::titled("Details").bullets(&[(0, "Point one"), (1, "Sub point"), (0, "Point two")]),
    ]
}
