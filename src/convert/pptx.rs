//! PPTX reader.
//!
//! One page per slide, in presentation order. Each text paragraph on a
//! slide (shapes and tables alike) is one line. Slides are parsed on demand,
//! so a damaged slide only costs that slide.

use super::ooxml::{
    attribute, core_properties, has_part, open_archive, read_part, relationships,
    resolve_target, Archive,
};
use super::{DocumentReader, PageLayout, PageSource};
use crate::error::{Error, Result};
use crate::model::Metadata;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::sync::LazyLock;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";

static SLIDE_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap());

/// Slide part paths in presentation order.
fn slide_order(archive: &mut Archive) -> Result<Vec<String>> {
    if has_part(archive, PRESENTATION_PART) && has_part(archive, PRESENTATION_RELS) {
        let rels = relationships(archive, PRESENTATION_RELS)?;
        let xml = read_part(archive, PRESENTATION_PART)?;
        let mut reader = Reader::from_str(&xml);
        let mut slides = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldId" => {
                    let target = attribute(&e, b"r:id")?.and_then(|id| rels.get(&id));
                    if let Some(target) = target {
                        let path = resolve_target("ppt", target);
                        if has_part(archive, &path) {
                            slides.push(path);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !slides.is_empty() {
            return Ok(slides);
        }
    }

    // No usable slide list: order slide parts by their number
    let mut numbered: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = SLIDE_PART.captures(name)?.get(1)?.as_str().parse().ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    numbered.sort();
    log::debug!("slide order taken from {} part names", numbered.len());
    Ok(numbered.into_iter().map(|(_, name)| name).collect())
}

/// Text paragraphs of one slide.
fn parse_slide(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut lines = Vec::new();
    let mut paragraph: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => paragraph = Some(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => lines.push(String::new()),
                b"br" => {
                    if let Some(p) = paragraph.as_mut() {
                        p.push(' ');
                    }
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => lines.extend(paragraph.take()),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(e) if in_text => {
                if let Some(p) = paragraph.as_mut() {
                    p.push_str(&e.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(lines)
}

/// Opened presentation.
pub struct PptxSource {
    archive: Archive,
    slides: Vec<String>,
    metadata: Metadata,
}

impl PageSource for PptxSource {
    fn layout(&self) -> PageLayout {
        PageLayout::Slides
    }

    fn page_count(&self) -> usize {
        self.slides.len()
    }

    fn page_name(&self, _index: usize) -> Option<String> {
        None
    }

    fn read_page(&mut self, index: usize) -> Result<Vec<String>> {
        let path = self.slides.get(index).ok_or_else(|| Error::PageDecode {
            page: index,
            reason: "no such slide".to_string(),
        })?;

        read_part(&mut self.archive, path)
            .and_then(|xml| parse_slide(&xml))
            .map_err(|e| Error::PageDecode {
                page: index,
                reason: e.to_string(),
            })
    }

    fn metadata(&self) -> Metadata {
        self.metadata.clone()
    }
}

/// PPTX reader.
#[derive(Debug, Clone, Default)]
pub struct PptxReader {
    _private: (),
}

impl PptxReader {
    /// Create a new PPTX reader.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentReader for PptxReader {
    fn name(&self) -> &str {
        "pptx"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pptx"]
    }

    fn open_bytes(&self, bytes: Vec<u8>) -> Result<Box<dyn PageSource>> {
        let mut archive = open_archive(bytes)?;
        let slides = slide_order(&mut archive)?;

        let mut metadata = core_properties(&mut archive);
        metadata.insert("slide_count".to_string(), slides.len().to_string());

        Ok(Box::new(PptxSource {
            archive,
            slides,
            metadata,
        }))
    }
}
