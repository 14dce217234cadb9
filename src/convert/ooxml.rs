//! Shared helpers for OOXML containers (DOCX, XLSX, PPTX).

use crate::error::{Error, Result};
use crate::model::Metadata;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

pub(crate) type Archive = ZipArchive<Cursor<Vec<u8>>>;

/// Core property elements and the metadata keys they map to.
const CORE_PROPERTIES: &[(&[u8], &str)] = &[
    (b"title", "title"),
    (b"subject", "subject"),
    (b"creator", "creator"),
    (b"description", "description"),
    (b"keywords", "keywords"),
    (b"category", "category"),
    (b"lastModifiedBy", "last_modified_by"),
    (b"created", "created"),
    (b"modified", "modified"),
];

/// Open an in-memory ZIP container.
pub(crate) fn open_archive(bytes: Vec<u8>) -> Result<Archive> {
    Ok(ZipArchive::new(Cursor::new(bytes))?)
}

/// Read a part as UTF-8 text.
pub(crate) fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut part = archive
        .by_name(name)
        .map_err(|_| Error::MissingPart(name.to_string()))?;
    let mut content = String::new();
    part.read_to_string(&mut content)?;
    Ok(content)
}

/// Check whether a part exists.
pub(crate) fn has_part<R: Read + Seek>(archive: &ZipArchive<R>, name: &str) -> bool {
    archive.file_names().any(|n| n == name)
}

/// Read `docProps/core.xml` into metadata.
///
/// A missing or malformed part yields empty metadata.
pub(crate) fn core_properties<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Metadata {
    let Ok(xml) = read_part(archive, "docProps/core.xml") else {
        return Metadata::new();
    };
    match parse_core_properties(&xml) {
        Ok(metadata) => metadata,
        Err(e) => {
            log::debug!("ignoring unreadable core properties: {}", e);
            Metadata::new()
        }
    }
}

fn parse_core_properties(xml: &str) -> Result<Metadata> {
    let mut reader = Reader::from_str(xml);
    let mut metadata = Metadata::new();
    let mut current: Option<&str> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                current = CORE_PROPERTIES
                    .iter()
                    .find(|(tag, _)| *tag == name.as_ref())
                    .map(|(_, key)| *key);
            }
            Event::Text(e) => {
                if let Some(key) = current {
                    let text = e.unescape()?;
                    let text = text.trim();
                    if !text.is_empty() {
                        metadata.insert(key.to_string(), text.to_string());
                    }
                }
            }
            Event::End(_) => current = None,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(metadata)
}

/// Read a relationships part into a map from relationship id to target.
pub(crate) fn relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    rels_path: &str,
) -> Result<HashMap<String, String>> {
    let xml = read_part(archive, rels_path)?;
    let mut reader = Reader::from_str(&xml);
    let mut rels = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attribute(&e, b"Id")?;
                let target = attribute(&e, b"Target")?;
                if let (Some(id), Some(target)) = (id, target) {
                    rels.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(rels)
}

/// Get an attribute value by its qualified name (e.g., `r:id`).
pub(crate) fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Resolve a relationship target against the directory of its source part.
///
/// `("ppt", "slides/slide1.xml")` gives `ppt/slides/slide1.xml`; absolute
/// targets are taken from the container root.
pub(crate) fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut parts: Vec<&str> = base_dir.split('/').filter(|p| !p.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(segment),
        }
    }
    parts.join("/")
}
