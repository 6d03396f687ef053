//! Renders a location as a document: an SVG card, wrapped in JSON metadata,
//! wrapped in a `data:` URI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{self, DecodeError};
use crate::common::{Compass, LocationId};
use crate::line_split;
use crate::registry::Registry;
use crate::world_store::WorldGraphStore;

pub const DOCUMENT_PREFIX: &str = "data:application/json;base64,";
pub const IMAGE_PREFIX: &str = "data:image/svg+xml;base64,";

const NO_NAME: &[u8] = b"No Name";
const NO_EXIT: &[u8] = b"No Exit";
const BLANK_LINE: &[u8] = b" ";

const SVG_HEAD: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" preserveAspectRatio="xMinYMin meet" viewBox="0 0 350 350">"#,
    r#"<style>.base { fill: white; font-family: serif; font-size: 14px; }</style>"#,
    r#"<rect width="100%" height="100%" fill="black" />"#,
);
const SVG_TAIL: &str = "</svg>";
const NAME_Y: u32 = 20;
const DESCRIPTION_Y: u32 = 60;
const DIRECTIONS_Y: u32 = 140;
const LINE_HEIGHT: u32 = 20;

/// One `{trait_type, value}` entry of the document's attributes
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DocumentAttribute {
    pub trait_type: String,
    pub value: String,
}

/// The JSON object inside a document
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DocumentMetadata {
    pub name: String,
    pub description: String,
    pub attributes: Vec<DocumentAttribute>,
    pub image: String,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("expected a uri starting with [{0}]")]
    MissingPrefix(&'static str),
    #[error("bad base64 payload: {0}")]
    Base64(#[from] DecodeError),
    #[error("bad json payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// A document taken apart again
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedDocument {
    pub metadata: DocumentMetadata,
    pub svg: Vec<u8>,
}

/// Renders location `id` as it currently stands.
///
/// Exit labels depend on which locations exist right now, so the result is
/// only valid until the next mint or update.
pub fn render<R: Registry + ?Sized>(
    store: &WorldGraphStore,
    registry: &R,
    id: LocationId,
) -> String {
    log::trace!("Rendering location [{id}]");
    let location = store.get(id);
    let directions = Compass::ALL_DIRECTIONS.map(|dir| {
        let label = store
            .exit_destination_name(registry, location.exit(dir))
            .unwrap_or(NO_EXIT);
        (dir, label)
    });

    let svg = render_svg(location.name(), location.description(), &directions);
    let metadata = DocumentMetadata {
        name: lossy(location.name()),
        description: lossy(location.description()),
        attributes: directions
            .iter()
            .map(|(dir, label)| DocumentAttribute {
                trait_type: dir.label().to_string(),
                value: lossy(label),
            })
            .collect(),
        image: format!("{IMAGE_PREFIX}{}", codec::encode(&svg)),
    };
    let json = serde_json::to_string(&metadata)
        .expect("metadata holds only strings and should always serialize");
    format!("{DOCUMENT_PREFIX}{}", codec::encode(json))
}

/// The SVG card, as bytes: description lines are cut on byte offsets and may
/// not be valid UTF-8 on their own.
pub fn render_svg(
    name: &[u8],
    description: &[u8],
    directions: &[(Compass, &[u8]); 4],
) -> Vec<u8> {
    let mut svg = Vec::from(SVG_HEAD);
    let name = if name.is_empty() { NO_NAME } else { name };
    push_text(&mut svg, NAME_Y, &[name]);

    for (i, line) in line_split::split(description).into_iter().enumerate() {
        let line = if line.is_empty() { BLANK_LINE } else { line };
        push_text(&mut svg, DESCRIPTION_Y + LINE_HEIGHT * i as u32, &[line]);
    }
    for (i, &(dir, label)) in directions.iter().enumerate() {
        push_text(
            &mut svg,
            DIRECTIONS_Y + LINE_HEIGHT * i as u32,
            &[dir.label().as_bytes(), &b": "[..], label],
        );
    }
    svg.extend_from_slice(SVG_TAIL.as_bytes());
    svg
}

fn push_text(svg: &mut Vec<u8>, y: u32, parts: &[&[u8]]) {
    svg.extend_from_slice(format!(r#"<text x="10" y="{y}" class="base">"#).as_bytes());
    for part in parts {
        push_escaped(svg, part);
    }
    svg.extend_from_slice(b"</text>");
}

fn push_escaped(svg: &mut Vec<u8>, text: &[u8]) {
    for byte in text {
        match byte {
            b'&' => svg.extend_from_slice(b"&amp;"),
            b'<' => svg.extend_from_slice(b"&lt;"),
            b'>' => svg.extend_from_slice(b"&gt;"),
            b'"' => svg.extend_from_slice(b"&quot;"),
            b'\'' => svg.extend_from_slice(b"&apos;"),
            _ => svg.push(*byte),
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Unwraps a document produced by [`render`] into its metadata and SVG.
pub fn decode_document(uri: &str) -> Result<DecodedDocument, DocumentError> {
    let payload = uri
        .strip_prefix(DOCUMENT_PREFIX)
        .ok_or(DocumentError::MissingPrefix(DOCUMENT_PREFIX))?;
    let metadata: DocumentMetadata = serde_json::from_slice(&codec::decode(payload)?)?;
    let image = metadata
        .image
        .strip_prefix(IMAGE_PREFIX)
        .ok_or(DocumentError::MissingPrefix(IMAGE_PREFIX))?;
    let svg = codec::decode(image)?;
    Ok(DecodedDocument { metadata, svg })
}
