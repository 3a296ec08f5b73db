//! XML encoding of transforms and registries.
//!
//! A single transform is stored under a `<transform version="1.0">` root, a
//! registry under `<transforms version="1.0">` with a `<referenceID>` child
//! followed by one `<transform>` element per entry:
//!
//! ```xml
//! <transform version="1.0">
//!   <ID>ct</ID>
//!   <name>MR to CT</name>
//!   <size>512 512 120</size>
//!   <spacing>0.7 0.7 2.5</spacing>
//!   <center>0 0 0</center>
//!   <translations>10 0 0</translations>
//!   <matrixrow>1 0 0</matrixrow>
//!   <matrixrow>0 1 0</matrixrow>
//!   <matrixrow>0 0 1</matrixrow>
//! </transform>
//! ```
//!
//! A displacement field transform carries an extra `<displacementfield>`
//! element holding the field's file name. Floats are written with the
//! shortest representation that parses back to the same bits, so a decoded
//! document reproduces the encoded values exactly.

use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use nalgebra::Matrix3;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use voxreg_core::{AffineTransform, DisplacementField, Point3, Spacing3, Transform, Vector3};
use voxreg_registration::TransformRegistry;
use crate::error::{DocumentError, Result};

/// Version written to, and required from, every document root.
pub const DOCUMENT_VERSION: &str = "1.0";

const VERSION: &str = "version";
const REGISTRY_ROOT: &str = "transforms";
const TRANSFORM: &str = "transform";
const REFERENCE_ID: &str = "referenceID";
const ID: &str = "ID";
const NAME: &str = "name";
const SIZE: &str = "size";
const SPACING: &str = "spacing";
const CENTER: &str = "center";
const TRANSLATIONS: &str = "translations";
const MATRIX_ROW: &str = "matrixrow";
const DISPLACEMENT_FIELD: &str = "displacementfield";

/// Encode a single transform document.
pub fn transform_to_string(transform: &Transform) -> Result<String> {
    let mut writer = document_writer()?;
    write_transform_element(&mut writer, transform, true)?;
    finish(writer)
}

/// Encode a registry document.
pub fn registry_to_string(registry: &TransformRegistry) -> Result<String> {
    let mut writer = document_writer()?;
    let mut root = BytesStart::new(REGISTRY_ROOT);
    root.push_attribute((VERSION, DOCUMENT_VERSION));
    writer.write_event(Event::Start(root))?;
    write_text_element(&mut writer, REFERENCE_ID, registry.reference_space_id())?;
    for transform in registry.transforms() {
        write_transform_element(&mut writer, transform, false)?;
    }
    writer.write_event(Event::End(BytesEnd::new(REGISTRY_ROOT)))?;
    finish(writer)
}

/// Decode a single transform document.
pub fn transform_from_str(xml: &str) -> Result<Transform> {
    let root = parse(xml)?;
    check_root(&root, TRANSFORM)?;
    decode_transform(&root)
}

/// Decode a registry document. When two entries share a target space the
/// later one wins.
pub fn registry_from_str(xml: &str) -> Result<TransformRegistry> {
    let root = parse(xml)?;
    check_root(&root, REGISTRY_ROOT)?;

    let reference = root.required_child(REFERENCE_ID)?;
    let mut registry = TransformRegistry::new(reference.text.as_str());
    for element in root.children.iter().filter(|c| c.name == TRANSFORM) {
        let transform = decode_transform(element)?;
        if registry.contains(transform.target_space_id()) {
            tracing::warn!(
                reference = %registry.reference_space_id(),
                key = %transform.target_space_id(),
                "duplicate registry entry, keeping the last one"
            );
        }
        registry.append(transform, true);
    }
    Ok(registry)
}

pub fn read_transform<P: AsRef<Path>>(path: P) -> Result<Transform> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading transform");
    transform_from_str(&fs::read_to_string(path)?)
}

pub fn write_transform<P: AsRef<Path>>(path: P, transform: &Transform) -> Result<()> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "writing transform");
    fs::write(path, transform_to_string(transform)?)?;
    Ok(())
}

pub fn read_registry<P: AsRef<Path>>(path: P) -> Result<TransformRegistry> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading registry");
    registry_from_str(&fs::read_to_string(path)?)
}

pub fn write_registry<P: AsRef<Path>>(path: P, registry: &TransformRegistry) -> Result<()> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), entries = registry.len(), "writing registry");
    fs::write(path, registry_to_string(registry)?)?;
    Ok(())
}

// Encoding

fn document_writer() -> Result<Writer<Vec<u8>>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(writer)
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| DocumentError::malformed(e.to_string()))
}

fn write_transform_element<W: Write>(
    writer: &mut Writer<W>,
    transform: &Transform,
    versioned: bool,
) -> Result<()> {
    let mut start = BytesStart::new(TRANSFORM);
    if versioned {
        start.push_attribute((VERSION, DOCUMENT_VERSION));
    }
    writer.write_event(Event::Start(start))?;

    write_text_element(writer, ID, transform.target_space_id())?;
    write_text_element(writer, NAME, transform.name())?;
    write_text_element(writer, SIZE, &join(&transform.size()))?;
    write_text_element(writer, SPACING, &join(&transform.spacing().to_array()))?;
    write_text_element(writer, CENTER, &join(&transform.center().to_array()))?;
    write_text_element(writer, TRANSLATIONS, &join(&transform.translations().to_array()))?;
    for row in transform.matrix_flat().chunks(3) {
        write_text_element(writer, MATRIX_ROW, &join(row))?;
    }
    if let Some(field) = transform.displacement_field() {
        write_text_element(writer, DISPLACEMENT_FIELD, field.file_name())?;
    }

    writer.write_event(Event::End(BytesEnd::new(TRANSFORM)))?;
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Space separated values; `f64` uses Rust's shortest round-trip formatting.
fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// Decoding

/// Minimal element tree; documents are small.
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            ..Self::default()
        })
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn required_child(&self, name: &str) -> Result<&Element> {
        self.child(name).ok_or_else(|| {
            DocumentError::malformed(format!("<{}> has no <{}> element", self.name, name))
        })
    }
}

/// Text is kept verbatim: ids and names may carry significant whitespace.
/// Numeric elements are split on whitespace when decoded.
fn parse(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);

    let mut open: Vec<Element> = Vec::new();
    loop {
        let closed = match reader.read_event()? {
            Event::Start(start) => {
                open.push(Element::open(&start)?);
                continue;
            }
            Event::Empty(start) => Element::open(&start)?,
            Event::Text(text) => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
                continue;
            }
            Event::CData(data) => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
                continue;
            }
            Event::End(_) => open
                .pop()
                .ok_or_else(|| DocumentError::malformed("unbalanced closing tag"))?,
            Event::Eof => return Err(DocumentError::malformed("document has no root element")),
            _ => continue,
        };
        match open.last_mut() {
            Some(parent) => parent.children.push(closed),
            None => {
                expect_end(&mut reader)?;
                return Ok(closed);
            }
        }
    }
}

/// Only whitespace, comments and processing instructions may follow the root.
fn expect_end(reader: &mut Reader<&[u8]>) -> Result<()> {
    loop {
        match reader.read_event()? {
            Event::Eof => return Ok(()),
            Event::Start(start) | Event::Empty(start) => {
                return Err(DocumentError::malformed(format!(
                    "unexpected <{}> after the root element",
                    String::from_utf8_lossy(start.name().as_ref())
                )))
            }
            Event::Text(text) => {
                if !text.unescape()?.trim().is_empty() {
                    return Err(DocumentError::malformed("text after the root element"));
                }
            }
            Event::CData(_) => {
                return Err(DocumentError::malformed("text after the root element"))
            }
            _ => {}
        }
    }
}

fn check_root(root: &Element, expected: &str) -> Result<()> {
    if root.name != expected {
        return Err(DocumentError::malformed(format!(
            "expected root <{}>, found <{}>",
            expected, root.name
        )));
    }
    match root.attribute(VERSION) {
        Some(DOCUMENT_VERSION) => Ok(()),
        Some(other) => Err(DocumentError::malformed(format!(
            "unsupported document version '{}'",
            other
        ))),
        None => Err(DocumentError::malformed(format!(
            "<{}> has no version attribute",
            root.name
        ))),
    }
}

fn decode_transform(element: &Element) -> Result<Transform> {
    let id = element.required_child(ID)?.text.as_str();
    let name = element.child(NAME).map_or("", |e| e.text.as_str());
    let size = optional_values::<usize, 3>(element, SIZE)?.unwrap_or([0; 3]);
    let spacing = optional_values::<f64, 3>(element, SPACING)?.unwrap_or([1.0; 3]);

    let field = element
        .child(DISPLACEMENT_FIELD)
        .map(|e| e.text.as_str())
        .filter(|file| !file.trim().is_empty());

    let transform = match field {
        Some(file) => Transform::from_displacement_field(id, DisplacementField::new(file)),
        None => Transform::from_affine(id, decode_affine(element)?),
    };
    Ok(transform
        .with_name(name)
        .with_geometry(size, Spacing3::new(spacing)))
}

fn decode_affine(element: &Element) -> Result<AffineTransform> {
    let rows: Vec<&Element> = element
        .children
        .iter()
        .filter(|c| c.name == MATRIX_ROW)
        .collect();
    if rows.len() != 3 {
        return Err(DocumentError::malformed(format!(
            "expected 3 <{}> elements, found {}",
            MATRIX_ROW,
            rows.len()
        )));
    }
    let mut flat = [0.0; 9];
    for (i, row) in rows.into_iter().enumerate() {
        flat[i * 3..i * 3 + 3].copy_from_slice(&parse_values::<f64, 3>(row)?);
    }

    let center = optional_values::<f64, 3>(element, CENTER)?.unwrap_or([0.0; 3]);
    let translation = optional_values::<f64, 3>(element, TRANSLATIONS)?.unwrap_or([0.0; 3]);
    Ok(AffineTransform::new(
        Matrix3::from_row_slice(&flat),
        Vector3::new(translation),
        Point3::new(center),
    ))
}

fn optional_values<T, const N: usize>(element: &Element, name: &str) -> Result<Option<[T; N]>>
where
    T: FromStr + Copy + Default,
{
    element.child(name).map(parse_values::<T, N>).transpose()
}

fn parse_values<T, const N: usize>(element: &Element) -> Result<[T; N]>
where
    T: FromStr + Copy + Default,
{
    let mut values = [T::default(); N];
    let mut tokens = element.text.split_whitespace();
    for value in values.iter_mut() {
        let token = tokens.next().ok_or_else(|| {
            DocumentError::malformed(format!("<{}> needs {} values", element.name, N))
        })?;
        *value = token.parse().map_err(|_| {
            DocumentError::malformed(format!("<{}>: cannot parse '{}'", element.name, token))
        })?;
    }
    if tokens.next().is_some() {
        return Err(DocumentError::malformed(format!(
            "<{}> has more than {} values",
            element.name, N
        )));
    }
    Ok(values)
}
