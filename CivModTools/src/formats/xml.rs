//! Shared XML plumbing for the descriptor formats
//!
//! Reading goes through a small element tree built from `quick-xml` events;
//! the descriptors are tiny, so each reader can walk the tree by name instead
//! of driving its own event loop. Text is kept as written, apart from
//! line-ending normalization and the indentation between child elements.
//! Writing goes through [`XmlOutput`], which
//! fixes the layout every descriptor shares: two-space indent, a `utf-8`
//! declaration, a UTF-8 BOM, LF line endings and a trailing newline.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Error, Result};
use crate::model::{IssueKind, ReadReport, ValidationIssue};
use crate::utils::canonical_guid;

const BOM: char = '\u{feff}';

/// An element with its attributes, concatenated text and child elements.
///
/// Names are local names; namespace declarations are dropped.
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            if attr.key.as_ref().starts_with(b"xmlns") {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child element named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Every child element named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text of the first child named `name`.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.trim())
    }

    /// Untrimmed text of the first child named `name`, for free-text fields.
    #[must_use]
    pub fn child_verbatim(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    /// Trimmed text of this element.
    #[must_use]
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

/// Read a descriptor file as UTF-8.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8(bytes)?)
}

/// Parse a document into its root element.
///
/// # Errors
/// Returns an error if the XML is malformed or has no root element.
pub fn parse_document(content: &str) -> Result<XmlElement> {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    let mut reader = Reader::from_str(content);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => stack.push(XmlElement::from_start(&e)?),
            Ok(Event::Empty(e)) => {
                let element = XmlElement::from_start(&e)?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Text(e)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape()?.replace("\r\n", "\n"));
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::End(_)) => {
                if let Some(mut element) = stack.pop() {
                    if !element.children.is_empty() && element.text.trim().is_empty() {
                        element.text.clear();
                    }
                    attach(&mut stack, &mut root, element);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| Error::schema("document", "no root element"))
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// Parse a boolean written as `0`/`1`/`true`/`false` (case-insensitive).
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Text of an optional field, `None` when absent or blank.
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Text of an optional free-text field, kept verbatim. `None` when absent or
/// blank.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Collects issues while a reader pulls fields out of a document.
///
/// Required fields that are missing or malformed are recorded and defaulted,
/// so the reader can keep going and report everything in one pass.
#[derive(Debug, Default)]
pub struct FieldReader {
    issues: Vec<ValidationIssue>,
}

impl FieldReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// A required, non-blank string.
    pub fn text(&mut self, value: Option<&str>, field: &str) -> String {
        match non_empty(value) {
            Some(text) => text,
            None => {
                self.push(ValidationIssue::missing(field));
                String::new()
            }
        }
    }

    /// A required free-text field. Surrounding whitespace is kept.
    pub fn verbatim_text(&mut self, value: Option<&str>, field: &str) -> String {
        match non_blank(value) {
            Some(text) => text,
            None => {
                self.push(ValidationIssue::missing(field));
                String::new()
            }
        }
    }

    /// A required boolean.
    pub fn boolean(&mut self, value: Option<&str>, field: &str) -> bool {
        match non_empty(value) {
            Some(raw) => self.parse_flag(&raw, field).unwrap_or(false),
            None => {
                self.push(ValidationIssue::missing(field));
                false
            }
        }
    }

    /// An optional boolean. A present but malformed value is still an issue.
    pub fn optional_boolean(&mut self, value: Option<&str>, field: &str) -> Option<bool> {
        let raw = non_empty(value)?;
        self.parse_flag(&raw, field)
    }

    fn parse_flag(&mut self, raw: &str, field: &str) -> Option<bool> {
        let parsed = parse_bool(raw);
        if parsed.is_none() {
            self.push(ValidationIssue::new(
                IssueKind::InvalidValue,
                field,
                format!("'{raw}' is not a boolean"),
            ));
        }
        parsed
    }

    /// A required GUID, canonicalized. A malformed value is kept verbatim.
    pub fn guid(&mut self, value: Option<&str>, field: &str) -> String {
        match non_empty(value) {
            Some(raw) => self.canonical(raw, field),
            None => {
                self.push(ValidationIssue::missing(field));
                String::new()
            }
        }
    }

    /// An optional GUID, canonicalized.
    pub fn optional_guid(&mut self, value: Option<&str>, field: &str) -> Option<String> {
        non_empty(value).map(|raw| self.canonical(raw, field))
    }

    fn canonical(&mut self, raw: String, field: &str) -> String {
        match canonical_guid(&raw) {
            Some(guid) => guid,
            None => {
                self.push(ValidationIssue::new(
                    IssueKind::InvalidValue,
                    field,
                    format!("'{raw}' is not a GUID"),
                ));
                raw
            }
        }
    }

    pub fn finish<T>(self, value: T) -> ReadReport<T> {
        ReadReport {
            value,
            issues: self.issues,
        }
    }
}

/// Escape only what text content requires.
fn escape_text_minimal(s: &str) -> Cow<'_, str> {
    if s.contains(['&', '<', '>']) {
        Cow::Owned(
            s.replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;"),
        )
    } else {
        Cow::Borrowed(s)
    }
}

/// Render a boolean as `0`/`1`.
#[must_use]
pub fn bool_digit(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Render a boolean as `true`/`false`.
#[must_use]
pub fn bool_word(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Indented writer shared by the descriptor writers.
pub struct XmlOutput {
    writer: Writer<Vec<u8>>,
}

impl XmlOutput {
    /// Start a document with its XML declaration.
    ///
    /// # Errors
    /// Returns an error if the declaration cannot be written.
    pub fn new() -> Result<Self> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        Ok(Self { writer })
    }

    /// Open an element.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn start(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.writer.write_event(Event::Start(element))?;
        Ok(())
    }

    /// Open an element without attributes.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn open(&mut self, name: &str) -> Result<()> {
        self.start(BytesStart::new(name))
    }

    /// Close an element.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write a self-closing element.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn empty(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.writer.write_event(Event::Empty(element))?;
        Ok(())
    }

    /// Write `element` around `text`, self-closing when `text` is empty.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn text_element(&mut self, element: BytesStart<'_>, text: &str) -> Result<()> {
        if text.is_empty() {
            return self.empty(element);
        }
        let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
        self.writer.write_event(Event::Start(element))?;
        let escaped = escape_text_minimal(text);
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(escaped)))?;
        self.end(&name)
    }

    /// Shorthand for a text element without attributes.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn field(&mut self, name: &str, text: &str) -> Result<()> {
        self.text_element(BytesStart::new(name), text)
    }

    /// Write a field only when it has a value.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn optional_field(&mut self, name: &str, text: Option<&str>) -> Result<()> {
        match text {
            Some(text) => self.field(name, text),
            None => Ok(()),
        }
    }

    /// Finish the document: BOM, LF endings, `<x />` spacing, trailing newline.
    ///
    /// # Errors
    /// Returns an error if the output is not valid UTF-8.
    pub fn finish(self) -> Result<String> {
        let xml = String::from_utf8(self.writer.into_inner())?;
        let xml = xml.replace("/>", " />");
        Ok(format!("{BOM}{xml}\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_tree() {
        let xml = "\u{feff}<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
            <Project xmlns=\"http://schemas.microsoft.com/developer/msbuild/2003\">\n\
              <PropertyGroup>\n    <Name>Tom &amp; Jerry</Name>\n    <Empty />\n  </PropertyGroup>\n\
              <ItemGroup><Content Include=\"Lua\\a.lua\" /></ItemGroup>\n\
            </Project>";
        let root = parse_document(xml).unwrap();
        assert_eq!(root.name, "Project");
        assert!(root.attributes.is_empty());

        let group = root.child("PropertyGroup").unwrap();
        assert_eq!(group.child_text("Name"), Some("Tom & Jerry"));
        assert_eq!(group.child_text("Empty"), Some(""));
        assert_eq!(group.child_text("Missing"), None);

        let content = root.child("ItemGroup").unwrap().child("Content").unwrap();
        assert_eq!(content.attr("Include"), Some("Lua\\a.lua"));
        assert_eq!(group.text, "");
    }

    #[test]
    fn test_parse_document_keeps_text_whitespace() {
        let xml = "<Mod>\r\n  <Description>  line1\r\n  line2\r\n</Description>\r\n</Mod>";
        let root = parse_document(xml).unwrap();
        assert_eq!(root.child_verbatim("Description"), Some("  line1\n  line2\n"));
        assert_eq!(root.child_text("Description"), Some("line1\n  line2"));
        assert_eq!(root.text, "");

        let mut fields = FieldReader::new();
        assert_eq!(fields.verbatim_text(Some(" \n "), "Properties/Description"), "");
        assert_eq!(non_blank(Some(" x ")).as_deref(), Some(" x "));
        assert_eq!(fields.finish(()).issues.len(), 1);
    }

    #[test]
    fn test_parse_document_rejects_malformed() {
        assert!(parse_document("<Mod><Properties></Mod>").is_err());
        assert!(parse_document("").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" false "), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn test_field_reader_collects_issues() {
        let mut fields = FieldReader::new();
        assert_eq!(fields.text(Some("  "), "Properties/Teaser"), "");
        assert!(!fields.boolean(Some("maybe"), "Properties/SupportsMac"));
        assert_eq!(fields.optional_boolean(None, "Properties/HideSetupGame"), None);
        assert_eq!(
            fields.guid(Some("0D66D522-B624-4BC5-ACFE-15A0C5B729F4"), "id"),
            "{0d66d522-b624-4bc5-acfe-15a0c5b729f4}"
        );

        let report = fields.finish(());
        let kinds: Vec<(IssueKind, &str)> = report
            .issues
            .iter()
            .map(|i| (i.kind, i.field.as_str()))
            .collect();
        assert_eq!(
            kinds,
            [
                (IssueKind::MissingField, "Properties/Teaser"),
                (IssueKind::InvalidValue, "Properties/SupportsMac"),
            ]
        );
    }

    #[test]
    fn test_output_layout() {
        let mut out = XmlOutput::new().unwrap();
        let mut root = BytesStart::new("Mod");
        root.push_attribute(("title", "A \"quoted\" <name>"));
        out.start(root).unwrap();
        out.field("Name", "Fish & Chips > Pie").unwrap();
        out.field("Homepage", "").unwrap();
        out.end("Mod").unwrap();
        let xml = out.finish().unwrap();

        assert_eq!(
            xml,
            "\u{feff}<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <Mod title=\"A &quot;quoted&quot; &lt;name&gt;\">\n\
             \x20 <Name>Fish &amp; Chips &gt; Pie</Name>\n\
             \x20 <Homepage />\n\
             </Mod>\n"
        );
    }
}
