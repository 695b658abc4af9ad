//! Typed access to a DOCX package for comment insertion
//!
//! `DocxPackage` opens the zip container, locates every paragraph in
//! `word/document.xml` (byte span plus visible text), and supports adding
//! Word comments anchored to a paragraph. All untouched parts are written
//! back byte-for-byte, and comment markers are spliced into the paragraph
//! XML without altering any run, so the original content survives exactly.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};

const DOCUMENT_PART: &str = "word/document.xml";
const COMMENTS_PART: &str = "word/comments.xml";
const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

const COMMENTS_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments";
const COMMENTS_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.comments+xml";

const EMPTY_COMMENTS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:comments xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    "</w:comments>",
);

/// One paragraph of the document body, in document order
#[derive(Debug, Clone)]
pub struct Paragraph {
    pub index: usize,
    /// Concatenated run text
    pub text: String,
    span: ParagraphSpan,
}

#[derive(Debug, Clone, Copy)]
struct ParagraphSpan {
    /// Byte offset of `<w:p ...>` in document.xml
    start: usize,
    /// Byte offset just past the opening tag's `>`
    open_end: usize,
    /// Byte offset of the closing `</w:p>` tag
    close_start: usize,
    /// Byte offset just past the closing tag
    end: usize,
    /// `<w:p/>` with no children
    self_closing: bool,
}

/// An existing comment in the package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRef {
    pub id: u32,
    pub text: String,
}

/// A DOCX container opened for comment annotation
#[derive(Debug)]
pub struct DocxPackage {
    source_name: String,
    /// Every part in original archive order; document.xml and comments.xml
    /// are served from the fields below at save time
    parts: Vec<(String, Vec<u8>)>,
    document_xml: String,
    comments_xml: String,
    had_comments_part: bool,
    paragraphs: Vec<Paragraph>,
    next_id: u32,
    /// (paragraph index, comment id) pairs awaiting marker insertion
    pending: Vec<(usize, u32)>,
}

impl DocxPackage {
    /// Open a package from disk
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| Error::malformed(path.display().to_string(), e.to_string()))?;
        Self::from_bytes(&path.display().to_string(), &bytes)
    }

    /// Open a package from raw bytes
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| Error::malformed(name, e.to_string()))?;

        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| Error::malformed(name, e.to_string()))?;
            if file.is_dir() {
                continue;
            }
            let mut contents = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut contents)
                .map_err(|e| Error::malformed(name, e.to_string()))?;
            parts.push((file.name().to_string(), contents));
        }

        let document_xml = parts
            .iter()
            .find(|(part_name, _)| part_name == DOCUMENT_PART)
            .map(|(_, bytes)| String::from_utf8_lossy(bytes).into_owned())
            .ok_or_else(|| Error::malformed(name, "no word/document.xml part"))?;

        let (comments_xml, had_comments_part) = match parts
            .iter()
            .find(|(part_name, _)| part_name == COMMENTS_PART)
        {
            Some((_, bytes)) => (String::from_utf8_lossy(bytes).into_owned(), true),
            None => (EMPTY_COMMENTS_XML.to_string(), false),
        };

        let paragraphs = parse_paragraphs(name, &document_xml)?;
        let next_id = max_comment_id(&comments_xml).map(|id| id + 1).unwrap_or(0);

        Ok(Self {
            source_name: name.to_string(),
            parts,
            document_xml,
            comments_xml,
            had_comments_part,
            paragraphs,
            next_id,
            pending: Vec::new(),
        })
    }

    /// Paragraphs in document order
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Non-empty paragraph texts joined with newlines
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .filter(|t| !t.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Existing plus pending comments
    pub fn comments(&self) -> Vec<CommentRef> {
        list_comments(&self.comments_xml)
    }

    /// The id the next added comment will receive
    pub fn next_comment_id(&self) -> u32 {
        self.next_id
    }

    /// Add a comment anchored to one paragraph; returns the allocated id
    ///
    /// The comment body may span multiple lines; each line becomes one
    /// paragraph of the comment.
    pub fn add_comment(
        &mut self,
        paragraph_index: usize,
        body: &str,
        author: &str,
        initials: &str,
    ) -> Result<u32> {
        if paragraph_index >= self.paragraphs.len() {
            return Err(Error::malformed(
                &self.source_name,
                format!("no paragraph at index {paragraph_index}"),
            ));
        }

        let id = self.next_id;
        self.next_id += 1;

        let date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let mut comment = format!(
            r#"<w:comment w:id="{id}" w:author="{}" w:initials="{}" w:date="{date}">"#,
            escape(author),
            escape(initials),
        );
        for line in body.split('\n') {
            comment.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
            comment.push_str(&escape(line));
            comment.push_str("</w:t></w:r></w:p>");
        }
        comment.push_str("</w:comment>");

        let insert_at = self
            .comments_xml
            .rfind("</w:comments>")
            .ok_or_else(|| Error::malformed(&self.source_name, "comments part has no root"))?;
        self.comments_xml.insert_str(insert_at, &comment);

        self.pending.push((paragraph_index, id));
        Ok(id)
    }

    /// Serialize the annotated package
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let document_xml = self.spliced_document_xml();
        let needs_comment_part = !self.had_comments_part && !self.pending.is_empty();

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        let mut wrote_comments = false;
        for (part_name, bytes) in &self.parts {
            writer
                .start_file(part_name.as_str(), options)
                .map_err(|e| Error::malformed(&self.source_name, e.to_string()))?;

            let out: Vec<u8> = match part_name.as_str() {
                DOCUMENT_PART => document_xml.clone().into_bytes(),
                COMMENTS_PART => {
                    wrote_comments = true;
                    self.comments_xml.clone().into_bytes()
                }
                CONTENT_TYPES_PART if needs_comment_part => {
                    add_comments_content_type(&String::from_utf8_lossy(bytes)).into_bytes()
                }
                DOCUMENT_RELS_PART if needs_comment_part => {
                    add_comments_relationship(&String::from_utf8_lossy(bytes)).into_bytes()
                }
                _ => bytes.clone(),
            };
            writer
                .write_all(&out)
                .map_err(|e| Error::malformed(&self.source_name, e.to_string()))?;
        }

        if needs_comment_part && !wrote_comments {
            writer
                .start_file(COMMENTS_PART, options)
                .map_err(|e| Error::malformed(&self.source_name, e.to_string()))?;
            writer
                .write_all(self.comments_xml.as_bytes())
                .map_err(|e| Error::malformed(&self.source_name, e.to_string()))?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| Error::malformed(&self.source_name, e.to_string()))?;
        Ok(cursor.into_inner())
    }

    /// Write the annotated package to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Rebuild document.xml with comment markers spliced into anchors
    fn spliced_document_xml(&self) -> String {
        if self.pending.is_empty() {
            return self.document_xml.clone();
        }

        // One edit list entry per anchored paragraph, in span order.
        enum Edit {
            Insert { at: usize, text: String },
            Replace { from: usize, to: usize, text: String },
        }

        let mut edits: Vec<Edit> = Vec::new();
        for paragraph in &self.paragraphs {
            let ids: Vec<u32> = self
                .pending
                .iter()
                .filter(|(index, _)| *index == paragraph.index)
                .map(|(_, id)| *id)
                .collect();
            if ids.is_empty() {
                continue;
            }

            let starts: String = ids
                .iter()
                .map(|id| format!(r#"<w:commentRangeStart w:id="{id}"/>"#))
                .collect();
            let ends: String = ids
                .iter()
                .map(|id| {
                    format!(
                        r#"<w:commentRangeEnd w:id="{id}"/><w:r><w:commentReference w:id="{id}"/></w:r>"#
                    )
                })
                .collect();

            let span = paragraph.span;
            if span.self_closing {
                let tag = &self.document_xml[span.start..span.end];
                let opened = format!("{}>", tag.trim_end_matches('>').trim_end_matches('/'));
                edits.push(Edit::Replace {
                    from: span.start,
                    to: span.end,
                    text: format!("{opened}{starts}{ends}</w:p>"),
                });
            } else {
                edits.push(Edit::Insert {
                    at: span.open_end,
                    text: starts,
                });
                edits.push(Edit::Insert {
                    at: span.close_start,
                    text: ends,
                });
            }
        }

        let mut out = String::with_capacity(self.document_xml.len() + 256 * edits.len());
        let mut cursor = 0usize;
        for edit in &edits {
            match edit {
                Edit::Insert { at, text } => {
                    out.push_str(&self.document_xml[cursor..*at]);
                    out.push_str(text);
                    cursor = *at;
                }
                Edit::Replace { from, to, text } => {
                    out.push_str(&self.document_xml[cursor..*from]);
                    out.push_str(text);
                    cursor = *to;
                }
            }
        }
        out.push_str(&self.document_xml[cursor..]);
        out
    }
}

/// Locate every `w:p` element and capture its span and run text
fn parse_paragraphs(name: &str, document_xml: &str) -> Result<Vec<Paragraph>> {
    let mut reader = Reader::from_str(document_xml);
    let mut paragraphs = Vec::new();

    let mut current: Option<(usize, usize, String)> = None; // (start, open_end, text)
    let mut in_text_run = false;
    let mut pos = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::malformed(name, e.to_string()))?;
        let event_end = reader.buffer_position() as usize;

        match event {
            Event::Start(ref e) if e.name().as_ref() == b"w:p" => {
                current = Some((pos, event_end, String::new()));
            }
            Event::End(ref e) if e.name().as_ref() == b"w:p" => {
                if let Some((start, open_end, text)) = current.take() {
                    paragraphs.push(Paragraph {
                        index: paragraphs.len(),
                        text,
                        span: ParagraphSpan {
                            start,
                            open_end,
                            close_start: pos,
                            end: event_end,
                            self_closing: false,
                        },
                    });
                }
            }
            Event::Empty(ref e) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(Paragraph {
                    index: paragraphs.len(),
                    text: String::new(),
                    span: ParagraphSpan {
                        start: pos,
                        open_end: event_end,
                        close_start: event_end,
                        end: event_end,
                        self_closing: true,
                    },
                });
            }
            Event::Start(ref e) if e.name().as_ref() == b"w:t" => {
                in_text_run = true;
            }
            Event::End(ref e) if e.name().as_ref() == b"w:t" => {
                in_text_run = false;
            }
            Event::Text(ref e) if in_text_run => {
                if let Some((_, _, text)) = current.as_mut() {
                    let piece = e
                        .unescape()
                        .map_err(|err| Error::malformed(name, err.to_string()))?;
                    text.push_str(&piece);
                }
            }
            Event::Eof => break,
            _ => {}
        }

        pos = event_end;
    }

    Ok(paragraphs)
}

/// Highest `w:id` among existing comments, if any
fn max_comment_id(comments_xml: &str) -> Option<u32> {
    let mut reader = Reader::from_str(comments_xml);
    let mut max_id = None;

    while let Ok(event) = reader.read_event() {
        match event {
            Event::Start(ref e) | Event::Empty(ref e) if e.name().as_ref() == b"w:comment" => {
                let id = e
                    .try_get_attribute("w:id")
                    .ok()
                    .flatten()
                    .and_then(|attr| String::from_utf8_lossy(&attr.value).parse::<u32>().ok());
                if let Some(id) = id {
                    max_id = Some(max_id.map_or(id, |m: u32| m.max(id)));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    max_id
}

/// Existing comments with their concatenated text
fn list_comments(comments_xml: &str) -> Vec<CommentRef> {
    let mut reader = Reader::from_str(comments_xml);
    let mut comments = Vec::new();
    let mut current: Option<CommentRef> = None;
    let mut in_text = false;

    while let Ok(event) = reader.read_event() {
        match event {
            Event::Start(ref e) if e.name().as_ref() == b"w:comment" => {
                let id = e
                    .try_get_attribute("w:id")
                    .ok()
                    .flatten()
                    .and_then(|attr| String::from_utf8_lossy(&attr.value).parse::<u32>().ok())
                    .unwrap_or(0);
                current = Some(CommentRef {
                    id,
                    text: String::new(),
                });
            }
            Event::End(ref e) if e.name().as_ref() == b"w:comment" => {
                if let Some(comment) = current.take() {
                    comments.push(comment);
                }
            }
            Event::Start(ref e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(ref e) if e.name().as_ref() == b"w:t" => in_text = false,
            Event::Text(ref e) if in_text => {
                if let (Some(comment), Ok(piece)) = (current.as_mut(), e.unescape()) {
                    comment.text.push_str(&piece);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    comments
}

/// Register the comments content type in `[Content_Types].xml`
fn add_comments_content_type(content_types: &str) -> String {
    if content_types.contains(COMMENTS_CONTENT_TYPE) {
        return content_types.to_string();
    }
    let override_tag = format!(
        r#"<Override PartName="/{COMMENTS_PART}" ContentType="{COMMENTS_CONTENT_TYPE}"/>"#
    );
    match content_types.rfind("</Types>") {
        Some(at) => {
            let mut out = content_types.to_string();
            out.insert_str(at, &override_tag);
            out
        }
        None => content_types.to_string(),
    }
}

/// Relate document.xml to the new comments part
fn add_comments_relationship(rels: &str) -> String {
    if rels.contains(COMMENTS_REL_TYPE) {
        return rels.to_string();
    }
    let next = next_relationship_id(rels);
    let rel_tag = format!(
        r#"<Relationship Id="rId{next}" Type="{COMMENTS_REL_TYPE}" Target="comments.xml"/>"#
    );
    match rels.rfind("</Relationships>") {
        Some(at) => {
            let mut out = rels.to_string();
            out.insert_str(at, &rel_tag);
            out
        }
        None => rels.to_string(),
    }
}

/// Smallest unused `rId` number
fn next_relationship_id(rels: &str) -> u32 {
    let mut max_id = 0u32;
    let mut rest = rels;
    while let Some(found) = rest.find("Id=\"rId") {
        let tail = &rest[found + 7..];
        let digits: String = tail.chars().take_while(|c| c.is_ascii_digit()).collect();
        if let Ok(id) = digits.parse::<u32>() {
            max_id = max_id.max(id);
        }
        rest = tail;
    }
    max_id + 1
}

/// Minimal but valid package skeleton used by tests as a fixture
#[cfg(test)]
pub fn build_minimal_docx(paragraph_texts: &[&str]) -> Vec<u8> {
    let mut body = String::new();
    for text in paragraph_texts {
        body.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
        body.push_str(&escape(*text));
        body.push_str("</w:t></w:r></w:p>");
    }

    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    );
    let content_types = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        "</Types>",
    );
    let package_rels = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
        "</Relationships>",
    );
    let document_rels = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        "</Relationships>",
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, contents) in [
        (CONTENT_TYPES_PART, content_types.to_string()),
        ("_rels/.rels", package_rels.to_string()),
        (DOCUMENT_PART, document),
        (DOCUMENT_RELS_PART, document_rels.to_string()),
    ] {
        writer.start_file(name, options).expect("zip write");
        writer.write_all(contents.as_bytes()).expect("zip write");
    }

    writer.finish().expect("zip write").into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph_texts(package: &DocxPackage) -> Vec<String> {
        package
            .paragraphs()
            .iter()
            .map(|p| p.text.clone())
            .collect()
    }

    #[test]
    fn parses_paragraphs_in_order() {
        let bytes = build_minimal_docx(&["First paragraph.", "Second paragraph.", "Third."]);
        let package = DocxPackage::from_bytes("test.docx", &bytes).unwrap();

        assert_eq!(
            paragraph_texts(&package),
            vec!["First paragraph.", "Second paragraph.", "Third."]
        );
        assert_eq!(package.paragraphs()[2].index, 2);
        assert_eq!(package.next_comment_id(), 0);
    }

    #[test]
    fn text_skips_empty_paragraphs() {
        let bytes = build_minimal_docx(&["One", "", "Two"]);
        let package = DocxPackage::from_bytes("test.docx", &bytes).unwrap();
        assert_eq!(package.text(), "One\nTwo");
    }

    #[test]
    fn add_comment_preserves_paragraph_text() {
        let bytes = build_minimal_docx(&["Jurisdiction clause here.", "Signature block."]);
        let mut package = DocxPackage::from_bytes("test.docx", &bytes).unwrap();

        let id = package
            .add_comment(0, "Specify ADGM Courts.\nSuggestion: update clause", "Reviewer", "RV")
            .unwrap();
        assert_eq!(id, 0);

        let out = package.to_bytes().unwrap();
        let reopened = DocxPackage::from_bytes("out.docx", &out).unwrap();

        assert_eq!(
            paragraph_texts(&reopened),
            vec!["Jurisdiction clause here.", "Signature block."]
        );
        let comments = reopened.comments();
        assert_eq!(comments.len(), 1);
        assert!(comments[0].text.contains("Specify ADGM Courts."));
    }

    #[test]
    fn comment_ids_increase_across_reopen() {
        let bytes = build_minimal_docx(&["Alpha", "Beta"]);
        let mut package = DocxPackage::from_bytes("test.docx", &bytes).unwrap();
        package.add_comment(0, "first", "Reviewer", "RV").unwrap();
        package.add_comment(1, "second", "Reviewer", "RV").unwrap();
        let round_one = package.to_bytes().unwrap();

        let mut reopened = DocxPackage::from_bytes("round2.docx", &round_one).unwrap();
        assert_eq!(reopened.next_comment_id(), 2);
        let id = reopened.add_comment(0, "third", "Reviewer", "RV").unwrap();
        assert_eq!(id, 2);

        let round_two = reopened.to_bytes().unwrap();
        let comments = DocxPackage::from_bytes("check.docx", &round_two)
            .unwrap()
            .comments();
        let mut ids: Vec<u32> = comments.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn two_comments_share_an_anchor() {
        let bytes = build_minimal_docx(&["Only paragraph."]);
        let mut package = DocxPackage::from_bytes("test.docx", &bytes).unwrap();
        package.add_comment(0, "one", "Reviewer", "RV").unwrap();
        package.add_comment(0, "two", "Reviewer", "RV").unwrap();

        let out = package.to_bytes().unwrap();
        let reopened = DocxPackage::from_bytes("out.docx", &out).unwrap();
        assert_eq!(reopened.comments().len(), 2);
        assert_eq!(paragraph_texts(&reopened), vec!["Only paragraph."]);
    }

    #[test]
    fn comment_body_is_escaped() {
        let bytes = build_minimal_docx(&["Para"]);
        let mut package = DocxPackage::from_bytes("test.docx", &bytes).unwrap();
        package
            .add_comment(0, "uses \"<\" & \">\" safely", "Reviewer", "RV")
            .unwrap();

        let out = package.to_bytes().unwrap();
        let reopened = DocxPackage::from_bytes("out.docx", &out).unwrap();
        assert!(reopened.comments()[0].text.contains("\"<\" & \">\""));
    }

    #[test]
    fn out_of_range_anchor_is_an_error() {
        let bytes = build_minimal_docx(&["Para"]);
        let mut package = DocxPackage::from_bytes("test.docx", &bytes).unwrap();
        let err = package.add_comment(5, "body", "Reviewer", "RV").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { .. }));
    }

    #[test]
    fn non_docx_bytes_are_malformed() {
        let err = DocxPackage::from_bytes("bogus.docx", b"plainly not a zip").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { .. }));
    }

    #[test]
    fn untouched_parts_round_trip_exactly() {
        let bytes = build_minimal_docx(&["Para one", "Para two"]);
        let package = DocxPackage::from_bytes("test.docx", &bytes).unwrap();

        // No comments added: document.xml must come through unchanged.
        let out = package.to_bytes().unwrap();
        let mut original = zip::ZipArchive::new(Cursor::new(&bytes[..])).unwrap();
        let mut rewritten = zip::ZipArchive::new(Cursor::new(&out[..])).unwrap();

        let mut before = String::new();
        original
            .by_name(DOCUMENT_PART)
            .unwrap()
            .read_to_string(&mut before)
            .unwrap();
        let mut after = String::new();
        rewritten
            .by_name(DOCUMENT_PART)
            .unwrap()
            .read_to_string(&mut after)
            .unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn new_comments_part_is_registered() {
        let bytes = build_minimal_docx(&["Para"]);
        let mut package = DocxPackage::from_bytes("test.docx", &bytes).unwrap();
        package.add_comment(0, "note", "Reviewer", "RV").unwrap();

        let out = package.to_bytes().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(&out[..])).unwrap();

        let mut content_types = String::new();
        archive
            .by_name(CONTENT_TYPES_PART)
            .unwrap()
            .read_to_string(&mut content_types)
            .unwrap();
        assert!(content_types.contains(COMMENTS_CONTENT_TYPE));

        let mut rels = String::new();
        archive
            .by_name(DOCUMENT_RELS_PART)
            .unwrap()
            .read_to_string(&mut rels)
            .unwrap();
        assert!(rels.contains(COMMENTS_REL_TYPE));

        let mut document = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();
        assert!(document.contains("<w:commentRangeStart w:id=\"0\"/>"));
        assert!(document.contains("<w:commentReference w:id=\"0\"/>"));
    }
}
