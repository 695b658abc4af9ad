//! Document annotation: comment injection that preserves original content

pub mod docx;
pub mod writer;

pub use docx::{CommentRef, DocxPackage, Paragraph};
pub use writer::AnnotationWriter;
