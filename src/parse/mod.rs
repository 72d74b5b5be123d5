pub mod note_parser;
pub mod note_serializer;

pub use note_parser::{heading_text, parse_note, tag_from_word};
pub use note_serializer::serialize_note;
