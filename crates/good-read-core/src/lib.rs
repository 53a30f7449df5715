//! Core of the good-read service: load a book, split it into bounded chunks.
//!
//! The HTTP binary is a thin layer over [`extraction::read_book`]; everything
//! here is synchronous and holds no shared state.

pub mod config;
pub mod epub_loader;
pub mod extraction;
pub mod segmenter;
pub mod source;

pub use epub_loader::EpubLibrary;
pub use extraction::{Chunk, Extractor, read_book};
pub use segmenter::{ChunkLimit, LimitError, segment, segment_with};
pub use source::{DocumentError, DocumentSource, TextBlock};
