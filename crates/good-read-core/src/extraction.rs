//! Turn a book's text blocks into one flat list of chunks.

use crate::config::ServiceConfig;
use crate::segmenter::{ChunkLimit, LimitError, segment};
use crate::source::{DocumentError, DocumentSource, TextBlock};
use std::num::NonZeroUsize;
use tracing::{debug, info};

pub type Chunk = String;

pub const DEFAULT_CHUNK_LIMIT: ChunkLimit = const_limit(5000);
pub const DEFAULT_PROBE_LIMIT: ChunkLimit = const_limit(1000);

const fn const_limit(n: usize) -> ChunkLimit {
    match NonZeroUsize::new(n) {
        Some(n) => ChunkLimit::new(n),
        None => panic!("chunk limit constants must be non-zero"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extractor {
    chunk_limit: ChunkLimit,
    probe_limit: Option<ChunkLimit>,
}

impl Default for Extractor {
    fn default() -> Self {
        Extractor {
            chunk_limit: DEFAULT_CHUNK_LIMIT,
            probe_limit: Some(DEFAULT_PROBE_LIMIT),
        }
    }
}

impl Extractor {
    /// An extractor with no probe pass.
    pub fn new(chunk_limit: ChunkLimit) -> Self {
        Extractor {
            chunk_limit,
            probe_limit: None,
        }
    }

    pub fn with_probe(mut self, probe_limit: Option<ChunkLimit>) -> Self {
        self.probe_limit = probe_limit;
        self
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, LimitError> {
        let chunk_limit = ChunkLimit::from_raw("chunk_limit", config.chunk_limit)?;
        let probe_limit = match (config.probe_enabled, config.probe_limit) {
            (true, Some(raw)) => Some(ChunkLimit::from_raw("probe_limit", raw)?),
            _ => None,
        };
        Ok(Extractor {
            chunk_limit,
            probe_limit,
        })
    }

    pub fn chunk_limit(&self) -> ChunkLimit {
        self.chunk_limit
    }

    pub fn probe_limit(&self) -> Option<ChunkLimit> {
        self.probe_limit
    }

    /// Segment every block with the chunk limit and concatenate the results.
    ///
    /// When a probe limit is set each block is also segmented with it, but
    /// only the resulting count is reported (at debug level).
    pub fn extract(&self, blocks: &[TextBlock]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for (idx, block) in blocks.iter().enumerate() {
            if let Some(probe) = self.probe_limit {
                let probe_chunks = segment(block.as_str(), probe).len();
                debug!(block = idx, probe_chunks, probe_limit = %probe, "Probed block");
            }
            let produced = segment(block.as_str(), self.chunk_limit);
            debug!(block = idx, chunks = produced.len(), "Segmented block");
            chunks.extend(produced);
        }
        chunks
    }
}

/// Load one book through `source` and chunk it.
pub fn read_book(
    source: &dyn DocumentSource,
    extractor: &Extractor,
    book: &str,
) -> Result<Vec<Chunk>, DocumentError> {
    let blocks = source.load_blocks(book)?;
    let chunks = extractor.extract(&blocks);
    info!(
        book,
        blocks = blocks.len(),
        chunks = chunks.len(),
        chunk_limit = %extractor.chunk_limit,
        "Extracted book"
    );
    Ok(chunks)
}
