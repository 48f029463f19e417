//! Transformer implementations

mod basic;

use crate::domain::ports::{HostTransformer, IngestMode};

pub use basic::{shard_of, BasicTransformer, HOST_PLACEHOLDER};

/// Factory handing out a fresh `BasicTransformer` per build
pub fn basic_factory(_mode: IngestMode) -> Box<dyn HostTransformer> {
    Box::new(BasicTransformer::new())
}
