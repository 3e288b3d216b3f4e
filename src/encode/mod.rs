//! Categorical encoding and feature assembly.
//!
//! [`StringIndexer`] maps each distinct value of one column to an integer
//! index by descending frequency (most frequent value -> index 0), with ties
//! broken by ascending lexicographic order. Indexers are fit once on the full
//! cleaned table, before any train/test split.
//!
//! [`FeatureAssembler`] concatenates indexed categorical columns and raw
//! numerical columns, in a fixed deterministic order, into a feature-major
//! [`Dataset`](crate::data::Dataset).

mod assembler;
mod indexer;

pub use assembler::{AssembleError, FeatureAssembler};
pub use indexer::{IndexerError, StringIndexer};
