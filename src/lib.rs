//! An ordered, key-searchable container built on a skip list.
//!
//! Nodes live in an index-addressed arena, tower heights come from an
//! injected random source, and the head tower carries no key.

mod cmp;
mod error;
mod options;
mod printer;
mod random;
mod skiplist;

#[cfg(test)]
mod datadriven;

pub use cmp::{BitWiseComparator, Comparator, NaturalOrder, Reverse};
pub use error::{Error, Result};
pub use options::{DuplicatePolicy, Options, DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, MAX_LEVEL_LIMIT};
pub use printer::render;
pub use random::{GeometricLevelGenerator, LevelGenerator, RngSource, ScriptedSource, UniformSource};
pub use skiplist::{Iter, SkipList, Towers};
