//! Layers: one stage's complete set of live partial paths.
//!
//! Every layer has a single owner. Stage functions take their input layer by
//! value, so it is dropped as soon as the step that reads it returns and at
//! most two layers (the one being read, the one being built) are ever alive.

use std::num::NonZeroUsize;

use crate::key_index::KeyIndex;
use crate::path::PathState;

/// How a layer is consumed downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Read only by full scan (the next Rekey or the GlobalMerge).
    Content,
    /// Read by point lookup on the join key during Extend.
    Join,
}

#[derive(Debug)]
pub struct Layer {
    kind: LayerKind,
    /// Populated positions of every state in this layer.
    depth: usize,
    index: KeyIndex<PathState>,
}

impl Layer {
    pub fn new(kind: LayerKind, depth: usize, k: NonZeroUsize) -> Self {
        Self {
            kind,
            depth,
            index: KeyIndex::new(k),
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn k(&self) -> NonZeroUsize {
        self.index.k()
    }

    pub fn index(&self) -> &KeyIndex<PathState> {
        &self.index
    }

    pub(crate) fn index_mut(&mut self) -> &mut KeyIndex<PathState> {
        &mut self.index
    }

    pub fn into_index(self) -> KeyIndex<PathState> {
        self.index
    }

    pub fn key_count(&self) -> usize {
        self.index.key_count()
    }

    pub fn path_count(&self) -> usize {
        self.index.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
