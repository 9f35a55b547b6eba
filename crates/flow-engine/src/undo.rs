//! Undo/redo history using compressed snapshots
//!
//! Whole-graph snapshots instead of a command pattern: every mutation is
//! coverable without inverse operations, and zstd keeps the memory cost
//! of JSON snapshots small.

use std::collections::VecDeque;

use crate::error::{FlowEngineError, Result};
use crate::types::Flow;

const COMPRESSION_LEVEL: i32 = 3;

/// Bounded undo/redo stack of compressed flow snapshots
pub struct UndoStack {
    snapshots: VecDeque<Vec<u8>>,
    current: usize,
    max_snapshots: usize,
}

impl UndoStack {
    /// Create a stack keeping at most `max_snapshots` states
    pub fn new(max_snapshots: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            current: 0,
            max_snapshots: max_snapshots.max(1),
        }
    }

    /// Record a new state, truncating any redo history
    pub fn push(&mut self, flow: &Flow) -> Result<()> {
        let json = serde_json::to_vec(flow)?;
        let compressed = zstd::encode_all(&json[..], COMPRESSION_LEVEL)
            .map_err(|e| FlowEngineError::Compression(e.to_string()))?;

        while self.snapshots.len() > self.current + 1 {
            self.snapshots.pop_back();
        }
        self.snapshots.push_back(compressed);
        self.current = self.snapshots.len() - 1;

        while self.snapshots.len() > self.max_snapshots {
            self.snapshots.pop_front();
            self.current = self.current.saturating_sub(1);
        }
        Ok(())
    }

    /// Step back one state
    pub fn undo(&mut self) -> Option<Result<Flow>> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(self.decode(self.current))
    }

    /// Step forward one state
    pub fn redo(&mut self) -> Option<Result<Flow>> {
        if self.current + 1 >= self.snapshots.len() {
            return None;
        }
        self.current += 1;
        Some(self.decode(self.current))
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    fn decode(&self, index: usize) -> Result<Flow> {
        let json = zstd::decode_all(&self.snapshots[index][..])
            .map_err(|e| FlowEngineError::Compression(e.to_string()))?;
        Ok(serde_json::from_slice(&json)?)
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(100)
    }
}
