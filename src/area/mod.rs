//! The per-render ledger of instructions recorded against named areas.
//!
//! Templates run child first: a view records its `append`, `prepend` and
//! `replace` instructions while its body is captured, and only afterwards
//! does the layout it extends run and declare the area. Recording is split
//! into segments, a new one starting whenever an extended layout starts or
//! finishes rendering. Each instruction is tagged with its segment and
//! [`replay`] reverses the segments to get ancestor first order.

mod replay;

use std::collections::{BTreeMap, BTreeSet};

pub(crate) use crate::area::replay::replay;

/// What an instruction does to the content accumulated so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Append,
    Prepend,
    Replace,
}

/// One recorded content operation against an area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Instruction {
    pub op: Op,
    /// The recording segment, zero for the first template of the render.
    pub segment: usize,
    /// `None` is empty content, which for a replace purges the area.
    pub content: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct Ledger {
    areas: BTreeMap<String, Vec<Instruction>>,
    declared: BTreeSet<String>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str, instr: Instruction) {
        match self.areas.get_mut(name) {
            Some(instrs) => instrs.push(instr),
            None => {
                self.areas.insert(name.to_owned(), vec![instr]);
            }
        }
    }

    /// Returns the instructions recorded for an area in recording order.
    pub fn instructions(&self, name: &str) -> &[Instruction] {
        self.areas.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// Marks an area as rendered, returns `false` if it already was.
    pub fn mark_declared(&mut self, name: &str) -> bool {
        self.declared.insert(name.to_owned())
    }
}
