use std::cmp::Reverse;
use std::collections::VecDeque;

use crate::area::{Instruction, Op};

/// Replays the instructions recorded for one area and returns its content.
///
/// Segments are applied in reverse recording order, which puts the
/// instructions of an ancestor layout before those of the templates that
/// extend it. The sort is stable so instructions recorded in the same
/// segment keep their order.
pub(crate) fn replay(instrs: &[Instruction]) -> String {
    let mut ordered: Vec<&Instruction> = instrs.iter().collect();
    ordered.sort_by_key(|instr| Reverse(instr.segment));

    let mut output: VecDeque<&str> = VecDeque::with_capacity(ordered.len());
    for instr in ordered {
        match (instr.op, instr.content.as_deref()) {
            (Op::Append, Some(s)) => output.push_back(s),
            (Op::Prepend, Some(s)) => output.push_front(s),
            (Op::Replace, content) => {
                output.clear();
                output.extend(content);
            }
            (Op::Append | Op::Prepend, None) => {}
        }
    }

    output.into_iter().collect()
}
