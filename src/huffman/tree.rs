//! Frequency analysis and Huffman tree construction.
//!
//! The tree lives in an arena: leaves are pushed first in ascending byte
//! order, internal nodes are appended as they are merged, and the root is
//! always the last node. Equal weights pop in arena order, so the same
//! frequency table always yields the same tree.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use crate::error::{Error, Result};

/// Longest code the encoder can pack into a `Code`
pub const MAX_CODE_BITS: u32 = 64;

/// Occurrence count per byte value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte of `data`
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Add `count` occurrences of `symbol`
    pub fn add(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] += count;
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct byte values present
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total number of bytes counted
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols with their counts, in ascending byte order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().enumerate().filter(|(_, &c)| c > 0).map(|(sym, &c)| (sym as u8, c))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// A node in the tree arena
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf { symbol: u8, weight: u64 },
    /// Children are arena indices
    Internal { weight: u64, left: usize, right: usize },
}

impl HuffmanNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// Prefix-code tree built from a `FrequencyTable`
#[derive(Clone, Debug)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
}

impl HuffmanTree {
    /// Build the tree bottom-up from a min-priority queue keyed by weight
    pub fn from_frequencies(freq: &FrequencyTable) -> Result<Self> {
        if freq.is_empty() {
            return Err(Error::EmptyInput);
        }

        let distinct = freq.distinct();
        let mut nodes = Vec::with_capacity(2 * distinct - 1);
        let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::with_capacity(distinct);

        for (symbol, weight) in freq.iter() {
            heap.push(Reverse((weight, nodes.len())));
            nodes.push(HuffmanNode::Leaf { symbol, weight });
        }

        while heap.len() > 1 {
            if let (Some(Reverse((left_weight, left))), Some(Reverse((right_weight, right)))) =
                (heap.pop(), heap.pop())
            {
                let weight = left_weight + right_weight;
                heap.push(Reverse((weight, nodes.len())));
                nodes.push(HuffmanNode::Internal { weight, left, right });
            }
        }

        Ok(Self { nodes })
    }

    /// Arena index of the root (always the last node)
    pub fn root(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn node(&self, index: usize) -> &HuffmanNode {
        &self.nodes[index]
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Only one distinct byte: the root itself is a leaf
    pub fn is_single_leaf(&self) -> bool {
        self.nodes[self.root()].is_leaf()
    }

    /// Follow one edge from `index`; `None` when `index` is a leaf
    #[inline]
    pub fn child(&self, index: usize, bit: bool) -> Option<usize> {
        match self.nodes[index] {
            HuffmanNode::Internal { left, right, .. } => Some(if bit { right } else { left }),
            HuffmanNode::Leaf { .. } => None,
        }
    }

    /// `(symbol, weight, depth)` for every leaf, in depth-first order
    pub fn leaves(&self) -> Vec<(u8, u64, u32)> {
        let mut leaves = Vec::with_capacity(self.nodes.len() / 2 + 1);
        let mut stack = vec![(self.root(), 0u32)];

        while let Some((index, depth)) = stack.pop() {
            match self.nodes[index] {
                HuffmanNode::Leaf { symbol, weight } => leaves.push((symbol, weight, depth)),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
        leaves
    }

    /// Size of the payload this tree produces for the input it was built from
    ///
    /// Returns `None` on overflow.
    pub fn payload_bits(&self) -> Option<u64> {
        self.leaves().iter().try_fold(0u64, |acc, &(_, weight, depth)| {
            acc.checked_add(weight.checked_mul(depth as u64)?)
        })
    }

    /// Derive the code for every leaf ("0" = left, "1" = right)
    pub fn code_table(&self) -> Result<CodeTable> {
        let mut table = CodeTable::new();
        let mut stack = vec![(self.root(), Code::EMPTY)];

        while let Some((index, code)) = stack.pop() {
            match self.nodes[index] {
                HuffmanNode::Leaf { symbol, .. } => table.codes[symbol as usize] = Some(code),
                HuffmanNode::Internal { left, right, .. } => {
                    if code.len as u32 >= MAX_CODE_BITS {
                        return Err(Error::Internal(format!(
                            "Huffman code longer than {} bits",
                            MAX_CODE_BITS
                        )));
                    }
                    stack.push((right, code.push(true)));
                    stack.push((left, code.push(false)));
                }
            }
        }
        Ok(table)
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, index: usize, prefix: &str) -> fmt::Result {
        match self.nodes[index] {
            HuffmanNode::Leaf { symbol, weight } => {
                if symbol.is_ascii_graphic() || symbol == b' ' {
                    writeln!(f, "{}'{}' ({})", prefix, symbol as char, weight)
                } else {
                    writeln!(f, "{}0x{:02x} ({})", prefix, symbol, weight)
                }
            }
            HuffmanNode::Internal { weight, left, right } => {
                writeln!(f, "{}* ({})", prefix, weight)?;
                self.fmt_node(f, left, &format!("{} 0 ", prefix))?;
                self.fmt_node(f, right, &format!("{} 1 ", prefix))
            }
        }
    }
}

impl fmt::Display for HuffmanTree {
    /// One node per line, indented by the bit path from the root
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root(), "")
    }
}

/// A root-to-leaf path, packed MSB-first into the low `len` bits of `bits`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl Code {
    pub const EMPTY: Code = Code { bits: 0, len: 0 };

    fn push(self, bit: bool) -> Code {
        Code { bits: (self.bits << 1) | bit as u64, len: self.len + 1 }
    }

    /// Whether `self` is a prefix of `other`
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len
            && (self.len == 0 || other.bits >> (other.len - self.len) == self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shift in (0..self.len).rev() {
            f.write_str(if (self.bits >> shift) & 1 == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Code per byte value; absent symbols have no code
#[derive(Clone, Debug)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    fn new() -> Self {
        Self { codes: vec![None; 256] }
    }

    #[inline]
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Present symbols with their codes, in ascending byte order
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes.iter().enumerate().filter_map(|(sym, code)| code.map(|c| (sym as u8, c)))
    }

    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
