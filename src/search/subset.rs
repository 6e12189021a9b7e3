//! Bitmask delivery sets and their canonical subset enumeration.
//!
//! Bit `i` of a [`NodeSet`] stands for the `i`-th delivery of the problem
//! (see [`Problem::deliveries`](crate::models::Problem::deliveries)), so set
//! membership, difference and emptiness are single word operations.

use serde::{Deserialize, Serialize};

/// A set of delivery indices packed into one word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeSet(u64);

impl NodeSet {
    pub const EMPTY: NodeSet = NodeSet(0);

    pub fn from_bits(bits: u64) -> Self {
        NodeSet(bits)
    }

    /// The set `{0, 1, .., n - 1}`.
    pub fn full(n: usize) -> Self {
        debug_assert!(n <= 64);
        if n >= 64 {
            NodeSet(u64::MAX)
        } else {
            NodeSet((1u64 << n) - 1)
        }
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn contains(self, index: usize) -> bool {
        index < 64 && self.0 & (1u64 << index) != 0
    }

    pub fn insert(&mut self, index: usize) {
        self.0 |= 1u64 << index;
    }

    /// Lowest member.
    pub fn first(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    pub fn difference(self, other: NodeSet) -> NodeSet {
        NodeSet(self.0 & !other.0)
    }

    pub fn union(self, other: NodeSet) -> NodeSet {
        NodeSet(self.0 | other.0)
    }

    pub fn is_subset(self, other: NodeSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let i = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(i)
        })
    }
}

impl FromIterator<usize> for NodeSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = NodeSet::EMPTY;
        for i in iter {
            set.insert(i);
        }
        set
    }
}

/// Order in which subset sizes are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsetOrder {
    /// Largest subsets first: single-trip solutions are found early.
    #[default]
    LargestFirst,
    /// Singletons first, then pairs, and so on.
    SmallestFirst,
}

/// Enumerates the non-empty subsets of a set in canonical order.
///
/// Subsets are grouped by size (per [`SubsetOrder`]); within one size they
/// come in lexicographic order of their sorted members. When anchored, only
/// subsets containing the lowest member of the set are produced: every
/// partition of the set is then reachable in exactly one trip order.
///
/// # Examples
///
/// ```
/// use u_fleet::search::{CanonicalSubsets, NodeSet, SubsetOrder};
///
/// let set: NodeSet = [0, 1, 2].into_iter().collect();
/// let subsets: Vec<Vec<usize>> = CanonicalSubsets::new(set, SubsetOrder::SmallestFirst, true)
///     .map(|s| s.iter().collect())
///     .collect();
/// assert_eq!(subsets, vec![vec![0], vec![0, 1], vec![0, 2], vec![0, 1, 2]]);
/// ```
#[derive(Debug, Clone)]
pub struct CanonicalSubsets {
    anchor: Option<usize>,
    pool: Vec<usize>,
    order: SubsetOrder,
    /// Number of pool members drawn in the current size class.
    draw: usize,
    /// Positions into `pool` of the current combination; `None` before the
    /// first combination of a size class.
    combo: Option<Vec<usize>>,
    done: bool,
}

impl CanonicalSubsets {
    pub fn new(set: NodeSet, order: SubsetOrder, anchored: bool) -> Self {
        let mut members: Vec<usize> = set.iter().collect();
        let anchor = if anchored && !members.is_empty() {
            Some(members.remove(0))
        } else {
            None
        };
        let pool_len = members.len();
        // Unanchored subsets must draw at least one member.
        let min_draw = usize::from(anchor.is_none());
        let draw = match order {
            SubsetOrder::LargestFirst => pool_len,
            SubsetOrder::SmallestFirst => min_draw,
        };
        Self {
            anchor,
            pool: members,
            order,
            draw,
            combo: None,
            done: set.is_empty(),
        }
    }

    fn min_draw(&self) -> usize {
        usize::from(self.anchor.is_none())
    }

    /// Moves to the next size class; returns `false` when none is left.
    fn next_size(&mut self) -> bool {
        self.combo = None;
        match self.order {
            SubsetOrder::LargestFirst => {
                if self.draw == self.min_draw() {
                    return false;
                }
                self.draw -= 1;
            }
            SubsetOrder::SmallestFirst => {
                if self.draw == self.pool.len() {
                    return false;
                }
                self.draw += 1;
            }
        }
        true
    }

    /// Advances `combo` to the next lexicographic combination of the size class.
    fn advance(&mut self) -> bool {
        let n = self.pool.len();
        let k = self.draw;
        match self.combo.as_mut() {
            None => {
                self.combo = Some((0..k).collect());
                true
            }
            Some(combo) => {
                let mut i = k;
                while i > 0 {
                    i -= 1;
                    if combo[i] < n - k + i {
                        combo[i] += 1;
                        for j in (i + 1)..k {
                            combo[j] = combo[j - 1] + 1;
                        }
                        return true;
                    }
                }
                false
            }
        }
    }
}

impl Iterator for CanonicalSubsets {
    type Item = NodeSet;

    fn next(&mut self) -> Option<NodeSet> {
        if self.done {
            return None;
        }
        while !self.advance() {
            if !self.next_size() {
                self.done = true;
                return None;
            }
        }
        let mut set = NodeSet::EMPTY;
        if let Some(a) = self.anchor {
            set.insert(a);
        }
        if let Some(combo) = &self.combo {
            for &p in combo {
                set.insert(self.pool[p]);
            }
        }
        Some(set)
    }
}
