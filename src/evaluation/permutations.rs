//! Lazy lexicographic permutation generator.
//!
//! Orderings are produced in place, one at a time, so enumeration needs no
//! memory beyond the item buffer and can stop at any point.

/// Rearranges `items` into the next lexicographically greater permutation.
///
/// Returns `false` (leaving `items` sorted ascending) once the last
/// permutation has been passed.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        items.reverse();
        return false;
    }
    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

/// Restartable generator over all orderings of a set of items.
///
/// The first ordering is the ascending sort; subsequent orderings follow in
/// lexicographic order. [`Permutations::next_ordering`] lends each ordering
/// without allocation; the [`Iterator`] impl clones it.
///
/// # Examples
///
/// ```
/// use u_fleet::evaluation::Permutations;
///
/// let all: Vec<Vec<u8>> = Permutations::new(vec![3, 1, 2]).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![1, 2, 3]);
/// assert_eq!(all[1], vec![1, 3, 2]);
/// assert_eq!(all[5], vec![3, 2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    items: Vec<T>,
    started: bool,
    done: bool,
}

impl<T: Ord> Permutations<T> {
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort();
        Self {
            items,
            started: false,
            done: false,
        }
    }

    /// Advances to the next ordering and lends it.
    pub fn next_ordering(&mut self) -> Option<&[T]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if !next_permutation(&mut self.items) {
            self.done = true;
            return None;
        }
        Some(&self.items)
    }

    /// Rewinds to the first ordering.
    pub fn reset(&mut self) {
        self.items.sort();
        self.started = false;
        self.done = false;
    }
}

impl<T: Ord + Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        self.next_ordering().map(|o| o.to_vec())
    }
}
