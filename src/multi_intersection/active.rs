use std::cmp::Ordering;

/// An ordered set of segment indices, backed by a plain `Vec` and kept
/// sorted by a caller-supplied comparator rather than a `BTreeSet`: the
/// sweep-line's order (segment y at the current sweep x, tie-broken by
/// slope) depends on mutable external state a static `Ord` impl can't see.
/// Mirrors the `VecSet`/binary-search idiom `geo`'s own sweep-line uses
/// (`algorithm/sweep/vec_set.rs`), adapted to take the comparator
/// explicitly instead of through a trait.
#[derive(Debug, Default, Clone)]
pub struct ActiveSet {
    data: Vec<usize>,
}

impl ActiveSet {
    pub fn new() -> Self {
        ActiveSet { data: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.data.iter().copied()
    }

    /// Inserts `seg` at the position `cmp` says it belongs, assuming `data`
    /// is already ordered under `cmp`.
    pub fn insert_sorted(&mut self, seg: usize, cmp: impl Fn(usize, usize) -> Ordering) {
        let idx = self
            .data
            .partition_point(|&s| cmp(s, seg) == Ordering::Less);
        self.data.insert(idx, seg);
    }

    pub fn remove(&mut self, seg: usize) -> Option<usize> {
        let pos = self.data.iter().position(|&s| s == seg)?;
        self.data.remove(pos);
        Some(pos)
    }

    pub fn position(&self, seg: usize) -> Option<usize> {
        self.data.iter().position(|&s| s == seg)
    }

    pub fn neighbors_at(&self, idx: usize) -> (Option<usize>, Option<usize>) {
        let prev = if idx > 0 { self.data.get(idx - 1).copied() } else { None };
        let next = self.data.get(idx + 1).copied();
        (prev, next)
    }

    /// First index for which `is_before` is false, i.e. where a key would
    /// be inserted to keep `data` sorted under that predicate.
    pub fn split_point(&self, is_before: impl FnMut(usize) -> bool) -> usize {
        self.data.partition_point(is_before)
    }

    pub fn get(&self, idx: usize) -> Option<usize> {
        self.data.get(idx).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_sorted_keeps_order_under_numeric_key() {
        let keys = [3.0, 1.0, 4.0, 1.5];
        let mut set = ActiveSet::new();
        for i in 0..keys.len() {
            set.insert_sorted(i, |a, b| keys[a].partial_cmp(&keys[b]).unwrap());
        }
        let ordered: Vec<f64> = set.iter().map(|i| keys[i]).collect();
        assert_eq!(ordered, vec![1.0, 1.5, 3.0, 4.0]);
    }

    #[test]
    fn neighbors_at_reports_adjacent_entries() {
        let mut set = ActiveSet::new();
        set.insert_sorted(0, |_, _| Ordering::Equal);
        set.insert_sorted(1, |_, _| Ordering::Greater);
        let (prev, next) = set.neighbors_at(0);
        assert_eq!(prev, None);
        assert_eq!(next, Some(1));
    }
}
