use crate::error::SegmentTreeError;
use crate::traits::{IdentityOperator, Operator, OwnedSize};

/// Static size array augmented with a binary tree of partial combines.
///
/// Answers "combine every element in `[start, end]`" and applies point updates in `O(log n)`.
///
/// Nodes are packed in pre-order: the subtree of a node covering `[start, end]` occupies a contiguous
/// block of `storage` with the node in its first slot. The left child follows the node directly, the
/// right child follows the whole left subtree. A tree over `n` leaves therefore needs exactly
/// `2n - 1` slots.
///
/// Not synchronised, concurrent `set` and reads on one instance must be serialised by the caller.
#[derive(Clone, Debug)]
pub struct SegmentTree<T, O>
where
    T: Clone,
    O: Operator<T>,
{
    /// Number of leaves
    length: usize,
    /// Neutral element of the operator
    identity: T,
    /// Operator used to combine adjacent ranges
    operator: O,
    /// Packed nodes, `2 * length - 1` entries
    storage: Vec<T>,
}

#[inline]
fn mid(start: usize, end: usize) -> usize {
    start + (end - start) / 2
}

#[inline]
fn left_child(node: usize) -> usize {
    node + 1
}

#[inline]
fn right_child(node: usize, start: usize, mid: usize) -> usize {
    let left_leaves = mid - start + 1;
    let left_nodes = 2 * left_leaves - 1;
    node + left_nodes + 1
}

impl<T, O> SegmentTree<T, O>
where
    T: Clone,
    O: Operator<T>,
{
    /// Build a tree over `values`
    /// # Arguments
    /// * `values` Initial leaf values, must not be empty
    /// * `operator` Associative combine operator
    /// * `identity` Neutral element of `operator`
    pub fn new(values: &[T], operator: O, identity: T) -> Result<Self, SegmentTreeError> {
        if values.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!("rejected segment tree construction from an empty sequence");
            return Err(SegmentTreeError::InvalidArgument {
                reason: "initial values must not be empty",
            });
        }
        let length = values.len();
        let node_count = match length.checked_mul(2) {
            Some(double) => double - 1,
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(length, "rejected segment tree construction, node count overflows");
                return Err(SegmentTreeError::InvalidArgument {
                    reason: "too many initial values, node count overflows usize",
                });
            }
        };
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("build", length, nodes = node_count);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        // Every slot is overwritten by `build`, identity only fills the allocation
        let storage = vec![identity.clone(); node_count];
        let mut tree = SegmentTree {
            length,
            identity,
            operator,
            storage,
        };
        tree.build(values, 0, length - 1, 0);
        Ok(tree)
    }

    fn build(&mut self, values: &[T], start: usize, end: usize, node: usize) {
        if start == end {
            self.storage[node] = values[start].clone();
            return;
        }
        let mid = mid(start, end);
        let left = left_child(node);
        let right = right_child(node, start, mid);
        self.build(values, start, mid, left);
        self.build(values, mid + 1, end, right);
        self.storage[node] = self.combine_children(left, right);
    }

    fn combine_children(&self, left: usize, right: usize) -> T {
        self.operator
            .apply(self.storage[left].clone(), self.storage[right].clone())
    }

    fn check_index(&self, index: usize) -> Result<(), SegmentTreeError> {
        if index >= self.length {
            #[cfg(feature = "tracing")]
            tracing::debug!(index, length = self.length, "index out of range");
            return Err(SegmentTreeError::IndexOutOfRange {
                index,
                length: self.length,
            });
        }
        Ok(())
    }

    /// Current value of the leaf at `index`
    pub fn get(&self, index: usize) -> Result<T, SegmentTreeError> {
        self.check_index(index)?;
        Ok(self.query_range(index, index))
    }

    /// Overwrite the leaf at `index` and recompute its ancestors.
    /// Out of range indices are rejected before anything is touched.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), SegmentTreeError> {
        self.check_index(index)?;
        #[cfg(feature = "tracing")]
        tracing::trace!(index, "point update");
        self.set_node(index, value, 0, self.length - 1, 0);
        Ok(())
    }

    fn set_node(&mut self, index: usize, value: T, start: usize, end: usize, node: usize) {
        if start == end {
            self.storage[node] = value;
            return;
        }
        let mid = mid(start, end);
        let left = left_child(node);
        let right = right_child(node, start, mid);
        if index <= mid {
            self.set_node(index, value, start, mid, left);
        } else {
            self.set_node(index, value, mid + 1, end, right);
        }
        self.storage[node] = self.combine_children(left, right);
    }

    /// Combine every element with index in `[start, end]`, left to right.
    ///
    /// Indices outside `0..size()` contribute nothing, so a range that misses the tree entirely, or
    /// has `start > end`, returns the identity.
    pub fn query_range(&self, start: usize, end: usize) -> T {
        self.query_node(start, end, 0, self.length - 1, 0)
    }

    fn query_node(
        &self,
        query_start: usize,
        query_end: usize,
        start: usize,
        end: usize,
        node: usize,
    ) -> T {
        if query_start <= start && end <= query_end {
            return self.storage[node].clone();
        }
        if query_start > end || start > query_end {
            return self.identity.clone();
        }
        let mid = mid(start, end);
        let left = self.query_node(query_start, query_end, start, mid, left_child(node));
        let right = self.query_node(
            query_start,
            query_end,
            mid + 1,
            end,
            right_child(node, start, mid),
        );
        self.operator.apply(left, right)
    }

    /// Number of leaves
    pub fn size(&self) -> usize {
        self.length
    }

    pub fn identity(&self) -> T {
        self.identity.clone()
    }

    /// Number of slots in the backing store, always `2 * size() - 1`
    pub fn node_count(&self) -> usize {
        self.storage.len()
    }

    /// Combine of every element, read from the root
    pub fn total(&self) -> T {
        self.storage[0].clone()
    }

    /// Current leaf values in index order
    pub fn leaves(&self) -> Vec<T> {
        let mut leaves = Vec::with_capacity(self.length);
        self.collect_leaves(0, self.length - 1, 0, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, start: usize, end: usize, node: usize, leaves: &mut Vec<T>) {
        if start == end {
            leaves.push(self.storage[node].clone());
            return;
        }
        let mid = mid(start, end);
        self.collect_leaves(start, mid, left_child(node), leaves);
        self.collect_leaves(mid + 1, end, right_child(node, start, mid), leaves);
    }
}

impl<T, O> SegmentTree<T, O>
where
    T: Clone,
    O: IdentityOperator<T>,
{
    /// Build a tree using the operator's own identity
    pub fn with_operator(values: &[T], operator: O) -> Result<Self, SegmentTreeError> {
        let identity = operator.identity();
        Self::new(values, operator, identity)
    }
}

impl<T, O> OwnedSize for SegmentTree<T, O>
where
    T: Clone,
    O: Operator<T>,
{
    fn owned_size(&self) -> usize {
        std::mem::size_of::<Self>() + std::mem::size_of::<T>() * self.storage.capacity()
    }
}

#[cfg(test)]
mod test {
    use crate::error::SegmentTreeError;
    use crate::operators::{MaxOperator, MinOperator, ProductOperator, SumOperator};
    use crate::segment_tree::{mid, right_child, SegmentTree};
    use crate::traits::OwnedSize;
    use crate::util;
    use crate::util::linear_fold::LinearFold;
    use approx::assert_relative_eq;

    #[test]
    fn min_queries() {
        let tree = SegmentTree::new(&[1, 6, 8, 9], MinOperator, i32::MAX).unwrap();
        assert_eq!(tree.query_range(1, 1), 6);
        assert_eq!(tree.query_range(0, 3), 1);
        assert_eq!(tree.query_range(1, 3), 6);
        assert_eq!(tree.size(), 4);
    }

    #[test]
    fn min_after_set() {
        let mut tree = SegmentTree::new(&[1, 6, 8, 9], MinOperator, i32::MAX).unwrap();
        tree.set(0, 100).unwrap();
        assert_eq!(tree.query_range(0, 3), 6);
        assert_eq!(tree.get(0), Ok(100));
        assert_eq!(tree.total(), 6);
    }

    #[test]
    fn single_element() {
        let tree = SegmentTree::new(&[5], MinOperator, i32::MAX).unwrap();
        assert_eq!(tree.query_range(0, 0), 5);
        assert_eq!(tree.get(0), Ok(5));
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn sum_query() {
        let tree = SegmentTree::new(&[3, 1, 4, 1, 5], |a: i32, b: i32| a + b, 0).unwrap();
        assert_eq!(tree.query_range(1, 3), 6);
        assert_eq!(tree.total(), 14);
    }

    #[test]
    fn out_of_range() {
        let mut tree = SegmentTree::new(&[1, 6, 8, 9], MinOperator, i32::MAX).unwrap();
        assert_eq!(
            tree.get(4),
            Err(SegmentTreeError::IndexOutOfRange {
                index: 4,
                length: 4
            })
        );
        assert_eq!(
            tree.set(usize::MAX, 0),
            Err(SegmentTreeError::IndexOutOfRange {
                index: usize::MAX,
                length: 4
            })
        );
        // Rejected update leaves the tree untouched
        assert_eq!(tree.leaves(), vec![1, 6, 8, 9]);
        assert_eq!(tree.total(), 1);
    }

    #[test]
    fn empty() {
        let result = SegmentTree::new(&[], SumOperator, 0);
        assert!(matches!(
            result,
            Err(SegmentTreeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn permissive_queries() {
        let tree = SegmentTree::with_operator(&[3, 1, 4, 1, 5], SumOperator).unwrap();
        assert_eq!(tree.identity(), 0);
        // Outside the tree
        assert_eq!(tree.query_range(5, 10), 0);
        // Reversed
        assert_eq!(tree.query_range(3, 1), 0);
        // Partially outside, only the intersection counts
        assert_eq!(tree.query_range(3, 100), 6);
    }

    #[test]
    fn node_count() {
        for n in 1..=64 {
            let tree = SegmentTree::with_operator(&util::gen_asc_vec(n), SumOperator).unwrap();
            assert_eq!(tree.node_count(), 2 * n - 1);
            assert_eq!(tree.size(), n);
        }
    }

    // Walks the layout and checks every slot is reached exactly once
    fn visit(start: usize, end: usize, node: usize, seen: &mut Vec<u32>) {
        seen[node] += 1;
        if start == end {
            return;
        }
        let m = mid(start, end);
        visit(start, m, node + 1, seen);
        visit(m + 1, end, right_child(node, start, m), seen);
    }

    #[test]
    fn layout_covers_storage() {
        for n in 1..=100 {
            let mut seen = vec![0; 2 * n - 1];
            visit(0, n - 1, 0, &mut seen);
            assert!(seen.iter().all(|x| *x == 1), "n = {}", n);
        }
    }

    #[test]
    fn non_commutative() {
        let concat = |a: String, b: String| a + &b;
        let values: Vec<String> = "segment".chars().map(|c| c.to_string()).collect();
        let mut tree = SegmentTree::new(&values, concat, String::new()).unwrap();
        assert_eq!(tree.total(), "segment");
        assert_eq!(tree.query_range(2, 4), "gme");
        tree.set(0, "S".to_string()).unwrap();
        assert_eq!(tree.query_range(0, 2), "Seg");
    }

    #[test]
    fn borrowed_operator() {
        let max = |a: i64, b: i64| a.max(b);
        let tree = SegmentTree::new(&[4, -2, 7, 0], &max, i64::MIN).unwrap();
        assert_eq!(tree.query_range(0, 1), 4);
        assert_eq!(max(1, 2), 2);
    }

    #[test]
    fn uniform_sum() {
        let dataset = util::gen_uniform_vec(1_000);
        let mut tree = SegmentTree::with_operator(&dataset, SumOperator).unwrap();
        let mut linear = LinearFold::new(&dataset, SumOperator, 0.0);

        for _ in 0..1_000 {
            let (start, end) = util::gen_range(dataset.len());
            assert_relative_eq!(
                tree.query_range(start, end),
                linear.query_range(start, end),
                epsilon = 1e-6
            );
        }

        for (i, x) in util::gen_uniform_vec(100).into_iter().enumerate() {
            tree.set(i * 7, x).unwrap();
            linear.set(i * 7, x);
        }
        assert_relative_eq!(tree.total(), linear.query_range(0, 999), epsilon = 1e-6);
    }

    #[test]
    fn uniform_max() {
        let dataset = util::gen_uniform_int_vec(500, -1_000, 1_000);
        let mut tree = SegmentTree::with_operator(&dataset, MaxOperator).unwrap();
        let mut linear = LinearFold::new(&dataset, MaxOperator, i64::MIN);

        for round in 0..500 {
            let index = (round * 31) % dataset.len();
            tree.set(index, round as i64).unwrap();
            linear.set(index, round as i64);
            let (start, end) = util::gen_range(dataset.len());
            assert_eq!(tree.query_range(start, end), linear.query_range(start, end));
        }
        assert_eq!(tree.leaves(), linear.values);
    }

    #[test]
    fn float_min_max_infinite_leaves() {
        let tree = SegmentTree::with_operator(&[f64::INFINITY, 1.0], MinOperator).unwrap();
        assert_eq!(tree.get(0), Ok(f64::INFINITY));
        assert_eq!(tree.identity(), f64::INFINITY);
        assert_eq!(tree.query_range(5, 9), f64::INFINITY);

        let tree = SegmentTree::with_operator(&[f64::NEG_INFINITY, 1.0], MaxOperator).unwrap();
        assert_eq!(tree.get(0), Ok(f64::NEG_INFINITY));
        assert_eq!(tree.get(1), Ok(1.0));

        let values = [2.5_f32, f32::INFINITY, f32::NEG_INFINITY, 0.0, f32::INFINITY];
        let tree = SegmentTree::with_operator(&values, MaxOperator).unwrap();
        assert_eq!(tree.leaves(), values.to_vec());
        assert_eq!(tree.query_range(2, 3), 0.0);
        assert_eq!(tree.query_range(2, 2), f32::NEG_INFINITY);
    }

    #[test]
    fn product() {
        let mut tree = SegmentTree::with_operator(&[2, 3, 4, 5, 6], ProductOperator).unwrap();
        assert_eq!(tree.total(), 720);
        assert_eq!(tree.query_range(1, 3), 60);
        assert_eq!(tree.query_range(7, 8), 1);
        tree.set(2, 0).unwrap();
        assert_eq!(tree.query_range(0, 1), 6);
        assert_eq!(tree.query_range(1, 3), 0);
    }

    #[test]
    fn borrowed_builtin_operator() {
        let op = MinOperator;
        let tree = SegmentTree::with_operator(&[4, -2, 7, 0], &op).unwrap();
        assert_eq!(tree.query_range(2, 3), 0);
        assert_eq!(tree.identity(), i32::MAX);
    }

    #[test]
    fn node_count_overflow() {
        let unit = |_: (), _: ()| ();
        let mut values: Vec<()> = Vec::new();
        // Zero sized elements never allocate, any length up to the capacity is valid
        unsafe { values.set_len(usize::MAX / 2 + 1) };
        assert!(matches!(
            SegmentTree::new(&values, unit, ()),
            Err(SegmentTreeError::InvalidArgument { .. })
        ));
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn traced_calls() {
        assert!(SegmentTree::new(&[], SumOperator, 0).is_err());
        let mut tree = SegmentTree::with_operator(&[1, 2, 3], SumOperator).unwrap();
        tree.set(1, 5).unwrap();
        assert!(tree.set(3, 0).is_err());
        assert_eq!(tree.total(), 9);
    }

    #[test]
    fn owned_size() {
        let tree = SegmentTree::with_operator(&[1_u64, 2, 3, 4], SumOperator).unwrap();
        assert!(tree.owned_size() >= std::mem::size_of::<u64>() * 7);
    }
}
