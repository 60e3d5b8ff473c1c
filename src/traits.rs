/// Binary combine operator used to merge the values of two adjacent ranges.
///
/// The tree treats `apply` as associative and never checks it. Commutativity is not required,
/// `left` always covers the lower indices.
///
/// Closures, function items and the built-in operators implement it both by value and by
/// reference, so a tree can either own its operator or borrow it from the caller.
pub trait Operator<T> {
    /// Combine two values
    /// # Arguments
    /// * `left` Value of the left (lower index) range
    /// * `right` Value of the right (higher index) range
    fn apply(&self, left: T, right: T) -> T;
}

impl<T, F> Operator<T> for F
where
    F: Fn(T, T) -> T,
{
    fn apply(&self, left: T, right: T) -> T {
        self(left, right)
    }
}

/// An operator which knows its own neutral element.
pub trait IdentityOperator<T>: Operator<T> {
    /// Value `e` such that `apply(e, x) == apply(x, e) == x` for every `x`
    fn identity(&self) -> T;
}

pub trait OwnedSize {
    /// Number of bytes owned by the structure, including heap storage
    fn owned_size(&self) -> usize;
}
