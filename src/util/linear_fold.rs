use crate::traits::Operator;

/// Brute force range fold over a plain vector.
/// Every query walks the range, used as ground truth for the tree.
pub struct LinearFold<T, O>
where
    T: Clone,
    O: Operator<T>,
{
    pub values: Vec<T>,
    pub operator: O,
    pub identity: T,
}

impl<T, O> LinearFold<T, O>
where
    T: Clone,
    O: Operator<T>,
{
    pub fn new(values: &[T], operator: O, identity: T) -> Self {
        LinearFold {
            values: values.to_vec(),
            operator,
            identity,
        }
    }

    pub fn set(&mut self, index: usize, value: T) {
        self.values[index] = value;
    }

    /// Left to right fold over `[start, end] ∩ [0, len - 1]`
    pub fn query_range(&self, start: usize, end: usize) -> T {
        self.values
            .iter()
            .enumerate()
            .filter(|(i, _)| start <= *i && *i <= end)
            .fold(self.identity.clone(), |acc, (_, x)| {
                self.operator.apply(acc, x.clone())
            })
    }
}
