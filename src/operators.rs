//! Built-in operators.
//!
//! Operators are unit structs and may be passed either by value or by reference
//! (`&MinOperator`), a reference leaves the operator owned by the caller.

use crate::traits::{IdentityOperator, Operator};
use num_traits::{Bounded, Float, One, Zero};
use std::ops::{Add, Mul};

/// Smallest of the two values, identity is the largest value of the type (`+inf` for floats)
#[derive(Clone, Copy, Debug, Default)]
pub struct MinOperator;

/// Largest of the two values, identity is the smallest value of the type (`-inf` for floats)
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxOperator;

#[derive(Clone, Copy, Debug, Default)]
pub struct SumOperator;

#[derive(Clone, Copy, Debug, Default)]
pub struct ProductOperator;

/// Neutral element of [`MinOperator`]
pub trait MinIdentity {
    fn min_identity() -> Self;
}

/// Neutral element of [`MaxOperator`]
pub trait MaxIdentity {
    fn max_identity() -> Self;
}

macro_rules! bounded_identity {
    ($($t:ty),*) => {
        $(
            impl MinIdentity for $t {
                fn min_identity() -> Self {
                    <$t as Bounded>::max_value()
                }
            }

            impl MaxIdentity for $t {
                fn max_identity() -> Self {
                    <$t as Bounded>::min_value()
                }
            }
        )*
    };
}

bounded_identity!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Float::max_value is finite and would absorb infinite elements
macro_rules! float_identity {
    ($($t:ty),*) => {
        $(
            impl MinIdentity for $t {
                fn min_identity() -> Self {
                    <$t as Float>::infinity()
                }
            }

            impl MaxIdentity for $t {
                fn max_identity() -> Self {
                    <$t as Float>::neg_infinity()
                }
            }
        )*
    };
}

float_identity!(f32, f64);

fn min<T: PartialOrd>(left: T, right: T) -> T {
    // Ties keep the left value
    if left > right {
        right
    } else {
        left
    }
}

fn max<T: PartialOrd>(left: T, right: T) -> T {
    if left < right {
        right
    } else {
        left
    }
}

macro_rules! impl_operator {
    ($op:ty, $apply:expr, [$($bound:tt)*], $identity:expr, [$($id_bound:tt)*]) => {
        impl<T> Operator<T> for $op
        where
            T: $($bound)*,
        {
            fn apply(&self, left: T, right: T) -> T {
                $apply(left, right)
            }
        }

        impl<T> Operator<T> for &$op
        where
            T: $($bound)*,
        {
            fn apply(&self, left: T, right: T) -> T {
                $apply(left, right)
            }
        }

        impl<T> IdentityOperator<T> for $op
        where
            T: $($bound)* + $($id_bound)*,
        {
            fn identity(&self) -> T {
                $identity()
            }
        }

        impl<T> IdentityOperator<T> for &$op
        where
            T: $($bound)* + $($id_bound)*,
        {
            fn identity(&self) -> T {
                $identity()
            }
        }
    };
}

impl_operator!(MinOperator, min, [PartialOrd], T::min_identity, [MinIdentity]);
impl_operator!(MaxOperator, max, [PartialOrd], T::max_identity, [MaxIdentity]);
impl_operator!(SumOperator, |l: T, r: T| l + r, [Add<Output = T>], T::zero, [Zero]);
impl_operator!(ProductOperator, |l: T, r: T| l * r, [Mul<Output = T>], T::one, [One]);
