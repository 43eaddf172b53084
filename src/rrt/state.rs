use num_traits::Float;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

/// A configuration in an N-dimensional real vector space.
///
/// States are plain `Copy` values. A state either lives inside a tree node or on the
/// stack of the iteration that produced it, so there is nothing to free by hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealVectorState<F: Float, const N: usize> {
    values: [F; N],
}

impl<F: Float, const N: usize> RealVectorState<F, N> {
    pub fn new(values: [F; N]) -> Self {
        Self { values }
    }

    pub fn zeros() -> Self {
        Self {
            values: [F::zero(); N],
        }
    }

    pub fn values(&self) -> &[F; N] {
        &self.values
    }

    pub fn dot(&self, other: &Self) -> F {
        self.values
            .iter()
            .zip(other.values.iter())
            .fold(F::zero(), |acc, (&a, &b)| acc + a * b)
    }

    pub fn norm_squared(&self) -> F {
        self.dot(self)
    }

    pub fn norm(&self) -> F {
        self.norm_squared().sqrt()
    }

    pub fn euclidean_distance_squared(&self, other: &Self) -> F {
        (other - self).norm_squared()
    }

    pub fn euclidean_distance(&self, other: &Self) -> F {
        self.euclidean_distance_squared(other).sqrt()
    }

    /// Linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    pub fn lerp(&self, other: &Self, t: F) -> Self {
        let mut values = self.values;
        for i in 0..N {
            values[i] = values[i] + (other.values[i] - values[i]) * t;
        }
        Self { values }
    }
}

impl<F: Float, const N: usize> Index<usize> for RealVectorState<F, N> {
    type Output = F;

    fn index(&self, index: usize) -> &F {
        &self.values[index]
    }
}

impl<F: Float, const N: usize> IndexMut<usize> for RealVectorState<F, N> {
    fn index_mut(&mut self, index: usize) -> &mut F {
        &mut self.values[index]
    }
}

fn zip_with<F: Float, const N: usize>(
    a: &RealVectorState<F, N>,
    b: &RealVectorState<F, N>,
    op: impl Fn(F, F) -> F,
) -> RealVectorState<F, N> {
    let mut values = a.values;
    for i in 0..N {
        values[i] = op(values[i], b.values[i]);
    }
    RealVectorState { values }
}

macro_rules! impl_elementwise {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<'a, 'b, F: Float, const N: usize> $trait<&'b RealVectorState<F, N>>
            for &'a RealVectorState<F, N>
        {
            type Output = RealVectorState<F, N>;

            fn $method(self, rhs: &'b RealVectorState<F, N>) -> RealVectorState<F, N> {
                zip_with(self, rhs, |a, b| a $op b)
            }
        }

        impl<F: Float, const N: usize> $trait for RealVectorState<F, N> {
            type Output = RealVectorState<F, N>;

            fn $method(self, rhs: RealVectorState<F, N>) -> RealVectorState<F, N> {
                zip_with(&self, &rhs, |a, b| a $op b)
            }
        }
    };
}

impl_elementwise!(Add, add, +);
impl_elementwise!(Sub, sub, -);

impl<F: Float, const N: usize> Mul<F> for RealVectorState<F, N> {
    type Output = RealVectorState<F, N>;

    fn mul(mut self, rhs: F) -> RealVectorState<F, N> {
        for v in self.values.iter_mut() {
            *v = *v * rhs;
        }
        self
    }
}

impl<F: Float, const N: usize> Div<F> for RealVectorState<F, N> {
    type Output = RealVectorState<F, N>;

    fn div(mut self, rhs: F) -> RealVectorState<F, N> {
        for v in self.values.iter_mut() {
            *v = *v / rhs;
        }
        self
    }
}

// serde only derives arrays up to a fixed length, so states are written as an N-tuple.
impl<F: Float + Serialize, const N: usize> Serialize for RealVectorState<F, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(N)?;
        for value in &self.values {
            tuple.serialize_element(value)?;
        }
        tuple.end()
    }
}

struct StateVisitor<F, const N: usize>(PhantomData<F>);

impl<'de, F: Float + Deserialize<'de>, const N: usize> Visitor<'de> for StateVisitor<F, N> {
    type Value = RealVectorState<F, N>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a sequence of {} numbers", N)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = [F::zero(); N];
        for (i, value) in values.iter_mut().enumerate() {
            *value = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
        }
        Ok(RealVectorState { values })
    }
}

impl<'de, F: Float + Deserialize<'de>, const N: usize> Deserialize<'de>
    for RealVectorState<F, N>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_tuple(N, StateVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_elementwise() {
        let a = RealVectorState::new([1.0, 2.0]);
        let b = RealVectorState::new([4.0, 6.0]);
        assert_eq!(&b - &a, RealVectorState::new([3.0, 4.0]));
        assert_eq!(a + b, RealVectorState::new([5.0, 8.0]));
        assert_eq!((b - a) / 2.0, RealVectorState::new([1.5, 2.0]));
        assert_eq!(a.euclidean_distance(&b), 5.0);
    }

    #[test]
    fn lerp_hits_both_ends() {
        let a = RealVectorState::new([0.0, 0.0, 0.0]);
        let b = RealVectorState::new([2.0, -4.0, 1.0]);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), RealVectorState::new([1.0, -2.0, 0.5]));
    }

    #[test]
    fn serializes_as_fixed_length_tuple() {
        let state = RealVectorState::new([1.5f64, -2.0]);
        let bytes = bincode::serialize(&state).unwrap();
        let decoded: RealVectorState<f64, 2> = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, state);
    }
}
