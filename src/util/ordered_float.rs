use num_traits::Float;
use std::cmp::Ordering;

/// A float with a total order. NaN sorts after every number, so it never wins a minimum.
#[derive(Debug, Copy, Clone)]
pub struct OrderedFloat<F: Float>(pub F);

impl<F: Float> From<F> for OrderedFloat<F> {
    fn from(float: F) -> Self {
        OrderedFloat(float)
    }
}

impl<F: Float> PartialEq for OrderedFloat<F> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<F: Float> Eq for OrderedFloat<F> {}

impl<F: Float> PartialOrd for OrderedFloat<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Float> Ord for OrderedFloat<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.is_nan(), other.0.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal),
        }
    }
}

/// Returns the element with the smallest key. Ties go to the element that comes first.
pub fn argmin_by_key<T, F: Float>(
    items: impl IntoIterator<Item = T>,
    mut key: impl FnMut(&T) -> F,
) -> Option<T> {
    items
        .into_iter()
        .min_by_key(|item| OrderedFloat(key(item)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_sorts_last() {
        let mut values = vec![
            OrderedFloat(2.0),
            OrderedFloat(f64::NAN),
            OrderedFloat(-1.0),
        ];
        values.sort();
        assert_eq!(values[0].0, -1.0);
        assert_eq!(values[1].0, 2.0);
        assert!(values[2].0.is_nan());
    }

    #[test]
    fn argmin_prefers_first_on_ties() {
        let items = vec![(0, 3.0), (1, 1.0), (2, 1.0), (3, f64::NAN)];
        assert_eq!(argmin_by_key(items, |(_, d)| *d), Some((1, 1.0)));
        assert_eq!(argmin_by_key(Vec::<f64>::new(), |d| *d), None);
    }
}
