pub mod ordered_float;

pub use ordered_float::{argmin_by_key, OrderedFloat};
