mod quantity;
mod registry;

pub use quantity::{quantity, Quantity};
pub use registry::{lookup_unit, Dimension, Unit};
