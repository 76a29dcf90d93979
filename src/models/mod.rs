mod product;
mod validation;

pub use product::*;
pub use validation::*;
