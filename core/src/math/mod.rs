pub mod matrix;
pub mod selection;
pub mod sequence;

pub use matrix::{multiply_matrices, MatrixHelper};
pub use selection::{find_nth_largest, find_nth_largest_in_text, NthLargest};
pub use sequence::first_even_numbers;
