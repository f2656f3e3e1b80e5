//! Pure calculators behind the form demos.
//!
//! Each calculator is a stateless function over caller-owned input: nth-largest
//! selection, dense matrix multiplication and the even-number sequence. The
//! `interface` module holds the text codecs and JSON payloads shared by the
//! CLI and HTTP front ends.

pub mod interface;
pub mod math;
pub mod prelude;
pub mod telemetry;

pub use math::{find_nth_largest, first_even_numbers, multiply_matrices, MatrixHelper, NthLargest};
pub use prelude::{CalcError, CalcResult, ErrorKind, Limits};
