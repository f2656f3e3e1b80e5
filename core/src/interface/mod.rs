pub mod payload;
pub mod text;

pub use payload::{
    ErrorResponse, EvenRequest, EvenResponse, MatrixRequest, MatrixResponse, NthLargestRequest,
    NthLargestResponse, NumberInput,
};
pub use text::{format_matrix, format_matrix_fixed, parse_matrix, parse_number_list, parse_rank};
