use calccore::math::NthLargest;
use calccore::prelude::CalcResult;
use serde::Deserialize;

/// Fields posted by the nth-largest form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NthLargestForm {
    pub numbers: String,
    pub n: String,
}

/// Fields posted by the matrix form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatrixForm {
    pub matrix1: String,
    pub matrix2: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvenQuery {
    pub n: Option<String>,
}

/// State rendered by the nth-largest page; `outcome` is `None` before a submit.
#[derive(Debug, Default)]
pub struct NthLargestPage {
    pub form: NthLargestForm,
    pub outcome: Option<CalcResult<NthLargest>>,
}

#[derive(Debug, Default)]
pub struct MatrixPage {
    pub form: MatrixForm,
    /// Product already rendered as text, two decimals per cell.
    pub outcome: Option<CalcResult<String>>,
}

#[derive(Debug)]
pub struct EvenPage {
    pub n: String,
    pub max: usize,
    pub outcome: Option<CalcResult<Vec<u64>>>,
}
