use crate::prelude::CalcError;
use log::{info, warn};

/// Tags log lines with the calculator that produced them.
pub struct LogManager {
    component: &'static str,
}

impl LogManager {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.component, message);
    }

    pub fn record_failure(&self, err: &CalcError) {
        warn!("[{}] rejected input ({}): {}", self.component, err.kind(), err);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("calc")
    }
}
