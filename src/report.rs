//! Non-fatal diagnostics collected during a build.

use std::fmt;

/// A recoverable problem found while processing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub docname: String,
    pub line: Option<usize>,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: warning: {}", self.docname, line, self.message),
            None => write!(f, "{}: warning: {}", self.docname, self.message),
        }
    }
}

/// Collects warnings and forwards them to the `log` facade.
#[derive(Debug, Default)]
pub struct Reporter {
    warnings: Vec<Warning>,
}

impl Reporter {
    pub fn warn(&mut self, docname: &str, line: Option<usize>, message: impl Into<String>) {
        let warning = Warning {
            docname: docname.to_string(),
            line,
            message: message.into(),
        };
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Take all collected warnings, leaving the reporter empty.
    pub fn drain(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}
