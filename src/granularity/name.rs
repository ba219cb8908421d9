//! Parsing of compound granularity names such as `"over_inning"`.
use crate::error::{GranularityError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(fine, coarse)` unit pair, written `"<fine>_<coarse>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GranularitySpec {
    pub fine: String,
    pub coarse: String,
}

impl GranularitySpec {
    pub fn new(fine: impl Into<String>, coarse: impl Into<String>) -> Self {
        Self {
            fine: fine.into(),
            coarse: coarse.into(),
        }
    }

    /// Splits `name` into two units drawn from `known`.
    ///
    /// Unit names may themselves contain underscores, so every `_` is tried as
    /// the separator and the first split whose halves are both known wins.
    /// When no split works, the first candidate's unknown half is reported.
    pub fn parse<S: AsRef<str>>(name: &str, known: &[S]) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GranularityError::MissingGranularityName);
        }

        let is_known = |unit: &str| known.iter().any(|k| k.as_ref() == unit);
        let candidates: Vec<(&str, &str)> = name
            .match_indices('_')
            .map(|(i, _)| (&name[..i], &name[i + 1..]))
            .filter(|(fine, coarse)| !fine.is_empty() && !coarse.is_empty())
            .collect();

        if let Some(&(fine, coarse)) = candidates.iter().find(|&&(f, c)| is_known(f) && is_known(c)) {
            return Ok(Self::new(fine, coarse));
        }

        let &(fine, coarse) = candidates.first().ok_or_else(|| GranularityError::MalformedName {
            name: name.to_string(),
        })?;
        let unknown = if is_known(fine) { coarse } else { fine };
        Err(GranularityError::InvalidUnit {
            unit: unknown.to_string(),
            known: known.iter().map(|k| k.as_ref().to_string()).collect(),
        })
    }

    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GranularitySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.fine, self.coarse)
    }
}
