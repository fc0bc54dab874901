//! The closed range of specification numbers covered by one build.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

pub const MIN_SRFI_NUMBER: u32 = 0;
pub const MAX_SRFI_NUMBER: u32 = 165;

/// Closed interval `[min, max]` of specification numbers.
///
/// Every number in the range gets exactly one entry in the built index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecRange {
    pub min: u32,
    pub max: u32,
}

impl Default for SpecRange {
    fn default() -> Self {
        Self {
            min: MIN_SRFI_NUMBER,
            max: MAX_SRFI_NUMBER,
        }
    }
}

impl SpecRange {
    /// Build a range, rejecting inverted bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRange`] when `min > max`.
    pub const fn new(min: u32, max: u32) -> Result<Self, CoreError> {
        if min > max {
            return Err(CoreError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn contains(&self, number: u32) -> bool {
        number >= self.min && number <= self.max
    }

    /// Number of specifications in the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        (self.max - self.min) as usize + 1
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Ascending iterator over every number in the range.
    #[must_use]
    pub const fn numbers(self) -> std::ops::RangeInclusive<u32> {
        self.min..=self.max
    }
}
