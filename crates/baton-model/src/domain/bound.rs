use serde::{Deserialize, Serialize};

/// Inclusive upper bound `N` of the sequence `1..=N`.
///
/// A bound of zero describes an empty run. Negative input is not an error:
/// [`SequenceBound::from_signed`] saturates it to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceBound(u64);

impl SequenceBound {
    pub const fn new(n: u64) -> Self {
        Self(n)
    }

    /// Build a bound from a signed value, mapping `n <= 0` to the empty bound.
    pub fn from_signed(n: i64) -> Self {
        Self(u64::try_from(n).unwrap_or(0))
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if `value` lies in `1..=N`.
    #[inline]
    pub const fn contains(&self, value: u64) -> bool {
        value >= 1 && value <= self.0
    }
}

impl std::fmt::Display for SequenceBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
