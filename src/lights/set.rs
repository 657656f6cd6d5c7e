use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::LightsError;

/// A set of positive light ids, or the set of all lights.
///
/// The empty concrete set is the "no lights" sentinel. [`LightSet::All`]
/// matches every light, including lights the caller does not know about.
///
/// Values are treated as immutable; every operation except
/// [`merge`](LightSet::merge) returns a new set.
///
/// # Example
/// ```
/// use lightvisor::LightSet;
///
/// let running: LightSet = "1, 2".parse().unwrap();
/// let wanted = LightSet::new([2, 3]);
///
/// assert!(running.overlaps_with(&wanted));
/// assert_eq!(wanted.subtract(&running).unwrap().to_string(), "3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LightSet {
    /// Every light.
    All,
    /// Exactly these lights; empty means no lights.
    Only(BTreeSet<u32>),
}

impl LightSet {
    /// Builds a concrete set. Id `0` is not a light and is skipped.
    pub fn new(ids: impl IntoIterator<Item = u32>) -> Self {
        LightSet::Only(ids.into_iter().filter(|id| *id > 0).collect())
    }

    /// The "no lights" sentinel.
    #[inline]
    pub fn none() -> Self {
        LightSet::Only(BTreeSet::new())
    }

    #[inline]
    pub fn is_all(&self) -> bool {
        matches!(self, LightSet::All)
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, LightSet::Only(ids) if ids.is_empty())
    }

    /// Returns true if both sets are non-empty and share at least one light.
    ///
    /// The universal set overlaps every non-empty set, itself included.
    pub fn overlaps_with(&self, other: &LightSet) -> bool {
        if self.is_none() || other.is_none() {
            return false;
        }
        match (self, other) {
            (LightSet::All, _) | (_, LightSet::All) => true,
            (LightSet::Only(a), LightSet::Only(b)) => !a.is_disjoint(b),
        }
    }

    /// Lights present in both sets. The universal set is the identity.
    pub fn intersect(&self, other: &LightSet) -> LightSet {
        match (self, other) {
            (LightSet::All, x) | (x, LightSet::All) => x.clone(),
            (LightSet::Only(a), LightSet::Only(b)) => {
                LightSet::Only(a.intersection(b).copied().collect())
            }
        }
    }

    /// Lights in `self` that are not in `other`.
    ///
    /// Subtracting nothing returns `self` unchanged and subtracting everything
    /// returns no lights.
    ///
    /// # Errors
    /// [`LightsError::SubtractFromAll`] whenever `self` is universal, whatever
    /// `other` is.
    pub fn subtract(&self, other: &LightSet) -> Result<LightSet, LightsError> {
        let LightSet::Only(mine) = self else {
            return Err(LightsError::SubtractFromAll);
        };
        match other {
            LightSet::All => Ok(LightSet::none()),
            LightSet::Only(theirs) => {
                Ok(LightSet::Only(mine.difference(theirs).copied().collect()))
            }
        }
    }

    /// Lights in either set. The universal set absorbs.
    pub fn union(&self, other: &LightSet) -> LightSet {
        match (self, other) {
            (LightSet::All, _) | (_, LightSet::All) => LightSet::All,
            (LightSet::Only(a), LightSet::Only(b)) => LightSet::Only(a.union(b).copied().collect()),
        }
    }

    /// Adds the lights of `other` to `self` in place and returns `self` for chaining.
    ///
    /// # Errors
    /// [`LightsError::MergeAll`] when either side is universal.
    pub fn merge(&mut self, other: &LightSet) -> Result<&mut Self, LightsError> {
        match (&mut *self, other) {
            (LightSet::Only(mine), LightSet::Only(theirs)) => {
                mine.extend(theirs.iter().copied());
                Ok(self)
            }
            _ => Err(LightsError::MergeAll),
        }
    }

    /// Sorted light ids; `None` for the universal set.
    pub fn ids(&self) -> Option<Vec<u32>> {
        match self {
            LightSet::All => None,
            LightSet::Only(ids) => Some(ids.iter().copied().collect()),
        }
    }
}

impl Default for LightSet {
    fn default() -> Self {
        LightSet::none()
    }
}

impl FromIterator<u32> for LightSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        LightSet::new(iter)
    }
}

impl fmt::Display for LightSet {
    /// `All`, `None`, or ascending comma-separated ids without spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightSet::All => f.write_str("All"),
            LightSet::Only(ids) if ids.is_empty() => f.write_str("None"),
            LightSet::Only(ids) => {
                let mut first = true;
                for id in ids {
                    if !first {
                        f.write_str(",")?;
                    }
                    write!(f, "{id}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for LightSet {
    type Err = LightsError;

    /// Parses user text into a set.
    ///
    /// - blank text or `All` (any case) → universal set
    /// - `None` (any case) → no lights
    /// - otherwise comma-separated positive integers, whitespace around tokens ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("all") {
            return Ok(LightSet::All);
        }
        if text.eq_ignore_ascii_case("none") {
            return Ok(LightSet::none());
        }

        let mut ids = BTreeSet::new();
        for raw in text.split(',') {
            let token = raw.trim();
            let id: i64 = token.parse().map_err(|_| LightsError::InvalidId {
                token: token.to_string(),
            })?;
            if id <= 0 {
                return Err(LightsError::NonPositive {
                    token: token.to_string(),
                });
            }
            let id = u32::try_from(id).map_err(|_| LightsError::InvalidId {
                token: token.to_string(),
            })?;
            ids.insert(id);
        }
        Ok(LightSet::Only(ids))
    }
}
