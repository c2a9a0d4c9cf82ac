//! Ordered collection of authored grab poses, searchable by hand scale.

use grab_types::Handedness;
use tracing::{debug, warn};

use crate::entry::PoseLibraryEntry;

/// The two library entries bracketing a query scale.
///
/// `from` and `to` index into the [`PoseLibrary`]. `t` is the interpolation
/// factor from `from` towards `to` and is deliberately *not* clamped: a
/// query below the smallest or above the largest authored scale
/// extrapolates with `t < 0` or `t > 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBracket {
    /// Entry at or below the query scale.
    pub from: usize,
    /// Entry at or above the query scale.
    pub to: usize,
    /// Interpolation factor from `from` to `to`.
    pub t: f32,
}

impl ScaleBracket {
    /// True when both ends refer to the same entry.
    #[must_use]
    pub const fn is_single(&self) -> bool {
        self.from == self.to
    }
}

/// Authoring problems found in a library.
///
/// None of these stop the library from being queried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryDiagnostics {
    /// Pairs of entries sharing the same scale.
    pub duplicate_scales: Vec<(usize, usize)>,
    /// Whether entries with hand shapes disagree on handedness.
    pub mixed_handedness: bool,
}

impl LibraryDiagnostics {
    /// Returns true if no problems were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicate_scales.is_empty() && !self.mixed_handedness
    }
}

/// A set of grab poses authored at different hand scales.
///
/// Entry order carries no meaning. Libraries are read-only while being
/// queried and can be shared between any number of resolvers.
///
/// # Example
///
/// ```
/// use grab_resolver::{PoseLibrary, PoseLibraryEntry};
/// use grab_types::Pose;
///
/// let mut library = PoseLibrary::new();
/// for scale in [0.8, 1.2] {
///     let entry = PoseLibraryEntry::new(Pose::identity(), Pose::identity())
///         .with_scale(scale)
///         .unwrap();
///     library.push(entry);
/// }
///
/// let bracket = library.find_interpolation_range(1.0).unwrap();
/// assert_eq!((bracket.from, bracket.to), (0, 1));
/// assert!((bracket.t - 0.5).abs() < 1e-5);
/// ```
#[derive(Debug, Default)]
pub struct PoseLibrary {
    entries: Vec<PoseLibraryEntry>,
}

impl PoseLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library from existing entries.
    #[must_use]
    pub fn from_entries(entries: Vec<PoseLibraryEntry>) -> Self {
        Self { entries }
    }

    /// Adds an entry.
    pub fn push(&mut self, entry: PoseLibraryEntry) {
        self.entries.push(entry);
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the library has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets an entry by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PoseLibraryEntry> {
        self.entries.get(index)
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &PoseLibraryEntry> {
        self.entries.iter()
    }

    /// Finds the entries whose scales bracket `scale`.
    ///
    /// - Empty library: `None`.
    /// - One entry: that entry on both ends, `t = 0`.
    /// - Otherwise `from` is the largest scale `<= scale` and `to` the
    ///   smallest scale `>= scale`. If the query lies below every entry,
    ///   `from` becomes the smallest entry and `to` the next larger one; above
    ///   every entry, `to` becomes the largest and `from` the next smaller
    ///   one. `t` then extrapolates.
    /// - Equal scales on both ends give `t = 0`.
    ///
    /// Ties between equal scales go to the first entry in library order.
    /// Returns `None` if the scan finds nothing at all (a NaN query).
    #[must_use]
    pub fn find_interpolation_range(&self, scale: f32) -> Option<ScaleBracket> {
        match self.entries.len() {
            0 => return None,
            1 => {
                return Some(ScaleBracket {
                    from: 0,
                    to: 0,
                    t: 0.0,
                });
            }
            _ => {}
        }

        let (from, to) = match (self.find_at_most(scale), self.find_at_least(scale)) {
            (None, None) => return None,
            (Some(from), Some(to)) => (from, to),
            (None, Some(lowest)) => {
                let next = self.find_above(self.entries[lowest].scale()).unwrap_or(lowest);
                (lowest, next)
            }
            (Some(highest), None) => {
                let previous = self
                    .find_below(self.entries[highest].scale())
                    .unwrap_or(highest);
                (previous, highest)
            }
        };

        let from_scale = self.entries[from].scale();
        let range = self.entries[to].scale() - from_scale;
        let t = if range.abs() < f32::EPSILON {
            0.0
        } else {
            (scale - from_scale) / range
        };

        debug!(scale, from, to, t, "scale bracket");
        Some(ScaleBracket { from, to, t })
    }

    /// Checks the library for authoring problems and logs each one.
    ///
    /// Reports entries sharing a scale (interpolation between them
    /// degenerates) and hand shapes of mixed handedness.
    #[must_use]
    pub fn diagnose(&self) -> LibraryDiagnostics {
        let mut diagnostics = LibraryDiagnostics::default();

        for (i, a) in self.entries.iter().enumerate() {
            for (j, b) in self.entries.iter().enumerate().skip(i + 1) {
                if (a.scale() - b.scale()).abs() < f32::EPSILON {
                    warn!(first = i, second = j, scale = a.scale(), "duplicate entry scale");
                    diagnostics.duplicate_scales.push((i, j));
                }
            }
        }

        let mut hands = self.entries.iter().filter_map(PoseLibraryEntry::handedness);
        if let Some(first) = hands.next() {
            let mixed: Option<Handedness> = hands.find(|hand| *hand != first);
            if let Some(other) = mixed {
                warn!(?first, ?other, "library mixes hand poses of both hands");
                diagnostics.mixed_handedness = true;
            }
        }

        diagnostics
    }

    /// Largest scale `<= limit`.
    fn find_at_most(&self, limit: f32) -> Option<usize> {
        self.scan(|s| s <= limit, |candidate, best| candidate > best)
    }

    /// Smallest scale `>= limit`.
    fn find_at_least(&self, limit: f32) -> Option<usize> {
        self.scan(|s| s >= limit, |candidate, best| candidate < best)
    }

    /// Largest scale strictly `< limit`.
    fn find_below(&self, limit: f32) -> Option<usize> {
        self.scan(|s| s < limit, |candidate, best| candidate > best)
    }

    /// Smallest scale strictly `> limit`.
    fn find_above(&self, limit: f32) -> Option<usize> {
        self.scan(|s| s > limit, |candidate, best| candidate < best)
    }

    /// Linear scan keeping the first accepted entry that no later one beats.
    fn scan(
        &self,
        accept: impl Fn(f32) -> bool,
        beats: impl Fn(f32, f32) -> bool,
    ) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, entry) in self.entries.iter().enumerate() {
            let scale = entry.scale();
            if !accept(scale) {
                continue;
            }
            match best {
                Some((_, best_scale)) if !beats(scale, best_scale) => {}
                _ => best = Some((index, scale)),
            }
        }
        best.map(|(index, _)| index)
    }
}

impl FromIterator<PoseLibraryEntry> for PoseLibrary {
    fn from_iter<I: IntoIterator<Item = PoseLibraryEntry>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

impl Extend<PoseLibraryEntry> for PoseLibrary {
    fn extend<I: IntoIterator<Item = PoseLibraryEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<'a> IntoIterator for &'a PoseLibrary {
    type Item = &'a PoseLibraryEntry;
    type IntoIter = std::slice::Iter<'a, PoseLibraryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
