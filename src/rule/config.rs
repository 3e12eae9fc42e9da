//! Per-run chromosome configuration.

use crate::data::{Interval, PercentileProvider, Target};
use crate::error::{QarmError, Result};

/// How candidates are constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChromosomeMode {
    /// Fixed genes plus at most one extra gene drawn from a rotating pool.
    #[default]
    Pool,
    /// One gene per non-target attribute, all default except the fixed
    /// genes and one randomly chosen searched attribute.
    Full,
}

/// Everything one evolutionary run needs to build candidates.
///
/// Borrowed from the dataset for the duration of the run.
///
/// # Examples
///
/// ```
/// use u_qarm::data::{Dataset, TargetSpec};
/// use u_qarm::rule::{ChromosomeMode, SearchConfig};
///
/// let ds = Dataset::new(
///     vec!["a".into(), "b".into(), "y".into()],
///     (0..10).map(|i| vec![i as f64, (i * i) as f64, (i % 2) as f64]).collect(),
/// ).unwrap();
/// let target = TargetSpec::range("y", Some(1.0), None).resolve(&ds).unwrap();
///
/// let config = SearchConfig::new(target, ds.all_bounds(), ds.percentiles())
///     .with_fixed(vec![0])
///     .with_search(vec![0, 1, 2])
///     .with_mode(ChromosomeMode::Pool);
/// assert!(config.validate().is_ok());
/// // The target and fixed attributes never enter the search pool.
/// assert_eq!(config.search(), &[1]);
/// ```
#[derive(Clone)]
pub struct SearchConfig<'a> {
    pub target: Target,
    pub bounds: &'a [Interval],
    pub percentiles: &'a dyn PercentileProvider,
    fixed: Vec<usize>,
    search: Vec<usize>,
    pub mode: ChromosomeMode,
}

impl<'a> SearchConfig<'a> {
    /// Creates a configuration with no fixed or searched attributes.
    pub fn new(
        target: Target,
        bounds: &'a [Interval],
        percentiles: &'a dyn PercentileProvider,
    ) -> Self {
        Self {
            target,
            bounds,
            percentiles,
            fixed: Vec::new(),
            search: Vec::new(),
            mode: ChromosomeMode::Pool,
        }
    }

    /// Sets the fixed attributes (always active, always mutated).
    ///
    /// Duplicates are removed, first occurrence wins.
    pub fn with_fixed(mut self, fixed: Vec<usize>) -> Self {
        self.fixed = dedup(fixed);
        let search = std::mem::take(&mut self.search);
        self.search = self.eligible(search);
        self
    }

    /// Sets the search universe for the free attribute.
    ///
    /// The target and any fixed attribute are dropped.
    pub fn with_search(mut self, search: Vec<usize>) -> Self {
        self.search = self.eligible(search);
        self
    }

    /// Sets the construction mode.
    pub fn with_mode(mut self, mode: ChromosomeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fixed attribute indices.
    pub fn fixed(&self) -> &[usize] {
        &self.fixed
    }

    /// Eligible search attribute indices.
    pub fn search(&self) -> &[usize] {
        &self.search
    }

    /// Returns `true` if `attribute` is fixed.
    pub fn is_fixed(&self, attribute: usize) -> bool {
        self.fixed.contains(&attribute)
    }

    /// Number of attributes in the bounds table.
    pub fn n_attributes(&self) -> usize {
        self.bounds.len()
    }

    /// Validates indices and that candidates can be non-empty.
    ///
    /// # Errors
    ///
    /// - [`QarmError::AttributeOutOfRange`] for an index past the bounds table
    /// - [`QarmError::InvalidConfig`] if the target is listed as fixed
    /// - [`QarmError::EmptyChromosome`] if both fixed and search sets are empty
    pub fn validate(&self) -> Result<()> {
        let columns = self.bounds.len();
        for &index in std::iter::once(&self.target.index)
            .chain(&self.fixed)
            .chain(&self.search)
        {
            if index >= columns {
                return Err(QarmError::AttributeOutOfRange { index, columns });
            }
        }
        if self.fixed.contains(&self.target.index) {
            return Err(QarmError::InvalidConfig(format!(
                "target attribute {} cannot be fixed in the antecedent",
                self.target.index
            )));
        }
        if self.fixed.is_empty() && self.search.is_empty() {
            return Err(QarmError::EmptyChromosome);
        }
        Ok(())
    }

    fn eligible(&self, search: Vec<usize>) -> Vec<usize> {
        dedup(search)
            .into_iter()
            .filter(|&i| i != self.target.index && !self.fixed.contains(&i))
            .collect()
    }
}

impl std::fmt::Debug for SearchConfig<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("target", &self.target)
            .field("fixed", &self.fixed)
            .field("search", &self.search)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

fn dedup(indices: Vec<usize>) -> Vec<usize> {
    let mut out = Vec::with_capacity(indices.len());
    for i in indices {
        if !out.contains(&i) {
            out.push(i);
        }
    }
    out
}
