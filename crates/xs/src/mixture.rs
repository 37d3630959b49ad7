//! Module for the table of named mixtures

// crate modules
use crate::error::{Error, Result};
use crate::xs::CrossSectionSet;

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// external crates
use log::info;
use serde::{Deserialize, Serialize};

/// A named, homogenised material region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mixture {
    /// Mixture id referenced by stacks
    pub id: String,
    /// Cross sections for the mixture
    #[serde(flatten)]
    pub xs: CrossSectionSet,
}

impl Mixture {
    /// Create a new named mixture
    pub fn new(id: impl Into<String>, xs: CrossSectionSet) -> Self {
        Self { id: id.into(), xs }
    }
}

/// Ordered table of every [Mixture] in the problem
///
/// The position of a mixture in the table is its mixture index, which is what
/// the mesh stores for every material node.
///
/// Construction validates every set, requires unique ids, and requires that
/// all mixtures share a single energy group structure.
///
/// ```rust
/// # use ndiff_xs::{CrossSectionSet, Mixture, Mixtures};
/// let xs = CrossSectionSet {
///     sigt: vec![1.0],
///     sigp: vec![0.5],
///     chi: vec![1.0],
///     ..Default::default()
/// };
///
/// let mixtures = Mixtures::new(vec![
///     Mixture::new("fuel", xs.clone()),
///     Mixture::new("water", CrossSectionSet { sigp: vec![0.0], ..xs }),
/// ]).unwrap();
///
/// assert_eq!(mixtures.index_of("water"), Some(1));
/// assert_eq!(mixtures.n_groups(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Mixture>", into = "Vec<Mixture>")]
pub struct Mixtures {
    mixtures: Vec<Mixture>,
}

impl Mixtures {
    /// Build a validated mixture table
    pub fn new(mixtures: Vec<Mixture>) -> Result<Self> {
        let first = mixtures.first().ok_or(Error::NoMixtures)?;
        let n_groups = first.xs.n_groups();

        for (i, mixture) in mixtures.iter().enumerate() {
            Self::check(mixture, n_groups)?;
            if mixtures[..i].iter().any(|m| m.id == mixture.id) {
                return Err(Error::DuplicateMixture(mixture.id.clone()));
            }
        }

        Ok(Self { mixtures })
    }

    /// Number of energy groups shared by every mixture
    pub fn n_groups(&self) -> usize {
        self.mixtures[0].xs.n_groups()
    }

    /// Number of mixtures in the table
    pub fn len(&self) -> usize {
        self.mixtures.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.mixtures.is_empty()
    }

    /// Find the mixture index for a mixture id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.mixtures.iter().position(|m| m.id == id)
    }

    /// Cross sections for a mixture index
    ///
    /// Mixture indices come from the mesh, which only ever stores indices it
    /// resolved against this table, so this will panic on an invalid index.
    #[inline]
    pub fn xs(&self, index: usize) -> &CrossSectionSet {
        &self.mixtures[index].xs
    }

    /// Mixture id for a mixture index, if it exists
    pub fn id(&self, index: usize) -> Option<&str> {
        self.mixtures.get(index).map(|m| m.id.as_str())
    }

    /// Iterate over all mixtures in index order
    pub fn iter(&self) -> std::slice::Iter<'_, Mixture> {
        self.mixtures.iter()
    }

    /// Replace the cross sections of an existing mixture
    ///
    /// Used when an upstream feedback model has recalculated a mixture. The new
    /// set must be valid and keep the same group structure. Returns the index
    /// of the updated mixture.
    pub fn replace(&mut self, id: &str, xs: CrossSectionSet) -> Result<usize> {
        let index = self
            .index_of(id)
            .ok_or_else(|| Error::MixtureNotFound(id.to_string()))?;

        let mixture = Mixture::new(id, xs);
        Self::check(&mixture, self.n_groups())?;
        self.mixtures[index] = mixture;
        Ok(index)
    }

    fn check(mixture: &Mixture, n_groups: usize) -> Result<()> {
        let wrap = |source: Error| Error::InvalidMixture {
            id: mixture.id.clone(),
            source: Box::new(source),
        };

        mixture.xs.validate().map_err(wrap)?;
        if mixture.xs.n_groups() != n_groups {
            return Err(wrap(Error::GroupMismatch {
                field: "sigt",
                expected: n_groups,
                found: mixture.xs.n_groups(),
            }));
        }
        Ok(())
    }
}

impl TryFrom<Vec<Mixture>> for Mixtures {
    type Error = Error;

    fn try_from(mixtures: Vec<Mixture>) -> Result<Self> {
        Self::new(mixtures)
    }
}

impl From<Mixtures> for Vec<Mixture> {
    fn from(mixtures: Mixtures) -> Self {
        mixtures.mixtures
    }
}

impl<'a> IntoIterator for &'a Mixtures {
    type Item = &'a Mixture;
    type IntoIter = std::slice::Iter<'a, Mixture>;

    fn into_iter(self) -> Self::IntoIter {
        self.mixtures.iter()
    }
}

/// Read a JSON list of mixtures into a validated [Mixtures] table
///
/// ```rust, no_run
/// # use ndiff_xs::{Mixtures, read_mixtures};
/// let mixtures: Mixtures = read_mixtures("path/to/mixtures.json").unwrap();
/// ```
///
/// The file is a list of objects with an `id` and the [CrossSectionSet]
/// fields, for example:
///
/// ```json
/// [
///   {
///     "id": "fuel",
///     "sigt": [1.0],
///     "sigp": [0.5],
///     "chi": [1.0],
///     "sigs": [[[0, 0], 0.6]]
///   }
/// ]
/// ```
pub fn read_mixtures<P: AsRef<Path>>(path: P) -> Result<Mixtures> {
    info!("Reading mixtures from {}", path.as_ref().display());
    let reader = BufReader::new(File::open(path)?);
    let mixtures: Vec<Mixture> = serde_json::from_reader(reader)?;
    Mixtures::new(mixtures)
}
