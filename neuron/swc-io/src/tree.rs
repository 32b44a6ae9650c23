//! Id-based index over a sample forest.

use hashbrown::HashMap;
use tracing::debug;

use crate::error::{SwcError, SwcResult};
use crate::sample::Sample;

/// Lookup tables from sample id to sample and to child ids.
///
/// Building the index validates the forest: every parent must be an id
/// that appeared earlier in the file, and ids must be unique.
///
/// # Example
///
/// ```
/// use swc_io::{parse_swc, TreeIndex};
///
/// let doc = parse_swc("1 2 0 0 0 1 -1\n2 2 1 0 0 1 1\n3 2 0 1 0 1 1\n").unwrap();
/// let index = TreeIndex::build(doc.samples()).unwrap();
///
/// assert_eq!(index.children(1), &[2, 3]);
/// assert!(index.is_branch_point(1));
/// assert_eq!(index.lookup(3).map(|s| s.id), Some(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    by_id: HashMap<u32, Sample>,
    children: HashMap<u32, Vec<u32>>,
    roots: Vec<u32>,
}

impl TreeIndex {
    /// Index samples given in file order.
    ///
    /// # Errors
    ///
    /// Returns [`SwcError::DuplicateId`] if an id repeats, and
    /// [`SwcError::DanglingParent`] if a parent id has not been seen before
    /// the sample that refers to it.
    pub fn build(samples: &[Sample]) -> SwcResult<Self> {
        let mut index = Self {
            by_id: HashMap::with_capacity(samples.len()),
            children: HashMap::new(),
            roots: Vec::new(),
        };

        for sample in samples {
            if index.by_id.contains_key(&sample.id) {
                return Err(SwcError::DuplicateId {
                    line: sample.line,
                    id: sample.id,
                });
            }
            match sample.parent {
                Some(parent) if !index.by_id.contains_key(&parent) => {
                    return Err(SwcError::DanglingParent {
                        line: sample.line,
                        id: sample.id,
                        parent,
                    });
                }
                Some(parent) => index.children.entry(parent).or_default().push(sample.id),
                None => index.roots.push(sample.id),
            }
            index.by_id.insert(sample.id, *sample);
        }

        debug!(
            samples = index.by_id.len(),
            roots = index.roots.len(),
            "built tree index"
        );
        Ok(index)
    }

    /// Find a sample by id.
    #[must_use]
    pub fn lookup(&self, id: u32) -> Option<&Sample> {
        self.by_id.get(&id)
    }

    /// Parent sample of `id`, if it has one.
    #[must_use]
    pub fn parent_of(&self, id: u32) -> Option<&Sample> {
        self.lookup(id)?.parent.and_then(|p| self.lookup(p))
    }

    /// Child ids of `id` in file order. Empty for leaves and unknown ids.
    #[must_use]
    pub fn children(&self, id: u32) -> &[u32] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Ids of samples with the root sentinel as parent, in file order.
    #[must_use]
    pub fn roots(&self) -> &[u32] {
        &self.roots
    }

    /// Whether more than one sample hangs off `id`.
    #[must_use]
    pub fn is_branch_point(&self, id: u32) -> bool {
        self.children(id).len() > 1
    }

    /// Number of indexed samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
