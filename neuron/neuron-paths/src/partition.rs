//! Segment partitioning.
//!
//! Neurite samples are scanned in file order. A sample that does not simply
//! continue the chain of the line before it (its id is not `parent + 1`)
//! opens a new segment; this catches branch points, re-rooted sub-trees and
//! isolated points in one rule. The end of the list closes the last open
//! segment. Each segment then borrows its parent branch point as an anchor,
//! so sibling segments meet at the fork.
//!
//! A root sample with no children at all is a lone point, not a path; it
//! forms no segment and takes no ordinal.

use swc_io::{Sample, SampleType, SwcError, TreeIndex};
use tracing::debug;

use crate::error::PathResult;

/// A maximal unbranched run of samples.
///
/// `body` is contiguous in the file. `anchor` is the parent of the first
/// body sample; it is `None` when that sample is the root of its sub-tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    ordinal: usize,
    name: String,
    kind: SampleType,
    anchor: Option<Sample>,
    body: Vec<Sample>,
}

impl Segment {
    /// Position of the segment among all segments of the file (0-based).
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Name of the segment: type label followed by the ordinal.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Structure type, taken from the first body sample.
    #[must_use]
    pub const fn kind(&self) -> SampleType {
        self.kind
    }

    /// The shared branch point prepended to the body, if any.
    #[must_use]
    pub const fn anchor(&self) -> Option<&Sample> {
        self.anchor.as_ref()
    }

    /// The samples owned by this segment, in file order.
    #[must_use]
    pub fn body(&self) -> &[Sample] {
        &self.body
    }

    /// Anchor (if any) followed by the body.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.anchor.iter().chain(self.body.iter())
    }

    /// Number of points the segment contributes to a path.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.body.len() + usize::from(self.anchor.is_some())
    }

    /// Whether the segment starts at a sub-tree root and so has no anchor.
    #[must_use]
    pub const fn is_root_segment(&self) -> bool {
        self.anchor.is_none()
    }
}

/// Whether `sample` continues the segment `previous` belongs to.
fn continues(previous: &Sample, sample: &Sample) -> bool {
    sample.continues_previous() && sample.parent == Some(previous.id)
}

/// Indices into `neurites` at which a new segment starts.
///
/// The first sample always starts one. The synthetic end-of-list boundary
/// is not included.
///
/// # Example
///
/// ```
/// use neuron_paths::boundary_positions;
/// use swc_io::parse_swc;
///
/// // 4 branches off 2 instead of continuing 3
/// let doc = parse_swc(
///     "1 3 0 0 0 1 -1\n2 3 1 0 0 1 1\n3 3 2 0 0 1 2\n4 3 1 1 0 1 2\n5 3 1 2 0 1 4\n",
/// )
/// .unwrap();
/// assert_eq!(boundary_positions(doc.neurite_samples()), vec![0, 3]);
/// ```
#[must_use]
pub fn boundary_positions(neurites: &[Sample]) -> Vec<usize> {
    let mut boundaries = Vec::new();
    for (i, sample) in neurites.iter().enumerate() {
        let chained = i > 0 && continues(&neurites[i - 1], sample);
        if !chained {
            boundaries.push(i);
        }
    }
    boundaries
}

/// Split neurite samples into segments, in order of first appearance.
///
/// `neurites` must be in ascending id order (file order) and `index` must
/// cover every sample of the file, soma included, so that segments hanging
/// off the soma can resolve their anchor.
///
/// # Errors
///
/// Returns [`SwcError::DanglingParent`] (wrapped) if an anchor id is
/// missing from `index`.
///
/// # Example
///
/// ```
/// use neuron_paths::partition;
/// use swc_io::{parse_swc, TreeIndex};
///
/// let doc = parse_swc("1 1 0 0 0 5 -1\n2 2 0 6 0 1 1\n3 2 0 9 0 1 2\n").unwrap();
/// let index = TreeIndex::build(doc.samples()).unwrap();
/// let segments = partition(doc.neurite_samples(), &index).unwrap();
///
/// assert_eq!(segments.len(), 1);
/// assert_eq!(segments[0].name(), "Axon 0");
/// assert_eq!(segments[0].anchor().map(|s| s.id), Some(1));
/// ```
pub fn partition(neurites: &[Sample], index: &TreeIndex) -> PathResult<Vec<Segment>> {
    let mut boundaries = boundary_positions(neurites);
    boundaries.push(neurites.len());

    let mut segments: Vec<Segment> = Vec::with_capacity(boundaries.len().saturating_sub(1));
    for run in boundaries.windows(2) {
        let body = neurites[run[0]..run[1]].to_vec();
        let first = body[0];

        if body.len() == 1 && first.is_root() && index.children(first.id).is_empty() {
            debug!(id = first.id, line = first.line, "ignoring isolated point");
            continue;
        }
        let ordinal = segments.len();

        let anchor = match first.parent {
            Some(parent) => Some(*index.lookup(parent).ok_or(SwcError::DanglingParent {
                line: first.line,
                id: first.id,
                parent,
            })?),
            None => None,
        };

        let kind = first.kind;
        segments.push(Segment {
            ordinal,
            name: format!("{} {ordinal}", kind.label()),
            kind,
            anchor,
            body,
        });
    }

    debug!(
        neurites = neurites.len(),
        segments = segments.len(),
        "partitioned neurites"
    );
    Ok(segments)
}
