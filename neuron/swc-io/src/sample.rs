//! Sample records and structure types.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Structure type of a sample, as defined by the neuromorpho.org SWC dialect.
///
/// The codes are fixed by the external format, so this is a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SampleType {
    /// Cell body (code 1).
    Soma,
    /// Axon (code 2).
    Axon,
    /// Basal dendrite (code 3).
    BasalDendrite,
    /// Apical dendrite (code 4).
    ApicalDendrite,
    /// Custom structure (code 5).
    Custom,
    /// Unspecified neurite (code 6).
    UnspecifiedNeurite,
    /// Glial process (code 7).
    GlialProcess,
}

/// Code and display label for every type, indexed by `code - 1`.
const TYPE_TABLE: [(SampleType, &str); 7] = [
    (SampleType::Soma, "Soma"),
    (SampleType::Axon, "Axon"),
    (SampleType::BasalDendrite, "Basal Dendrite"),
    (SampleType::ApicalDendrite, "Apical Dendrite"),
    (SampleType::Custom, "Custom"),
    (SampleType::UnspecifiedNeurite, "Unspecified Neurites"),
    (SampleType::GlialProcess, "Glial Process"),
];

impl SampleType {
    /// All types in code order.
    pub const ALL: [Self; 7] = [
        Self::Soma,
        Self::Axon,
        Self::BasalDendrite,
        Self::ApicalDendrite,
        Self::Custom,
        Self::UnspecifiedNeurite,
        Self::GlialProcess,
    ];

    /// Look up a type by its SWC code.
    ///
    /// Returns `None` for codes outside `1..=7`.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        let index = usize::try_from(code.checked_sub(1)?).ok()?;
        TYPE_TABLE.get(index).map(|(kind, _)| *kind)
    }

    /// The SWC code of this type.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Soma => 1,
            Self::Axon => 2,
            Self::BasalDendrite => 3,
            Self::ApicalDendrite => 4,
            Self::Custom => 5,
            Self::UnspecifiedNeurite => 6,
            Self::GlialProcess => 7,
        }
    }

    /// Human-readable label used to name objects derived from this type.
    #[must_use]
    pub const fn label(self) -> &'static str {
        TYPE_TABLE[self.code() as usize - 1].1
    }

    /// Whether this is the cell body type.
    #[must_use]
    pub const fn is_soma(self) -> bool {
        matches!(self, Self::Soma)
    }
}

impl std::fmt::Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One reconstruction point.
///
/// `parent` is `None` for the root of a sub-tree (the `-1` sentinel in the
/// file).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Sample id, 1-based and unique within the file.
    pub id: u32,
    /// Structure type.
    pub kind: SampleType,
    /// Position in micrometres.
    pub position: Point3<f64>,
    /// Radius in micrometres.
    pub radius: f64,
    /// Parent sample id, or `None` for a root.
    pub parent: Option<u32>,
    /// Physical line of the file the sample was read from (1-based).
    pub line: usize,
}

impl Sample {
    /// Create a sample. The source line is set to 0.
    #[must_use]
    pub const fn new(
        id: u32,
        kind: SampleType,
        position: Point3<f64>,
        radius: f64,
        parent: Option<u32>,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            radius,
            parent,
            line: 0,
        }
    }

    /// Whether this sample is the root of its own sub-tree.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this sample simply continues the chain of the sample with
    /// the previous id, i.e. `id == parent + 1`.
    #[must_use]
    pub fn continues_previous(&self) -> bool {
        self.parent
            .and_then(|parent| parent.checked_add(1))
            .is_some_and(|next| next == self.id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_table() {
        for kind in SampleType::ALL {
            assert_eq!(SampleType::from_code(i64::from(kind.code())), Some(kind));
        }
    }

    #[test]
    fn out_of_range_codes_are_rejected() {
        assert_eq!(SampleType::from_code(0), None);
        assert_eq!(SampleType::from_code(8), None);
        assert_eq!(SampleType::from_code(-1), None);
        assert_eq!(SampleType::from_code(i64::MIN), None);
    }

    #[test]
    fn labels() {
        assert_eq!(SampleType::Axon.label(), "Axon");
        assert_eq!(SampleType::BasalDendrite.label(), "Basal Dendrite");
        assert_eq!(SampleType::ApicalDendrite.to_string(), "Apical Dendrite");
        assert_eq!(SampleType::UnspecifiedNeurite.label(), "Unspecified Neurites");
        assert_eq!(SampleType::GlialProcess.label(), "Glial Process");
        assert!(SampleType::Soma.is_soma());
        assert!(!SampleType::Custom.is_soma());
    }

    #[test]
    fn continuation_check() {
        let origin = Point3::origin();
        let chained = Sample::new(5, SampleType::Axon, origin, 1.0, Some(4));
        let branched = Sample::new(5, SampleType::Axon, origin, 1.0, Some(2));
        let root = Sample::new(5, SampleType::Axon, origin, 1.0, None);
        assert!(chained.continues_previous());
        assert!(!branched.continues_previous());
        assert!(!root.continues_previous());
        assert!(root.is_root());
    }
}
