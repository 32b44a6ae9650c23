//! SWC neuron morphology reading.
//!
//! SWC is the plain-text point-tree format served by
//! [neuromorpho.org](https://neuromorpho.org). Each record is one sample of
//! a reconstructed neuron: an id, a structure type, a position, a radius and
//! the id of its parent sample. This crate provides:
//!
//! - [`parse_swc`] / [`read_swc`] - typed [`Sample`] records, split into
//!   soma and neurite views ([`SwcDocument`])
//! - [`TreeIndex`] - id lookup and child lists, validating that every
//!   parent reference points backwards to a known sample
//!
//! Units are micrometres, as in the source archive.
//!
//! # Example
//!
//! ```
//! use swc_io::{parse_swc, SampleType, TreeIndex};
//!
//! let text = "\
//! ## a three point soma with one dendrite
//! 1 1 0 0 0 4 -1
//! 2 1 0 -4 0 4 1
//! 3 1 0 4 0 4 1
//! 4 3 0 -6 0 1 2
//! 5 3 0 -9 1 0.8 4
//! ";
//! let doc = parse_swc(text).unwrap();
//! let index = TreeIndex::build(doc.samples()).unwrap();
//!
//! assert_eq!(doc.soma_samples().len(), 3);
//! assert_eq!(doc.neurite_samples()[0].kind, SampleType::BasalDendrite);
//! assert_eq!(index.parent_of(4).map(|s| s.id), Some(2));
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization of [`Sample`] and [`SampleType`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod parser;
mod sample;
mod tree;

pub use error::{SwcError, SwcResult};
pub use parser::{FIELD_COUNT, SwcDocument, parse_swc, read_swc, read_swc_from};
pub use sample::{Sample, SampleType};
pub use tree::TreeIndex;

pub use nalgebra::Point3;
