//! Turn SWC neuron reconstructions into sweepable path segments.
//!
//! A neuron tree is cut into maximal unbranched segments. Each segment is
//! emitted as a center line (starting at the branch point it hangs off)
//! plus a parallel "rail" offset by the sample radius, which is what a
//! sweep surface needs to build a tube of varying thickness.
//!
//! # Pipeline
//!
//! 1. [`swc_io::parse_swc`] - records, split into soma and neurites
//! 2. [`swc_io::TreeIndex`] - id lookup, parent validation
//! 3. [`partition`] - segments with resolved anchors
//! 4. [`emit_segment`] / [`build_soma`] - path, radii and rail geometry
//!
//! [`build_paths`] runs all of it.
//!
//! # Quick Start
//!
//! ```
//! use neuron_paths::{build_paths_from_str, PathConfig};
//!
//! let text = "\
//! 1 1 0 0 0 5 -1
//! 2 3 0 -6 0 1.2 1
//! 3 3 0 -9 0 1.0 2
//! 4 3 2 -12 0 0.8 3
//! 5 3 -2 -12 0 0.8 3
//! ";
//! let paths = build_paths_from_str(text, &PathConfig::default()).unwrap();
//!
//! // trunk 2-3-4 hangs off the soma, 5 branches off 3
//! assert_eq!(paths.segments.len(), 2);
//! assert_eq!(paths.segments[0].path.len(), 4);
//! assert_eq!(paths.segments[1].path.len(), 2);
//! ```
//!
//! # Coordinate Convention
//!
//! SWC data is right-handed. By default the Z axis of every emitted point
//! is negated for left-handed hosts; see [`PathConfig::flip_handedness`].
//! Rails are offset along +X before the flip unless
//! [`RailOffset::TransportNormal`] is chosen.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization of configuration and emitted geometry

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod config;
mod emit;
mod error;
mod handedness;
mod partition;
mod pipeline;
mod soma;
mod transport;

pub use config::{Axis, DegeneratePolicy, PathConfig, RailOffset};
pub use emit::{MIN_PATH_POINTS, SegmentPath, emit_segment};
pub use error::{PathError, PathResult};
pub use handedness::{flip_point, to_host};
pub use partition::{Segment, boundary_positions, partition};
pub use pipeline::{
    NeuronPaths, SkippedSegment, build_paths, build_paths_from_file, build_paths_from_str,
};
pub use soma::{SomaPath, build_soma};
pub use transport::transport_normals;
