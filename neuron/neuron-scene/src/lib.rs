//! Scene hierarchy for sweeping neuron path segments.
//!
//! [`plan_scene`] turns the output of [`neuron_paths::build_paths`] into a
//! [`ScenePlan`]: splines, sweeps, profiles and the optional connect,
//! subdivision and volume wrappers, all named the way NeuronBuild names
//! them in Cinema 4D. A host binding implements [`SceneHost`] and calls
//! [`realize`] to build the objects.
//!
//! # Example
//!
//! ```
//! use neuron_paths::{build_paths_from_str, PathConfig};
//! use neuron_scene::{plan_scene, SceneOptions};
//!
//! let paths = build_paths_from_str(
//!     "1 1 0 0 0 5 -1\n2 3 0 6 0 1 1\n3 3 0 9 0 1 2\n",
//!     &PathConfig::default(),
//! )
//! .unwrap();
//! let plan = plan_scene(&paths, &SceneOptions::default(), "cell").unwrap();
//! assert!(plan.find("Basal Dendrite 0 Rail").is_some());
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization of options and plans

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod error;
mod host;
mod options;
mod plan;

pub use bounds::Aabb;
pub use error::{SceneError, SceneResult};
pub use host::{SceneHost, realize};
pub use options::SceneOptions;
pub use plan::{NodeId, NodeKind, SceneNode, ScenePlan, plan_scene};
