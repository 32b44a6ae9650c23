//! The scene hierarchy as plain data.
//!
//! A [`ScenePlan`] is an arena of named nodes. Nothing here talks to a host
//! application; [`crate::realize`] replays a plan into one.
//!
//! Layout for a file with stem `cell`, default options:
//!
//! ```text
//! SDS_cell
//! └── Connect_cell
//!     └── groupNull_cell
//!         ├── Soma Sweep
//!         │   ├── Soma
//!         │   └── Profile
//!         └── Axon 0
//!             ├── Axon 0 Rail
//!             ├── Axon 0
//!             └── Profile
//! Component_Splines_cell
//! Component_Rail_Splines_cell
//! ```

use std::fmt;

use nalgebra::Point3;
use neuron_paths::{NeuronPaths, PathConfig};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;
use crate::error::{SceneError, SceneResult};
use crate::options::SceneOptions;

/// Index of a node in its [`ScenePlan`].
pub type NodeId = usize;

/// What a scene node is, with the parameters the host needs to build it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum NodeKind {
    /// Empty container.
    Group,
    /// Linear spline; one piece per joined source spline.
    Spline {
        /// Point runs, each an open polyline.
        pieces: Vec<Vec<Point3<f64>>>,
    },
    /// Sweep surface over its child splines.
    Sweep {
        /// Phong smoothing angle in degrees.
        phong_angle: f64,
    },
    /// Regular polygon used as the sweep cross-section.
    Profile {
        /// Number of sides.
        sides: u8,
        /// Circumradius.
        radius: f64,
    },
    /// Merges child geometry into one object.
    Connect {
        /// Whether coincident points are welded.
        weld: bool,
    },
    /// Subdivision surface.
    Subdivision,
    /// Voxelizes child geometry.
    VolumeBuilder {
        /// Grid spacing.
        voxel_size: f64,
    },
    /// Polygonizes a volume.
    VolumeMesher {
        /// Iso threshold.
        threshold: f64,
    },
}

impl NodeKind {
    fn spline(points: &[Point3<f64>]) -> Self {
        Self::Spline {
            pieces: vec![points.to_vec()],
        }
    }

    /// Short lowercase label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Spline { .. } => "spline",
            Self::Sweep { .. } => "sweep",
            Self::Profile { .. } => "profile",
            Self::Connect { .. } => "connect",
            Self::Subdivision => "subdivision",
            Self::VolumeBuilder { .. } => "volume builder",
            Self::VolumeMesher { .. } => "volume mesher",
        }
    }
}

/// A named node and its place in the hierarchy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneNode {
    /// Object name in the host scene.
    pub name: String,
    /// Node type and parameters.
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    /// Parent node, `None` for a top-level node.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Total points over all pieces; zero for non-spline nodes.
    #[must_use]
    pub fn point_count(&self) -> usize {
        match &self.kind {
            NodeKind::Spline { pieces } => pieces.iter().map(Vec::len).sum(),
            _ => 0,
        }
    }
}

/// Host-independent description of the objects built for one neuron.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScenePlan {
    stem: String,
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
}

impl ScenePlan {
    fn new(stem: &str) -> Self {
        Self {
            stem: stem.to_string(),
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn push(&mut self, name: impl Into<String>, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SceneNode {
            name: name.into(),
            kind,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Put a new node above the top-level node `inner`, in its place.
    fn wrap(&mut self, inner: NodeId, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SceneNode {
            name: name.into(),
            kind,
            parent: None,
            children: vec![inner],
        });
        self.nodes[inner].parent = Some(id);
        for root in &mut self.roots {
            if *root == inner {
                *root = id;
            }
        }
        id
    }

    /// File stem used in the node names.
    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the plan has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Top-level nodes in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// First node with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name)
    }

    /// All node ids, every parent before its children.
    #[must_use]
    pub fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev());
        }
        order
    }

    /// Names from the top-level node down to `id`.
    #[must_use]
    pub fn ancestry(&self, id: NodeId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = self.nodes.get(id);
        while let Some(node) = current {
            names.push(node.name.as_str());
            current = node.parent.and_then(|p| self.nodes.get(p));
        }
        names.reverse();
        names
    }

    fn depth(&self, id: NodeId) -> usize {
        self.ancestry(id).len().saturating_sub(1)
    }
}

impl fmt::Display for ScenePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.walk() {
            let node = &self.nodes[id];
            writeln!(
                f,
                "{:indent$}{} ({})",
                "",
                node.name,
                node.kind.label(),
                indent = self.depth(id) * 2
            )?;
        }
        Ok(())
    }
}

/// Lay out the scene for one neuron.
///
/// `stem` is the input file name without extension; it suffixes the group,
/// wrapper and component names so that several neurons can share a scene.
///
/// # Errors
///
/// Returns [`SceneError::InvalidOptions`] if the options (or the profile
/// side count carried by `paths`) are out of range, and
/// [`SceneError::NoVolumeExtent`] if a volume builder is requested but the
/// segment paths span no space.
///
/// # Example
///
/// ```
/// use neuron_paths::{build_paths_from_str, PathConfig};
/// use neuron_scene::{plan_scene, SceneOptions};
///
/// let paths = build_paths_from_str(
///     "1 1 0 0 0 5 -1\n2 2 0 -6 0 1 1\n3 2 0 -9 0 0.5 2\n",
///     &PathConfig::default(),
/// )
/// .unwrap();
/// let plan = plan_scene(&paths, &SceneOptions::default(), "cell").unwrap();
///
/// let axon = plan.find("Axon 0 Rail").unwrap();
/// assert_eq!(
///     plan.ancestry(axon),
///     vec!["SDS_cell", "Connect_cell", "groupNull_cell", "Axon 0", "Axon 0 Rail"]
/// );
/// ```
pub fn plan_scene(
    paths: &NeuronPaths,
    options: &SceneOptions,
    stem: &str,
) -> SceneResult<ScenePlan> {
    options.validate()?;
    let sides = paths.profile_sides;
    if options.sweep
        && !(PathConfig::MIN_PROFILE_SIDES..=PathConfig::MAX_PROFILE_SIDES).contains(&sides)
    {
        return Err(SceneError::invalid_options(format!(
            "profile sides must be in {}..={}, got {sides}",
            PathConfig::MIN_PROFILE_SIDES,
            PathConfig::MAX_PROFILE_SIDES
        )));
    }

    let mut plan = ScenePlan::new(stem);
    let group = plan.push(format!("groupNull_{stem}"), NodeKind::Group, None);
    let sweep = NodeKind::Sweep {
        phong_angle: options.phong_angle,
    };

    if let Some(soma) = paths.soma.as_ref().filter(|_| options.include_soma) {
        let spline = NodeKind::spline(&soma.path);
        if options.sweep {
            let node = plan.push("Soma Sweep", sweep.clone(), Some(group));
            plan.push("Soma", spline, Some(node));
            let radius = soma.profile_radius();
            plan.push("Profile", NodeKind::Profile { sides, radius }, Some(node));
        } else {
            plan.push("Soma", spline, Some(group));
        }
    }

    for segment in &paths.segments {
        let holder = if options.sweep {
            plan.push(segment.name.clone(), sweep.clone(), Some(group))
        } else {
            group
        };
        if let Some(rail) = &segment.rail {
            plan.push(format!("{} Rail", segment.name), NodeKind::spline(rail), Some(holder));
        }
        plan.push(segment.name.clone(), NodeKind::spline(&segment.path), Some(holder));
        if options.sweep {
            let radius = segment.end_radius();
            plan.push("Profile", NodeKind::Profile { sides, radius }, Some(holder));
        }
    }

    if options.single_spline {
        let pieces = paths.segments.iter().map(|s| s.path.clone()).collect();
        plan.push(
            format!("Component_Splines_{stem}"),
            NodeKind::Spline { pieces },
            None,
        );
        let rails: Vec<_> = paths.segments.iter().filter_map(|s| s.rail.clone()).collect();
        if !rails.is_empty() {
            plan.push(
                format!("Component_Rail_Splines_{stem}"),
                NodeKind::Spline { pieces: rails },
                None,
            );
        }
    }

    let mut outer = group;
    if options.connect {
        outer = plan.wrap(outer, format!("Connect_{stem}"), NodeKind::Connect { weld: false });
    }
    if options.subdivision {
        outer = plan.wrap(outer, format!("SDS_{stem}"), NodeKind::Subdivision);
    }
    if options.volume_builder {
        let voxel_size = Aabb::of_segments(paths)
            .voxel_size(options.voxel_divisions)
            .ok_or_else(|| SceneError::NoVolumeExtent {
                stem: stem.to_string(),
            })?;
        outer = plan.wrap(
            outer,
            format!("Volume_Builder_{stem}"),
            NodeKind::VolumeBuilder { voxel_size },
        );
    }
    if options.volume_mesher {
        plan.wrap(
            outer,
            format!("Volume_Mesher_{stem}"),
            NodeKind::VolumeMesher {
                threshold: options.mesher_threshold,
            },
        );
    }

    debug!(stem, nodes = plan.len(), roots = plan.roots().len(), "planned scene");
    Ok(plan)
}
