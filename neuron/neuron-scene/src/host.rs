//! Replaying a plan into a host application.

use crate::plan::{SceneNode, ScenePlan};

/// A scene graph that can create objects and parent them.
///
/// Implemented by host bindings (a DCC plugin, a file exporter). The
/// planner never calls it directly; see [`realize`].
pub trait SceneHost {
    /// Reference to a created object.
    type Handle: Copy;
    /// Host failure.
    type Error;

    /// Create a top-level object for `node`.
    ///
    /// # Errors
    ///
    /// Host specific.
    fn create_node(&mut self, node: &SceneNode) -> Result<Self::Handle, Self::Error>;

    /// Move `child` under `parent`, after any existing children.
    ///
    /// # Errors
    ///
    /// Host specific.
    fn insert_under(&mut self, child: Self::Handle, parent: Self::Handle) -> Result<(), Self::Error>;
}

/// Create every node of `plan` in `host`.
///
/// Parents are created before their children and children are inserted in
/// plan order, so the host ends up with the plan's hierarchy. Returns the
/// handles of the top-level nodes.
///
/// # Errors
///
/// Stops at and returns the first host error.
pub fn realize<H: SceneHost>(plan: &ScenePlan, host: &mut H) -> Result<Vec<H::Handle>, H::Error> {
    let mut handles: Vec<Option<H::Handle>> = vec![None; plan.len()];
    for id in plan.walk() {
        let Some(node) = plan.node(id) else { continue };
        let handle = host.create_node(node)?;
        if let Some(parent) = node.parent().and_then(|p| handles[p]) {
            host.insert_under(handle, parent)?;
        }
        handles[id] = Some(handle);
    }
    Ok(plan.roots().iter().filter_map(|r| handles[*r]).collect())
}
