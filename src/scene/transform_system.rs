//! Transform System
//!
//! Recomputes world and normal matrices for the node hierarchy, top-down.
//! Kept apart from [`Scene`](crate::scene::Scene) so it only borrows the
//! node arena.
//!
//! No dirty tracking: every reachable node is recomputed every frame.

use glam::Mat4;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::SceneNode;
use crate::scene::transform::normal_matrix_of;

/// Updates the subtree rooted at `root`, treating `parent_world` as the
/// accumulated transform above it (identity for the true root).
///
/// Depth-first pre-order with an explicit stack; siblings are visited in
/// child-list order.
pub fn update_hierarchy(nodes: &mut SlotMap<NodeHandle, SceneNode>, root: NodeHandle, parent_world: Mat4) {
    // Work stack: (node handle, parent world matrix)
    let mut stack: Vec<(NodeHandle, Mat4)> = Vec::with_capacity(16);
    stack.push((root, parent_world));

    while let Some((node_handle, parent_world_matrix)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };

        update_single_node(node, &parent_world_matrix);

        // Reverse push keeps child-list order on pop
        let current_world = node.transform.world_matrix;
        for &child_handle in node.children.iter().rev() {
            stack.push((child_handle, current_world));
        }
    }
}

/// Updates `root` and its descendants using the cached world matrix of its
/// parent (identity if it has none).
pub fn update_subtree(nodes: &mut SlotMap<NodeHandle, SceneNode>, root: NodeHandle) {
    let Some(node) = nodes.get(root) else {
        return;
    };
    let parent_world = node
        .parent
        .and_then(|p| nodes.get(p))
        .map_or(Mat4::IDENTITY, |p| p.transform.world_matrix);

    update_hierarchy(nodes, root, parent_world);
}

/// Computes one node's world matrix, and its normal matrix for lit
/// geometry kinds. Children are not touched.
pub fn update_single_node(node: &mut SceneNode, parent_world: &Mat4) {
    let world = *parent_world * node.transform.local_matrix();
    node.transform.set_world_matrix(world);

    if node.kind.is_lit_geometry() {
        node.transform.set_normal_matrix(normal_matrix_of(&world));
    }
}
