use glam::{Mat4, Vec3};
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::light::LightRegistry;
use crate::scene::node::{NodeKind, SceneNode};
use crate::scene::transform_system;

/// Scene graph
///
/// Arena of nodes addressed by stable [`NodeHandle`]s, rooted at a single
/// root node created with the scene. Nodes live as long as the scene;
/// there is no removal.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, SceneNode>,
    root: NodeHandle,
    lights: LightRegistry,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new());
        Self {
            nodes,
            root,
            lights: LightRegistry::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Creates a detached plain geometry node with identity defaults.
    pub fn create_node(&mut self) -> NodeHandle {
        self.nodes.insert(SceneNode::new())
    }

    /// Creates a detached node of the given kind.
    pub fn create_node_with_kind(&mut self, kind: NodeKind) -> NodeHandle {
        self.nodes.insert(SceneNode::with_kind(kind))
    }

    /// Creates a detached point light node holding the next light index.
    pub fn create_light_node(&mut self, color: Vec3) -> NodeHandle {
        let light = self.lights.allocate(color);
        self.nodes.insert(SceneNode::with_kind(NodeKind::PointLight(light)))
    }

    /// Creates a detached spot light node. It takes an index from the same
    /// counter as point lights but is never uploaded by the light walk.
    pub fn create_spot_light_node(&mut self, color: Vec3) -> NodeHandle {
        let light = self.lights.allocate(color);
        self.nodes.insert(SceneNode::with_kind(NodeKind::SpotLight(light)))
    }

    /// Appends `child` to `parent`'s child list.
    ///
    /// A child that already has a parent is moved. Cycles are not checked:
    /// the caller keeps the hierarchy a tree.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }

        // 1. Detach from old
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent
            && let Some(n) = self.nodes.get_mut(p)
            && let Some(i) = n.children.iter().position(|&x| x == child)
        {
            n.children.remove(i);
        }

        // 2. Attach to new
        let Some(c) = self.nodes.get_mut(child) else {
            log::error!("Child node not found during attach!");
            return;
        };
        c.parent = Some(parent);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
    }

    /// Number of nodes in the subtree under `node`, excluding `node`.
    #[must_use]
    pub fn count_descendants(&self, node: NodeHandle) -> usize {
        let mut count = 0;
        let mut stack = vec![node];
        while let Some(handle) = stack.pop() {
            if let Some(n) = self.nodes.get(handle) {
                count += n.children.len();
                stack.extend_from_slice(&n.children);
            }
        }
        count
    }

    /// Get a read-only reference
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(handle)
    }

    /// Get a mutable reference (for editing the transform)
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut SceneNode> {
        self.nodes.get_mut(handle)
    }

    /// Number of light indices handed out
    #[inline]
    #[must_use]
    pub fn light_count(&self) -> u32 {
        self.lights.count()
    }

    /// Depth-first pre-order walk starting at `start` (inclusive).
    #[must_use]
    pub fn iter_pre_order(&self, start: NodeHandle) -> PreOrder<'_> {
        PreOrder {
            nodes: &self.nodes,
            stack: vec![start],
        }
    }

    // ========================================================================
    // Matrix update pipeline
    // ========================================================================

    /// Recomputes world matrices of everything under the root. Must run
    /// every frame after game logic and before rendering.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy(&mut self.nodes, self.root, Mat4::IDENTITY);
    }

    /// Recomputes one subtree against its parent's cached world matrix.
    pub fn update_subtree(&mut self, handle: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, handle);
    }
}

/// Iterator returned by [`Scene::iter_pre_order`].
pub struct PreOrder<'a> {
    nodes: &'a SlotMap<NodeHandle, SceneNode>,
    stack: Vec<NodeHandle>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (NodeHandle, &'a SceneNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.stack.pop() {
            if let Some(node) = self.nodes.get(handle) {
                self.stack.extend(node.children.iter().rev());
                return Some((handle, node));
            }
        }
        None
    }
}
