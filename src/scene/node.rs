use std::fmt;

use crate::resources::{MaterialTextures, MeshHandle, TextureHandle};
use crate::scene::NodeHandle;
use crate::scene::light::{Light, LightIndex};
use crate::scene::transform::Transform;

/// How a node is updated and drawn.
///
/// A closed set: propagation and both render walks match on it
/// exhaustively. Light attributes live inside the light variants, so a
/// non-light node has no light index by construction.
#[derive(Debug)]
pub enum NodeKind {
    /// Diffuse world geometry without a normal map
    Geometry,
    /// Screen-space overlay drawn with the 2D projection
    Geometry2D { texture: TextureHandle },
    /// World geometry with diffuse, normal and roughness maps
    NormalMappedGeometry { textures: MaterialTextures },
    PointLight(Light),
    SpotLight(Light),
}

impl NodeKind {
    /// Kinds that carry a normal matrix.
    #[inline]
    #[must_use]
    pub fn is_lit_geometry(&self) -> bool {
        matches!(self, Self::Geometry | Self::NormalMappedGeometry { .. })
    }

    #[inline]
    #[must_use]
    pub fn light(&self) -> Option<&Light> {
        match self {
            Self::PointLight(light) | Self::SpotLight(light) => Some(light),
            Self::Geometry | Self::Geometry2D { .. } | Self::NormalMappedGeometry { .. } => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Geometry => "Geometry",
            Self::Geometry2D { .. } => "Geometry2D",
            Self::NormalMappedGeometry { .. } => "NormalMappedGeometry",
            Self::PointLight(_) => "PointLight",
            Self::SpotLight(_) => "SpotLight",
        }
    }
}

/// A scene graph node.
///
/// Nodes are created once during scene construction and never removed.
/// Each node owns an ordered child list (insertion order is update and draw
/// order) and has at most one parent.
#[derive(Debug)]
pub struct SceneNode {
    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    pub transform: Transform,

    // === Rendering ===
    pub kind: NodeKind,
    /// `None` means "no geometry"; the draw walk skips the node.
    pub mesh: Option<MeshHandle>,
}

impl SceneNode {
    /// Creates a plain geometry node with identity transform and no mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::with_kind(NodeKind::Geometry)
    }

    #[must_use]
    pub fn with_kind(kind: NodeKind) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            kind,
            mesh: None,
        }
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Shader light slot, `None` for non-light nodes.
    #[inline]
    #[must_use]
    pub fn light_index(&self) -> Option<LightIndex> {
        self.kind.light().map(Light::index)
    }
}

impl Default for SceneNode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.transform;
        writeln!(f, "SceneNode {{")?;
        writeln!(f, "    Kind: {}", self.kind.label())?;
        writeln!(f, "    Child count: {}", self.children.len())?;
        writeln!(f, "    Rotation: ({}, {}, {})", t.rotation.x, t.rotation.y, t.rotation.z)?;
        writeln!(f, "    Location: ({}, {}, {})", t.position.x, t.position.y, t.position.z)?;
        writeln!(
            f,
            "    Reference point: ({}, {}, {})",
            t.reference_point.x, t.reference_point.y, t.reference_point.z
        )?;
        match self.mesh {
            Some(mesh) => writeln!(f, "    Mesh: buffer {} ({} indices)", mesh.vertex_buffer, mesh.index_count)?,
            None => writeln!(f, "    Mesh: none")?,
        }
        write!(f, "}}")
    }
}
