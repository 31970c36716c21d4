use glam::Vec3;

/// Sequential slot of a light in the shader-side light array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightIndex(u32);

impl LightIndex {
    #[inline]
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Light attributes carried by light nodes.
///
/// Not `Clone`: a `Light` only comes out of the owning scene's registry,
/// and each index is held by exactly one node.
#[derive(Debug, PartialEq)]
pub struct Light {
    index: LightIndex,
    pub color: Vec3,
}

impl Light {
    #[inline]
    #[must_use]
    pub fn index(&self) -> LightIndex {
        self.index
    }
}

/// The single authoritative light counter of a scene.
///
/// Indices are handed out gaplessly from 0 and never reused. No upper bound
/// is enforced; the shader-side array capacity is the caller's contract.
#[derive(Debug, Default)]
pub(crate) struct LightRegistry {
    count: u32,
}

impl LightRegistry {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocates the next index (post-increment) and wraps it in a light.
    pub(crate) fn allocate(&mut self, color: Vec3) -> Light {
        let index = LightIndex(self.count);
        self.count += 1;
        Light { index, color }
    }

    /// Number of indices handed out so far
    #[inline]
    #[must_use]
    pub(crate) fn count(&self) -> u32 {
        self.count
    }
}
