/// Opaque texture handle owned by the texture provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// The three texture units bound for normal-mapped geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialTextures {
    /// Bound to unit 0
    pub diffuse: TextureHandle,
    /// Bound to unit 1
    pub normal: TextureHandle,
    /// Bound to unit 2
    pub roughness: TextureHandle,
}

impl MaterialTextures {
    #[must_use]
    pub const fn new(diffuse: TextureHandle, normal: TextureHandle, roughness: TextureHandle) -> Self {
        Self {
            diffuse,
            normal,
            roughness,
        }
    }
}
