use std::borrow::Cow;

/// How texel values are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    #[default]
    Srgb,
    Linear,
}

/// A texture reference. Decoding and upload belong to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    /// Path or URI of the image.
    pub source: Cow<'static, str>,
    pub color_space: ColorSpace,
    /// Maximum anisotropic filtering samples; 1 disables it.
    pub anisotropy: u16,
    pub generate_mipmaps: bool,
}

impl Texture {
    #[must_use]
    pub fn new(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            source: source.into(),
            color_space: ColorSpace::Srgb,
            anisotropy: 1,
            generate_mipmaps: true,
        }
    }

    #[must_use]
    pub fn with_color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    #[must_use]
    pub fn with_anisotropy(mut self, anisotropy: u16) -> Self {
        self.anisotropy = anisotropy.max(1);
        self
    }
}
