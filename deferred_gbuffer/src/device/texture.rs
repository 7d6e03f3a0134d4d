/// Texture identifiers, formats and sampling parameters

use std::fmt;

/// Texture identifier as handed out by the graphics API
///
/// Zero is reserved for "no texture", matching the GL convention that
/// binding texture 0 unbinds the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TextureId(pub u32);

impl TextureId {
    /// The null texture
    pub const NONE: TextureId = TextureId(0);

    /// Returns true for the null texture
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Returns true for any real texture
    pub fn is_some(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Texture binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureTarget {
    Texture2D,
}

/// Internal (GPU-side) storage format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalFormat {
    /// 8 bits per channel RGBA
    Rgba8,
    /// 32-bit float depth
    DepthComponent32F,
}

/// External pixel layout of uploaded data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba,
    DepthComponent,
}

/// External component type of uploaded data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelType {
    UnsignedByte,
    Float,
}

/// Texture coordinate wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    ClampToBorder,
}

/// Texture min/mag filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Linear,
}

/// How a depth texture is returned when sampled by fixed-function paths
///
/// Only honored by compatibility profiles; core profiles ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthTextureMode {
    Luminance,
}

/// A single texture parameter assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureParameter {
    WrapS(TextureWrap),
    WrapT(TextureWrap),
    MinFilter(TextureFilter),
    MagFilter(TextureFilter),
    DepthTextureMode(DepthTextureMode),
}

/// Storage-only allocation of a 2D texture level (no pixel data)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureStorageDesc {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// GPU-side format
    pub internal_format: InternalFormat,
    /// Layout of the (absent) source data
    pub format: PixelFormat,
    /// Component type of the (absent) source data
    pub pixel_type: PixelType,
}
