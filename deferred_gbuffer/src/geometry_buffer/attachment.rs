/// Attachment roles and the fixed-length attachment table

use crate::device::{Attachment, InternalFormat, PixelFormat, PixelType, TextureId};

/// Number of textures in a geometry buffer (four color + one depth)
pub const ATTACHMENT_COUNT: usize = 5;

/// Role of each slot in the attachment table
///
/// Color slots come first, in COLOR0.. order; the depth slot is always last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentSlot {
    Normal,
    Diffuse,
    Specular,
    Emission,
    Depth,
}

impl AttachmentSlot {
    /// All slots in table order
    pub const ALL: [AttachmentSlot; ATTACHMENT_COUNT] = [
        AttachmentSlot::Normal,
        AttachmentSlot::Diffuse,
        AttachmentSlot::Specular,
        AttachmentSlot::Emission,
        AttachmentSlot::Depth,
    ];

    /// Slots bound to color attachment points
    pub const COLOR: [AttachmentSlot; ATTACHMENT_COUNT - 1] = [
        AttachmentSlot::Normal,
        AttachmentSlot::Diffuse,
        AttachmentSlot::Specular,
        AttachmentSlot::Emission,
    ];

    /// Index in the attachment table
    pub fn index(&self) -> usize {
        match self {
            AttachmentSlot::Normal => 0,
            AttachmentSlot::Diffuse => 1,
            AttachmentSlot::Specular => 2,
            AttachmentSlot::Emission => 3,
            AttachmentSlot::Depth => 4,
        }
    }

    /// Slot at table index, if any
    pub fn from_index(index: usize) -> Option<AttachmentSlot> {
        Self::ALL.get(index).copied()
    }

    pub fn is_depth(&self) -> bool {
        matches!(self, AttachmentSlot::Depth)
    }

    /// Framebuffer attachment point this slot is bound to
    pub fn attachment(&self) -> Attachment {
        if self.is_depth() {
            Attachment::Depth
        } else {
            Attachment::Color(self.index() as u32)
        }
    }

    pub fn internal_format(&self) -> InternalFormat {
        if self.is_depth() {
            InternalFormat::DepthComponent32F
        } else {
            InternalFormat::Rgba8
        }
    }

    pub fn pixel_format(&self) -> PixelFormat {
        if self.is_depth() {
            PixelFormat::DepthComponent
        } else {
            PixelFormat::Rgba
        }
    }

    pub fn pixel_type(&self) -> PixelType {
        if self.is_depth() {
            PixelType::Float
        } else {
            PixelType::UnsignedByte
        }
    }
}

/// Texture identifiers and attachment points, one pair per slot
///
/// An all-zero table means the geometry buffer holds no textures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentTable {
    texture_ids: [TextureId; ATTACHMENT_COUNT],
    attachments: [Option<Attachment>; ATTACHMENT_COUNT],
}

impl AttachmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff any slot holds a texture
    pub fn has_attachments(&self) -> bool {
        self.texture_ids.iter().any(TextureId::is_some)
    }

    /// Zero every slot
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set(&mut self, slot: AttachmentSlot, texture: TextureId, attachment: Attachment) {
        self.texture_ids[slot.index()] = texture;
        self.attachments[slot.index()] = Some(attachment);
    }

    pub fn texture_id(&self, slot: AttachmentSlot) -> TextureId {
        self.texture_ids[slot.index()]
    }

    pub fn texture_ids(&self) -> &[TextureId; ATTACHMENT_COUNT] {
        &self.texture_ids
    }

    pub fn attachment(&self, slot: AttachmentSlot) -> Option<Attachment> {
        self.attachments[slot.index()]
    }

    /// Attachment points of the color slots that hold a texture
    pub fn color_attachments(&self) -> Vec<Attachment> {
        AttachmentSlot::COLOR
            .iter()
            .filter_map(|slot| self.attachment(*slot))
            .collect()
    }
}

#[cfg(test)]
#[path = "attachment_tests.rs"]
mod tests;
