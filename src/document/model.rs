use std::sync::Arc;

use crate::document::logger::{Logger, TracingLogger};
use crate::foundation::error::{SquooshError, SquooshResult};

/// Link name used for untyped texture bindings; never reported as a slot.
pub const GENERIC_TEXTURE_SLOT: &str = "texture";

/// Position of a texture in its document's texture list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(pub usize);

/// Image payload entity of a scene graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Texture {
    image: Vec<u8>,
    mime_type: String,
    uri: Option<String>,
    name: Option<String>,
}

impl Texture {
    /// Create a texture from encoded image bytes and their MIME type.
    pub fn new(image: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            image,
            mime_type: mime_type.into(),
            uri: None,
            name: None,
        }
    }

    /// Builder-style URI setter.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Builder-style name setter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Encoded image bytes.
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Replace the encoded image bytes.
    pub fn set_image(&mut self, image: Vec<u8>) -> &mut Self {
        self.image = image;
        self
    }

    /// MIME type of [`Self::image`], e.g. `image/png`.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Replace the MIME type.
    pub fn set_mime_type(&mut self, mime_type: impl Into<String>) -> &mut Self {
        self.mime_type = mime_type.into();
        self
    }

    /// URI the texture is stored at, if any.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref().filter(|u| !u.is_empty())
    }

    /// Replace (or clear) the URI.
    pub fn set_uri(&mut self, uri: Option<String>) -> &mut Self {
        self.uri = uri;
        self
    }

    /// Display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Replace (or clear) the display name.
    pub fn set_name(&mut self, name: Option<String>) -> &mut Self {
        self.name = name;
        self
    }
}

/// Named binding from a consumer (e.g. a material channel) to a texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Binding name, e.g. `baseColorTexture`.
    pub name: String,
    /// Free-form label of the consuming entity, e.g. `material/0`.
    pub parent: String,
    /// Bound texture.
    pub child: TextureId,
}

/// In-memory scene graph: textures, the links that bind them, and declared extensions.
#[derive(Clone)]
pub struct Document {
    textures: Vec<Texture>,
    links: Vec<Link>,
    extensions_used: Vec<String>,
    extensions_required: Vec<String>,
    logger: Arc<dyn Logger>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("textures", &self.textures.len())
            .field("links", &self.links)
            .field("extensions_used", &self.extensions_used)
            .field("extensions_required", &self.extensions_required)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create an empty document logging through [`TracingLogger`].
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
            links: Vec::new(),
            extensions_used: Vec::new(),
            extensions_required: Vec::new(),
            logger: Arc::new(TracingLogger),
        }
    }

    /// Replace the logger sink.
    pub fn set_logger(&mut self, logger: Arc<dyn Logger>) -> &mut Self {
        self.logger = logger;
        self
    }

    /// Logger sink for diagnostics.
    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Append a texture and return its id.
    pub fn add_texture(&mut self, texture: Texture) -> TextureId {
        self.textures.push(texture);
        TextureId(self.textures.len() - 1)
    }

    /// All textures in document order.
    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    /// Look up a texture.
    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id.0)
    }

    /// Look up a texture for mutation.
    pub fn texture_mut(&mut self, id: TextureId) -> Option<&mut Texture> {
        self.textures.get_mut(id.0)
    }

    /// Bind `child` to a consumer under the slot name `name`.
    pub fn add_link(
        &mut self,
        name: impl Into<String>,
        parent: impl Into<String>,
        child: TextureId,
    ) -> SquooshResult<()> {
        if child.0 >= self.textures.len() {
            return Err(SquooshError::validation(format!(
                "link target texture {} out of range ({} textures)",
                child.0,
                self.textures.len()
            )));
        }
        self.links.push(Link {
            name: name.into(),
            parent: parent.into(),
            child,
        });
        Ok(())
    }

    /// All links in insertion order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Slot names bound to `id`, in first-seen link order, without duplicates and without the
    /// generic [`GENERIC_TEXTURE_SLOT`] binding.
    pub fn texture_slots(&self, id: TextureId) -> Vec<String> {
        let mut slots = Vec::<String>::new();
        for link in self.links.iter().filter(|l| l.child == id) {
            if link.name == GENERIC_TEXTURE_SLOT || slots.contains(&link.name) {
                continue;
            }
            slots.push(link.name.clone());
        }
        slots
    }

    /// Declare a document-level extension as used, and optionally as required.
    ///
    /// Declaring the same extension twice is a no-op; `required` is sticky once set.
    pub fn declare_extension(&mut self, name: &str, required: bool) {
        if !self.extensions_used.iter().any(|e| e == name) {
            self.extensions_used.push(name.to_string());
        }
        if required && !self.extensions_required.iter().any(|e| e == name) {
            self.extensions_required.push(name.to_string());
        }
    }

    /// Declared extensions, in declaration order.
    pub fn extensions_used(&self) -> &[String] {
        &self.extensions_used
    }

    /// Extensions declared as required, in declaration order.
    pub fn extensions_required(&self) -> &[String] {
        &self.extensions_required
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
