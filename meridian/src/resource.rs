//! Shared store of decoded images used by symbolizers.
//!
//! The cache is filled by an external loader; symbolizers only read from it and register images under
//! additional keys once the natural size of a marker is known.

use crate::decoded_image::DecodedImage;
use crate::error::RenderError;
use ahash::HashMap;
use log::debug;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Key of an image resource: image reference plus the size it is drawn with.
///
/// Keys without dimensions address the image independently of its drawing size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    reference: String,
    width: Option<u32>,
    height: Option<u32>,
}

impl ResourceKey {
    /// Creates a new key.
    pub fn new(reference: impl Into<String>, width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            reference: reference.into(),
            width,
            height,
        }
    }

    /// Key with the reference only.
    pub fn url(reference: impl Into<String>) -> Self {
        Self::new(reference, None, None)
    }

    /// Image reference (url or file name).
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Width the image is drawn with.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Height the image is drawn with.
    pub fn height(&self) -> Option<u32> {
        self.height
    }
}

impl Display for ResourceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reference)?;
        match (self.width, self.height) {
            (None, None) => Ok(()),
            (w, h) => write!(
                f,
                " ({}x{})",
                w.map(|v| v.to_string()).unwrap_or_default(),
                h.map(|v| v.to_string()).unwrap_or_default()
            ),
        }
    }
}

/// Keyed store of decoded images.
pub trait ResourceCache {
    /// Returns true if an image is registered under the key.
    fn is_resource_loaded(&self, key: &ResourceKey) -> bool;
    /// Registers an image under the key. An existing entry is never replaced.
    fn add_resource(&mut self, key: ResourceKey, image: Arc<DecodedImage>);
    /// Image registered under the key.
    fn get_image(&self, key: &ResourceKey) -> Option<Arc<DecodedImage>>;
}

/// In-memory [`ResourceCache`].
#[derive(Debug, Default, Clone)]
pub struct ImageResources {
    images: HashMap<ResourceKey, Arc<DecodedImage>>,
}

impl ImageResources {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Decodes an encoded image (PNG, JPEG) and registers it under the key.
    #[cfg(feature = "image")]
    pub fn load_encoded(
        &mut self,
        key: ResourceKey,
        bytes: &[u8],
    ) -> Result<Arc<DecodedImage>, RenderError> {
        let image = Arc::new(DecodedImage::new(bytes)?);
        self.add_resource(key, image.clone());
        Ok(image)
    }

    /// Registers raw RGBA pixels under the key.
    pub fn load_raw(
        &mut self,
        key: ResourceKey,
        bytes: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Result<Arc<DecodedImage>, RenderError> {
        let image = Arc::new(DecodedImage::from_raw(bytes, width, height)?);
        self.add_resource(key, image.clone());
        Ok(image)
    }
}

impl ResourceCache for ImageResources {
    fn is_resource_loaded(&self, key: &ResourceKey) -> bool {
        self.images.contains_key(key)
    }

    fn add_resource(&mut self, key: ResourceKey, image: Arc<DecodedImage>) {
        self.images.entry(key).or_insert_with_key(|key| {
            debug!("Registered image resource {key}");
            image
        });
    }

    fn get_image(&self, key: &ResourceKey) -> Option<Arc<DecodedImage>> {
        self.images.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_resource_does_not_overwrite() {
        let mut resources = ImageResources::new();
        let key = ResourceKey::new("pin.png", Some(2), Some(2));
        let first = Arc::new(DecodedImage::solid([255, 0, 0, 255], 2, 2));
        let second = Arc::new(DecodedImage::solid([0, 0, 255, 255], 2, 2));

        resources.add_resource(key.clone(), first.clone());
        resources.add_resource(key.clone(), second);

        assert_eq!(resources.len(), 1);
        assert!(Arc::ptr_eq(&resources.get_image(&key).unwrap(), &first));
    }

    #[test]
    fn keys_with_and_without_size_are_distinct() {
        let mut resources = ImageResources::new();
        resources
            .load_raw(ResourceKey::url("pin.png"), vec![0; 4], 1, 1)
            .unwrap();

        assert!(resources.is_resource_loaded(&ResourceKey::url("pin.png")));
        assert!(!resources.is_resource_loaded(&ResourceKey::new("pin.png", Some(1), Some(1))));
        assert_eq!(
            ResourceKey::new("pin.png", Some(1), Some(2)).to_string(),
            "pin.png (1x2)"
        );
    }
}
