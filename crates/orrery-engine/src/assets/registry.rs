use crate::assets::manifest::AssetManifest;
use crate::components::mesh::TextureSlot;

/// Registry of named textures, built from an AssetManifest.
/// Slots are dense and assigned in key order, so the host can
/// upload textures by index.
pub struct TextureRegistry {
    entries: Vec<(String, String)>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Build a registry from a parsed AssetManifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        Self {
            entries: manifest
                .textures
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Slot for a texture key. Returns None if the key is not registered.
    pub fn slot(&self, key: &str) -> Option<TextureSlot> {
        self.entries
            .iter()
            .position(|(k, _)| k == key)
            .map(|i| TextureSlot(i as u32))
    }

    /// Image path bound to a slot.
    pub fn path(&self, slot: TextureSlot) -> Option<&str> {
        self.entries.get(slot.0 as usize).map(|(_, p)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_key_order() {
        let json = r#"{ "textures": { "mars": "m.jpg", "earth": "e.jpg" } }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let reg = TextureRegistry::from_manifest(&manifest);

        assert_eq!(reg.slot("earth"), Some(TextureSlot(0)));
        assert_eq!(reg.slot("mars"), Some(TextureSlot(1)));
        assert_eq!(reg.path(TextureSlot(1)), Some("m.jpg"));
    }

    #[test]
    fn unknown_returns_none() {
        let reg = TextureRegistry::new();
        assert!(reg.slot("pluto").is_none());
        assert!(reg.path(TextureSlot(0)).is_none());
    }
}
