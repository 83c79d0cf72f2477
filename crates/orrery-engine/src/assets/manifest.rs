use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Asset manifest describing the optional textures for a scene.
/// Loaded from a JSON document supplied by the host after init.
///
/// ```json
/// { "textures": { "earth": "textures/earth.jpg" } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Texture key → relative image path. Keys name scene objects.
    #[serde(default)]
    pub textures: BTreeMap<String, String>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
