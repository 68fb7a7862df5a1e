//! Sprite sheet metadata store.
//!
//! The host decides where sheet geometry comes from (disk, network, atlas
//! pipeline) by providing a [`SpriteLoader`]. Loaded sheets are cached by
//! name. A built-in catalog ships for the demo runner and tests.

use bevy_ecs::prelude::Resource;
use log::warn;
use rustc_hash::FxHashMap;

use crate::components::sprite::SheetData;

pub trait SpriteLoader: Send + Sync {
    fn load(&self, name: &str) -> Option<SheetData>;
}

#[derive(Resource)]
pub struct SpriteStore {
    loader: Box<dyn SpriteLoader>,
    cache: FxHashMap<String, SheetData>,
}

impl SpriteStore {
    pub fn new(loader: Box<dyn SpriteLoader>) -> Self {
        Self {
            loader,
            cache: FxHashMap::default(),
        }
    }

    pub fn with_builtin() -> Self {
        Self::new(Box::new(BuiltinCatalog::new()))
    }

    pub fn get(&mut self, name: &str) -> Option<SheetData> {
        if let Some(data) = self.cache.get(name) {
            return Some(data.clone());
        }
        match self.loader.load(name) {
            Some(data) => {
                self.cache.insert(name.to_string(), data.clone());
                Some(data)
            }
            None => {
                warn!("Unknown sprite sheet '{}'", name);
                None
            }
        }
    }
}

/// Geometry for the stock sheets, embedded as JSON.
const CATALOG_JSON: &str = r#"{
    "dude": {
        "collider": { "x": 8.0, "y": 6.0, "w": 16.0, "h": 26.0 },
        "size": { "w": 32.0, "h": 32.0 },
        "scale": 4.0,
        "flip": true,
        "colored": ["body"]
    },
    "agent": {
        "collider": { "x": 7.0, "y": 4.0, "w": 14.0, "h": 28.0 },
        "size": { "w": 32.0, "h": 32.0 },
        "scale": 4.0,
        "flip": true,
        "colored": []
    },
    "cat": {
        "collider": { "x": 10.0, "y": 12.0, "w": 20.0, "h": 20.0 },
        "size": { "w": 32.0, "h": 32.0 },
        "scale": 4.0,
        "flip": true,
        "colored": ["fur"]
    },
    "sith": {
        "collider": { "x": 8.0, "y": 2.0, "w": 16.0, "h": 30.0 },
        "size": { "w": 32.0, "h": 32.0 },
        "scale": 4.0,
        "flip": false,
        "colored": []
    },
    "girl": {
        "collider": { "x": 8.0, "y": 6.0, "w": 16.0, "h": 26.0 },
        "size": { "w": 32.0, "h": 32.0 },
        "scale": 4.0,
        "flip": true,
        "colored": ["body", "hair"]
    }
}"#;

pub struct BuiltinCatalog {
    sheets: FxHashMap<String, SheetData>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        // The catalog is compiled in; a parse failure is a build defect.
        let sheets = serde_json::from_str(CATALOG_JSON).expect("builtin sprite catalog is valid");
        Self { sheets }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteLoader for BuiltinCatalog {
    fn load(&self, name: &str) -> Option<SheetData> {
        self.sheets.get(name).cloned()
    }
}
