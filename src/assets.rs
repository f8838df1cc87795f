//! Level packs
//!
//! A pack is a JSON document holding every stage's tile map:
//!
//! ```json
//! { "stages": [ { "name": "First steps", "width": 3, "height": 1,
//!                 "difficulty": 1, "move_limit": 1, "data": [2, 0, 5] } ] }
//! ```
//!
//! Stages are addressed by 1-based index.

use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;
use thiserror::Error;

use crate::sim::Tilemap;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Stage \"{name}\" has {actual} tiles, expected {expected}")]
    SizeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("Stage \"{name}\" has no cells")]
    EmptyStage { name: String },
    #[error("Level pack contains no stages")]
    NoStages,
}

#[derive(Deserialize)]
struct PackFile {
    stages: Vec<Tilemap>,
}

/// Loaded, validated stage maps
#[derive(Debug, Clone)]
pub struct AssetPack {
    stages: Vec<Rc<Tilemap>>,
}

impl AssetPack {
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let pack: PackFile = serde_json::from_str(json)?;
        Self::from_tilemaps(pack.stages)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let pack = Self::from_json(&json)?;
        log::info!("Loaded {} stages from {}", pack.len(), path.display());
        Ok(pack)
    }

    pub fn from_tilemaps(maps: Vec<Tilemap>) -> Result<Self, AssetError> {
        if maps.is_empty() {
            return Err(AssetError::NoStages);
        }
        for map in &maps {
            validate(map)?;
        }
        Ok(Self {
            stages: maps.into_iter().map(Rc::new).collect(),
        })
    }

    /// Tile map for a 1-based stage index
    pub fn tilemap(&self, index: u32) -> Option<Rc<Tilemap>> {
        let i = (index as usize).checked_sub(1)?;
        self.stages.get(i).cloned()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

fn validate(map: &Tilemap) -> Result<(), AssetError> {
    if map.width == 0 || map.height == 0 {
        return Err(AssetError::EmptyStage {
            name: map.name.clone(),
        });
    }
    let expected = map.width * map.height;
    if map.data.len() != expected {
        return Err(AssetError::SizeMismatch {
            name: map.name.clone(),
            expected,
            actual: map.data.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACK: &str = r#"{
        "stages": [
            {"name": "one", "width": 3, "height": 1, "difficulty": 1, "move_limit": 1, "data": [2, 0, 5]},
            {"name": "two", "width": 2, "height": 2, "move_limit": 4, "data": [1, 2, 0, 6]}
        ]
    }"#;

    #[test]
    fn test_load_pack_and_index() {
        let pack = AssetPack::from_json(PACK).unwrap();
        assert_eq!(pack.len(), 2);
        assert_eq!(pack.tilemap(1).unwrap().name, "one");
        assert_eq!(pack.tilemap(2).unwrap().move_limit, 4);
        assert!(pack.tilemap(0).is_none());
        assert!(pack.tilemap(3).is_none());
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let json = r#"{"stages":[{"name":"bad","width":2,"height":2,"move_limit":1,"data":[0,0,0]}]}"#;
        match AssetPack::from_json(json) {
            Err(AssetError::SizeMismatch { expected, actual, .. }) => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_empty_pack_and_stage_rejected() {
        assert!(matches!(
            AssetPack::from_json(r#"{"stages":[]}"#),
            Err(AssetError::NoStages)
        ));
        let json = r#"{"stages":[{"name":"flat","width":0,"height":3,"move_limit":1,"data":[]}]}"#;
        assert!(matches!(
            AssetPack::from_json(json),
            Err(AssetError::EmptyStage { .. })
        ));
    }

    #[test]
    fn test_bundled_pack_is_valid() {
        let json = include_str!("../assets/stages.json");
        let pack = AssetPack::from_json(json).unwrap();
        assert!(!pack.is_empty());
    }
}
