//! Stage tile maps and tile-id decoding
//!
//! A tile map is the static layout of a stage. Each cell holds a tile id:
//!
//! | id    | meaning                          |
//! |-------|----------------------------------|
//! | 0     | empty                            |
//! | 1     | wall                             |
//! | 2-4   | awake gremlin, kind = id - 2     |
//! | 5-7   | star, kind = id - 5              |
//! | 8-10  | sleeping gremlin, kind = id - 8  |
//! | 11    | boulder                          |
//!
//! Unknown ids are treated as empty.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::gremlin::GremlinKind;
use super::star::StarKind;

pub const TILE_EMPTY: u16 = 0;
pub const TILE_WALL: u16 = 1;

/// Static stage layout, as stored in a level pack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tilemap {
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// Difficulty rating (shown as stars in the HUD)
    #[serde(default)]
    pub difficulty: u32,
    /// Number of pushes allowed before the stage is lost
    pub move_limit: i32,
    /// Row-major tile ids, `width * height` entries
    pub data: Vec<u16>,
}

/// What a tile id places on the stage at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileObject {
    Wall,
    Gremlin { kind: GremlinKind, sleeping: bool },
    Star { kind: StarKind },
}

impl TileObject {
    /// Decode a tile id. Empty and unknown ids yield `None`.
    pub fn from_id(id: u16) -> Option<Self> {
        match id {
            TILE_WALL => Some(TileObject::Wall),
            2..=4 => Some(TileObject::Gremlin {
                kind: GremlinKind::from_color(id - 2)?,
                sleeping: false,
            }),
            5..=7 => Some(TileObject::Star {
                kind: StarKind::from_color(id - 5)?,
            }),
            8..=10 => Some(TileObject::Gremlin {
                kind: GremlinKind::from_color(id - 8)?,
                sleeping: true,
            }),
            11 => Some(TileObject::Gremlin {
                kind: GremlinKind::Boulder,
                sleeping: false,
            }),
            _ => None,
        }
    }
}

impl Tilemap {
    /// Build a map with no move budget and zero difficulty
    pub fn new(name: &str, width: usize, height: usize, data: Vec<u16>) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            difficulty: 0,
            move_limit: 0,
            data,
        }
    }

    pub fn with_move_limit(mut self, move_limit: i32) -> Self {
        self.move_limit = move_limit;
        self
    }

    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Tile id at (x, y), or empty outside the map
    pub fn tile(&self, x: i32, y: i32) -> u16 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return TILE_EMPTY;
        }
        self.data
            .get(y as usize * self.width + x as usize)
            .copied()
            .unwrap_or(TILE_EMPTY)
    }

    /// Decoded objects in row-major order
    pub fn objects(&self) -> impl Iterator<Item = (IVec2, TileObject)> + '_ {
        (0..self.height as i32).flat_map(move |y| {
            (0..self.width as i32).filter_map(move |x| {
                TileObject::from_id(self.tile(x, y)).map(|obj| (IVec2::new(x, y), obj))
            })
        })
    }

    /// Difficulty rendered for the HUD, one `*` per point
    pub fn difficulty_label(&self) -> String {
        "*".repeat(self.difficulty as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_tile_ranges() {
        assert_eq!(TileObject::from_id(0), None);
        assert_eq!(TileObject::from_id(1), Some(TileObject::Wall));
        assert_eq!(
            TileObject::from_id(3),
            Some(TileObject::Gremlin {
                kind: GremlinKind::Green,
                sleeping: false
            })
        );
        assert_eq!(
            TileObject::from_id(7),
            Some(TileObject::Star {
                kind: StarKind::Blue
            })
        );
        assert_eq!(TileObject::from_id(12), None);
    }

    #[test]
    fn test_decode_sleeping_ids() {
        for id in 8..=10 {
            match TileObject::from_id(id) {
                Some(TileObject::Gremlin { kind, sleeping }) => {
                    assert!(sleeping);
                    assert_eq!(kind.color(), (id - 8) as u8);
                }
                other => panic!("id {id} decoded to {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_boulder_never_sleeps() {
        let map = Tilemap::new("boulders", 3, 3, vec![8, 9, 10, 8, 11, 10, 9, 8, 10]);
        let (pos, obj) = map
            .objects()
            .find(|(_, obj)| matches!(obj, TileObject::Gremlin { kind: GremlinKind::Boulder, .. }))
            .expect("boulder decoded");
        assert_eq!(pos, IVec2::new(1, 1));
        assert_eq!(
            obj,
            TileObject::Gremlin {
                kind: GremlinKind::Boulder,
                sleeping: false
            }
        );
    }

    #[test]
    fn test_objects_row_major() {
        let map = Tilemap::new("order", 2, 2, vec![0, 5, 2, 1]);
        let positions: Vec<IVec2> = map.objects().map(|(p, _)| p).collect();
        assert_eq!(
            positions,
            vec![IVec2::new(1, 0), IVec2::new(0, 1), IVec2::new(1, 1)]
        );
    }

    #[test]
    fn test_tile_outside_map_is_empty() {
        let map = Tilemap::new("tiny", 1, 1, vec![1]);
        assert_eq!(map.tile(0, 0), TILE_WALL);
        assert_eq!(map.tile(1, 0), TILE_EMPTY);
        assert_eq!(map.tile(0, -1), TILE_EMPTY);
    }

    #[test]
    fn test_tilemap_json_defaults_difficulty() {
        let json = r#"{"name":"a","width":1,"height":1,"move_limit":3,"data":[0]}"#;
        let map: Tilemap = serde_json::from_str(json).unwrap();
        assert_eq!(map.difficulty, 0);
        assert_eq!(map.move_limit, 3);
        assert_eq!(map.difficulty_label(), "");
        assert_eq!(map.with_difficulty(3).difficulty_label(), "***");
    }
}
