//! Rendering seam
//!
//! The simulation never talks to a graphics API directly. Drawing goes through
//! the [`Renderer`] trait, which a platform backend implements. [`DrawList`]
//! is a backend that just records commands, used headless and in tests.

use glam::IVec2;

/// Named sprite sheets the stage draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteSheet {
    Borders,
    Wall,
    Gremlin,
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors for stage presentation
pub mod colors {
    use super::Rgb;

    pub const BACKGROUND: Rgb = Rgb(30, 160, 248);
    pub const SHADOW: Rgb = Rgb(0, 72, 184);
    pub const OUTLINE: Rgb = Rgb(255, 255, 255);
    pub const PLAYFIELD: Rgb = Rgb(0, 0, 0);
    pub const INFO_BOX: Rgb = Rgb(0, 85, 170);
}

/// Drawing backend. Coordinates are screen pixels, offset by the current
/// translation.
pub trait Renderer {
    fn clear(&mut self, color: Rgb);

    fn fill_rect(&mut self, pos: IVec2, size: IVec2, color: Rgb);

    /// Copy a `size` region at `src` in `sheet` to `dest`
    fn draw_region(&mut self, sheet: SpriteSheet, src: IVec2, size: IVec2, dest: IVec2);

    fn draw_text(&mut self, text: &str, pos: IVec2, centered: bool);

    /// Offset applied to subsequent draws
    fn set_translation(&mut self, offset: IVec2);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Clear(Rgb),
    FillRect { pos: IVec2, size: IVec2, color: Rgb },
    Region { sheet: SpriteSheet, src: IVec2, size: IVec2, dest: IVec2 },
    Text { text: String, pos: IVec2, centered: bool },
}

/// Renderer that records commands with translation already applied
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    translation: IVec2,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every text command, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for DrawList {
    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, pos: IVec2, size: IVec2, color: Rgb) {
        self.commands.push(DrawCommand::FillRect {
            pos: pos + self.translation,
            size,
            color,
        });
    }

    fn draw_region(&mut self, sheet: SpriteSheet, src: IVec2, size: IVec2, dest: IVec2) {
        self.commands.push(DrawCommand::Region {
            sheet,
            src,
            size,
            dest: dest + self.translation,
        });
    }

    fn draw_text(&mut self, text: &str, pos: IVec2, centered: bool) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos: pos + self.translation,
            centered,
        });
    }

    fn set_translation(&mut self, offset: IVec2) {
        self.translation = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_applies_translation() {
        let mut list = DrawList::new();
        list.set_translation(IVec2::new(10, 20));
        list.draw_region(SpriteSheet::Wall, IVec2::ZERO, IVec2::splat(16), IVec2::new(16, 0));
        list.set_translation(IVec2::ZERO);
        list.draw_text("hi", IVec2::new(1, 2), false);

        assert_eq!(
            list.commands[0],
            DrawCommand::Region {
                sheet: SpriteSheet::Wall,
                src: IVec2::ZERO,
                size: IVec2::splat(16),
                dest: IVec2::new(26, 20),
            }
        );
        assert_eq!(list.texts(), vec!["hi"]);
    }
}
