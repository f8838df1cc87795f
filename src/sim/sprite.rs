//! Sprite-sheet animation state
//!
//! Sheets are laid out as rows of equally sized frames. Actors own a
//! `Sprite` and advance it from their update; drawing only reads it.

use glam::IVec2;

use crate::renderer::{Renderer, SpriteSheet};

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub width: i32,
    pub height: i32,
    pub row: i32,
    pub frame: i32,
    timer: f32,
}

impl Sprite {
    pub fn new(width: i32, height: i32, row: i32) -> Self {
        Self {
            width,
            height,
            row,
            frame: 0,
            timer: 0.0,
        }
    }

    /// Advance a looping animation over frames `start..=end` of `row`,
    /// spending `frame_time` seconds on each frame.
    pub fn animate(&mut self, row: i32, start: i32, end: i32, frame_time: f32, dt: f32) {
        if self.row != row {
            self.row = row;
            self.frame = start;
            self.timer = 0.0;
        }
        if start == end || frame_time <= 0.0 {
            self.frame = start;
            return;
        }
        if self.frame < start || self.frame > end {
            self.frame = start;
        }

        self.timer += dt;
        if self.timer < frame_time {
            return;
        }

        let len = end - start + 1;
        let steps = (self.timer / frame_time).floor().rem_euclid(len as f32) as i32;
        self.frame = start + (self.frame - start + steps) % len;
        self.timer = self.timer.rem_euclid(frame_time);
        if self.timer >= frame_time {
            self.timer = 0.0;
        }
    }

    /// Time accumulated towards the next frame
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Source pixel offset of the current frame within the sheet
    pub fn source(&self) -> IVec2 {
        IVec2::new(self.frame * self.width, self.row * self.height)
    }

    pub fn draw(&self, renderer: &mut dyn Renderer, sheet: SpriteSheet, dest: IVec2) {
        renderer.draw_region(
            sheet,
            self.source(),
            IVec2::new(self.width, self.height),
            dest,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animate_loops_through_range() {
        let mut spr = Sprite::new(16, 16, 2);
        let frames: Vec<i32> = (0..5)
            .map(|_| {
                spr.animate(2, 0, 3, 0.1, 0.1);
                spr.frame
            })
            .collect();
        assert_eq!(frames, vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_row_change_restarts() {
        let mut spr = Sprite::new(16, 16, 0);
        spr.animate(0, 0, 3, 0.1, 0.25);
        assert_eq!(spr.frame, 2);
        spr.animate(7, 1, 3, 0.1, 0.05);
        assert_eq!(spr.row, 7);
        assert_eq!(spr.frame, 1);
        assert_eq!(spr.source(), IVec2::new(16, 7 * 16));
    }

    #[test]
    fn test_huge_dt_wraps_without_looping() {
        let mut spr = Sprite::new(16, 16, 2);
        spr.animate(2, 0, 3, 0.125, 1.0e9);
        assert!((0..=3).contains(&spr.frame));
        assert!(spr.timer() >= 0.0 && spr.timer() < 0.125);

        // 10 frames over a 4-frame loop lands on frame 2
        let mut spr = Sprite::new(16, 16, 2);
        spr.animate(2, 0, 3, 0.125, 1.25);
        assert_eq!(spr.frame, 2);
    }

    #[test]
    fn test_single_frame_holds() {
        let mut spr = Sprite::new(16, 16, 0);
        spr.animate(4, 2, 2, 0.1, 1.0);
        assert_eq!(spr.frame, 2);
    }
}
