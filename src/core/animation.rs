//! Sprite-sheet playback state.
//!
//! An [`Animation`] only tracks which frame rectangle is current. It owns no
//! texture handle; whoever draws the entity looks up the sheet itself and
//! asks the animation for the sub-rectangle to show.

use bevy::math::{URect, UVec2};
use serde::Deserialize;

/// Layout of a sprite sheet strip, as found in the game config.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SheetLayout {
    pub sheet_size: (u32, u32),
    pub frame_size: (u32, u32),
    pub frame_count: u32,
    pub frame_duration: f32,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

fn default_looping() -> bool {
    true
}

/// Frame-index playback over elapsed time.
#[derive(Debug, PartialEq)]
pub struct Animation {
    frames: Vec<URect>,
    current: usize,
    frame_duration: f32,
    elapsed: f32,
    looping: bool,
    finished: bool,
}

impl Animation {
    /// Build from an explicit list of frame rectangles.
    pub fn new(frames: Vec<URect>, frame_duration: f32, looping: bool) -> Self {
        Self {
            frames,
            current: 0,
            frame_duration,
            elapsed: 0.0,
            looping,
            finished: false,
        }
    }

    /// Slice a sheet into `frame_count` frames, left to right, wrapping to the
    /// next row when a row runs out. Frames that would not fit on the sheet
    /// are dropped.
    pub fn from_sheet(
        sheet_size: UVec2,
        frame_size: UVec2,
        frame_count: u32,
        frame_duration: f32,
        looping: bool,
    ) -> Self {
        let mut frames = Vec::with_capacity(frame_count as usize);

        if sheet_size.x > 0 && frame_size.x > 0 && frame_size.y > 0 {
            for i in 0..frame_count {
                let x = (i * frame_size.x) % sheet_size.x;
                let y = (i * frame_size.x / sheet_size.x) * frame_size.y;

                if x + frame_size.x <= sheet_size.x && y + frame_size.y <= sheet_size.y {
                    frames.push(URect::new(x, y, x + frame_size.x, y + frame_size.y));
                }
            }
        }

        Self::new(frames, frame_duration, looping)
    }

    /// Build from a config layout.
    pub fn from_layout(layout: &SheetLayout) -> Self {
        Self::from_sheet(
            UVec2::new(layout.sheet_size.0, layout.sheet_size.1),
            UVec2::new(layout.frame_size.0, layout.frame_size.1),
            layout.frame_count,
            layout.frame_duration,
            layout.looping,
        )
    }

    /// Advance playback by `dt` seconds.
    ///
    /// At most one frame is advanced per call. A non-looping animation clamps
    /// on its last frame and stays finished until [`Animation::reset`].
    pub fn update(&mut self, dt: f32) {
        if self.frames.is_empty() {
            return;
        }

        self.elapsed += dt;

        if self.elapsed >= self.frame_duration {
            self.elapsed = 0.0;
            self.current += 1;

            if self.current >= self.frames.len() {
                if self.looping {
                    self.current = 0;
                } else {
                    self.current = self.frames.len() - 1;
                    self.finished = true;
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.elapsed = 0.0;
        self.finished = false;
    }

    /// Current frame rectangle, or an empty rectangle when there is none.
    pub fn current_frame(&self) -> URect {
        self.frame(self.current)
    }

    /// Frame rectangle at `index`, or an empty rectangle when out of range.
    pub fn frame(&self, index: usize) -> URect {
        self.frames.get(index).copied().unwrap_or_default()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Jump to `index`; ignored when out of range.
    pub fn set_current_index(&mut self, index: usize) {
        if index < self.frames.len() {
            self.current = index;
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
}
