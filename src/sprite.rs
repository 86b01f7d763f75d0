/// A single frame of a clip: which cell of the sheet to show, and for how long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub index: u32,
    pub duration_ms: f32,
}

impl Frame {
    pub fn new(index: u32, duration_ms: f32) -> Self {
        Frame { index, duration_ms }
    }
}

/// Source rectangle of one cell, in texture pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Layout of a uniform grid spritesheet (cells read left to right, top to bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
}

impl SpriteSheet {
    pub fn new(frame_width: u32, frame_height: u32, columns: u32) -> Self {
        SpriteSheet {
            frame_width,
            frame_height,
            columns: columns.max(1),
        }
    }

    /// Derive the column count from the texture width.
    pub fn for_texture(frame_width: u32, frame_height: u32, texture_width: u32) -> Self {
        let columns = if frame_width == 0 {
            1
        } else {
            texture_width / frame_width
        };
        SpriteSheet::new(frame_width, frame_height, columns)
    }

    pub fn source_rect(&self, index: u32) -> SourceRect {
        let column = index % self.columns;
        let row = index / self.columns;
        let offset = |cell: u32, size: u32| i32::try_from(cell.saturating_mul(size)).unwrap_or(i32::MAX);
        SourceRect {
            x: offset(column, self.frame_width),
            y: offset(row, self.frame_height),
            width: self.frame_width,
            height: self.frame_height,
        }
    }
}

/// Frames `start..=end` shown at `frame_rate` frames per second.
///
/// An inverted range yields no frames.
pub fn generate_frames(start: u32, end: u32, frame_rate: f32) -> Vec<Frame> {
    let duration_ms = if frame_rate > 0.0 {
        1000.0 / frame_rate
    } else {
        f32::INFINITY
    };
    (start..=end).map(|index| Frame::new(index, duration_ms)).collect()
}
