use crate::math::Point2;

use super::stroke_style::StrokeStyle;

/// A 2D drawing target, such as a canvas context or an image buffer.
pub trait DrawingSurface {
    /// Surface size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Returns `false` when nothing can be drawn, e.g. a zero-size surface.
    fn is_available(&self) -> bool {
        let (width, height) = self.size();
        width > 0 && height > 0
    }

    /// Clears the whole surface.
    fn clear(&mut self);

    /// Strokes an open polyline with round caps and joins.
    fn stroke_polyline(&mut self, points: &[Point2], style: &StrokeStyle);
}

/// A draw call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Stroke {
        points: Vec<Point2>,
        style: StrokeStyle,
    },
}

/// A surface that records draw calls instead of rasterizing them.
///
/// Hosts with their own 2D canvas can replay the commands.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Creates a recorder reporting the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Removes and returns all recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Changes the reported size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_polyline(&mut self, points: &[Point2], style: &StrokeStyle) {
        self.commands.push(DrawCommand::Stroke {
            points: points.to_vec(),
            style: style.clone(),
        });
    }
}
