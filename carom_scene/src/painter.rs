// Copyright 2025 the Carom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The painter capability consumed by shape painting, and a recording
//! implementation for tests and headless hosts.

use color::Rgba8;

/// The drawing color painters start out with (a light grey), and the default
/// fill color for dynamic shapes.
pub const DEFAULT_DRAW_COLOR: Rgba8 = Rgba8 {
    r: 212,
    g: 212,
    b: 212,
    a: 255,
};

/// Hexagons narrower than this many pixels are drawn as a diamond.
pub const HEXAGON_DIAMOND_THRESHOLD: i32 = 40;

/// Horizontal inset of a hexagon's two vertical edges from its extremes.
pub const HEXAGON_EDGE_INSET: i32 = 20;

/// Primitive drawing operations consumed by shape painting.
///
/// The scene never produces raster output itself; it only issues these calls.
/// Hosts implement this trait over their graphics context. Drawing calls are
/// assumed always to succeed.
///
/// Two contracts hold for every implementation:
///
/// - A caller that changes the current color transiently must restore the
///   previous color before returning.
/// - [`Painter::translate`] shifts the origin cumulatively; a caller that
///   translates must pair the shift with the inverse shift.
pub trait Painter {
    /// Host-specific image handle accepted by [`Painter::draw_image`].
    type Image;

    /// Draw a rectangle outline with top-left corner `(x, y)`.
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Draw a rectangle filled with the current color.
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Draw an oval outline inscribed in the given box.
    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Draw a line from `(x1, y1)` to `(x2, y2)`.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);

    /// Draw a hexagon outline inscribed in the given box.
    ///
    /// The drawing policy is fixed so that every painter reproduces the same
    /// picture: below [`HEXAGON_DIAMOND_THRESHOLD`] pixels of width the shape
    /// degenerates to a 4-line diamond; otherwise it is 6 lines whose two
    /// vertical edges are inset [`HEXAGON_EDGE_INSET`] pixels from the left
    /// and right extremes. Composed from [`Painter::draw_line`]; overriding is
    /// possible but rarely useful.
    fn draw_hexagon(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let mid_y = y + height / 2;
        if width < HEXAGON_DIAMOND_THRESHOLD {
            let mid_x = x + width / 2;
            self.draw_line(x, mid_y, mid_x, y);
            self.draw_line(mid_x, y, x + width, mid_y);
            self.draw_line(x + width, mid_y, mid_x, y + height);
            self.draw_line(mid_x, y + height, x, mid_y);
        } else {
            let left = x + HEXAGON_EDGE_INSET;
            let right = x + width - HEXAGON_EDGE_INSET;
            self.draw_line(x, mid_y, left, y);
            self.draw_line(left, y, right, y);
            self.draw_line(right, y, x + width, mid_y);
            self.draw_line(x + width, mid_y, right, y + height);
            self.draw_line(right, y + height, left, y + height);
            self.draw_line(left, y + height, x, mid_y);
        }
    }

    /// The current drawing color.
    fn color(&self) -> Rgba8;

    /// Replace the current drawing color.
    fn set_color(&mut self, color: Rgba8);

    /// Shift the drawing origin by `(dx, dy)`. Cumulative.
    fn translate(&mut self, dx: i32, dy: i32);

    /// Draw `text` centered on the given box.
    fn draw_centered_text(&mut self, text: &str, x: i32, y: i32, width: i32, height: i32);

    /// Draw an image scaled into the given box.
    fn draw_image(&mut self, image: &Self::Image, x: i32, y: i32, width: i32, height: i32);
}

/// One recorded painter call.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// A [`Painter::draw_rect`] call.
    Rect {
        /// Top-left x.
        x: i32,
        /// Top-left y.
        y: i32,
        /// Box width.
        width: i32,
        /// Box height.
        height: i32,
    },
    /// A [`Painter::fill_rect`] call.
    FillRect {
        /// Top-left x.
        x: i32,
        /// Top-left y.
        y: i32,
        /// Box width.
        width: i32,
        /// Box height.
        height: i32,
    },
    /// A [`Painter::draw_oval`] call.
    Oval {
        /// Top-left x.
        x: i32,
        /// Top-left y.
        y: i32,
        /// Box width.
        width: i32,
        /// Box height.
        height: i32,
    },
    /// A [`Painter::draw_line`] call.
    Line {
        /// Start x.
        x1: i32,
        /// Start y.
        y1: i32,
        /// End x.
        x2: i32,
        /// End y.
        y2: i32,
    },
    /// A [`Painter::set_color`] call.
    SetColor(
        /// The color that became current.
        Rgba8,
    ),
    /// A [`Painter::translate`] call.
    Translate {
        /// Horizontal origin shift.
        dx: i32,
        /// Vertical origin shift.
        dy: i32,
    },
    /// A [`Painter::draw_centered_text`] call.
    CenteredText {
        /// The text drawn.
        text: String,
        /// Top-left x of the box the text is centered on.
        x: i32,
        /// Top-left y of the box.
        y: i32,
        /// Box width.
        width: i32,
        /// Box height.
        height: i32,
    },
    /// A [`Painter::draw_image`] call.
    Image {
        /// Top-left x.
        x: i32,
        /// Top-left y.
        y: i32,
        /// Box width.
        width: i32,
        /// Box height.
        height: i32,
    },
}

/// A painter that records every call as a [`PaintOp`] instead of drawing.
///
/// Useful for asserting paint sequences in tests and for headless hosts.
/// The current color starts as [`DEFAULT_DRAW_COLOR`] and tracks
/// [`Painter::set_color`] calls, so save/restore discipline is observable in
/// the recorded sequence.
///
/// ```rust
/// use carom_scene::{PaintOp, Painter, RecordingPainter};
///
/// let mut painter = RecordingPainter::new();
/// painter.draw_hexagon(0, 0, 30, 40);
/// // Narrow hexagons degenerate to a 4-line diamond.
/// assert_eq!(painter.ops().len(), 4);
/// assert!(matches!(painter.ops()[0], PaintOp::Line { .. }));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
    ops: Vec<PaintOp>,
    color: Option<Rgba8>,
}

impl RecordingPainter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The calls recorded so far, in order.
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Clear the record and return the calls recorded so far.
    pub fn take_ops(&mut self) -> Vec<PaintOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Painter for RecordingPainter {
    type Image = ();

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.ops.push(PaintOp::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.ops.push(PaintOp::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.ops.push(PaintOp::Oval {
            x,
            y,
            width,
            height,
        });
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.ops.push(PaintOp::Line { x1, y1, x2, y2 });
    }

    fn color(&self) -> Rgba8 {
        self.color.unwrap_or(DEFAULT_DRAW_COLOR)
    }

    fn set_color(&mut self, color: Rgba8) {
        self.color = Some(color);
        self.ops.push(PaintOp::SetColor(color));
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.ops.push(PaintOp::Translate { dx, dy });
    }

    fn draw_centered_text(&mut self, text: &str, x: i32, y: i32, width: i32, height: i32) {
        self.ops.push(PaintOp::CenteredText {
            text: text.to_owned(),
            x,
            y,
            width,
            height,
        });
    }

    fn draw_image(&mut self, _image: &(), x: i32, y: i32, width: i32, height: i32) {
        self.ops.push(PaintOp::Image {
            x,
            y,
            width,
            height,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_hexagon_is_a_diamond() {
        let mut painter = RecordingPainter::new();
        painter.draw_hexagon(0, 0, 30, 40);
        assert_eq!(
            painter.ops(),
            &[
                PaintOp::Line {
                    x1: 0,
                    y1: 20,
                    x2: 15,
                    y2: 0
                },
                PaintOp::Line {
                    x1: 15,
                    y1: 0,
                    x2: 30,
                    y2: 20
                },
                PaintOp::Line {
                    x1: 30,
                    y1: 20,
                    x2: 15,
                    y2: 40
                },
                PaintOp::Line {
                    x1: 15,
                    y1: 40,
                    x2: 0,
                    y2: 20
                },
            ]
        );
    }

    #[test]
    fn wide_hexagon_has_six_lines_with_inset_edges() {
        let mut painter = RecordingPainter::new();
        painter.draw_hexagon(10, 0, 100, 60);
        let ops = painter.ops();
        assert_eq!(ops.len(), 6, "wide hexagons are six lines");
        // Top edge runs between the two inset points.
        assert_eq!(
            ops[1],
            PaintOp::Line {
                x1: 30,
                y1: 0,
                x2: 90,
                y2: 0
            }
        );
        // Bottom edge mirrors it.
        assert_eq!(
            ops[4],
            PaintOp::Line {
                x1: 90,
                y1: 60,
                x2: 30,
                y2: 60
            }
        );
    }

    #[test]
    fn threshold_width_draws_a_full_hexagon() {
        let mut painter = RecordingPainter::new();
        painter.draw_hexagon(0, 0, HEXAGON_DIAMOND_THRESHOLD, 40);
        assert_eq!(painter.ops().len(), 6, "width 40 is not narrow");
    }

    #[test]
    fn recorder_tracks_current_color() {
        let mut painter = RecordingPainter::new();
        assert_eq!(painter.color(), DEFAULT_DRAW_COLOR);
        let red = Rgba8 {
            r: 255,
            g: 0,
            b: 0,
            a: 255,
        };
        painter.set_color(red);
        assert_eq!(painter.color(), red);
        assert_eq!(painter.ops(), &[PaintOp::SetColor(red)]);
    }
}
