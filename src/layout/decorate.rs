use crate::{
    draw::surface::Stroke,
    foundation::core::{Line, Point, Rect, Rgb8},
    schedule::model::ActivityKind,
};

/// Which pair of opposite corners the diagonal strokes cut off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Corners {
    TopLeftBottomRight,
    BottomLeftTopRight,
}

/// Cursor advances of a pattern.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Steps {
    /// Exactly these steps, regardless of block size.
    Fixed(&'static [f64]),
    /// `lead` once, then `cycle` repeated while the right cursor is still right of the midline.
    UntilMidline {
        lead: f64,
        cycle: &'static [f64],
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Pattern {
    corners: Corners,
    steps: Steps,
    stroke_width: f64,
}

const HATCHED: Pattern = Pattern {
    corners: Corners::TopLeftBottomRight,
    steps: Steps::UntilMidline {
        lead: 3.0,
        cycle: &[2.0, 0.5],
    },
    stroke_width: 0.2,
};

const DOUBLE_CORNER: Pattern = Pattern {
    corners: Corners::BottomLeftTopRight,
    steps: Steps::Fixed(&[2.0, 2.0, 2.0, 2.0]),
    stroke_width: 0.3,
};

const EMPTY_CORNER: Pattern = Pattern {
    corners: Corners::BottomLeftTopRight,
    steps: Steps::Fixed(&[1.0, 0.2, 0.2, 0.2, 0.2, 0.2, 0.2, 1.0, 1.0]),
    stroke_width: 0.2,
};

fn pattern(kind: ActivityKind) -> Option<&'static Pattern> {
    match kind {
        ActivityKind::Normal => None,
        ActivityKind::DiagonalHatched => Some(&HATCHED),
        ActivityKind::DoubleCorner => Some(&DOUBLE_CORNER),
        ActivityKind::EmptyCorner => Some(&EMPTY_CORNER),
    }
}

/// White overlay strokes for one block.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    pub lines: Vec<Line>,
    pub stroke: Stroke,
}

/// Two cursors walking from opposite corners towards each other along the block's diagonal.
struct Cursors {
    rect: Rect,
    slope: f64,
    x: f64,
    x_rev: f64,
    y: f64,
    y_rev: f64,
}

impl Cursors {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            slope: rect.height() / rect.width(),
            x: rect.x0,
            x_rev: rect.x1,
            y: rect.y0,
            y_rev: rect.y1,
        }
    }

    fn advance(&mut self, step: f64) {
        self.x += step;
        self.x_rev -= step;
        self.y += step * self.slope;
        self.y_rev -= step * self.slope;
    }

    fn forward_inside(&self) -> bool {
        self.x < self.rect.x1 && self.y < self.rect.y1
    }

    fn reverse_inside(&self) -> bool {
        self.x_rev > self.rect.x0 && self.y_rev > self.rect.y0
    }

    fn emit(&self, corners: Corners, out: &mut Vec<Line>) {
        let r = self.rect;
        match corners {
            Corners::TopLeftBottomRight => {
                if self.forward_inside() {
                    out.push(Line::new(Point::new(self.x, r.y0), Point::new(r.x0, self.y)));
                }
                if self.reverse_inside() {
                    out.push(Line::new(
                        Point::new(self.x_rev, r.y1),
                        Point::new(r.x1, self.y_rev),
                    ));
                }
            }
            Corners::BottomLeftTopRight => {
                if self.forward_inside() {
                    out.push(Line::new(
                        Point::new(self.x, r.y1),
                        Point::new(r.x0, self.y_rev),
                    ));
                }
                if self.reverse_inside() {
                    out.push(Line::new(Point::new(self.x_rev, r.y0), Point::new(r.x1, self.y)));
                }
            }
        }
    }
}

/// Overlay strokes for a block of the given kind; `None` for [`ActivityKind::Normal`].
///
/// A block with no positive finite area gets a decoration without lines.
pub fn decorate(rect: Rect, kind: ActivityKind) -> Option<Decoration> {
    let pattern = pattern(kind)?;
    let stroke = Stroke::new(Rgb8::WHITE, pattern.stroke_width);

    let w = rect.width();
    let h = rect.height();
    if !(w.is_finite()
        && h.is_finite()
        && w > 0.0
        && h > 0.0
        && rect.x0.is_finite()
        && rect.y0.is_finite())
    {
        return Some(Decoration {
            lines: Vec::new(),
            stroke,
        });
    }

    let mut cursors = Cursors::new(rect);
    let mut lines = Vec::new();
    match pattern.steps {
        Steps::Fixed(steps) => {
            for &step in steps {
                cursors.advance(step);
                cursors.emit(pattern.corners, &mut lines);
            }
        }
        Steps::UntilMidline { lead, cycle } => {
            let midline = rect.x0 + w / 2.0;
            cursors.advance(lead);
            cursors.emit(pattern.corners, &mut lines);
            for &step in cycle.iter().cycle() {
                if cursors.x_rev <= midline {
                    break;
                }
                cursors.advance(step);
                cursors.emit(pattern.corners, &mut lines);
            }
        }
    }

    Some(Decoration { lines, stroke })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/decorate.rs"]
mod tests;
