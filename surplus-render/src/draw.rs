use crate::{Figure, HAlign, Line, Mark, Text, VAlign};
use surplus_core::models::{
    Colors,
    geometry::{Arc, Arrow, Point, Segment},
};

/// Shapes that can add themselves to a figure.
///
/// Drawing consumes and returns the shape, so calls chain:
/// `Arrow::horizontal(0.0, 0.0, 5.0).drawn(&mut figure).end().labeled(...)`.
pub trait Drawable: Sized {
    /// Append the shape to `figure`
    fn drawn(self, figure: &mut Figure) -> Self;
}

/// Shapes that can be annotated with text.
pub trait Labelable: Sized {
    /// Annotate the shape with `text`, displaced by `offset` pixels
    fn labeled(
        self,
        figure: &mut Figure,
        text: &str,
        offset: (f64, f64),
        halign: HAlign,
        valign: VAlign,
    ) -> Self;
}

/// Radius of a point dot, in pixels
const DOT: f64 = 2.0;

impl Drawable for Point {
    fn drawn(self, figure: &mut Figure) -> Self {
        figure.push(Mark::Marker {
            at: self,
            color: Colors::BLACK,
            radius: DOT,
            label: None,
        });
        self
    }
}

impl Labelable for Point {
    fn labeled(
        self,
        figure: &mut Figure,
        text: &str,
        offset: (f64, f64),
        halign: HAlign,
        valign: VAlign,
    ) -> Self {
        figure.push(Mark::Text(Text {
            at: self,
            text: text.to_owned(),
            offset,
            halign,
            valign,
        }));
        self
    }
}

impl Drawable for Segment {
    fn drawn(self, figure: &mut Figure) -> Self {
        figure.push(Mark::Segment {
            segment: self,
            width: Line::THIN,
            head: false,
        });
        self
    }
}

impl Drawable for Arrow {
    fn drawn(self, figure: &mut Figure) -> Self {
        figure.push(Mark::Segment {
            segment: *self.segment(),
            width: Line::THIN,
            head: true,
        });
        self
    }
}

impl Drawable for Arc {
    fn drawn(self, figure: &mut Figure) -> Self {
        let mut line = Line::new(self.points(Arc::SAMPLES), Colors::BLACK);
        line.width = Line::THIN;
        figure.push(Mark::Line(line));
        self
    }
}

impl Labelable for Arc {
    fn labeled(
        self,
        figure: &mut Figure,
        text: &str,
        offset: (f64, f64),
        halign: HAlign,
        valign: VAlign,
    ) -> Self {
        self.mid().labeled(figure, text, offset, halign, valign);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn added(figure: &Figure, before: usize) -> &[Mark] {
        &figure.marks()[before..]
    }

    #[test]
    fn arrow_then_label_chain() {
        let mut figure = Figure::default();
        let before = figure.marks().len();

        let end = Arrow::new((1.0, 1.0), (3.0, 2.0))
            .drawn(&mut figure)
            .end()
            .labeled(&mut figure, "tip", (4.0, 0.0), HAlign::Left, VAlign::Center);

        assert_eq!(end, Point::new(3.0, 2.0));
        match added(&figure, before) {
            [Mark::Segment { head: true, width, .. }, Mark::Text(text)] => {
                assert_eq!(*width, Line::THIN);
                assert_eq!(text.text, "tip");
                assert_eq!(text.at, end);
                assert_eq!(text.offset, (4.0, 0.0));
            }
            marks => panic!("unexpected marks {marks:?}"),
        }
    }

    #[test]
    fn segment_has_no_head() {
        let mut figure = Figure::default();
        let before = figure.marks().len();
        Segment::vertical(2.0, 0.0, 1.0).drawn(&mut figure);
        assert!(matches!(
            added(&figure, before),
            [Mark::Segment { head: false, .. }]
        ));
    }

    #[test]
    fn arc_label_sits_at_mid_angle() {
        let mut figure = Figure::default();
        let before = figure.marks().len();
        Arc::new(Point::new(1.0, 1.0), 0.0, FRAC_PI_2)
            .drawn(&mut figure)
            .labeled(&mut figure, r"$\alpha$", (0.0, 0.0), HAlign::Center, VAlign::Center);

        match added(&figure, before) {
            [Mark::Line(line), Mark::Text(text)] => {
                assert_eq!(line.points.len(), Arc::SAMPLES);
                let radius = Arc::LABEL_RADIUS * std::f64::consts::FRAC_1_SQRT_2;
                assert_abs_diff_eq!(text.at.x, 1.0 + radius, epsilon = 1e-12);
                assert_abs_diff_eq!(text.at.y, 1.0 + radius, epsilon = 1e-12);
            }
            marks => panic!("unexpected marks {marks:?}"),
        }
    }

    #[test]
    fn point_is_a_black_dot() {
        let mut figure = Figure::default();
        let before = figure.marks().len();
        Point::new(2.0, 3.0).drawn(&mut figure);
        assert_eq!(
            added(&figure, before),
            [Mark::Marker {
                at: Point::new(2.0, 3.0),
                color: Colors::BLACK,
                radius: DOT,
                label: None,
            }]
        );
    }
}
