use crate::{Drawable, Labelable};
use surplus_core::models::{
    Color, Labels, LineStyle,
    geometry::{Arrow, Point, Segment},
};

/// Where the axes start and end, how they are ticked and labeled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AxesSpec {
    /// The quantity range, in data coordinates
    pub xlim: (f64, f64),
    /// The price (or money) range, in data coordinates
    pub ylim: (f64, f64),
    /// Explicit quantity ticks; none are drawn when absent
    pub xticks: Option<Vec<Tick>>,
    /// Explicit price ticks; none are drawn when absent
    pub yticks: Option<Vec<Tick>>,
    /// The label at the end of the quantity axis
    pub x_label: String,
    /// The label at the end of the vertical axis; each plotter has its own default
    pub y_label: Option<String>,
}

impl Default for AxesSpec {
    fn default() -> Self {
        Self {
            xlim: (0.0, 10.0),
            ylim: (0.0, 10.0),
            xticks: None,
            yticks: None,
            x_label: Labels::QUANTITY_AXIS.to_owned(),
            y_label: None,
        }
    }
}

impl AxesSpec {
    /// `n` evenly spaced quantities across `xlim`, where curves are sampled for drawing
    pub fn x_samples(&self, n: usize) -> Vec<f64> {
        surplus_core::grid::linspace(self.xlim.0, self.xlim.1, n)
    }
}

/// A labeled tick mark
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick {
    /// Where the tick sits on its axis
    pub value: f64,
    /// The text written next to it
    pub label: String,
}

impl Tick {
    /// Create a tick
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Horizontal text alignment relative to the anchor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HAlign {
    /// The text starts at the anchor
    Left,
    /// The text is centered on the anchor
    #[default]
    Center,
    /// The text ends at the anchor
    Right,
}

/// Vertical text alignment relative to the anchor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VAlign {
    /// The top of the text is at the anchor
    Top,
    /// The text is centered on the anchor
    #[default]
    Center,
    /// The bottom of the text is at the anchor
    Bottom,
}

/// A polyline through data points.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// The vertices, in data coordinates
    pub points: Vec<Point>,
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f64,
    /// Dash pattern
    pub style: LineStyle,
    /// Draw as a staircase that jumps before each vertex
    pub steps: bool,
    /// Mark each vertex with a dot
    pub markers: bool,
    /// Legend entry
    pub label: Option<String>,
}

impl Line {
    /// Stroke width of curves
    pub const WIDTH: f64 = 1.5;
    /// Stroke width of annotations
    pub const THIN: f64 = 0.5;

    /// A solid line of the default width
    pub fn new(points: Vec<Point>, color: Color) -> Self {
        Self {
            points,
            color,
            width: Self::WIDTH,
            style: LineStyle::Solid,
            steps: false,
            markers: false,
            label: None,
        }
    }

    /// The vertices actually stroked.
    ///
    /// A stepped line holds each value over the interval that ends at its
    /// vertex: from `(x0, y0)` it climbs to `(x0, y1)` then runs to `(x1, y1)`.
    pub fn path(&self) -> Vec<Point> {
        if !self.steps {
            return self.points.clone();
        }
        steps_pre(&self.points)
    }
}

/// A translucent filled polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    /// The polygon's vertices, in data coordinates
    pub points: Vec<Point>,
    /// Fill color
    pub color: Color,
    /// Opacity between 0 and 1
    pub alpha: f64,
    /// Legend entry
    pub label: Option<String>,
}

impl Fill {
    /// The area between `top` and the horizontal axis.
    ///
    /// With `steps`, the top edge is drawn as a staircase like a stepped [`Line`].
    pub fn under(top: &[Point], steps: bool, color: Color, alpha: f64) -> Option<Self> {
        let (first, last) = (top.first()?, top.last()?);
        if top.len() < 2 {
            return None;
        }

        let mut points = Vec::with_capacity(2 * top.len() + 2);
        points.push(Point::new(first.x, 0.0));
        if steps {
            points.extend(steps_pre(top));
        } else {
            points.extend_from_slice(top);
        }
        points.push(Point::new(last.x, 0.0));

        Some(Self {
            points,
            color,
            alpha,
            label: None,
        })
    }
}

/// Text anchored at a data point.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    /// The anchor, in data coordinates
    pub at: Point,
    /// The text, possibly with TeX markup
    pub text: String,
    /// Displacement from the anchor in pixels, positive up and right
    pub offset: (f64, f64),
    /// Horizontal alignment on the displaced anchor
    pub halign: HAlign,
    /// Vertical alignment on the displaced anchor
    pub valign: VAlign,
}

/// One element of a figure's display list
#[derive(Clone, Debug, PartialEq)]
pub enum Mark {
    /// A curve or annotation polyline
    Line(Line),
    /// A shaded area
    Fill(Fill),
    /// A straight black stroke, with an arrow head at the end if `head`
    Segment {
        /// The stroke
        segment: Segment,
        /// Stroke width in pixels
        width: f64,
        /// Whether an arrow head is drawn at the end
        head: bool,
    },
    /// A filled dot
    Marker {
        /// The center, in data coordinates
        at: Point,
        /// Fill color
        color: Color,
        /// Radius in pixels
        radius: f64,
        /// Legend entry
        label: Option<String>,
    },
    /// An annotation
    Text(Text),
}

impl Mark {
    /// The legend entry, if the mark has one
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Line(line) => line.label.as_deref(),
            Self::Fill(fill) => fill.label.as_deref(),
            Self::Marker { label, .. } => label.as_deref(),
            Self::Segment { .. } | Self::Text(_) => None,
        }
    }
}

/// A display list in data coordinates, together with the axes it is drawn in.
///
/// This is the drawing surface the plotters write to. It knows nothing of
/// pixels; [`crate::SvgRenderer`] turns it into an image.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    xview: (f64, f64),
    yview: (f64, f64),
    xticks: Vec<Tick>,
    yticks: Vec<Tick>,
    marks: Vec<Mark>,
    legend: bool,
}

impl Figure {
    /// Room left around the data on the low end of each axis
    pub const PADDING: f64 = 0.3;
    /// How far the axes extend past their upper limit
    pub const OVERSHOOT: f64 = 1.1;

    /// Set up frameless axes: an arrow along each axis ending in its label.
    pub fn new(spec: &AxesSpec, y_label: &str) -> Self {
        let (x0, x1) = spec.xlim;
        let (y0, y1) = spec.ylim;
        let mut figure = Self {
            xview: (x0 - Self::PADDING, x1 * Self::OVERSHOOT),
            yview: (y0 - Self::PADDING, y1 * Self::OVERSHOOT),
            xticks: spec.xticks.clone().unwrap_or_default(),
            yticks: spec.yticks.clone().unwrap_or_default(),
            marks: Vec::new(),
            legend: false,
        };

        let y_label = spec.y_label.as_deref().unwrap_or(y_label);
        Arrow::horizontal(0.0, x0, x1 * Self::OVERSHOOT)
            .drawn(&mut figure)
            .end()
            .labeled(&mut figure, &spec.x_label, (0.0, 0.0), HAlign::Left, VAlign::Center);
        Arrow::vertical(0.0, y0, y1 * Self::OVERSHOOT)
            .drawn(&mut figure)
            .end()
            .labeled(&mut figure, y_label, (0.0, 0.0), HAlign::Center, VAlign::Bottom);

        figure
    }

    /// Append a mark to the display list
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// The display list, in drawing order
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// The visible quantity range
    pub fn xview(&self) -> (f64, f64) {
        self.xview
    }

    /// The visible vertical range
    pub fn yview(&self) -> (f64, f64) {
        self.yview
    }

    /// Quantity ticks
    pub fn xticks(&self) -> &[Tick] {
        &self.xticks
    }

    /// Vertical ticks
    pub fn yticks(&self) -> &[Tick] {
        &self.yticks
    }

    /// Show a legend of the labeled marks
    pub fn legend(&mut self) {
        self.legend = true;
    }

    /// Hide the legend
    pub fn hide_legend(&mut self) {
        self.legend = false;
    }

    /// Whether the legend is shown
    pub fn has_legend(&self) -> bool {
        self.legend
    }

    /// The labeled marks, in drawing order
    pub fn legend_entries(&self) -> impl Iterator<Item = (&str, &Mark)> {
        self.marks
            .iter()
            .filter_map(|mark| mark.label().map(|label| (label, mark)))
    }
}

/// Expand points into a staircase that takes each new value at the previous x.
fn steps_pre(points: &[Point]) -> Vec<Point> {
    let mut path = Vec::with_capacity(2 * points.len());
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            path.push(Point::new(points[i - 1].x, point.y));
        }
        path.push(*point);
    }
    path
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(&AxesSpec::default(), Labels::PRICE_AXIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surplus_core::models::Colors;

    #[test]
    fn axes_setup() {
        let figure = Figure::default();
        let top = 10.0 * Figure::OVERSHOOT;
        assert_eq!(figure.xview(), (-0.3, top));
        assert_eq!(figure.yview(), (-0.3, top));

        let arrows = figure
            .marks()
            .iter()
            .filter(|mark| matches!(mark, Mark::Segment { head: true, .. }))
            .count();
        assert_eq!(arrows, 2);

        let labels = figure
            .marks()
            .iter()
            .filter_map(|mark| match mark {
                Mark::Text(text) => Some((text.text.as_str(), text.at.xy())),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(labels, vec![("$Q$", (top, 0.0)), ("$P$", (0.0, top))]);
        assert!(!figure.has_legend());
    }

    #[test]
    fn custom_y_label_wins() {
        let spec = AxesSpec {
            y_label: Some("$p$".into()),
            ..Default::default()
        };
        let figure = Figure::new(&spec, Labels::PRICE_AXIS);
        assert!(figure.marks().iter().any(|mark| matches!(
            mark,
            Mark::Text(text) if text.text == "$p$"
        )));
    }

    #[test]
    fn stepped_path_jumps_first() {
        let mut line = Line::new(
            vec![Point::new(0.0, 1.0), Point::new(1.0, 1.0), Point::new(2.0, 3.0)],
            Colors::SUPPLY,
        );
        line.steps = true;
        assert_eq!(
            line.path(),
            vec![
                Point::new(0.0, 1.0),
                Point::new(0.0, 1.0),
                Point::new(1.0, 1.0),
                Point::new(1.0, 3.0),
                Point::new(2.0, 3.0),
            ]
        );
    }

    #[test]
    fn fill_closes_on_the_axis() {
        let top = [Point::new(1.0, 2.0), Point::new(3.0, 2.0)];
        let fill = Fill::under(&top, false, Colors::DEMAND, 0.2).unwrap();
        assert_eq!(
            fill.points,
            vec![
                Point::new(1.0, 0.0),
                Point::new(1.0, 2.0),
                Point::new(3.0, 2.0),
                Point::new(3.0, 0.0),
            ]
        );
        assert!(Fill::under(&top[..1], false, Colors::DEMAND, 0.2).is_none());
    }

    #[test]
    fn legend_entries_in_order() {
        let mut figure = Figure::default();
        let mut line = Line::new(vec![Point::new(0.0, 0.0)], Colors::BLACK);
        line.label = Some("first".into());
        figure.push(Mark::Line(line));
        figure.push(Mark::Marker {
            at: Point::new(1.0, 1.0),
            color: Colors::BLACK,
            radius: 3.0,
            label: Some("second".into()),
        });
        let labels = figure.legend_entries().map(|(label, _)| label).collect::<Vec<_>>();
        assert_eq!(labels, ["first", "second"]);
    }
}
