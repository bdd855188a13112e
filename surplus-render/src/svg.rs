use crate::{Figure, HAlign, Mark, RenderError, VAlign};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use surplus_core::models::{LineStyle, geometry, label::plain};

const LEFT_MARGIN: f64 = 50.0;
const RIGHT_MARGIN: f64 = 30.0;
const TOP_MARGIN: f64 = 30.0;
const BOTTOM_MARGIN: f64 = 40.0;
const TICK_LENGTH_PX: f64 = 5.0;
const ARROW_HEAD_PX: f64 = 8.0;
const SWATCH_PX: f64 = 24.0;
const LEGEND_PADDING_PX: f64 = 8.0;
// Rough advance of one character relative to the font size, used to size
// the legend box without measuring text
const CHAR_WIDTH: f64 = 0.6;

/// Image size and font sizes, in pixels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RenderConfig {
    /// Image width
    pub width: u32,
    /// Image height
    pub height: u32,
    /// Axis labels and annotations
    pub font_size: u32,
    /// Tick labels
    pub tick_font_size: u32,
    /// Legend entries
    pub legend_font_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            font_size: 16,
            tick_font_size: 14,
            legend_font_size: 13,
        }
    }
}

/// Draws a [`Figure`] as an SVG document.
#[derive(Clone, Debug, Default)]
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    /// A renderer with the given sizes
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// The image and font sizes
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the figure to an SVG string
    pub fn render(&self, figure: &Figure) -> Result<String, RenderError> {
        let RenderConfig { width, height, .. } = self.config;
        tracing::debug!(marks = figure.marks().len(), width, height, "rendering svg");

        let legend = figure
            .has_legend()
            .then(|| Legend::new(figure, self.config.legend_font_size))
            .filter(|legend| !legend.entries.is_empty());
        let layout = PlotLayout::new(
            f64::from(width),
            f64::from(height),
            legend.as_ref().map_or(0.0, |legend| legend.width),
            figure.xview(),
            figure.yview(),
        );

        let mut svg = String::new();
        {
            let area = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            area.fill(&WHITE).map_err(RenderError::backend("background"))?;

            self.draw_ticks(&area, &layout, figure)?;
            for mark in figure.marks() {
                self.draw_mark(&area, &layout, mark)?;
            }
            if let Some(legend) = &legend {
                legend.draw(&area, &layout)?;
            }

            area.present().map_err(RenderError::backend("document"))?;
        }
        Ok(svg)
    }

    fn draw_mark(
        &self,
        area: &DrawingArea<SVGBackend, Shift>,
        layout: &PlotLayout,
        mark: &Mark,
    ) -> Result<(), RenderError> {
        match mark {
            Mark::Line(line) => {
                let color = rgb(line.color);
                let pixels = line
                    .path()
                    .iter()
                    .map(|point| layout.project(*point))
                    .collect::<Vec<_>>();
                stroke(area, &pixels, line.style, color, line.width)?;
                if line.markers {
                    for point in &line.points {
                        dot(area, layout.project(*point), 3.0, color)?;
                    }
                }
            }
            Mark::Fill(fill) => {
                let pixels = fill
                    .points
                    .iter()
                    .map(|point| layout.project(*point))
                    .collect::<Vec<_>>();
                area.draw(&Polygon::new(
                    to_backend_points(&pixels),
                    rgb(fill.color).mix(fill.alpha).filled(),
                ))
                .map_err(RenderError::backend("area"))?;
            }
            Mark::Segment {
                segment,
                width,
                head,
            } => {
                let start = layout.project(segment.start);
                let end = layout.project(segment.end);
                stroke(area, &[start, end], LineStyle::Solid, BLACK, *width)?;
                if *head {
                    let angle = (end.1 - start.1).atan2(end.0 - start.0);
                    let barb = |turn: f64| {
                        (
                            end.0 + ARROW_HEAD_PX * (angle + turn).cos(),
                            end.1 + ARROW_HEAD_PX * (angle + turn).sin(),
                        )
                    };
                    let head = [barb(2.7), end, barb(-2.7)];
                    stroke(area, &head, LineStyle::Solid, BLACK, *width)?;
                }
            }
            Mark::Marker {
                at, color, radius, ..
            } => dot(area, layout.project(*at), *radius, rgb(*color))?,
            Mark::Text(text) => {
                let (x, y) = layout.project(text.at);
                let anchor = (x + text.offset.0, y - text.offset.1);
                write(
                    area,
                    &plain(&text.text),
                    anchor,
                    self.config.font_size,
                    Pos::new(hpos(text.halign), vpos(text.valign)),
                )?;
            }
        }
        Ok(())
    }

    fn draw_ticks(
        &self,
        area: &DrawingArea<SVGBackend, Shift>,
        layout: &PlotLayout,
        figure: &Figure,
    ) -> Result<(), RenderError> {
        let size = self.config.tick_font_size;
        for tick in figure.xticks() {
            let x = layout.project_x(tick.value);
            let base = layout.bottom;
            stroke(area, &[(x, base), (x, base + TICK_LENGTH_PX)], LineStyle::Solid, BLACK, 1.0)?;
            write(
                area,
                &plain(&tick.label),
                (x, base + TICK_LENGTH_PX + 2.0),
                size,
                Pos::new(HPos::Center, VPos::Top),
            )?;
        }
        for tick in figure.yticks() {
            let y = layout.project_y(tick.value);
            let base = layout.left;
            stroke(area, &[(base, y), (base - TICK_LENGTH_PX, y)], LineStyle::Solid, BLACK, 1.0)?;
            write(
                area,
                &plain(&tick.label),
                (base - TICK_LENGTH_PX - 3.0, y),
                size,
                Pos::new(HPos::Right, VPos::Center),
            )?;
        }
        Ok(())
    }
}

/// The labeled marks laid out in a box, outside the axes on the right.
struct Legend {
    entries: Vec<(String, Mark)>,
    font_size: u32,
    width: f64,
    row: f64,
}

impl Legend {
    fn new(figure: &Figure, font_size: u32) -> Self {
        let entries = figure
            .legend_entries()
            .map(|(label, mark)| (plain(label), mark.clone()))
            .collect::<Vec<_>>();
        let longest = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or_default();
        let size = f64::from(font_size);
        Self {
            entries,
            font_size,
            width: 3.0 * LEGEND_PADDING_PX + SWATCH_PX + longest as f64 * size * CHAR_WIDTH,
            row: 1.6 * size,
        }
    }

    fn height(&self) -> f64 {
        2.0 * LEGEND_PADDING_PX + self.entries.len() as f64 * self.row
    }

    // The lower left corner sits at 95% of the axes' width and half their height
    fn draw(
        &self,
        area: &DrawingArea<SVGBackend, Shift>,
        layout: &PlotLayout,
    ) -> Result<(), RenderError> {
        let left = layout.left + 0.95 * (layout.right - layout.left);
        let bottom = (layout.top + layout.bottom) / 2.0;
        let top = bottom - self.height();
        let corners = [
            (round_i32(left), round_i32(top)),
            (round_i32(left + self.width), round_i32(bottom)),
        ];
        area.draw(&Rectangle::new(corners, WHITE.filled()))
            .map_err(RenderError::backend("legend"))?;
        area.draw(&Rectangle::new(corners, RGBColor(0xCC, 0xCC, 0xCC).stroke_width(1)))
            .map_err(RenderError::backend("legend"))?;

        for (i, (label, mark)) in self.entries.iter().enumerate() {
            let y = top + LEGEND_PADDING_PX + (i as f64 + 0.5) * self.row;
            let x = left + LEGEND_PADDING_PX;
            let mid = (x + SWATCH_PX / 2.0, y);
            match mark {
                Mark::Line(line) => {
                    let color = rgb(line.color);
                    stroke(area, &[(x, y), (x + SWATCH_PX, y)], line.style, color, line.width)?;
                    if line.markers {
                        dot(area, mid, 3.0, color)?;
                    }
                }
                Mark::Fill(fill) => {
                    let half = self.row / 3.0;
                    area.draw(&Rectangle::new(
                        [
                            (round_i32(x), round_i32(y - half)),
                            (round_i32(x + SWATCH_PX), round_i32(y + half)),
                        ],
                        rgb(fill.color).mix(fill.alpha).filled(),
                    ))
                    .map_err(RenderError::backend("legend"))?;
                }
                Mark::Marker { color, radius, .. } => dot(area, mid, *radius, rgb(*color))?,
                Mark::Segment { .. } | Mark::Text(_) => {}
            }
            write(
                area,
                label,
                (x + SWATCH_PX + LEGEND_PADDING_PX, y),
                self.font_size,
                Pos::new(HPos::Left, VPos::Center),
            )?;
        }
        Ok(())
    }
}

/// Where the axes land in the image.
#[derive(Clone, Copy, Debug)]
struct PlotLayout {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    xview: (f64, f64),
    yview: (f64, f64),
}

impl PlotLayout {
    fn new(width: f64, height: f64, legend: f64, xview: (f64, f64), yview: (f64, f64)) -> Self {
        let left = LEFT_MARGIN.min(width / 2.0);
        let right = (width - RIGHT_MARGIN - legend).max(left + 10.0);
        let top = TOP_MARGIN.min(height / 2.0);
        let bottom = (height - BOTTOM_MARGIN).max(top + 10.0);
        Self {
            left,
            right,
            top,
            bottom,
            xview,
            yview,
        }
    }

    fn project_x(&self, value: f64) -> f64 {
        let (min, max) = self.xview;
        let span = (max - min).max(f64::EPSILON);
        self.left + (value - min) / span * (self.right - self.left)
    }

    fn project_y(&self, value: f64) -> f64 {
        let (min, max) = self.yview;
        let span = (max - min).max(f64::EPSILON);
        self.bottom - (value - min) / span * (self.bottom - self.top)
    }

    fn project(&self, point: geometry::Point) -> (f64, f64) {
        (self.project_x(point.x), self.project_y(point.y))
    }
}

fn rgb(color: surplus_core::models::Color) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn hpos(align: HAlign) -> HPos {
    match align {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    }
}

fn vpos(align: VAlign) -> VPos {
    match align {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    }
}

fn stroke<C: Color>(
    area: &DrawingArea<SVGBackend, Shift>,
    pixels: &[(f64, f64)],
    style: LineStyle,
    color: C,
    width: f64,
) -> Result<(), RenderError> {
    let shape = color.stroke_width((width.round() as u32).max(1));
    for dash in dashed(pixels, style.pattern()) {
        area.draw(&PathElement::new(to_backend_points(&dash), shape))
            .map_err(RenderError::backend("line"))?;
    }
    Ok(())
}

fn dot(
    area: &DrawingArea<SVGBackend, Shift>,
    center: (f64, f64),
    radius: f64,
    color: RGBColor,
) -> Result<(), RenderError> {
    area.draw(&Circle::new(
        (round_i32(center.0), round_i32(center.1)),
        radius.round().max(1.0) as i32,
        color.filled(),
    ))
    .map_err(RenderError::backend("marker"))
}

// Multi-line text is stacked downwards from the anchor
fn write(
    area: &DrawingArea<SVGBackend, Shift>,
    text: &str,
    anchor: (f64, f64),
    size: u32,
    pos: Pos,
) -> Result<(), RenderError> {
    let style = ("sans-serif", f64::from(size))
        .into_font()
        .into_text_style(area)
        .pos(pos);
    for (i, line) in text.lines().enumerate() {
        let y = anchor.1 + i as f64 * 1.2 * f64::from(size);
        area.draw_text(line, &style, (round_i32(anchor.0), round_i32(y)))
            .map_err(RenderError::backend("text"))?;
    }
    Ok(())
}

/// Cut a polyline into the "on" pieces of a dash pattern of alternating
/// on/off lengths. An empty pattern keeps the line whole.
fn dashed(points: &[(f64, f64)], pattern: &[f64]) -> Vec<Vec<(f64, f64)>> {
    if pattern.is_empty() || points.len() < 2 {
        return vec![points.to_vec()];
    }

    let mut pieces = Vec::new();
    let mut current = vec![points[0]];
    let mut on = true;
    let mut index = 0;
    let mut left = pattern[0];

    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        let length = (x1 - x0).hypot(y1 - y0);
        let mut travelled = 0.0;
        while length - travelled > left {
            travelled += left;
            let t = travelled / length;
            let cut = (x0 + t * (x1 - x0), y0 + t * (y1 - y0));
            if on {
                current.push(cut);
                pieces.push(std::mem::take(&mut current));
            } else {
                current = vec![cut];
            }
            on = !on;
            index = (index + 1) % pattern.len();
            left = pattern[index];
        }
        left -= length - travelled;
        if on {
            current.push((x1, y1));
        }
    }
    if on && current.len() > 1 {
        pieces.push(current);
    }
    pieces
}

fn to_backend_points(points: &[(f64, f64)]) -> Vec<(i32, i32)> {
    points
        .iter()
        .map(|&(x, y)| (round_i32(x), round_i32(y)))
        .collect()
}

fn round_i32(value: f64) -> i32 {
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AxesSpec;
    use surplus_core::models::Labels;

    #[test]
    fn solid_lines_stay_whole() {
        let points = [(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)];
        assert_eq!(dashed(&points, &[]), vec![points.to_vec()]);
    }

    #[test]
    fn dashes_follow_the_pattern() {
        let pieces = dashed(&[(0.0, 0.0), (20.0, 0.0)], &[6.0, 4.0]);
        assert_eq!(
            pieces,
            vec![vec![(0.0, 0.0), (6.0, 0.0)], vec![(10.0, 0.0), (16.0, 0.0)]]
        );
    }

    #[test]
    fn dashes_turn_corners() {
        let pieces = dashed(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)], &[6.0, 10.0]);
        assert_eq!(pieces, vec![vec![(0.0, 0.0), (4.0, 0.0), (4.0, 2.0)]]);
    }

    #[test]
    fn projection_flips_the_vertical_axis() {
        let layout = PlotLayout::new(200.0, 140.0, 0.0, (0.0, 10.0), (0.0, 10.0));
        assert_eq!(layout.project(geometry::Point::new(0.0, 0.0)), (50.0, 100.0));
        assert_eq!(layout.project(geometry::Point::new(10.0, 10.0)), (170.0, 30.0));
        assert_eq!(layout.project(geometry::Point::new(5.0, 5.0)), (110.0, 65.0));
    }

    #[test]
    fn legend_takes_room_from_the_axes() {
        let plain = PlotLayout::new(800.0, 600.0, 0.0, (0.0, 1.0), (0.0, 1.0));
        let narrowed = PlotLayout::new(800.0, 600.0, 150.0, (0.0, 1.0), (0.0, 1.0));
        assert_eq!(plain.right - narrowed.right, 150.0);
    }

    #[test]
    fn renders_axis_labels_as_plain_text() {
        let figure = Figure::new(&AxesSpec::default(), Labels::MONEY_AXIS);
        let svg = SvgRenderer::default().render(&figure).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains('Q'));
        assert!(svg.contains('$'));
        assert!(!svg.contains("mathdollar"));
    }
}
