use egfr_cohort::distribution::PlotPanel;
use egfr_stats::box_plot::BoxPlotStats;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize as _},
    symbols::{Marker, merge::MergeStrategy},
    text::Line,
    widgets::{
        Block, Paragraph, Widget,
        canvas::{Canvas, Context, Line as CanvasLine, Points, Rectangle},
    },
};

const BOX_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

/// Half the width of a box, in units of the slot each group occupies.
const BOX_HALF_WIDTH: f64 = 0.3;

/// Vertical margin around the data range, in years.
const AGE_MARGIN: f64 = 5.0;

/// Side-by-side vertical box plots of the groups in a panel.
pub(super) struct BoxPlotChart<'a> {
    pub title: &'a str,
    pub panel: &'a PlotPanel,
}

impl Widget for BoxPlotChart<'_> {
    #[expect(clippy::cast_precision_loss)]
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .merge_borders(MergeStrategy::Exact)
            .title(self.title);

        let Some((low, high)) = self.panel.value_range() else {
            let empty = Paragraph::new("No patients in any subgroup").block(block);
            Widget::render(empty, area, buf);
            return;
        };
        let y_bounds = [low - AGE_MARGIN, high + AGE_MARGIN];
        let slots = self.panel.groups.len() as f64;

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([0.0, slots])
            .y_bounds(y_bounds)
            .paint(|ctx| {
                for (i, group) in self.panel.groups.iter().enumerate() {
                    let center = i as f64 + 0.5;
                    let color = BOX_COLORS[i % BOX_COLORS.len()];
                    if let Some(summary) = &group.summary {
                        draw_box(ctx, center, summary, color);
                    }
                    ctx.print(
                        center - BOX_HALF_WIDTH,
                        y_bounds[0],
                        Line::from(group.subgroup.label().to_owned()).fg(color),
                    );
                }
                for tick in age_ticks(y_bounds) {
                    ctx.print(0.0, tick, Line::from(format!("{tick:.0}")).dark_gray());
                }
            });

        Widget::render(canvas, area, buf);
    }
}

fn draw_box(ctx: &mut Context<'_>, center: f64, summary: &BoxPlotStats, color: Color) {
    let left = center - BOX_HALF_WIDTH;
    let right = center + BOX_HALF_WIDTH;
    let hline = |y: f64, x1: f64, x2: f64| CanvasLine::new(x1, y, x2, y, color);
    let vline = |x: f64, y1: f64, y2: f64| CanvasLine::new(x, y1, x, y2, color);

    ctx.draw(&Rectangle {
        x: left,
        y: summary.q1,
        width: 2.0 * BOX_HALF_WIDTH,
        height: summary.q3 - summary.q1,
        color,
    });
    ctx.draw(&hline(summary.median, left, right));

    let cap = BOX_HALF_WIDTH / 2.0;
    ctx.draw(&vline(center, summary.whisker_low, summary.q1));
    ctx.draw(&vline(center, summary.q3, summary.whisker_high));
    ctx.draw(&hline(summary.whisker_low, center - cap, center + cap));
    ctx.draw(&hline(summary.whisker_high, center - cap, center + cap));

    let outliers = summary
        .outliers
        .iter()
        .map(|&age| (center, age))
        .collect::<Vec<_>>();
    ctx.draw(&Points {
        coords: &outliers,
        color,
    });
}

/// Round ages every ten years inside `bounds`.
fn age_ticks(bounds: [f64; 2]) -> impl Iterator<Item = f64> {
    let first = (bounds[0] / 10.0).ceil() * 10.0;
    std::iter::successors(Some(first), |t| Some(t + 10.0)).take_while(move |t| *t <= bounds[1])
}

/// Numbers behind the boxes of a panel.
pub(super) struct PanelSummary<'a> {
    pub panel: &'a PlotPanel,
}

impl Widget for PanelSummary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .merge_borders(MergeStrategy::Exact)
            .title("Summary");

        let mut lines = vec![];
        for (i, group) in self.panel.groups.iter().enumerate() {
            let color = BOX_COLORS[i % BOX_COLORS.len()];
            lines.push(Line::from(group.subgroup.label().to_owned()).fg(color).bold());
            match &group.summary {
                Some(s) => lines.extend([
                    Line::raw(format!("  n:        {:>8}", s.count)),
                    Line::raw(format!("  Q1:       {:>8.1}", s.q1)),
                    Line::raw(format!("  Median:   {:>8.1}", s.median)),
                    Line::raw(format!("  Q3:       {:>8.1}", s.q3)),
                    Line::raw(format!(
                        "  Whiskers: {:>5.1} - {:<5.1}",
                        s.whisker_low, s.whisker_high
                    )),
                    Line::raw(format!("  Outliers: {:>8}", s.outliers.len())),
                ]),
                None => lines.push(Line::styled("  no patients", Style::default().dark_gray())),
            }
            lines.push(Line::default());
        }

        Widget::render(Paragraph::new(lines).block(block), area, buf);
    }
}
