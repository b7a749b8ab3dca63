//! SVG month preview renderer.
//!
//! One SVG document per month page: a seven-column grid with rows sized by
//! their track count, pills as rounded rectangles spanning columns, and a
//! legend strip at the bottom. Meant for quick visual checks without a
//! TeX toolchain; the LaTeX renderer is the typeset output.

use svg::node::element::{Group, Polygon, Rectangle, Text};
use svg::Document;

use plancal_core::{CellEntry, MonthPage, Plan, RenderError, Renderer, TaskStatus, WeekRow};

use crate::{month_name, truncate};

/// SVG month renderer configuration
#[derive(Clone, Debug)]
pub struct SvgMonthRenderer {
    /// Width of one day column in pixels
    pub cell_width: u32,
    /// Height reserved for the day number at the top of each cell
    pub day_header_height: u32,
    /// Pill height in pixels
    pub pill_height: u32,
    /// Vertical gap between tracks
    pub pill_gap: u32,
    /// Title band height
    pub header_height: u32,
    /// Padding around the grid
    pub padding: u32,
    /// Legend strip height (0 disables the legend)
    pub legend_height: u32,
    /// Decorate milestone pills with a diamond marker
    pub milestone_marker: bool,
    /// Background color
    pub background_color: String,
    /// Fill for neighbor-month filler cells
    pub filler_color: String,
    /// Grid line color
    pub grid_color: String,
    /// Text color
    pub text_color: String,
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
}

impl Default for SvgMonthRenderer {
    fn default() -> Self {
        Self {
            cell_width: 150,
            day_header_height: 20,
            pill_height: 16,
            pill_gap: 4,
            header_height: 48,
            padding: 16,
            legend_height: 28,
            milestone_marker: true,
            background_color: "#ffffff".into(),
            filler_color: "#f4f5f7".into(),
            grid_color: "#d5d9de".into(),
            text_color: "#2c3e50".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12,
        }
    }
}

impl SvgMonthRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the day column width
    pub fn cell_width(mut self, width: u32) -> Self {
        self.cell_width = width;
        self
    }

    /// Configure the pill height
    pub fn pill_height(mut self, height: u32) -> Self {
        self.pill_height = height;
        self
    }

    /// Leave milestone pills undecorated
    pub fn plain_milestones(mut self) -> Self {
        self.milestone_marker = false;
        self
    }

    /// Drop the legend strip
    pub fn no_legend(mut self) -> Self {
        self.legend_height = 0;
        self
    }

    fn grid_width(&self) -> u32 {
        self.cell_width * 7
    }

    fn row_height(&self, week: &WeekRow) -> u32 {
        self.day_header_height
            + week.track_count as u32 * (self.pill_height + self.pill_gap)
            + 4
    }

    /// Render one month page to an SVG document string
    pub fn render_month(&self, page: &MonthPage) -> Result<String, RenderError> {
        let grid_top = self.padding + self.header_height;
        let grid_height: u32 = page.weeks.iter().map(|w| self.row_height(w)).sum();
        let width = self.padding * 2 + self.grid_width();
        let height = grid_top + grid_height + self.legend_height + self.padding;

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", self.background_color.as_str());
        document = document.add(background);

        // Title
        let title = Text::new(format!("{} {}", month_name(page.month), page.year))
            .set("x", self.padding)
            .set("y", self.padding + 18)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size + 6)
            .set("font-weight", "bold")
            .set("fill", self.text_color.as_str());
        document = document.add(title);

        // Weekday labels along the top of the grid
        if let Some(first_week) = page.weeks.first() {
            let mut labels = Group::new().set("class", "weekdays");
            for (column, cell) in first_week.cells.iter().enumerate() {
                let x = self.padding + column as u32 * self.cell_width + self.cell_width / 2;
                let label = Text::new(cell.date.format("%a").to_string())
                    .set("x", x)
                    .set("y", grid_top - 6)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size - 1)
                    .set("fill", self.text_color.as_str())
                    .set("text-anchor", "middle");
                labels = labels.add(label);
            }
            document = document.add(labels);
        }

        // Week rows
        let mut row_top = grid_top;
        for week in &page.weeks {
            document = document.add(self.render_week(week, row_top));
            row_top += self.row_height(week);
        }

        // Legend strip
        if self.legend_height > 0 && !page.legend.is_empty() {
            document = document.add(self.render_legend(page, row_top + 6));
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {e}")))?;
        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {e}")))
    }

    fn render_week(&self, week: &WeekRow, row_top: u32) -> Group {
        let mut group = Group::new().set("class", "week");
        let row_height = self.row_height(week);

        // Cell outlines and day numbers first, pills on top
        for (column, cell) in week.cells.iter().enumerate() {
            let x = self.padding + column as u32 * self.cell_width;
            let outline = Rectangle::new()
                .set("x", x)
                .set("y", row_top)
                .set("width", self.cell_width)
                .set("height", row_height)
                .set(
                    "fill",
                    if cell.in_month {
                        "none"
                    } else {
                        self.filler_color.as_str()
                    },
                )
                .set("stroke", self.grid_color.as_str())
                .set("stroke-width", 1);
            group = group.add(outline);

            if let Some(day) = cell.day_number {
                let number = Text::new(day.to_string())
                    .set("x", x + 5)
                    .set("y", row_top + 14)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size)
                    .set("font-weight", "bold")
                    .set("fill", self.text_color.as_str());
                group = group.add(number);
            }
        }

        for (column, cell) in week.cells.iter().enumerate() {
            for entry in &cell.entries {
                if let CellEntry::Head(head) = entry {
                    group = group.add(self.render_pill(head, column, row_top));
                }
            }
        }

        group
    }

    fn render_pill(
        &self,
        head: &plancal_core::PillHead,
        column: usize,
        row_top: u32,
    ) -> Group {
        let x = self.padding + column as u32 * self.cell_width + 2;
        let y = row_top
            + self.day_header_height
            + head.track as u32 * (self.pill_height + self.pill_gap);
        let width = head.span as u32 * self.cell_width - 4;
        let opacity = match head.status {
            TaskStatus::Completed => 0.55,
            _ => 1.0,
        };

        let mut group = Group::new()
            .set("class", "pill")
            .set("data-anchor", head.anchor.as_str());
        let bar = Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", width)
            .set("height", self.pill_height)
            .set("rx", 3)
            .set("ry", 3)
            .set("fill", format!("#{}", head.color.hex()))
            .set("opacity", opacity);
        group = group.add(bar);

        let mut text_x = x + 5;
        if head.milestone && self.milestone_marker {
            let cx = (x + 7) as f64;
            let cy = y as f64 + self.pill_height as f64 / 2.0;
            let size = self.pill_height as f64 / 3.0;
            let diamond = Polygon::new()
                .set(
                    "points",
                    format!(
                        "{},{} {},{} {},{} {},{}",
                        cx,
                        cy - size,
                        cx + size,
                        cy,
                        cx,
                        cy + size,
                        cx - size,
                        cy
                    ),
                )
                .set("fill", "#ffffff");
            group = group.add(diamond);
            text_x += 10;
        }

        // ~7px per character at the default font size
        let max_chars = (width.saturating_sub(text_x - x + 4) / 7) as usize;
        let mut label = truncate(&head.label, max_chars.max(3));
        if let Some(description) = &head.description {
            label = truncate(&format!("{label} — {description}"), max_chars.max(3));
        }
        let text = Text::new(label)
            .set("x", text_x)
            .set("y", y + self.pill_height / 2 + 4)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size - 2)
            .set("fill", "#ffffff");
        group.add(text)
    }

    fn render_legend(&self, page: &MonthPage, y: u32) -> Group {
        let mut group = Group::new().set("class", "legend");
        let swatch = 10_u32;
        let mut x = self.padding as f64;

        for legend_group in &page.legend.groups {
            for entry in &legend_group.entries {
                let label = if entry.subphase.is_empty() {
                    legend_group.phase.clone()
                } else {
                    format!("{} / {}", legend_group.phase, entry.subphase)
                };

                let box_node = Rectangle::new()
                    .set("x", x)
                    .set("y", y)
                    .set("width", swatch)
                    .set("height", swatch)
                    .set("rx", 2)
                    .set("fill", format!("#{}", entry.color.hex()));
                group = group.add(box_node);

                let text = Text::new(label.clone())
                    .set("x", x + swatch as f64 + 5.0)
                    .set("y", y + swatch - 1)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size - 1)
                    .set("fill", self.text_color.as_str());
                group = group.add(text);

                // Advance by swatch + label estimate
                x += swatch as f64 + 12.0 + label.len() as f64 * 6.5;
            }
        }
        group
    }
}

impl Renderer for SvgMonthRenderer {
    type Output = String;

    /// Renders a single page; use [`SvgMonthRenderer::render_month`] when
    /// writing one file per month.
    fn render(&self, _plan: &Plan, pages: &[MonthPage]) -> Result<String, RenderError> {
        match pages {
            [page] => self.render_month(page),
            _ => Err(RenderError::InvalidData(format!(
                "SVG renders one month per document, got {}",
                pages.len()
            ))),
        }
    }
}
