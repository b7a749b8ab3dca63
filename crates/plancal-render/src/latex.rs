//! LaTeX calendar document renderer.
//!
//! Emits a standalone document with one section per month: a legend line,
//! a seven-column grid with one table row per week row, and a task index
//! cross-referencing the stable pill anchors. Cell entries translate to
//! two primitives: a colored pill box that overflows its head cell by the
//! pill's column span, and a fixed-height strut for continuations and
//! spacers.
//!
//! ## Example Output
//!
//! ```text
//! \section*{September 2025}
//! \noindent{\small \textbf{Writing:} \LegendSwatch{pill8C4FD1}~Drafting}\par
//! \noindent\begin{tabular}{|*{7}{p{\CalColWidth}|}}
//! \hline
//! {\bfseries\small Mon} & ... & {\bfseries\small Sun} \\
//! \hline
//! \DayNum{1}\hypertarget{draft-w0}{}\TaskPill{pill8C4FD1}{3}{\textbf{Write draft}} & ...
//! ```

use std::collections::BTreeSet;

use plancal_core::{CellEntry, DayCell, MonthPage, Plan, RenderError, Renderer, WeekRow};

use crate::month_name;

/// LaTeX document renderer configuration
#[derive(Clone, Debug)]
pub struct LatexRenderer {
    /// Pill height length, substituted into the preamble
    pub pill_height: String,
    /// Decorate milestone pills with a diamond marker
    pub milestone_marker: bool,
    /// Style tokens for the weekday header row, emitted verbatim
    pub week_header_style: String,
    /// Emit a complete document (preamble and `\end{document}`)
    pub standalone: bool,
    /// Emit the per-month legend line
    pub show_legend: bool,
    /// Emit the task index section
    pub show_index: bool,
}

impl Default for LatexRenderer {
    fn default() -> Self {
        Self {
            pill_height: "4.5mm".into(),
            milestone_marker: true,
            week_header_style: "\\bfseries\\small".into(),
            standalone: true,
            show_legend: true,
            show_index: true,
        }
    }
}

impl LatexRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pill height length
    pub fn pill_height(mut self, height: impl Into<String>) -> Self {
        self.pill_height = height.into();
        self
    }

    /// Set the weekday header style tokens
    pub fn week_header_style(mut self, style: impl Into<String>) -> Self {
        self.week_header_style = style.into();
        self
    }

    /// Leave milestone pills undecorated
    pub fn plain_milestones(mut self) -> Self {
        self.milestone_marker = false;
        self
    }

    /// Emit month sections only, for inclusion in an outer document
    pub fn fragment(mut self) -> Self {
        self.standalone = false;
        self
    }

    /// Skip the per-month legends
    pub fn no_legend(mut self) -> Self {
        self.show_legend = false;
        self
    }

    /// Skip the task index section
    pub fn no_index(mut self) -> Self {
        self.show_index = false;
        self
    }

    /// Stable `xcolor` name for a pill color
    fn color_name(hex: &str) -> String {
        format!("pill{hex}")
    }

    /// Every distinct color used by heads and legends across the document
    fn collect_colors(pages: &[MonthPage]) -> BTreeSet<String> {
        let mut colors = BTreeSet::new();
        for page in pages {
            for group in &page.legend.groups {
                for entry in &group.entries {
                    colors.insert(entry.color.hex());
                }
            }
            for week in &page.weeks {
                for cell in &week.cells {
                    for entry in &cell.entries {
                        if let CellEntry::Head(head) = entry {
                            colors.insert(head.color.hex());
                        }
                    }
                }
            }
        }
        colors
    }

    fn emit_preamble(&self, out: &mut String, plan: &Plan, pages: &[MonthPage]) {
        out.push_str("\\documentclass[10pt]{article}\n");
        out.push_str("\\usepackage[landscape,margin=12mm]{geometry}\n");
        out.push_str("\\usepackage[table]{xcolor}\n");
        out.push_str("\\usepackage{array}\n");
        out.push_str("\\usepackage[hidelinks]{hyperref}\n");
        out.push_str("\\setlength{\\parindent}{0pt}\n");
        out.push('\n');

        out.push_str("% Calendar primitives\n");
        out.push_str("\\newlength{\\PillHeight}\n");
        out.push_str(&format!("\\setlength{{\\PillHeight}}{{{}}}\n", self.pill_height));
        out.push_str("\\newlength{\\CalColWidth}\n");
        out.push_str("\\setlength{\\CalColWidth}{0.128\\textwidth}\n");
        out.push_str("% #1 color, #2 column span, #3 label; the box overflows the head\n");
        out.push_str("% cell across the continuation cells of the same table row\n");
        out.push_str(
            "\\newcommand{\\TaskPill}[3]{\\makebox[0pt][l]{\\colorbox{#1}{\\parbox[c][\\PillHeight][c]{\\dimexpr#2\\CalColWidth+2\\tabcolsep*#2-2\\tabcolsep-2\\fboxsep\\relax}{\\strut\\scriptsize\\textcolor{white}{#3}}}}\\par}\n",
        );
        out.push_str("% Same vertical footprint as a pill, no ink\n");
        out.push_str(
            "\\newcommand{\\TrackSlot}{\\rule{0pt}{\\dimexpr\\PillHeight+2\\fboxsep\\relax}\\par}\n",
        );
        out.push_str("\\newcommand{\\MilestoneMark}{$\\blacklozenge$\\,}\n");
        out.push_str("\\newcommand{\\DayNum}[1]{{\\footnotesize\\textbf{#1}}\\par}\n");
        out.push_str(
            "\\newcommand{\\LegendSwatch}[1]{\\textcolor{#1}{\\rule[-0.4ex]{2.2ex}{2.2ex}}}\n",
        );
        out.push('\n');

        for hex in Self::collect_colors(pages) {
            out.push_str(&format!(
                "\\definecolor{{{}}}{{HTML}}{{{hex}}}\n",
                Self::color_name(&hex)
            ));
        }
        out.push('\n');

        out.push_str("\\begin{document}\n");
        out.push_str(&format!(
            "\\begin{{center}}{{\\LARGE\\bfseries {}}}\\end{{center}}\n\n",
            escape_latex(&plan.name)
        ));
    }

    fn emit_month(&self, out: &mut String, page: &MonthPage) {
        out.push_str(&format!(
            "\\section*{{{} {}}}\n",
            month_name(page.month),
            page.year
        ));

        if self.show_legend && !page.legend.is_empty() {
            let mut parts = Vec::new();
            for group in &page.legend.groups {
                let mut entries = Vec::new();
                for entry in &group.entries {
                    let label = if entry.subphase.is_empty() {
                        &group.phase
                    } else {
                        &entry.subphase
                    };
                    entries.push(format!(
                        "\\LegendSwatch{{{}}}~{}",
                        Self::color_name(&entry.color.hex()),
                        escape_latex(label)
                    ));
                }
                parts.push(format!(
                    "\\textbf{{{}:}} {}",
                    escape_latex(&group.phase),
                    entries.join(" ")
                ));
            }
            out.push_str(&format!(
                "\\noindent{{\\small {}}}\\par\\medskip\n",
                parts.join("\\quad ")
            ));
        }

        out.push_str("\\noindent\\begin{tabular}{|*{7}{p{\\CalColWidth}|}}\n");
        out.push_str("\\hline\n");
        if let Some(first_week) = page.weeks.first() {
            let headers: Vec<String> = first_week
                .cells
                .iter()
                .map(|c| format!("{{{} {}}}", self.week_header_style, c.date.format("%a")))
                .collect();
            out.push_str(&format!("{} \\\\\n\\hline\n", headers.join(" & ")));
        }
        for week in &page.weeks {
            self.emit_week_row(out, week);
        }
        out.push_str("\\end{tabular}\n\n");
    }

    fn emit_week_row(&self, out: &mut String, week: &WeekRow) {
        let cells: Vec<String> = week.cells.iter().map(|c| self.emit_cell(c)).collect();
        out.push_str(&cells.join(" &\n"));
        out.push_str(" \\\\\n\\hline\n");
    }

    fn emit_cell(&self, cell: &DayCell) -> String {
        let mut body = String::new();
        if let Some(day) = cell.day_number {
            body.push_str(&format!("\\DayNum{{{day}}}"));
        }
        for entry in &cell.entries {
            match entry {
                CellEntry::Head(head) => {
                    let mut label = String::new();
                    if head.milestone && self.milestone_marker {
                        label.push_str("\\MilestoneMark{}");
                    }
                    label.push_str(&format!("\\textbf{{{}}}", escape_latex(&head.label)));
                    if let Some(description) = &head.description {
                        label.push_str(&format!(" {{\\tiny {}}}", escape_latex(description)));
                    }
                    body.push_str(&format!(
                        "\\hypertarget{{{}}}{{}}\\TaskPill{{{}}}{{{}}}{{{label}}}",
                        head.anchor,
                        Self::color_name(&head.color.hex()),
                        head.span,
                    ));
                }
                CellEntry::Continuation { .. } | CellEntry::Spacer { .. } => {
                    body.push_str("\\TrackSlot{}");
                }
            }
        }
        body
    }

    fn emit_task_index(&self, out: &mut String, plan: &Plan, pages: &[MonthPage]) {
        let mut tasks: Vec<_> = plan.tasks.iter().collect();
        tasks.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

        let mut items = Vec::new();
        for task in tasks {
            let mut links = Vec::new();
            for page in pages {
                for week in &page.weeks {
                    for cell in &week.cells {
                        for entry in &cell.entries {
                            if let CellEntry::Head(head) = entry {
                                if head.task_id == task.id {
                                    links.push(format!(
                                        "\\hyperlink{{{}}}{{{} {}, week {}}}",
                                        head.anchor,
                                        month_name(page.month),
                                        page.year,
                                        week.index + 1,
                                    ));
                                }
                            }
                        }
                    }
                }
            }
            if links.is_empty() {
                continue;
            }
            items.push(format!(
                "\\item \\textbf{{{}}} \\emph{{({} -- {})}}: {}",
                escape_latex(&task.name),
                task.start.format("%Y-%m-%d"),
                task.end.format("%Y-%m-%d"),
                links.join(", ")
            ));
        }

        if items.is_empty() {
            return;
        }
        out.push_str("\\section*{Task Index}\n\\begin{itemize}\n");
        for item in items {
            out.push_str(&item);
            out.push('\n');
        }
        out.push_str("\\end{itemize}\n");
    }
}

impl Renderer for LatexRenderer {
    type Output = String;

    fn render(&self, plan: &Plan, pages: &[MonthPage]) -> Result<String, RenderError> {
        if pages.is_empty() {
            return Err(RenderError::InvalidData("no month pages to render".into()));
        }

        let mut out = String::new();
        if self.standalone {
            self.emit_preamble(&mut out, plan, pages);
        }
        for page in pages {
            self.emit_month(&mut out, page);
        }
        if self.show_index {
            self.emit_task_index(&mut out, plan, pages);
        }
        if self.standalone {
            out.push_str("\\end{document}\n");
        }
        Ok(out)
    }
}

/// Escape LaTeX-special characters in user text
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '\\' => out.push_str("\\textbackslash{}"),
            _ => out.push(c),
        }
    }
    out
}
