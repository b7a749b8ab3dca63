//! # plancal-render
//!
//! Rendering backends for composed plancal month pages.
//!
//! This crate provides:
//! - LaTeX document rendering (the typeset calendar, one section per month)
//! - SVG month previews (quick visual checks without a TeX toolchain)
//! - Plain-text summaries for console output
//!
//! ## Example
//!
//! ```rust,ignore
//! use plancal_core::Renderer;
//! use plancal_render::{LatexRenderer, SvgMonthRenderer};
//!
//! let latex = LatexRenderer::new().render(&plan, &pages)?;
//! std::fs::write("calendar.tex", latex)?;
//!
//! let preview = SvgMonthRenderer::new().render_month(&pages[0])?;
//! std::fs::write("2025-09.svg", preview)?;
//! ```

pub mod latex;
pub mod svg;

pub use latex::LatexRenderer;
pub use svg::SvgMonthRenderer;

use plancal_core::{MonthPage, Plan, RenderError, Renderer};

/// English month name for a 1-based month number
pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Truncate a string with ellipsis
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!(
            "{}…",
            s.chars().take(max.saturating_sub(1)).collect::<String>()
        )
    }
}

/// Plain text renderer for console output
#[derive(Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, plan: &Plan, pages: &[MonthPage]) -> Result<String, RenderError> {
        let mut out = format!("Plan: {}\n", plan.name);
        for page in pages {
            out.push_str(&format!(
                "  {} {}: {} weeks, {} tasks, {} tracks\n",
                month_name(page.month),
                page.year,
                page.weeks.len(),
                page.task_count(),
                page.max_track_count(),
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use plancal_core::{Config, Plan, Task};
    use plancal_layout::GridLayouter;

    #[test]
    fn truncate_long_string() {
        assert_eq!(truncate("Short", 20), "Short");
        assert_eq!(truncate("This is a very long task name", 15), "This is a very…");
    }

    #[test]
    fn text_renderer_lists_months() {
        let mut plan = Plan::new("Demo Plan");
        plan.tasks.push(Task::new(
            "t",
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 3).unwrap(),
        ));
        let pages = GridLayouter::new(Config::default())
            .layout_all(&plan)
            .unwrap();

        let text = TextRenderer.render(&plan, &pages).unwrap();
        assert!(text.contains("Demo Plan"));
        assert!(text.contains("September 2025"));
        assert!(text.contains("October 2025"));
    }
}
