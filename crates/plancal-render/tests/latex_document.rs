//! Integration tests for the LaTeX document renderer

use chrono::NaiveDate;
use plancal_core::{Config, Plan, Renderer, Task, TaskStatus};
use plancal_layout::GridLayouter;
use plancal_render::LatexRenderer;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn thesis_plan() -> Plan {
    let mut plan = Plan::new("Thesis Timeline");
    plan.tasks = vec![
        Task::new("draft", date(2025, 9, 1), date(2025, 9, 12))
            .name("Write first draft")
            .description("Chapters 1-3")
            .phase("Writing")
            .subphase("Drafting")
            .status(TaskStatus::InProgress),
        Task::new("figures", date(2025, 9, 5), date(2025, 9, 20))
            .name("Prepare figures")
            .phase("Analysis"),
        Task::new("submit", date(2025, 10, 15), date(2025, 10, 15))
            .name("Submit manuscript")
            .phase("Submission")
            .milestone(),
    ];
    plan
}

fn render(plan: &Plan, renderer: &LatexRenderer) -> String {
    let pages = GridLayouter::new(Config::default()).layout_all(plan).unwrap();
    renderer.render(plan, &pages).unwrap()
}

#[test]
fn standalone_document_structure() {
    let plan = thesis_plan();
    let tex = render(&plan, &LatexRenderer::new());

    assert!(tex.starts_with("\\documentclass"));
    assert!(tex.contains("\\begin{document}"));
    assert!(tex.trim_end().ends_with("\\end{document}"));
    assert!(tex.contains("Thesis Timeline"));
    assert!(tex.contains("\\section*{September 2025}"));
    assert!(tex.contains("\\section*{October 2025}"));
}

#[test]
fn pills_and_struts_are_emitted() {
    let plan = thesis_plan();
    let tex = render(&plan, &LatexRenderer::new());

    assert!(tex.contains("\\TaskPill{"));
    assert!(tex.contains("\\TrackSlot{}"));
    assert!(tex.contains("Write first draft"));
    assert!(tex.contains("Chapters 1-3"));
}

#[test]
fn colors_are_defined_once_per_hue() {
    let plan = thesis_plan();
    let tex = render(&plan, &LatexRenderer::new());

    let writing = plancal_core::color::phase_color("Writing").hex();
    assert!(tex.contains(&format!("\\definecolor{{pill{writing}}}{{HTML}}{{{writing}}}")));
    assert_eq!(
        tex.matches(&format!("\\definecolor{{pill{writing}}}")).count(),
        1
    );
}

#[test]
fn anchors_and_index_cross_reference() {
    let plan = thesis_plan();
    let tex = render(&plan, &LatexRenderer::new());

    assert!(tex.contains("\\hypertarget{draft-w0}{}"));
    assert!(tex.contains("\\section*{Task Index}"));
    assert!(tex.contains("\\hyperlink{draft-w0}{September 2025, week 1}"));
    assert!(tex.contains("\\hyperlink{draft-w1}{September 2025, week 2}"));
}

#[test]
fn milestone_decoration_follows_config() {
    let plan = thesis_plan();

    let decorated = render(&plan, &LatexRenderer::new());
    assert!(decorated.contains("\\MilestoneMark{}"));

    let plain = render(&plan, &LatexRenderer::new().plain_milestones());
    assert!(!plain.contains("\\MilestoneMark{}"));
    // The macro definition stays in the preamble either way
    assert!(plain.contains("\\newcommand{\\MilestoneMark}"));
}

#[test]
fn legend_groups_by_phase() {
    let plan = thesis_plan();
    let tex = render(&plan, &LatexRenderer::new());

    assert!(tex.contains("\\textbf{Writing:}"));
    assert!(tex.contains("\\LegendSwatch{"));
    assert!(tex.contains("Drafting"));

    let without = render(&plan, &LatexRenderer::new().no_legend());
    assert!(!without.contains("\\LegendSwatch{"));
}

#[test]
fn fragment_omits_preamble() {
    let plan = thesis_plan();
    let tex = render(&plan, &LatexRenderer::new().fragment().no_index());

    assert!(!tex.contains("\\documentclass"));
    assert!(!tex.contains("\\end{document}"));
    assert!(tex.starts_with("\\section*{September 2025}"));
}

#[test]
fn user_text_is_escaped() {
    let mut plan = Plan::new("R&D 100% plan");
    plan.tasks = vec![Task::new("t", date(2025, 9, 1), date(2025, 9, 2))
        .name("Cost #1 & margin_check")
        .phase("Ops")];
    let tex = render(&plan, &LatexRenderer::new());

    assert!(tex.contains("R\\&D 100\\% plan"));
    assert!(tex.contains("Cost \\#1 \\& margin\\_check"));
}

#[test]
fn rendering_is_deterministic() {
    let plan = thesis_plan();
    let first = render(&plan, &LatexRenderer::new());
    let second = render(&plan, &LatexRenderer::new());
    assert_eq!(first, second);
}

#[test]
fn weekday_header_uses_configured_style() {
    let plan = thesis_plan();
    let tex = render(&plan, &LatexRenderer::new().week_header_style("\\itshape"));
    assert!(tex.contains("{\\itshape Mon}"));
}
