//! Text histograms of an extracted project.

use crate::model::Project;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Renders milestone, component and label counts as `#` histograms.
#[must_use]
pub fn render_project(project: &Project) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}:", project.key);

    for (heading, counts) in [
        ("Milestones", &project.milestones),
        ("Components", &project.components),
        ("Labels", &project.labels),
    ] {
        let _ = writeln!(out, "    {heading}:");
        render_histogram(&mut out, counts);
    }

    out.push('\n');
    let _ = writeln!(out, "    Total Issues: {}", project.issues.len());
    out.push('\n');
    out
}

fn render_histogram(out: &mut String, counts: &BTreeMap<String, usize>) {
    for (name, count) in counts {
        let _ = writeln!(out, "{name:>30}({count:>5}): {}", "#".repeat(*count));
    }
    out.push('\n');
}
