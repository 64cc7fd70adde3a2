//! Jira XML export parsing.
//!
//! This module turns an exported `rss/channel/item` document into an
//! [`Export`], collecting per-project milestone, component and label counts
//! along the way. Every item field except the issue key is optional; a
//! missing field only skips what would have been derived from it.

mod entities;
mod error;

pub use entities::decode_html_entities;
pub use error::ExtractError;

use crate::model::{Export, Issue};
use regex::Regex;
use roxmltree::{Document, Node, ParsingOptions};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Versions that become labels: four dot-separated numeric components.
static VERSION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+\.\d+$").expect("version pattern is valid"));

/// Reads and parses an export file.
///
/// # Errors
///
/// Returns [`ExtractError`] if the file can't be read or isn't a usable export.
pub fn load_export(path: &Path) -> Result<Export, ExtractError> {
    info!(path = %path.display(), "Reading Jira export");

    let xml = std::fs::read_to_string(path).map_err(|e| ExtractError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_export(&xml)
}

/// Parses export XML into projects and issues.
///
/// # Errors
///
/// Returns [`ExtractError::XmlError`] for malformed documents and
/// [`ExtractError::MissingKey`] for items without a key.
pub fn parse_export(xml: &str) -> Result<Export, ExtractError> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let document = Document::parse_with_options(xml, options)?;

    let mut export = Export::default();
    let items = document
        .root_element()
        .children()
        .filter(|node| node.has_tag_name("channel"))
        .flat_map(|channel| channel.children().filter(|node| node.has_tag_name("item")));

    for (index, item) in items.enumerate() {
        add_item(&mut export, item, index)?;
    }

    info!(
        projects = export.projects.len(),
        issues = export.issue_count(),
        "Extracted issues"
    );
    Ok(export)
}

/// Adds one `<item>` to its project.
fn add_item(export: &mut Export, item: Node<'_, '_>, index: usize) -> Result<(), ExtractError> {
    let key = child_text(item, "key")
        .filter(|key| !key.trim().is_empty())
        .ok_or(ExtractError::MissingKey { index })?;

    let project_key = child(item, "project")
        .and_then(|project| project.attribute("key"))
        .unwrap_or_else(|| key.split('-').next().unwrap_or(key));

    let project = export.project_mut(project_key);
    if project.contains_issue(key) {
        warn!(key, "Duplicate issue key in export, keeping first occurrence");
        return Ok(());
    }

    let kind = child_text(item, "type").unwrap_or_default();
    let mut issue = Issue {
        title: child_text(item, "title").unwrap_or_default().to_string(),
        kind: kind.to_string(),
        key: key.to_string(),
        body: synthesize_body(item),
        ..Default::default()
    };
    issue.push_label(child_text(item, "status").unwrap_or_default());
    issue.push_label(kind);

    if let Some(fix_version) = child_text(item, "fixVersion").filter(|v| !v.is_empty()) {
        *project.milestones.entry(fix_version.to_string()).or_default() += 1;
        issue.milestone_name = Some(fix_version.to_string());
    }

    if let Some(component) = child_text(item, "component").filter(|c| !c.is_empty()) {
        *project.components.entry(component.to_string()).or_default() += 1;
        issue.push_label(component);
    }

    for version in children(item, "version").filter_map(|node| node.text()) {
        if VERSION_LABEL.is_match(version) {
            *project.labels.entry(version.to_string()).or_default() += 1;
            issue.push_label(version);
        }
    }

    if let Some(priority) = child_text(item, "priority").filter(|p| !p.is_empty()) {
        *project.labels.entry(priority.to_string()).or_default() += 1;
        issue.push_label(priority);
    }

    if let Some(labels) = child(item, "labels") {
        for label in children(labels, "label").filter_map(|node| node.text()) {
            *project.labels.entry(label.to_string()).or_default() += 1;
            issue.push_label(label);
        }
    }

    if let Some(comments) = child(item, "comments") {
        for comment in children(comments, "comment") {
            issue.comments.push(format!(
                "<b><i>[author=\"{}\", created=\"{}\"]</i></b>\n{}",
                comment.attribute("author").unwrap_or_default(),
                comment.attribute("created").unwrap_or_default(),
                decode_html_entities(comment.text())
            ));
        }
    }

    debug!(
        key,
        labels = issue.labels.len(),
        comments = issue.comments.len(),
        "Extracted issue"
    );
    project.push_issue(issue);
    Ok(())
}

/// Builds the issue body: a reporter header followed by the description.
fn synthesize_body(item: Node<'_, '_>) -> String {
    let reporter = child(item, "reporter")
        .and_then(|node| node.attribute("username"))
        .unwrap_or_default();
    let created = child_text(item, "created").unwrap_or_default();
    let resolved = child_text(item, "resolved")
        .map(|resolved| format!(", resolved=\"{resolved}\""))
        .unwrap_or_default();

    format!(
        "<b><i>[reporter=\"{reporter}\", created=\"{created}\"{resolved}]</i></b>\n{}",
        decode_html_entities(child(item, "description").and_then(|node| node.text()))
    )
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(name))
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name).and_then(|c| c.text())
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |c| c.has_tag_name(name))
}
