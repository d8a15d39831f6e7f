//! Writes the contributors table into a markdown document.
//!
//! The section is the first ATX heading whose text is `Contributors`
//! (case-insensitive), outside fenced code. Everything between it and the
//! next heading of the same or higher rank is replaced by the table.

use std::sync::OnceLock;

use regex_lite::Regex;
use tracing::debug;

use crate::contributors::Columns;
use crate::errors::RenderError;
use crate::models::{ResolvedContributor, Social};

/// Heading text the section is recognized by, compared case-insensitively.
pub const HEADING_TEXT: &str = "contributors";

/// Heading written when the section is appended.
const APPENDED_HEADING: &str = "## Contributors";

fn atx_heading() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$")
            .expect("heading pattern is valid")
    })
}

/// A heading line: its rank and text.
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let captures = atx_heading().captures(line)?;
    let depth = captures.get(1)?.as_str().len();
    let text = captures.get(2).map(|m| m.as_str().trim()).unwrap_or("");
    Some((depth, text))
}

fn fence_marker(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    if trimmed.starts_with("```") {
        Some("```")
    } else if trimmed.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// Headings outside fenced code, as `(line index, depth, text)`.
fn headings(lines: &[&str]) -> Vec<(usize, usize, String)> {
    let mut out = Vec::new();
    let mut open_fence: Option<&str> = None;

    for (index, line) in lines.iter().enumerate() {
        match (open_fence, fence_marker(line)) {
            (Some(open), Some(marker)) if open == marker => {
                open_fence = None;
                continue;
            }
            (Some(_), _) => continue,
            (None, Some(marker)) => {
                open_fence = Some(marker);
                continue;
            }
            (None, None) => {}
        }
        if let Some((depth, text)) = parse_heading(line) {
            out.push((index, depth, text.to_string()));
        }
    }
    out
}

/// Whether the document already has a contributors section.
pub fn has_contributors_heading(document: &str) -> bool {
    let lines: Vec<&str> = document.lines().collect();
    headings(&lines)
        .iter()
        .any(|(_, _, text)| text.eq_ignore_ascii_case(HEADING_TEXT))
}

/// Markdown for a GitHub cell.
pub fn github_cell(handle: &str) -> String {
    format!("[**@{handle}**](https://github.com/{handle})")
}

/// Markdown for a social profile cell.
pub fn social_cell(social: &Social) -> String {
    format!("[**{}**]({})", escape_cell(&social.text), social.url)
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// Render the left-aligned table. Optional columns are left out when
/// `columns` says they would be empty.
pub fn render_table(contributors: &[ResolvedContributor], columns: Columns) -> String {
    let mut header = vec!["Name".to_string()];
    if columns.github {
        header.push("GitHub".to_string());
    }
    if columns.social {
        header.push("Social".to_string());
    }

    let rows: Vec<Vec<String>> = contributors
        .iter()
        .map(|c| {
            let mut row = vec![escape_cell(&c.name)];
            if columns.github {
                row.push(c.github.as_deref().map(github_cell).unwrap_or_default());
            }
            if columns.social {
                row.push(c.social.as_ref().map(social_cell).unwrap_or_default());
            }
            row
        })
        .collect();

    // Alignment row is `:-` plus dashes, so each column is at least 3 wide.
    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
                .max(3)
        })
        .collect();

    let format_row = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell}{}", " ".repeat(width - cell.chars().count())))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = vec![format_row(header.as_slice())];
    let align: Vec<String> = widths
        .iter()
        .map(|width| format!(":{}", "-".repeat(width - 1)))
        .collect();
    lines.push(format!("| {} |", align.join(" | ")));
    lines.extend(rows.iter().map(|row| format_row(row.as_slice())));
    lines.join("\n")
}

/// Replace (or append) the contributors section of `document`.
pub fn inject(
    document: &str,
    contributors: &[ResolvedContributor],
    columns: Columns,
    append_if_missing: bool,
) -> Result<String, RenderError> {
    if contributors.is_empty() {
        return Err(RenderError::NoContributors);
    }

    let table = render_table(contributors, columns);
    let lines: Vec<&str> = document.lines().collect();
    let all_headings = headings(&lines);

    let found = all_headings
        .iter()
        .position(|(_, _, text)| text.eq_ignore_ascii_case(HEADING_TEXT));

    let Some(position) = found else {
        if !append_if_missing {
            return Err(RenderError::MissingHeading);
        }
        debug!("appending contributors section");
        let mut out = document.trim_end().to_string();
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(APPENDED_HEADING);
        out.push_str("\n\n");
        out.push_str(&table);
        out.push('\n');
        return Ok(out);
    };

    let (start, depth, _) = &all_headings[position];
    let end = all_headings[position + 1..]
        .iter()
        .find(|(_, d, _)| d <= depth)
        .map(|(index, _, _)| *index)
        .unwrap_or(lines.len());
    debug!(line = start + 1, end, "replacing contributors section");

    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + contributors.len());
    out.extend_from_slice(&lines[..=*start]);
    out.push("");
    out.extend(table.lines());
    if end < lines.len() {
        out.push("");
        out.extend_from_slice(&lines[end..]);
    }

    let mut rendered = out.join("\n");
    rendered.push('\n');
    Ok(rendered)
}
