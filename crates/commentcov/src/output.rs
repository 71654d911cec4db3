//! Output formatting for coverage items

use commentcov_core::{CommentGroup, CoverageItem};
use eyre::Result;
use owo_colors::OwoColorize;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Render coverage items in the specified format
pub fn render_items(items: &[CoverageItem], format: OutputFormat, verbose: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(items, verbose)),
        OutputFormat::Json => render_json(items),
    }
}

fn render_text(items: &[CoverageItem], verbose: bool) -> String {
    let mut output = String::new();

    for item in items {
        let location = format!("{}:{}", item.file, item.target_block.start_line);
        let identifier = if item.is_documented() {
            item.identifier.green().to_string()
        } else {
            item.identifier.red().bold().to_string()
        };

        output.push_str(&format!(
            "{} {} {} ({} header, {} inline)\n",
            location.dimmed(),
            item.scope.as_str().cyan(),
            identifier,
            item.header_comments.len(),
            item.inline_comments.len()
        ));

        if verbose {
            render_comments(&mut output, "header", &item.header_comments);
            render_comments(&mut output, "inline", &item.inline_comments);
        }
    }

    output
}

fn render_comments(output: &mut String, kind: &str, groups: &[CommentGroup]) {
    for group in groups {
        let mut lines = group.comment.lines();
        let first = lines.next().unwrap_or_default();
        output.push_str(&format!(
            "    {} {} {}\n",
            kind.yellow(),
            group.block.to_string().dimmed(),
            first
        ));
        for line in lines {
            output.push_str(&format!("        {}\n", line));
        }
    }
}

fn render_json(items: &[CoverageItem]) -> Result<String> {
    let items = items.to_vec();
    facet_json::to_string_pretty(&items)
        .map_err(|e| eyre::eyre!("JSON serialization failed: {}", e))
}
