use colored::*;
use regex::Regex;

/// Render a markdown assistant reply for terminal display.
///
/// Covers the structures replies actually contain: fenced code blocks,
/// headings, bullet lists, inline code, and bold spans. Everything else
/// passes through unchanged.
pub fn render_markdown(text: &str) -> String {
    let mut rendered = Vec::new();
    let mut in_code_block = false;

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            in_code_block = !in_code_block;
            rendered.push(line.dimmed().to_string());
            continue;
        }

        if in_code_block {
            rendered.push(line.yellow().to_string());
            continue;
        }

        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix('#') {
            let heading = rest.trim_start_matches('#').trim_start();
            rendered.push(heading.bright_cyan().bold().to_string());
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            rendered.push(format!("  • {}", style_inline(item)));
        } else {
            rendered.push(style_inline(line));
        }
    }

    rendered.join("\n")
}

fn style_inline(text: &str) -> String {
    let mut styled = text.to_string();

    if let Ok(re) = Regex::new(r"\*\*([^*]+)\*\*") {
        styled = re
            .replace_all(&styled, |caps: &regex::Captures| caps[1].bold().to_string())
            .into_owned();
    }

    if let Ok(re) = Regex::new(r"`([^`]+)`") {
        styled = re
            .replace_all(&styled, |caps: &regex::Captures| caps[1].yellow().to_string())
            .into_owned();
    }

    styled
}
