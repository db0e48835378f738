// Sample-article extraction.
//
// Writes the first few articles of a corpus, cleaned up for reading, to a
// text file that people can paste into the predictor. Layout:
//
//   # Examples cleaned from <csv>
//
//   ## Example 1 (<subject>)
//   <title>
//
//   <text>
//
//   ==================================================
//
// `load_examples` reads the same layout back for `newscheck predict --examples`.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::{read_articles, Article};
use crate::text::clean::clean_csv_text;

/// Line separating examples in the output file.
pub const SEPARATOR: &str = "==================================================";

/// Render cleaned articles as an examples file. `source` is only used for
/// the header line.
pub fn render_examples(articles: &[Article], source: &Path) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "# Examples cleaned from {}\n", source.display())?;

    for (i, article) in articles.iter().enumerate() {
        let title = clean_csv_text(article.title.as_deref());
        let text = clean_csv_text(article.text.as_deref());
        let subject = article.subject.as_deref().unwrap_or("unknown");

        writeln!(out, "## Example {} ({subject})", i + 1)?;
        writeln!(out, "{title}\n\n{text}")?;
        writeln!(out, "\n{SEPARATOR}\n")?;
    }

    Ok(out)
}

/// Extract `count` cleaned examples from `csv_path` into `output_path`.
/// Returns how many examples were written.
pub fn extract_examples(csv_path: &Path, output_path: &Path, count: usize) -> Result<usize> {
    let articles = read_articles(csv_path, Some(count))?;
    let rendered = render_examples(&articles, csv_path)?;
    let written = articles.len();

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(output_path, rendered)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!(
        examples = written,
        source = %csv_path.display(),
        output = %output_path.display(),
        "Extracted cleaned examples"
    );
    Ok(written)
}

/// Read an examples file back into article bodies.
pub fn load_examples(path: &Path) -> Result<Vec<String>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let bodies = split_examples(&contents);
    if bodies.is_empty() {
        anyhow::bail!(
            "No `## Example` sections found in {}. Create the file with `newscheck extract-examples`.",
            path.display()
        );
    }
    Ok(bodies)
}

/// Split an examples file into article bodies (title + text), dropping the
/// file header and each `## Example` heading line.
pub fn split_examples(contents: &str) -> Vec<String> {
    contents
        .split(SEPARATOR)
        .filter_map(|block| {
            let block = block.trim();
            let start = block.find("## Example")?;
            let body = &block[start..];
            let body = body.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
            let body = body.trim();
            (!body.is_empty()).then(|| body.to_string())
        })
        .collect()
}
