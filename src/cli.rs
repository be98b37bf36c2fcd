//! Subcommands of the `ezconf` binary.
//!
//! Each command writes its report to the given writer and returns whether the
//! input passed, so the binary decides the exit code and tests can capture
//! output.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use ezconf_core::config::{Config, DocumentFormat};
use ezconf_docindex::SearchIndex;
use ezconf_formats::{json, yaml, TagSite};

/// Print every tag in a YAML or JSON document with the path that carries it.
pub fn tags(
    path: &Path,
    format: Option<DocumentFormat>,
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let format = format
        .unwrap_or(config.input.default_format)
        .resolve(path);
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let sites = document_tags(&text, format)
        .with_context(|| format!("failed to parse {} as {format}", path.display()))?;

    tracing::debug!(path = %path.display(), %format, tags = sites.len(), "collected tags");
    for site in &sites {
        writeln!(out, "{}\t{}", site.path, site.tag)?;
    }
    Ok(sites.len())
}

/// Tags of `text` read as `format`. [`DocumentFormat::Auto`] reads YAML.
pub fn document_tags(text: &str, format: DocumentFormat) -> anyhow::Result<Vec<TagSite>> {
    Ok(match format {
        DocumentFormat::Json => json::collect_tags(&serde_json::from_str(text)?),
        DocumentFormat::Yaml | DocumentFormat::Auto => {
            yaml::collect_tags(&serde_yaml::from_str(text)?)
        }
    })
}

/// Check a search-index file. Returns `true` when no violation was found.
pub fn index_check(path: &Path, out: &mut impl Write) -> anyhow::Result<bool> {
    let index = SearchIndex::load(path)?;
    let violations = index.validate();
    for violation in &violations {
        writeln!(out, "{violation}")?;
    }
    writeln!(
        out,
        "{}: {} entries, {} violations",
        path.display(),
        index.len(),
        violations.len()
    )?;
    Ok(violations.is_empty())
}

/// Print entries matching `term`, at most `index.max_results` of them.
/// Returns the number of matches before the cap.
pub fn index_query(
    path: &Path,
    term: &str,
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let index = SearchIndex::load(path)?;
    let hits = index.search(term);
    for entry in hits.iter().take(config.index.max_results) {
        writeln!(out, "{}", entry.display_label())?;
        for anchor in &entry.anchors {
            if anchor.scope.is_empty() {
                writeln!(out, "    {}", anchor.url)?;
            } else {
                writeln!(out, "    {}  ({})", anchor.url, anchor.scope)?;
            }
        }
    }
    if hits.len() > config.index.max_results {
        writeln!(
            out,
            "... {} more, raise index.max_results to see them",
            hits.len() - config.index.max_results
        )?;
    }
    Ok(hits.len())
}
