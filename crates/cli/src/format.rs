//! Report → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): one section per action, printed as it completes
//! - **JSON** (`--json`): one object for the whole run, printed at the end

use serde_json::{json, Map, Value};

use lexset_engine::{LexsetError, LoadReport};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Result of one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Dropped,
    Loaded(LoadReport),
    Search { query: String, items: Vec<String> },
    Length(u64),
}

/// Format one section for human output.
///
/// Dropping prints nothing; callers skip empty strings.
pub fn format_section(section: &Section) -> String {
    match section {
        Section::Dropped => String::new(),
        Section::Loaded(report) => format_load_report(report),
        Section::Search { query, items } => format_search(query, items),
        Section::Length(n) => format!("data_length = {}", n),
    }
}

fn format_load_report(report: &LoadReport) -> String {
    let mut lines = vec!["loading data into the index".to_string()];
    for file in &report.files {
        let name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.path.display().to_string());
        lines.push(format!("\tloading data from: {}", name));
        lines.push(format!("\t\tlines loaded = {}", file.lines_loaded));
        lines.push(format!("\t\titems added  = {}", file.items_added));
    }
    lines.push(format!("total_lines_loaded = {}", report.total_lines_loaded));
    lines.push(format!("total_items_added  = {}", report.total_items_added));
    lines.join("\n")
}

fn format_search(query: &str, items: &[String]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 2);
    lines.push(format!("query for '{}'", query));
    lines.push(format!("found {} items", items.len()));
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("\t[{}]: {}", i + 1, item));
    }
    lines.join("\n")
}

/// Final timing line.
pub fn format_done(elapsed_secs: f64) -> String {
    format!("done @ {:.3}s", elapsed_secs)
}

/// Format a whole run as one JSON object.
pub fn format_json(sections: &[Section], elapsed_secs: f64) -> String {
    let mut out = Map::new();
    for section in sections {
        match section {
            Section::Dropped => {
                out.insert("dropped".into(), Value::Bool(true));
            }
            Section::Loaded(report) => {
                let files: Vec<Value> = report
                    .files
                    .iter()
                    .map(|f| {
                        json!({
                            "path": f.path.display().to_string(),
                            "lines_loaded": f.lines_loaded,
                            "items_added": f.items_added,
                        })
                    })
                    .collect();
                out.insert(
                    "load".into(),
                    json!({
                        "files": files,
                        "total_lines_loaded": report.total_lines_loaded,
                        "total_items_added": report.total_items_added,
                    }),
                );
            }
            Section::Search { query, items } => {
                out.insert(
                    "search".into(),
                    json!({ "query": query, "found": items.len(), "items": items }),
                );
            }
            Section::Length(n) => {
                out.insert("data_length".into(), json!(n));
            }
        }
    }
    out.insert("elapsed_secs".into(), json!(elapsed_secs));
    serde_json::to_string_pretty(&Value::Object(out))
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Format an error.
pub fn format_error(err: &LexsetError, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&json!({
            "error": err.to_string(),
            "kind": format!("{:?}", err.kind()),
            "exit_code": err.exit_code(),
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("Error: {}", err),
    }
}
