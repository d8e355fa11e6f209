use std::path::Path;
use std::process;

use rehydrate_elements::{is_json_processable, SchemaValidator};

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_validate(file: &Path, output: OutputFormat, quiet: bool) {
    let validator = match SchemaValidator::new() {
        Ok(v) => v,
        Err(e) => {
            report_error(&format!("internal error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    // Read and parse the document file
    let doc_str = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc: serde_json::Value = match serde_json::from_str(&doc_str) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let mut errors: Vec<String> = Vec::new();
    if !is_json_processable(&doc_str) {
        errors.push("document is not an array of element objects".to_string());
    }
    errors.extend(validator.violations(&doc));

    if errors.is_empty() {
        if !quiet {
            let count = doc.as_array().map_or(0, |a| a.len());
            match output {
                OutputFormat::Text => println!("valid ({} elements)", count),
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({"valid": true, "elements": count}))
                }
            }
        }
    } else {
        match output {
            OutputFormat::Text => {
                if !quiet {
                    eprintln!("invalid");
                    for err in &errors {
                        eprintln!("  - {}", err);
                    }
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "valid": false,
                    "errors": errors
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_default()
                );
            }
        }
        process::exit(1);
    }
}
