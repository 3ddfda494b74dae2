//! Clean command implementation
//!
//! Removes case duplicates from the word list and writes the `words.js`
//! fragment.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::process::ExitCode;

use crate::config::AssetConfig;
use crate::words::{dedupe, render_words_js, tokenize};

/// Outcome of a clean run.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    /// Word list that was read
    pub input: String,
    /// Fragment that was written
    pub output: String,
    /// Number of input words
    pub total_words: usize,
    /// Number of words written
    pub kept_words: usize,
    /// Every removed occurrence, in input order
    pub duplicates: Vec<String>,
}

/// Deduplicates the word list and writes the output fragment.
pub fn clean(config: &AssetConfig) -> Result<CleanReport> {
    let input = config.words_input_path();
    let output = config.words_output_path();

    let text = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read word list: {}", input.display()))?;
    let words = tokenize(&text);
    let result = dedupe(&words);

    fs::write(&output, render_words_js(&result.kept))
        .with_context(|| format!("Failed to write word list: {}", output.display()))?;

    Ok(CleanReport {
        input: input.display().to_string(),
        output: output.display().to_string(),
        total_words: words.len(),
        kept_words: result.kept.len(),
        duplicates: result.duplicates.iter().map(|w| w.to_string()).collect(),
    })
}

/// Run the clean command
pub fn run(config: &AssetConfig, json: bool) -> Result<ExitCode> {
    let report = clean(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{:?}", report.duplicates);
    println!("{}", report.duplicates.len());
    println!(
        "{} {} of {} words written to {}",
        "ok".green(),
        report.kept_words,
        report.total_words,
        report.output.as_str().bold()
    );

    Ok(ExitCode::SUCCESS)
}
