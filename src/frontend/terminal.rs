//! Text front-end
//!
//! Renders results the way the desktop detail view lays them out and asks
//! for feedback with simple y/n prompts. Input and output are generic so the
//! whole interaction can be driven from memory in tests.

use crate::frontend::Frontend;
use crate::types::{Alternative, AnalysisResult, Feedback, FeedbackIssues};
use crate::utils::country::{describe_country, flag_emoji};
use std::fmt::Write as _;
use std::io::{self, BufRead, Stdin, Stdout, Write};
use std::path::PathBuf;
use tracing::warn;

/// Disclaimer appended to every rendered result
pub const AI_DISCLAIMER: &str = "This is an AI-powered tool, as it can make mistakes. \
Please verify the information before making any decisions.";

/// Labels for the six feedback flags, in payload order
const ISSUE_PROMPTS: [&str; 6] = [
    "Product identification",
    "Brand identification",
    "Country identification",
    "Classification",
    "Suggested alternatives",
    "Other",
];

pub struct TerminalFrontend<R, W> {
    input: R,
    output: W,
    preselected: Option<PathBuf>,
    ask_feedback: bool,
    json: bool,
}

impl TerminalFrontend<io::StdinLock<'static>, Stdout> {
    /// Front-end bound to the process's stdin/stdout
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalFrontend<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            preselected: None,
            ask_feedback: true,
            json: false,
        }
    }

    /// Use `path` for the first `select_image` call instead of prompting
    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.preselected = Some(path.into());
        self
    }

    pub fn with_feedback(mut self, ask_feedback: bool) -> Self {
        self.ask_feedback = ask_feedback;
        self
    }

    /// Print results as the normalised JSON mapping
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn write_text(&mut self, text: &str) {
        if let Err(e) = self
            .output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
        {
            warn!("Failed to write to terminal: {}", e);
        }
    }

    /// Print `question` and read one trimmed line; `None` on EOF or read error
    fn prompt(&mut self, question: &str) -> Option<String> {
        self.write_text(question);
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                warn!("Failed to read from terminal: {}", e);
                None
            }
        }
    }

    /// `Some(true)` for y/yes, `Some(false)` for n/no, `None` otherwise
    fn confirm(&mut self, question: &str) -> Option<bool> {
        let answer = self.prompt(question)?;
        parse_yes_no(&answer)
    }
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

impl<R: BufRead, W: Write> Frontend for TerminalFrontend<R, W> {
    fn select_image(&mut self) -> Option<PathBuf> {
        if let Some(path) = self.preselected.take() {
            return Some(path);
        }
        let answer = self.prompt("Path to product image (empty to cancel): ")?;
        (!answer.is_empty()).then(|| PathBuf::from(answer))
    }

    fn display_result(&mut self, result: &AnalysisResult) {
        let text = if self.json {
            match serde_json::to_string_pretty(result) {
                Ok(json) => format!("{}\n", json),
                Err(e) => format!("Error: could not serialise result: {}\n", e),
            }
        } else {
            render_result(result)
        };
        self.write_text(&text);
    }

    fn display_error(&mut self, message: &str) {
        self.write_text(&format!("Error: {}\n", message));
    }

    fn submit_feedback(&mut self, _result: &AnalysisResult) -> Option<Feedback> {
        if !self.ask_feedback {
            return None;
        }

        if self.confirm("Was this result correct? [y/n, empty to skip]: ")? {
            return Some(Feedback::positive());
        }

        self.write_text("What was incorrect?\n");
        let mut flags = [false; 6];
        for (flag, label) in flags.iter_mut().zip(ISSUE_PROMPTS) {
            *flag = self
                .confirm(&format!("  {}? [y/N]: ", label))
                .unwrap_or(false);
        }
        let text = self
            .prompt("Any additional comments? ")
            .unwrap_or_default();

        let [wrong_product, wrong_brand, wrong_country, wrong_classification, wrong_alternatives, wrong_other] =
            flags;
        Some(Feedback::negative(
            FeedbackIssues {
                wrong_product,
                wrong_brand,
                wrong_country,
                wrong_classification,
                wrong_alternatives,
                wrong_other,
            },
            text,
        ))
    }

    fn display_notice(&mut self, message: &str) {
        self.write_text(&format!("{}\n", message));
    }
}

/// Render an analysis result as plain text
pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let country = result
        .headquarters()
        .map(describe_country)
        .unwrap_or_else(|| "Unknown country".to_string());
    let parent = result.distinct_parent_company().map(|parent| {
        let hq = result
            .ultimate_parent_company_headquarters
            .as_deref()
            .map(describe_country)
            .unwrap_or_else(|| "Unknown country".to_string());
        (parent, hq)
    });
    let (label, raw_classification) = match &result.classification {
        Some(classification) => (classification.label(), classification.as_str()),
        None => ("Unknown", "unknown"),
    };

    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "{} by {} from {}",
        result.product_name(),
        result.company(),
        country
    );
    if let Some((parent, hq)) = &parent {
        let _ = writeln!(out, "Parent company: {} from {}", parent, hq);
    }
    let _ = writeln!(out, "\n  >> {} <<\n", label);

    let _ = writeln!(out, "Product: {}", result.product_name());
    let _ = writeln!(out, "Company: {}", result.company());
    let _ = writeln!(out, "Headquarters: {}", country);
    if let Some((parent, hq)) = &parent {
        let _ = writeln!(out, "Parent Company: {}", parent);
        let _ = writeln!(out, "Parent Company HQ: {}", hq);
    }
    let _ = writeln!(out, "Classification: {}", raw_classification);
    if result.subject_type() != "product" {
        let _ = writeln!(out, "Detected Type: {}", result.subject_type());
    }
    out.push('\n');

    if let Some(rationale) = non_empty(&result.identification_rationale) {
        let _ = writeln!(out, "Identification rationale:\n{}\n", rationale);
    }
    if let Some(thinking) = non_empty(&result.potential_alternative_thinking) {
        let _ = writeln!(out, "Alternative Analysis:\n{}\n", thinking);
    }

    let usage = &result.token_usage;
    if result.id.is_some() || !usage.is_empty() {
        out.push_str("Debugging Information:\n");
        if let Some(id) = &result.id {
            let _ = writeln!(out, "Request ID: {}", id);
        }
        if let Some(tokens) = usage.input_tokens {
            let _ = writeln!(out, "Input Tokens: {}", tokens);
        }
        if let Some(tokens) = usage.output_tokens {
            let _ = writeln!(out, "Output Tokens: {}", tokens);
        }
        if let Some(tokens) = usage.total_tokens {
            let _ = writeln!(out, "Total Tokens: {}", tokens);
        }
        out.push('\n');
    }

    if !result.alternatives.is_empty() {
        out.push_str("European Alternatives:\n");
        for alternative in &result.alternatives {
            render_alternative(&mut out, alternative);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{}", AI_DISCLAIMER);
    out
}

fn render_alternative(out: &mut String, alternative: &Alternative) {
    let flag = flag_emoji(
        alternative.country().unwrap_or_default(),
        alternative.country_code().unwrap_or_default(),
    );
    let _ = writeln!(out, "  {}  {}", flag, alternative.name());

    match (alternative.company(), alternative.country()) {
        (Some(company), Some(country)) if !country.is_empty() => {
            let _ = writeln!(out, "      by {} ({})", company, country);
        }
        (Some(company), _) => {
            let _ = writeln!(out, "      by {}", company);
        }
        _ => {}
    }

    if let Some(description) = alternative.description().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "      {}", description);
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
