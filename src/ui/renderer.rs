//! Plain-text rendering of a view model.
//!
//! The renderer is presentation only: it turns a [`UIViewModel`] into lines of
//! text and never touches application state. Empty reference and term
//! sections get a fallback sentence.
//!
//! # Example
//!
//! ```rust
//! use saral::app::AppState;
//! use saral::background::AvailabilityStatus;
//! use saral::ui::render;
//!
//! let vm = AppState::new().compute_viewmodel(AvailabilityStatus::Online, &[]);
//! let text = render(&vm);
//! assert!(text.contains("Samvidhaan Saral"));
//! ```

use crate::ui::viewmodel::{InputBarInfo, ResultView, UIViewModel};

const RULE: &str = "────────────────────────────────────────";

const NO_REFERENCES: &str = "No legal references were identified.";
const NO_TERMS: &str = "No complex terms were identified.";

/// Renders the complete view model.
#[must_use]
pub fn render(vm: &UIViewModel) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "{}  [{}]",
        vm.header.title,
        vm.status.availability.label()
    ));
    if let Some(subtitle) = &vm.header.subtitle {
        lines.push(subtitle.clone());
    }

    for notice in &vm.notices {
        lines.push(format!("(notice {}) {}", notice.index + 1, notice.message));
    }

    if let Some(result) = &vm.result {
        lines.push(RULE.to_string());
        render_result(result, &mut lines);
    }

    lines.push(RULE.to_string());
    lines.push(input_bar_line(&vm.input_bar));
    if let Some(error) = &vm.input_bar.error {
        lines.push(format!("error: {error}"));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_result(result: &ResultView, lines: &mut Vec<String>) {
    lines.push("Simplified Explanation".to_string());
    lines.push(result.simplified_text.clone());

    if let Some(focus) = &result.contextual_focus {
        lines.push(String::new());
        lines.push("Context".to_string());
        lines.push(focus.clone());
    }

    lines.push(String::new());
    lines.push("Key Points".to_string());
    lines.extend(result.key_points.iter().map(|point| format!("  • {point}")));

    lines.push(String::new());
    lines.push("Legal References".to_string());
    if result.legal_references.is_empty() {
        lines.push(NO_REFERENCES.to_string());
    } else {
        lines.extend(result.legal_references.iter().map(|r| format!("  • {r}")));
    }

    lines.push(String::new());
    lines.push("Defined Terms".to_string());
    if result.defined_terms.is_empty() {
        lines.push(NO_TERMS.to_string());
    } else {
        lines.extend(
            result
                .defined_terms
                .iter()
                .map(|(term, definition)| format!("  {term}: {definition}")),
        );
    }
}

fn input_bar_line(bar: &InputBarInfo) -> String {
    let trigger = if bar.loading {
        "…"
    } else if bar.submit_enabled {
        "→"
    } else {
        "·"
    };

    if bar.minimized {
        format!("[{trigger}] (:edit to ask again)  {} chars", bar.char_count)
    } else if bar.char_count == 0 {
        format!("[{trigger}] {}  0 chars", bar.placeholder)
    } else {
        format!("[{trigger}] {} chars", bar.char_count)
    }
}
