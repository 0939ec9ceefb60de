// Colored terminal output for the simulate / classify / config commands.

use colored::Colorize;

use crate::config::{TakeShotConfig, VisibilityMode};
use crate::debounce::GateStats;
use crate::protocol::classifier::Classification;
use crate::session::memory::{EmittedEvent, SentMessage, ShownNotification};
use crate::store::reducer::{is_overlay_visible, TakeShotState};

/// Longest display name printed before it is cut with an ellipsis.
const MAX_NAME_CHARS: usize = 32;

/// Make a sender name safe to print on one terminal line.
///
/// Names arrive from remote participants unchecked: control characters and
/// runs of whitespace collapse to single spaces, blank names show as
/// "(no name)", and long names are cut on a character boundary.
pub fn display_name(raw: &str) -> String {
    let cleaned = raw
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.is_empty() {
        return "(no name)".to_string();
    }
    if cleaned.chars().count() <= MAX_NAME_CHARS {
        return cleaned;
    }
    let cut: String = cleaned.chars().take(MAX_NAME_CHARS - 1).collect();
    format!("{cut}…")
}

/// Everything a simulated session produced.
pub struct SimulationSummary {
    pub sent: Vec<SentMessage>,
    pub events: Vec<EmittedEvent>,
    pub shown: Vec<ShownNotification>,
    pub state: TakeShotState,
    pub outbound: GateStats,
    pub inbound: GateStats,
}

pub fn display_config(config: &TakeShotConfig) {
    println!("\n{}", "=== Take-shot configuration ===".bold());
    println!("  Inbound debounce:  {:?}", config.inbound_delay());
    println!("  Outbound debounce: {:?}", config.outbound_delay());
    match config.visibility {
        VisibilityMode::Toggle => println!("  Visibility:        toggle (no auto-hide)"),
        VisibilityMode::AutoHide(d) => println!("  Visibility:        auto-hide after {d:?}"),
    }
    println!(
        "  Acknowledgment:    {}",
        if config.echo_acknowledgment {
            "echoed".green()
        } else {
            "off".dimmed()
        }
    );
    println!("  Notification:      {:?}", config.notification_timeout);
}

pub fn display_classification(classification: &Classification) {
    match classification {
        Classification::Matched { from } => println!(
            "{} take-shot prompt from {}",
            "matched".green().bold(),
            display_name(from).bold()
        ),
        Classification::Unmatched => {
            println!("{} (passed through untouched)", "unmatched".dimmed())
        }
    }
}

pub fn display_simulation(summary: &SimulationSummary) {
    println!("\n{}", "=== Simulation ===".bold());

    println!(
        "\n  Outbound gate: {} scheduled, {} reset, {} fired",
        summary.outbound.scheduled, summary.outbound.replaced, summary.outbound.fired
    );
    if summary.sent.is_empty() {
        println!("  {}", "No broadcast sent".yellow());
    }
    for message in &summary.sent {
        let target = if message.target.is_empty() {
            "everyone"
        } else {
            message.target.as_str()
        };
        println!(
            "  {} -> {} {}",
            message.sent_at.format("%H:%M:%S%.3f").to_string().dimmed(),
            target,
            message.payload
        );
    }

    println!(
        "\n  Inbound gate: {} scheduled, {} reset, {} fired",
        summary.inbound.scheduled, summary.inbound.replaced, summary.inbound.fired
    );
    for shown in &summary.shown {
        let name = shown
            .notification
            .title_arguments
            .values()
            .next()
            .map(|n| display_name(n.as_str()))
            .unwrap_or_default();
        println!(
            "  {} notification {} ({}, {:?})",
            shown.shown_at.format("%H:%M:%S%.3f").to_string().dimmed(),
            name.bold(),
            shown.notification.title_key,
            shown.timeout
        );
    }

    println!("\n  External events: {}", summary.events.len());
    for event in &summary.events {
        println!("    {} {}", event.kind.cyan(), event.data);
    }

    let flag = if summary.state.visible {
        "visible".green().bold()
    } else {
        "hidden".dimmed()
    };
    let overlay = if is_overlay_visible(&summary.state) {
        "rendered".green()
    } else {
        "not rendered".dimmed()
    };
    println!(
        "\n  Overlay flag: {}  |  Participants: {}  |  Overlay: {}",
        flag, summary.state.participant_count, overlay
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_names_are_unchanged() {
        assert_eq!(display_name("Carol"), "Carol");
        assert_eq!(display_name("Émile 🍻"), "Émile 🍻");
    }

    #[test]
    fn test_control_characters_and_whitespace_collapse() {
        assert_eq!(display_name("  Mal\nlory\t\x1b[31m "), "Mal lory [31m");
    }

    #[test]
    fn test_blank_names_get_a_placeholder() {
        assert_eq!(display_name(""), "(no name)");
        assert_eq!(display_name(" \t\n"), "(no name)");
    }

    #[test]
    fn test_long_names_are_cut_on_char_boundary() {
        let name = "🍺".repeat(40);
        let shown = display_name(&name);
        assert_eq!(shown.chars().count(), MAX_NAME_CHARS);
        assert!(shown.ends_with('…'));
    }
}
