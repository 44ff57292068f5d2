//! Intent-specific required-field and cross-field rules.
//!
//! Every rule for the command's intent runs; findings are appended in check
//! order so the outcome is stable for comparison.

use intent_core::{Intent, NormalizedCommand, Side, ValidationOutcome};
use tracing::debug;

/// Validate `cmd` without modifying it.
pub fn validate(cmd: &NormalizedCommand) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::passed();

    match cmd.intent {
        Intent::OpenPosition => validate_open_position(cmd, &mut outcome),
        Intent::ClosePosition | Intent::BreakEven => require_symbol(cmd, &mut outcome),
        Intent::TrailingStop => validate_trailing_stop(cmd, &mut outcome),
        // Optional symbol filter only.
        Intent::CancelOrders | Intent::ViewPositions | Intent::ViewOrders | Intent::CheckBalance => {}
        Intent::Unknown => outcome.push_error(format!("unknown intent: {}", cmd.intent)),
    }

    debug!(
        intent = %cmd.intent,
        valid = outcome.valid,
        missing = outcome.missing.len(),
        errors = outcome.errors.len(),
        "Validated command"
    );

    outcome
}

/// Validate and attach the outcome to the command.
pub fn validated(cmd: NormalizedCommand) -> NormalizedCommand {
    let outcome = validate(&cmd);
    cmd.with_validation(outcome)
}

fn require_symbol(cmd: &NormalizedCommand, outcome: &mut ValidationOutcome) {
    if !cmd.has_symbol() {
        outcome.push_missing("symbol");
    }
}

fn validate_open_position(cmd: &NormalizedCommand, outcome: &mut ValidationOutcome) {
    require_symbol(cmd, outcome);
    if cmd.side.is_none() {
        outcome.push_missing("side");
    }
    if cmd.entry_price.is_none() {
        outcome.push_missing("entry_price");
    }
    if cmd.stop_loss.is_none() {
        outcome.push_missing("stop_loss");
    }
    if cmd.risk_percent.is_none() {
        outcome.push_missing("risk_percent");
    }

    if let Some(risk) = cmd.risk_percent {
        if risk <= 0.0 || risk > 100.0 {
            outcome.push_error("risk_percent must be between 0 and 100");
        }
    }

    if let (Some(side), Some(entry), Some(stop)) = (cmd.side, cmd.entry_price, cmd.stop_loss) {
        match side {
            Side::Long if stop >= entry => {
                outcome.push_error("stop_loss must be below entry_price for LONG")
            }
            Side::Short if stop <= entry => {
                outcome.push_error("stop_loss must be above entry_price for SHORT")
            }
            _ => {}
        }
    }

    if !cmd.tp_levels.is_empty() {
        let total = cmd.tp_percentage_total();
        if total > 100.0 {
            outcome.push_error(format!(
                "TP percentages sum to {total:.1}%, cannot exceed 100%"
            ));
        }
    }
}

fn validate_trailing_stop(cmd: &NormalizedCommand, outcome: &mut ValidationOutcome) {
    require_symbol(cmd, outcome);
    if cmd.trigger_price.is_none() {
        outcome.push_missing("trigger_price");
    }
    if cmd.callback_rate.is_none() && cmd.distance.is_none() {
        outcome.push_missing("callback_rate or distance");
    }
}
