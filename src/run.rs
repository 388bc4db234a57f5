//! Application execution logic.
//!
//! This module triggers one pipeline run and renders the outcome for the
//! terminal.

use azdo_trigger::config::{OutputFormat, ValidatedConfig};
use azdo_trigger::transport::ReqwestClient;
use azdo_trigger::trigger::{PipelineTrigger, TriggerOutcome, TriggerRequest};
use serde_json::json;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Triggers one run with the production HTTP client.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it talks to the
/// real remote API.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, request: &TriggerRequest) -> TriggerOutcome {
    let trigger = PipelineTrigger::new(ReqwestClient::new(), config.endpoint);
    trigger.trigger(request).await
}

/// Text destined for stdout and stderr.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Rendered {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl Rendered {
    /// Writes both streams.
    pub fn print(&self) {
        if let Some(out) = &self.stdout {
            println!("{out}");
        }
        if let Some(err) = &self.stderr {
            eprintln!("{err}");
        }
    }
}

/// Renders an outcome in the requested format.
pub fn render(outcome: &TriggerOutcome, format: OutputFormat) -> Rendered {
    match format {
        OutputFormat::Text => render_text(outcome),
        OutputFormat::Json => Rendered {
            stdout: Some(format!("{:#}", render_json(outcome))),
            stderr: None,
        },
    }
}

fn render_text(outcome: &TriggerOutcome) -> Rendered {
    match outcome {
        TriggerOutcome::Success(result) => Rendered {
            stdout: Some(format!("HTTP {}\n{:#}", result.status.as_u16(), result.body)),
            stderr: outcome.remediation_hint().map(|hint| format!("Error: {hint}")),
        },
        TriggerOutcome::Failure { message, .. } => Rendered {
            stdout: None,
            stderr: Some(format!("Error: {message}")),
        },
    }
}

fn render_json(outcome: &TriggerOutcome) -> serde_json::Value {
    match outcome {
        TriggerOutcome::Success(result) => json!({
            "ok": result.succeeded,
            "status": result.status.as_u16(),
            "body": result.body,
            "hint": outcome.remediation_hint(),
        }),
        TriggerOutcome::Failure { kind, message } => json!({
            "ok": false,
            "kind": kind.as_str(),
            "message": message,
        }),
    }
}
