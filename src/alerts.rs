//! Alertmanager webhook payloads
//!
//! Payloads are read leniently: every field is optional and missing values are
//! replaced with placeholders when an alert is logged. Processing yields an
//! [`AlertOutcome`] instead of an error so the transport always answers with the
//! same JSON shape.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{Error, Result};

/// Batch of alerts delivered by Alertmanager.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AlertPayload {
    /// `firing` or `resolved`
    pub status: Option<String>,
    pub receiver: Option<String>,
    pub alerts: Vec<Alert>,
}

/// Single alert record inside a webhook batch.
///
/// Label and annotation values are kept as raw JSON so a stray number or
/// boolean is logged instead of rejecting the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Alert {
    pub status: Option<String>,
    #[schema(value_type = Object)]
    pub labels: BTreeMap<String, Value>,
    #[schema(value_type = Object)]
    pub annotations: BTreeMap<String, Value>,
    pub fingerprint: Option<String>,
}

impl AlertPayload {
    /// Parse a webhook body. The body and every alert entry must be JSON
    /// objects; serde would otherwise fill struct fields from arrays by position.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;

        let Value::Object(fields) = &value else {
            return Err(Error::NotAnObject(json_kind(&value)));
        };
        if let Some(Value::Array(alerts)) = fields.get("alerts") {
            if let Some(entry) = alerts.iter().find(|a| !a.is_object()) {
                return Err(Error::NotAnObject(json_kind(entry)));
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }
}

impl Alert {
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }

    pub fn alertname(&self) -> Cow<'_, str> {
        self.label("alertname").unwrap_or(Cow::Borrowed("Unknown"))
    }

    pub fn instance(&self) -> Cow<'_, str> {
        self.label("instance").unwrap_or(Cow::Borrowed("N/A"))
    }

    pub fn summary(&self) -> Cow<'_, str> {
        self.annotation("summary")
            .unwrap_or(Cow::Borrowed("No summary"))
    }

    pub fn description(&self) -> Cow<'_, str> {
        self.annotation("description")
            .unwrap_or(Cow::Borrowed("No description"))
    }

    pub fn label(&self, name: &str) -> Option<Cow<'_, str>> {
        self.labels.get(name).map(render)
    }

    pub fn annotation(&self, name: &str) -> Option<Cow<'_, str>> {
        self.annotations.get(name).map(render)
    }

    /// `[FIRING] HighLatency - p99 above 1s (instance: api-1)`
    pub fn summary_line(&self) -> String {
        format!(
            "[{}] {} - {} (instance: {})",
            self.status().to_uppercase(),
            self.alertname(),
            self.summary(),
            self.instance()
        )
    }

    /// `HighLatency - p99 above 1s | details...`
    pub fn critical_line(&self) -> String {
        format!(
            "{} - {} | {}",
            self.alertname(),
            self.summary(),
            self.description()
        )
    }
}

/// Strings as-is, anything else as its JSON text.
fn render(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Which webhook received the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Critical,
}

/// Result of handling one webhook delivery, serialized as the response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AlertOutcome {
    Received {
        #[serde(skip_serializing_if = "Option::is_none")]
        severity: Option<Severity>,
        count: usize,
    },
    Error {
        message: String,
    },
}

impl AlertOutcome {
    pub fn received(count: usize, severity: Severity) -> Self {
        AlertOutcome::Received {
            severity: (severity == Severity::Critical).then_some(severity),
            count,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AlertOutcome::Error { .. })
    }
}

/// Parse a webhook body, log every alert in it and report how many were seen.
pub fn process_alerts(body: &[u8], severity: Severity) -> AlertOutcome {
    match AlertPayload::from_slice(body) {
        Ok(payload) => {
            log_payload(&payload, severity);
            AlertOutcome::received(payload.alerts.len(), severity)
        }
        Err(err) => {
            match severity {
                Severity::Warning => tracing::error!(error = %err, "Error processing alert"),
                Severity::Critical => {
                    tracing::error!(error = %err, "Error processing critical alert")
                }
            }
            AlertOutcome::Error {
                message: err.to_string(),
            }
        }
    }
}

fn log_payload(payload: &AlertPayload, severity: Severity) {
    let status = payload.status().to_uppercase();

    match severity {
        Severity::Warning => {
            tracing::warn!(
                receiver = ?payload.receiver,
                alerts = payload.alerts.len(),
                "🚨 ALERT RECEIVED: {}",
                status
            );
            for alert in &payload.alerts {
                tracing::warn!(
                    alertname = %alert.alertname(),
                    instance = %alert.instance(),
                    fingerprint = ?alert.fingerprint,
                    "  {}",
                    alert.summary_line()
                );
            }
        }
        Severity::Critical => {
            // tracing has no level above ERROR; severity is carried as a field
            tracing::error!(
                severity = "critical",
                receiver = ?payload.receiver,
                alerts = payload.alerts.len(),
                "🔥 CRITICAL ALERT RECEIVED: {}",
                status
            );
            for alert in &payload.alerts {
                tracing::error!(
                    severity = "critical",
                    alertname = %alert.alertname(),
                    fingerprint = ?alert.fingerprint,
                    "  🔥 {}",
                    alert.critical_line()
                );
            }
        }
    }
}
