// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

pub const LOG_SCHEMA_VERSION: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub schema_version: u64,
    pub level: LogLevel,
    pub code: String,
    pub message: String,
}

impl LogRecord {
    pub fn new(level: LogLevel, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            schema_version: LOG_SCHEMA_VERSION,
            level,
            code: code.into(),
            message: message.into(),
        }
    }
}

pub fn render_log(record: &LogRecord, format: LogFormat) -> Result<String, String> {
    match format {
        LogFormat::Human => Ok(format!(
            "[{}] {}: {}",
            match record.level {
                LogLevel::Debug => "debug",
                LogLevel::Info => "info",
                LogLevel::Warn => "warn",
                LogLevel::Error => "error",
            },
            record.code,
            record.message
        )),
        LogFormat::Json => serde_json::to_string(record).map_err(|err| err.to_string()),
    }
}
