//! Parsers for manager text API response bodies.
//!
//! Every response starts with a status line (`OK - ...` or `FAIL - ...`)
//! and ends with one or more newlines. The status line is dropped and blank
//! lines are skipped, so `\n` and `\n\n` terminators frame the same data.

use crate::error::{ManagerError, Result};
use crate::manager::types::{Application, ManagerCommand, ServerInfo};

/// Returns the non-blank lines after the status line.
pub fn data_lines(body: &str) -> Vec<&str> {
    body.split('\n')
        .skip(1)
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Parses a `/list` body into applications.
///
/// Each line is `path:status:sessions:name`. The name keeps any further
/// colons.
pub fn parse_list(body: &str) -> Result<Vec<Application>> {
    data_lines(body)
        .into_iter()
        .map(|line| {
            let fields: Vec<&str> = line.splitn(4, ':').collect();
            match fields.as_slice() {
                [path, status, sessions, name] => Ok(Application {
                    path: (*path).to_string(),
                    status: (*status).to_string(),
                    sessions: (*sessions).to_string(),
                    name: (*name).to_string(),
                }),
                _ => Err(ManagerError::protocol(format!(
                    "expected 4 colon-separated fields in application line, got {:?}",
                    line
                ))),
            }
        })
        .collect()
}

/// Parses a `/serverinfo` body into a key/value map.
///
/// Lines split on the first colon, values are left-trimmed. A repeated key
/// keeps its last value.
pub fn parse_server_info(body: &str) -> Result<ServerInfo> {
    let mut info = ServerInfo::new();
    for line in data_lines(body) {
        let line = line.trim_end();
        let (key, value) = line.split_once(':').ok_or_else(|| {
            ManagerError::protocol(format!("expected 'key: value' in server info line, got {:?}", line))
        })?;
        info.insert(key.to_string(), value.trim_start().to_string());
    }
    Ok(info)
}

/// Builds the exact body the server sends when a lifecycle command succeeds.
pub fn expected_success(command: ManagerCommand, path: &str) -> Option<String> {
    command
        .success_verb()
        .map(|verb| format!("OK - {verb} application at context path {path}\n"))
}

/// True only when `body` equals the success line byte for byte.
pub fn is_command_success(command: ManagerCommand, path: &str, body: &str) -> bool {
    expected_success(command, path).is_some_and(|expected| expected == body)
}
