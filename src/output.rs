//! Rendering of command results for the terminal.

use serde::Serialize;
use tomcat_glance::{Application, ConnectionDescriptor, ConnectionRegistry, ServerInfo};

use crate::cli::OutputFormat;

/// A registry entry as shown by the `servers` command.
#[derive(Debug, Serialize)]
pub struct ServerEntry<'a> {
    pub index: usize,
    pub alias: Option<&'a str>,
    pub url: &'a str,
    pub username: &'a str,
    pub current: bool,
}

/// Collects the live registry entries for display.
pub fn server_entries(registry: &ConnectionRegistry<ConnectionDescriptor>) -> Vec<ServerEntry<'_>> {
    registry
        .iter()
        .map(|(index, alias, descriptor)| ServerEntry {
            index,
            alias,
            url: descriptor.url(),
            username: descriptor.username(),
            current: index == registry.current_index(),
        })
        .collect()
}

pub fn render_applications(apps: &[Application], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&apps),
        OutputFormat::Text => {
            let width = apps.iter().map(|app| app.path.len()).max().unwrap_or(0);
            apps.iter()
                .map(|app| {
                    format!(
                        "{:<width$}  {:<8}  {:>4}  {}",
                        app.path, app.status, app.sessions, app.name
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

pub fn render_server_info(info: &ServerInfo, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(info),
        OutputFormat::Text => info
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn render_status(path: &str, status: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({ "path": path, "status": status })),
        OutputFormat::Text => status.to_string(),
    }
}

/// Confirmation for start/stop/reload.
pub fn render_done(command: &str, path: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            to_json(&serde_json::json!({ "command": command, "path": path, "ok": true }))
        }
        OutputFormat::Text => format!("{command} {path}: OK"),
    }
}

pub fn render_servers(entries: &[ServerEntry<'_>], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&entries),
        OutputFormat::Text if entries.is_empty() => {
            "No servers configured. Add a [servers.<name>] table to the config file.".to_string()
        }
        OutputFormat::Text => entries
            .iter()
            .map(|entry| {
                format!(
                    "{} {:>2}  {:<12}  {} ({})",
                    if entry.current { "*" } else { " " },
                    entry.index,
                    entry.alias.unwrap_or("-"),
                    entry.url,
                    entry.username
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
