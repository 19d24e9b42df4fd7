//! tomcat-glance - drive the Apache Tomcat Manager text API.

mod cli;
mod output;

use cli::{Cli, Command};
use tomcat_glance::config::Config;
use tomcat_glance::logging::init_stderr_logging;
use tomcat_glance::{ManagerError, ManagerTransport, Result, TomcatManager};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    init_stderr_logging(cli.verbose);

    if let Err(e) = run(&cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    // Load configuration file
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let mut manager = TomcatManager::new()?;
    register_servers(&mut manager, &config);
    select_target(&mut manager, cli, &config)?;

    let text = execute(&manager, cli).await?;
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}

/// Registers every configured server under its name.
///
/// Entries that cannot form a valid connection are skipped with a warning
/// so one bad table does not block the others.
fn register_servers<T: ManagerTransport>(manager: &mut TomcatManager<T>, config: &Config) {
    for name in config.servers.keys() {
        let Some(server) = config.resolved_server(name) else {
            continue;
        };
        match server
            .to_descriptor()
            .and_then(|descriptor| manager.connect_with(descriptor, Some(name.as_str())))
        {
            Ok(index) => info!("Registered server '{}' as connection {}", name, index),
            Err(e) => warn!("Skipping server '{}': {}", name, e),
        }
    }
}

/// Makes the requested server current.
///
/// Precedence:
/// 1. `--url` / `--host` (layered over `--server` when both are given)
/// 2. Named server from config, adjusted by any other connection flags
/// 3. The `default` server from config, adjusted the same way
fn select_target<T: ManagerTransport>(
    manager: &mut TomcatManager<T>,
    cli: &Cli,
    config: &Config,
) -> Result<()> {
    if let Some(overrides) = cli.to_server_config()? {
        let base = match cli.server_name() {
            Some(name) => Some(
                config
                    .get_server(Some(name))
                    .cloned()
                    .ok_or_else(|| server_not_found(name))?,
            ),
            None if !cli.names_target() => config.get_server(None).cloned(),
            None => None,
        };
        let mut server = base.unwrap_or_default();
        server.merge(&overrides);
        if let Some(port) = cli.port {
            server.port = port;
        }
        let server = config.resolve(server);
        info!("Target: {}", server.display_string());
        manager.connect_with(server.to_descriptor()?, None)?;
        return Ok(());
    }

    if let Some(name) = cli.server_name() {
        if manager.switch(name).is_err() {
            // Either unknown, or skipped at registration because it is invalid.
            let server = config
                .resolved_server(name)
                .ok_or_else(|| server_not_found(name))?;
            server.to_descriptor()?;
            manager.switch(name)?;
        }
        return Ok(());
    }

    if manager.registry().get("default").is_ok() {
        manager.switch("default")?;
    } else if cli.command.needs_connection() {
        if let Some(server) = config.resolved_server("default") {
            server.to_descriptor()?;
        }
        return Err(ManagerError::config(
            "No Tomcat server selected. Use --host, --url, --server or a [servers.default] table",
        ));
    }
    Ok(())
}

fn server_not_found(name: &str) -> ManagerError {
    ManagerError::config(format!("Server '{}' not found in config file", name))
}

async fn execute<T: ManagerTransport>(manager: &TomcatManager<T>, cli: &Cli) -> Result<String> {
    let format = cli.output;
    let text = match &cli.command {
        Command::List => output::render_applications(&manager.list().await?, format),
        Command::Status { path } => {
            let status = manager.application_status(path).await?;
            output::render_status(path, &status, format)
        }
        Command::Serverinfo => output::render_server_info(&manager.server_info().await?, format),
        Command::Start { path } => {
            manager.start(path).await?;
            output::render_done("start", path, format)
        }
        Command::Stop { path } => {
            manager.stop(path).await?;
            output::render_done("stop", path, format)
        }
        Command::Reload { path } => {
            manager.reload(path).await?;
            output::render_done("reload", path, format)
        }
        Command::Servers => {
            output::render_servers(&output::server_entries(manager.registry()), format)
        }
    };
    Ok(text)
}
