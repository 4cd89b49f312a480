use std::sync::Arc;

use widget_host::commands::{CommandRegistry, register_component_commands, stdio};
use widget_host::config::ServiceConfig;
use widget_host::registry::ComponentRegistry;
use widget_host::server;
use widget_host::store::ComponentStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServiceConfig::from_env()?;

    eprintln!("🧩 Widget Host v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Components: {}", config.components_dir.display());
    eprintln!(
        "   Asset server: http://0.0.0.0:{}/components/all.js",
        config.http_port
    );
    eprintln!(
        "   Component API: http://0.0.0.0:{}/api/components",
        config.http_port
    );

    // ── Storage + registry ──────────────────────────────────────────────
    let store = ComponentStore::new(config.components_dir.clone());
    store.ensure_dir().await?;
    let registry = Arc::new(ComponentRegistry::new(store));

    // ── Commands ────────────────────────────────────────────────────────
    let commands = Arc::new(CommandRegistry::new());
    register_component_commands(&commands, Arc::clone(&registry));
    eprintln!("   Commands: {} registered", commands.count());

    // ── HTTP asset server ───────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port)).await?;

    if config.stdio_commands {
        eprintln!("   Commands read from stdin as {{\"command_name\": {{...}}}}\n");
        let registry_for_server = Arc::clone(&registry);
        tokio::spawn(async move {
            server::serve(listener, registry_for_server).await.ok();
        });
        stdio::run_command_loop(commands).await;
    } else {
        eprintln!();
        server::serve(listener, registry).await?;
    }

    Ok(())
}
