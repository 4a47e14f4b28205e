//! Call-center console role administration runtime.

#![forbid(unsafe_code)]

mod console_config;
mod demo_seed;

use std::sync::Arc;

use callops_application::RoleAdminService;
use callops_core::{AppError, AppResult};
use callops_domain::{PermissionCatalog, RoleFilter};
use callops_infrastructure::{
    InMemoryRoleSnapshotStore, InMemoryScheduleSource, TracingNotificationSink,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::console_config::{ConsoleCommand, ConsoleConfig};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ConsoleConfig::load()?;
    let service = build_service(&config)?;
    service.reload().await?;

    if config.seed_demo_data {
        demo_seed::run(&service).await?;
    }

    let filter = RoleFilter {
        search_text: config.search_text.clone(),
        show_inactive: config.show_inactive,
    };

    info!(
        command = ?config.command,
        search_text = %filter.search_text,
        show_inactive = filter.show_inactive,
        "callops-console started"
    );

    match config.command {
        ConsoleCommand::List => print_roles(&service, &filter).await,
        ConsoleCommand::Export => print_export_rows(&service, &filter).await,
    }
}

fn build_service(config: &ConsoleConfig) -> AppResult<RoleAdminService> {
    let schedules = if config.seed_demo_data {
        demo_seed::demo_schedules()?
    } else {
        Vec::new()
    };

    Ok(RoleAdminService::new(
        PermissionCatalog::standard(),
        Arc::new(InMemoryRoleSnapshotStore::new()),
        Arc::new(InMemoryScheduleSource::new(schedules)),
        Arc::new(TracingNotificationSink::new()),
    ))
}

async fn print_roles(service: &RoleAdminService, filter: &RoleFilter) -> AppResult<()> {
    let catalog = service.catalog();

    for role in service.list_roles(filter).await {
        let categories = catalog
            .categories()
            .iter()
            .map(|category| {
                let state = callops_domain::category_state(role.permissions(), category);
                format!("{}={}", category.key(), state.as_str())
            })
            .collect::<Vec<_>>()
            .join(" ");

        println!(
            "#{} {} [{}] permissions={} schedules={} {}",
            role.id(),
            role.name(),
            if role.is_active() { "active" } else { "inactive" },
            role.permission_count(),
            role.schedules().len(),
            categories
        );
    }

    Ok(())
}

async fn print_export_rows(service: &RoleAdminService, filter: &RoleFilter) -> AppResult<()> {
    for row in service.export_rows(filter).await {
        let line = serde_json::to_string(&row).map_err(|error| {
            AppError::Internal(format!("failed to serialize export row: {error}"))
        })?;
        println!("{line}");
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
