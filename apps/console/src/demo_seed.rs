use callops_application::{RoleAdminService, SubmitOutcome};
use callops_core::{AppError, AppResult};
use callops_domain::{Schedule, ScheduleId};
use chrono::NaiveTime;
use tracing::info;

struct SeedRole {
    name: &'static str,
    description: &'static str,
    categories: &'static [&'static str],
    permissions: &'static [(&'static str, &'static str)],
    schedules: &'static [u64],
    active: bool,
}

const SEED_ROLES: &[SeedRole] = &[
    SeedRole {
        name: "Super Admin",
        description: "Full access to every console screen",
        categories: &[
            "users",
            "calls",
            "campaigns",
            "attendance",
            "announcements",
            "reports",
            "settings",
        ],
        permissions: &[],
        schedules: &[],
        active: true,
    },
    SeedRole {
        name: "Supervisor",
        description: "Floor supervision, attendance and reporting",
        categories: &["attendance", "reports"],
        permissions: &[
            ("calls", "view_call_history"),
            ("calls", "listen_recordings"),
            ("campaigns", "view_campaigns"),
            ("announcements", "publish_announcements"),
        ],
        schedules: &[1, 2],
        active: true,
    },
    SeedRole {
        name: "Agent",
        description: "Inbound and outbound call handling",
        categories: &[],
        permissions: &[
            ("calls", "make_calls"),
            ("calls", "receive_calls"),
            ("announcements", "view_announcements"),
        ],
        schedules: &[1, 2, 3],
        active: true,
    },
    SeedRole {
        name: "Quality Analyst",
        description: "Reviews recordings for the former QA program",
        categories: &[],
        permissions: &[("calls", "listen_recordings"), ("reports", "view_reports")],
        schedules: &[4],
        active: false,
    },
];

/// Schedules offered by the demo schedule source.
pub fn demo_schedules() -> AppResult<Vec<Schedule>> {
    let window = |hour: u32| NaiveTime::from_hms_opt(hour, 0, 0);

    Ok(vec![
        Schedule::new(ScheduleId::new(1), "Morning shift", window(8), window(16))?,
        Schedule::new(ScheduleId::new(2), "Evening shift", window(16), window(0))?,
        Schedule::new(ScheduleId::new(3), "Night shift", window(22), window(6))?,
        Schedule::new(ScheduleId::new(4), "Weekend rotation", None, None)?,
    ])
}

/// Populates the service with the demo roles.
pub async fn run(service: &RoleAdminService) -> AppResult<()> {
    for seed in SEED_ROLES {
        let mut session = service.open_create_session();
        session.set_name(seed.name)?;
        session.set_description(seed.description)?;
        for category_key in seed.categories {
            session.toggle_category(category_key)?;
        }
        for (category_key, permission_key) in seed.permissions {
            session.toggle_permission(category_key, permission_key)?;
        }
        for schedule_id in seed.schedules {
            session.toggle_schedule(ScheduleId::new(*schedule_id))?;
        }

        let role = match service.submit_session(&mut session).await? {
            SubmitOutcome::Committed(role) => role,
            SubmitOutcome::Rejected(reason) => {
                return Err(AppError::Internal(format!(
                    "demo role '{}' failed validation: {reason}",
                    seed.name
                )));
            }
        };

        if !seed.active {
            service.set_role_active(role.id(), false).await?;
        }
    }

    info!(role_count = SEED_ROLES.len(), "demo role seed completed");
    Ok(())
}
