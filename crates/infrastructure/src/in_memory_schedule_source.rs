use async_trait::async_trait;
use callops_application::ScheduleSource;
use callops_core::AppResult;
use callops_domain::Schedule;

/// Fixed schedule list supplied at construction.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScheduleSource {
    schedules: Vec<Schedule>,
}

impl InMemoryScheduleSource {
    /// Creates a source that lists the given schedules in order.
    #[must_use]
    pub fn new(schedules: Vec<Schedule>) -> Self {
        Self { schedules }
    }
}

#[async_trait]
impl ScheduleSource for InMemoryScheduleSource {
    async fn list_schedules(&self) -> AppResult<Vec<Schedule>> {
        Ok(self.schedules.clone())
    }
}
