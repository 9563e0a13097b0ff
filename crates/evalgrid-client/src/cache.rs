use crate::client::ApiClient;
use crate::error::ClientError;
use evalgrid_core::PageArgs;
use evalgrid_protocol::{Assignment, Department, Employee, Metric};
use tracing::debug;

/// Explicit fetch-through cache for the entity lists. Owned by the caller
/// and handed to whichever view needs it; writes that change a list must
/// invalidate the matching slot.
pub struct ListCache {
    page: PageArgs,
    employees: Option<Vec<Employee>>,
    departments: Option<Vec<Department>>,
    metrics: Option<Vec<Metric>>,
    assignments: Option<Vec<Assignment>>,
}

impl ListCache {
    pub fn new(page: PageArgs) -> Self {
        Self {
            page,
            employees: None,
            departments: None,
            metrics: None,
            assignments: None,
        }
    }

    pub async fn employees(&mut self, client: &ApiClient) -> Result<&[Employee], ClientError> {
        if self.employees.is_none() {
            debug!("cache miss: employees");
            self.employees = Some(client.employees(self.page).await?);
        }
        Ok(self.employees.as_deref().unwrap_or_default())
    }

    pub async fn departments(&mut self, client: &ApiClient) -> Result<&[Department], ClientError> {
        if self.departments.is_none() {
            debug!("cache miss: departments");
            self.departments = Some(client.departments(self.page).await?);
        }
        Ok(self.departments.as_deref().unwrap_or_default())
    }

    pub async fn metrics(&mut self, client: &ApiClient) -> Result<&[Metric], ClientError> {
        if self.metrics.is_none() {
            debug!("cache miss: metrics");
            self.metrics = Some(client.metrics(self.page).await?);
        }
        Ok(self.metrics.as_deref().unwrap_or_default())
    }

    pub async fn assignments(&mut self, client: &ApiClient) -> Result<&[Assignment], ClientError> {
        if self.assignments.is_none() {
            debug!("cache miss: assignments");
            self.assignments = Some(client.assignments(self.page).await?);
        }
        Ok(self.assignments.as_deref().unwrap_or_default())
    }

    /// Call after `PUT /metrics`.
    pub fn invalidate_metrics(&mut self) {
        self.metrics = None;
    }

    /// Call after an assignment write.
    pub fn invalidate_assignments(&mut self) {
        self.assignments = None;
    }

    pub fn invalidate_all(&mut self) {
        self.employees = None;
        self.departments = None;
        self.metrics = None;
        self.assignments = None;
    }
}
