use crate::error::ClientError;
use evalgrid_core::{PageArgs, Selection};
use evalgrid_protocol::{
    Assignment, Department, DepartmentMetric, Employee, EmployeeMetrics, Metric, ScoreEntry,
};
use reqwest::{Client, Response};
use tracing::debug;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder, Debug, Clone)]
pub struct ClientConfig {
    #[builder(default = String::from("http://127.0.0.1:8000"), setter(into))]
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Thin wrapper over the evaluation backend's REST endpoints. Cheap to
/// clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn checked(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_list<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        page: PageArgs,
    ) -> Result<Vec<T>, ClientError> {
        debug!("GET {} skip={} limit={}", path, page.skip, page.limit);
        let response = self
            .http
            .get(self.url(path))
            .query(&[("skip", page.skip), ("limit", page.limit)])
            .send()
            .await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    pub async fn employees(&self, page: PageArgs) -> Result<Vec<Employee>, ClientError> {
        self.get_list("/employees", page).await
    }

    pub async fn departments(&self, page: PageArgs) -> Result<Vec<Department>, ClientError> {
        self.get_list("/faculty_and_department/departments", page)
            .await
    }

    pub async fn metrics(&self, page: PageArgs) -> Result<Vec<Metric>, ClientError> {
        self.get_list("/metrics", page).await
    }

    /// Bulk metric-definition replacement.
    pub async fn update_metrics(&self, metrics: &[Metric]) -> Result<(), ClientError> {
        let response = self
            .http
            .put(self.url("/metrics"))
            .json(metrics)
            .send()
            .await?;
        Self::checked(response).await?;
        Ok(())
    }

    pub async fn assignments(&self, page: PageArgs) -> Result<Vec<Assignment>, ClientError> {
        self.get_list("/employees-to-metrics/", page).await
    }

    pub async fn create_assignment(&self, assignment: &Assignment) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/employees-to-metrics/"))
            .json(assignment)
            .send()
            .await?;
        Self::checked(response).await?;
        Ok(())
    }

    /// Scored cells visible for one (reviewer, year, quarter) selection.
    /// The server filters; the result is authoritative for that selection.
    pub async fn selection_scores(
        &self,
        selection: Selection,
    ) -> Result<Vec<ScoreEntry>, ClientError> {
        let response = self
            .http
            .get(self.url("/kpi/table"))
            .query(&[
                ("employee_id", selection.employee_id.to_string()),
                ("year", selection.year.to_string()),
                ("quarter", selection.quarter.number().to_string()),
            ])
            .send()
            .await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    /// One independent single-cell write for the given selection.
    pub async fn write_score(
        &self,
        selection: Selection,
        entry: &ScoreEntry,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/kpi/table"))
            .query(&[
                ("year", selection.year.to_string()),
                ("quarter", selection.quarter.number().to_string()),
                ("employee_id", selection.employee_id.to_string()),
            ])
            .json(entry)
            .send()
            .await?;
        Self::checked(response).await?;
        Ok(())
    }

    pub async fn department_metrics(&self) -> Result<Vec<DepartmentMetric>, ClientError> {
        let response = self
            .http
            .get(self.url("/departments-metrics"))
            .send()
            .await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    pub async fn employee_scores(&self) -> Result<Vec<EmployeeMetrics>, ClientError> {
        let response = self
            .http
            .get(self.url("/employees_metrics/all"))
            .send()
            .await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    /// The server-generated expert workbook as raw xlsx bytes.
    pub async fn expert_workbook(&self) -> Result<Vec<u8>, ClientError> {
        let response = self
            .http
            .get(self.url("/table_maker/experts"))
            .send()
            .await?;
        Ok(Self::checked(response).await?.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_matches_local_backend() {
        let client = ApiClient::new(ClientConfig::default());
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new(
            ClientConfig::builder()
                .base_url("http://10.0.0.5:9000/")
                .build(),
        );
        assert_eq!(client.url("/metrics"), "http://10.0.0.5:9000/metrics");
    }
}
