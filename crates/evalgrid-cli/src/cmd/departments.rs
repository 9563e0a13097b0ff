use crate::reports;
use clap::Args;
use evalgrid_client::{ApiClient, ListCache};

#[derive(Args, Debug, Clone)]
pub struct DepartmentsArgs {}

pub async fn run(
    _args: DepartmentsArgs,
    client: &ApiClient,
    cache: &mut ListCache,
) -> anyhow::Result<()> {
    let departments = cache.departments(client).await?;
    reports::tables::departments(departments);
    Ok(())
}
