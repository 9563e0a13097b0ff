use crate::reports;
use clap::Args;
use evalgrid_client::{ApiClient, ListCache};
use evalgrid_core::metrics::{search_employees, sort_employees};

#[derive(Args, Debug, Clone)]
pub struct EmployeesArgs {
    /// Case-insensitive substring over "last first patronymic"
    #[arg(short, long)]
    pub search: Option<String>,
}

pub async fn run(
    args: EmployeesArgs,
    client: &ApiClient,
    cache: &mut ListCache,
) -> anyhow::Result<()> {
    let mut employees = cache.employees(client).await?.to_vec();
    sort_employees(&mut employees);

    let term = args.search.unwrap_or_default();
    let matched: Vec<_> = search_employees(&employees, &term)
        .into_iter()
        .cloned()
        .collect();

    if matched.is_empty() {
        println!("No employees match '{}'", term);
        return Ok(());
    }
    reports::tables::employees(&matched);
    Ok(())
}
