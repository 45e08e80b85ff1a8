use chrono::NaiveDate;

/// Owner label bucket for records without one
pub const UNASSIGNED_LABEL: &str = "unassigned";

/// Filters applied uniformly by every aggregation
#[derive(Debug, Clone, Default)]
pub struct StatsFilter {
    pub subnet_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    /// Inclusive of the entire day
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubnetUtilization {
    pub subnet_id: i64,
    pub network: String,
    pub mask: i32,
    pub description: String,
    pub used: u64,
    pub usable_hosts: u64,
    pub utilization: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCount {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCount {
    /// Month as YYYY-MM
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsOverview {
    pub total_subnets: u64,
    pub total_addresses: u64,
    pub occupied: u64,
    pub free: u64,
    pub subnets: Vec<SubnetUtilization>,
    pub companies: Vec<CompanyCount>,
    pub monthly_trend: Vec<MonthlyCount>,
}
