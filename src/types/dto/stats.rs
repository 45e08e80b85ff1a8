use poem_openapi::Object;

use crate::types::internal::stats::{CompanyCount, MonthlyCount, StatsOverview, SubnetUtilization};

#[derive(Object, Debug)]
pub struct SubnetUtilizationResponse {
    pub subnet_id: i64,
    pub network: String,
    pub mask: i32,
    pub description: String,

    /// Address records attached to the subnet
    pub used: u64,
    pub usable_hosts: u64,

    /// Percentage with two decimals
    pub utilization: f64,
}

impl From<SubnetUtilization> for SubnetUtilizationResponse {
    fn from(u: SubnetUtilization) -> Self {
        Self {
            subnet_id: u.subnet_id,
            network: u.network,
            mask: u.mask,
            description: u.description,
            used: u.used,
            usable_hosts: u.usable_hosts,
            utilization: u.utilization,
        }
    }
}

#[derive(Object, Debug)]
pub struct CompanyCountResponse {
    pub label: String,
    pub count: u64,
}

impl From<CompanyCount> for CompanyCountResponse {
    fn from(c: CompanyCount) -> Self {
        Self {
            label: c.label,
            count: c.count,
        }
    }
}

#[derive(Object, Debug)]
pub struct MonthlyCountResponse {
    /// YYYY-MM
    pub month: String,
    pub count: u64,
}

impl From<MonthlyCount> for MonthlyCountResponse {
    fn from(m: MonthlyCount) -> Self {
        Self {
            month: m.month,
            count: m.count,
        }
    }
}

#[derive(Object, Debug)]
pub struct StatsOverviewResponse {
    pub total_subnets: u64,
    pub total_addresses: u64,
    pub occupied: u64,
    pub free: u64,
    pub subnets: Vec<SubnetUtilizationResponse>,
    pub companies: Vec<CompanyCountResponse>,
    pub monthly_trend: Vec<MonthlyCountResponse>,
}

impl From<StatsOverview> for StatsOverviewResponse {
    fn from(o: StatsOverview) -> Self {
        Self {
            total_subnets: o.total_subnets,
            total_addresses: o.total_addresses,
            occupied: o.occupied,
            free: o.free,
            subnets: o.subnets.into_iter().map(Into::into).collect(),
            companies: o.companies.into_iter().map(Into::into).collect(),
            monthly_trend: o.monthly_trend.into_iter().map(Into::into).collect(),
        }
    }
}
