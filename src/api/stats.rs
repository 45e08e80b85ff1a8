use std::sync::Arc;

use chrono::NaiveDate;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};

use crate::errors::IpamError;
use crate::stores::StatsStore;
use crate::types::dto::stats::{
    CompanyCountResponse, MonthlyCountResponse, StatsOverviewResponse, SubnetUtilizationResponse,
};
use crate::types::internal::stats::StatsFilter;

/// Utilization statistics endpoints (read-only)
pub struct StatsApi {
    stats_store: Arc<StatsStore>,
}

impl StatsApi {
    pub fn new(stats_store: Arc<StatsStore>) -> Self {
        Self { stats_store }
    }
}

#[derive(Tags)]
enum StatsTags {
    /// Utilization statistics
    Stats,
}

#[OpenApi(prefix_path = "/stats")]
impl StatsApi {
    /// Totals, utilization, company breakdown and monthly trend
    #[oai(path = "/", method = "get", tag = "StatsTags::Stats")]
    async fn overview(
        &self,
        subnet_id: Query<Option<i64>>,
        date_from: Query<Option<String>>,
        date_to: Query<Option<String>>,
    ) -> Result<Json<StatsOverviewResponse>, IpamError> {
        let filter = build_filter(subnet_id.0, date_from.0, date_to.0)?;
        let overview = self.stats_store.overview(&filter).await?;
        Ok(Json(overview.into()))
    }

    #[oai(path = "/subnets", method = "get", tag = "StatsTags::Stats")]
    async fn subnets(
        &self,
        subnet_id: Query<Option<i64>>,
        date_from: Query<Option<String>>,
        date_to: Query<Option<String>>,
    ) -> Result<Json<Vec<SubnetUtilizationResponse>>, IpamError> {
        let filter = build_filter(subnet_id.0, date_from.0, date_to.0)?;
        let subnets = self.stats_store.subnet_utilization(&filter).await?;
        Ok(Json(subnets.into_iter().map(Into::into).collect()))
    }

    /// Top ten owner labels by record count
    #[oai(path = "/companies", method = "get", tag = "StatsTags::Stats")]
    async fn companies(
        &self,
        subnet_id: Query<Option<i64>>,
        date_from: Query<Option<String>>,
        date_to: Query<Option<String>>,
    ) -> Result<Json<Vec<CompanyCountResponse>>, IpamError> {
        let filter = build_filter(subnet_id.0, date_from.0, date_to.0)?;
        let companies = self.stats_store.company_breakdown(&filter).await?;
        Ok(Json(companies.into_iter().map(Into::into).collect()))
    }

    /// Records created per month over the trailing twelve months
    #[oai(path = "/trend", method = "get", tag = "StatsTags::Stats")]
    async fn trend(
        &self,
        subnet_id: Query<Option<i64>>,
        date_from: Query<Option<String>>,
        date_to: Query<Option<String>>,
    ) -> Result<Json<Vec<MonthlyCountResponse>>, IpamError> {
        let filter = build_filter(subnet_id.0, date_from.0, date_to.0)?;
        let trend = self.stats_store.monthly_trend(&filter).await?;
        Ok(Json(trend.into_iter().map(Into::into).collect()))
    }
}

fn build_filter(
    subnet_id: Option<i64>,
    date_from: Option<String>,
    date_to: Option<String>,
) -> Result<StatsFilter, IpamError> {
    Ok(StatsFilter {
        subnet_id,
        date_from: parse_date("date_from", date_from)?,
        date_to: parse_date("date_to", date_to)?,
    })
}

fn parse_date(name: &str, value: Option<String>) -> Result<Option<NaiveDate>, IpamError> {
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| IpamError::validation_failed(format!("{} must be a YYYY-MM-DD date, got '{}'", name, v))),
    }
}
