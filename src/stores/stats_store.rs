use std::collections::HashMap;

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::errors::InternalError;
use crate::services::utilization::{usable_hosts, utilization_percent};
use crate::types::db::{ip_address, subnet};
use crate::types::internal::stats::{
    CompanyCount, MonthlyCount, StatsFilter, StatsOverview, SubnetUtilization, UNASSIGNED_LABEL,
};

/// Number of owner labels reported by the company breakdown
pub const TOP_COMPANIES: usize = 10;

/// Trailing months covered by the monthly trend, current month included
pub const TREND_MONTHS: u32 = 12;

/// Read-only aggregation over subnets and address records
///
/// Never writes audit entries.
pub struct StatsStore {
    db: DatabaseConnection,
}

impl StatsStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Totals, per-subnet utilization, company breakdown and monthly trend
    pub async fn overview(&self, filter: &StatsFilter) -> Result<StatsOverview, InternalError> {
        let total_subnets = subnet::Entity::find()
            .filter(subnet_condition(filter))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_subnets", e))?;

        let total_addresses = ip_address::Entity::find()
            .filter(address_condition(filter))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_addresses", e))?;

        let occupied = ip_address::Entity::find()
            .filter(address_condition(filter).add(ip_address::Column::Occupied.eq(true)))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_occupied", e))?;

        Ok(StatsOverview {
            total_subnets,
            total_addresses,
            occupied,
            free: total_addresses.saturating_sub(occupied),
            subnets: self.subnet_utilization(filter).await?,
            companies: self.company_breakdown(filter).await?,
            monthly_trend: self.monthly_trend(filter).await?,
        })
    }

    /// Utilization of every subnet, or of the filtered one
    ///
    /// `used` counts records attached to the subnet regardless of their
    /// occupied flag.
    pub async fn subnet_utilization(
        &self,
        filter: &StatsFilter,
    ) -> Result<Vec<SubnetUtilization>, InternalError> {
        let subnets = subnet::Entity::find()
            .filter(subnet_condition(filter))
            .order_by_asc(subnet::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_subnets", e))?;

        let counts: HashMap<i64, u64> = ip_address::Entity::find()
            .select_only()
            .column(ip_address::Column::SubnetId)
            .column_as(Expr::col(ip_address::Column::Id).count(), "used")
            .filter(address_condition(filter).add(ip_address::Column::SubnetId.is_not_null()))
            .group_by(ip_address::Column::SubnetId)
            .into_tuple::<(Option<i64>, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("count_addresses_per_subnet", e))?
            .into_iter()
            .filter_map(|(subnet_id, used)| subnet_id.map(|id| (id, used.max(0) as u64)))
            .collect();

        Ok(subnets
            .into_iter()
            .map(|s| {
                let used = counts.get(&s.id).copied().unwrap_or(0);
                let usable = usable_hosts(s.mask.clamp(0, 32) as u8);
                SubnetUtilization {
                    subnet_id: s.id,
                    network: s.network,
                    mask: s.mask,
                    description: s.description,
                    used,
                    usable_hosts: usable,
                    utilization: utilization_percent(used, usable),
                }
            })
            .collect())
    }

    /// Record counts per owner label, largest first, top ten
    ///
    /// Blank labels are bucketed under `unassigned`. Ties are ordered by label.
    pub async fn company_breakdown(&self, filter: &StatsFilter) -> Result<Vec<CompanyCount>, InternalError> {
        let rows = ip_address::Entity::find()
            .select_only()
            .column(ip_address::Column::OwnerLabel)
            .column_as(Expr::col(ip_address::Column::Id).count(), "total")
            .filter(address_condition(filter))
            .group_by(ip_address::Column::OwnerLabel)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("count_addresses_per_owner", e))?;

        let mut buckets: HashMap<String, u64> = HashMap::new();
        for (label, total) in rows {
            let label = match label.trim() {
                "" => UNASSIGNED_LABEL.to_string(),
                trimmed => trimmed.to_string(),
            };
            *buckets.entry(label).or_default() += total.max(0) as u64;
        }

        let mut companies: Vec<CompanyCount> = buckets
            .into_iter()
            .map(|(label, count)| CompanyCount { label, count })
            .collect();
        companies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        companies.truncate(TOP_COMPANIES);

        Ok(companies)
    }

    /// Records created per month over the trailing twelve months
    pub async fn monthly_trend(&self, filter: &StatsFilter) -> Result<Vec<MonthlyCount>, InternalError> {
        self.monthly_trend_at(filter, Utc::now()).await
    }

    /// Monthly trend relative to a fixed point in time
    ///
    /// Months are returned oldest first and months without records are
    /// reported with a zero count.
    pub async fn monthly_trend_at(
        &self,
        filter: &StatsFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<MonthlyCount>, InternalError> {
        let months = trailing_months(now.date_naive());
        let mut condition = address_condition(filter);
        if let Some(first) = months.first() {
            condition = condition.add(ip_address::Column::CreatedAt.gte(day_start(*first)));
        }

        let created: Vec<i64> = ip_address::Entity::find()
            .select_only()
            .column(ip_address::Column::CreatedAt)
            .filter(condition)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_address_creation_times", e))?;

        let mut trend: Vec<MonthlyCount> = months
            .iter()
            .map(|m| MonthlyCount {
                month: m.format("%Y-%m").to_string(),
                count: 0,
            })
            .collect();

        for ts in created {
            let Some(at) = DateTime::from_timestamp(ts, 0) else {
                continue;
            };
            let month = at.format("%Y-%m").to_string();
            if let Some(bucket) = trend.iter_mut().find(|b| b.month == month) {
                bucket.count += 1;
            }
        }

        Ok(trend)
    }
}

fn subnet_condition(filter: &StatsFilter) -> Condition {
    Condition::all().add_option(filter.subnet_id.map(|id| subnet::Column::Id.eq(id)))
}

/// Subnet and creation-date filter for address records
///
/// `date_to` covers the whole day, so the bound is the start of the next day.
fn address_condition(filter: &StatsFilter) -> Condition {
    Condition::all()
        .add_option(filter.subnet_id.map(|id| ip_address::Column::SubnetId.eq(id)))
        .add_option(filter.date_from.map(|d| ip_address::Column::CreatedAt.gte(day_start(d))))
        .add_option(
            filter.date_to
                .and_then(|d| d.succ_opt())
                .map(|next| ip_address::Column::CreatedAt.lt(day_start(next))),
        )
}

fn day_start(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// First day of each of the trailing months, oldest first
fn trailing_months(today: NaiveDate) -> Vec<NaiveDate> {
    let Some(current) = today.with_day(1) else {
        return Vec::new();
    };

    (0..TREND_MONTHS)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_months_cross_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let months: Vec<String> = trailing_months(today)
            .iter()
            .map(|m| m.format("%Y-%m").to_string())
            .collect();

        assert_eq!(months.len(), 12);
        assert_eq!(months.first().unwrap(), "2023-04");
        assert_eq!(months.last().unwrap(), "2024-03");
    }

    #[test]
    fn day_start_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(day_start(date), 1_704_153_600);
    }
}
