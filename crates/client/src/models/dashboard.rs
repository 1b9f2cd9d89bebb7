use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::transaction::Transaction;

/// Aggregate counters for the admin dashboard.
///
/// Counters the backend adds later stay reachable through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    #[serde(alias = "totalEvents")]
    pub total_events: u64,
    #[serde(alias = "totalUsers")]
    pub total_users: u64,
    #[serde(alias = "totalCategories")]
    pub total_categories: u64,
    #[serde(alias = "totalTickets")]
    pub total_tickets: u64,
    #[serde(alias = "totalRevenue")]
    pub total_revenue: f64,
    #[serde(alias = "unreadMessages")]
    pub unread_messages: u64,
    #[serde(alias = "recentTransactions")]
    pub recent_transactions: Vec<Transaction>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_counters_land_in_extra() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"totalEvents":4,"total_users":9,"total_revenue":120.5,"upcoming_events":2}"#,
        )
        .unwrap();
        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.total_users, 9);
        assert_eq!(stats.total_tickets, 0);
        assert_eq!(stats.extra.get("upcoming_events"), Some(&Value::from(2)));
    }
}
