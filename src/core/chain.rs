//! Chain state snapshots and the API abstraction used to fetch them

use crate::core::error::FetchError;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

/// Response of `get_table_rows` for the `eosio`/`eosio`/`rammarket` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamMarketTable {
    pub rows: Vec<RamMarketRow>,
    // Pagination is not followed, the RAM market is a single row
    #[serde(default)]
    pub more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamMarketRow {
    pub supply: Option<String>,
    pub base: Connector,
    pub quote: Connector,
}

/// One side of the Bancor market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    pub balance: String,
    pub weight: Option<String>,
}

/// Subset of a `get_account` response needed to price CPU and NET.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResources {
    pub account_name: String,
    pub total_resources: Option<TotalResources>,
    pub cpu_limit: Option<ResourceLimit>,
    pub net_limit: Option<ResourceLimit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalResources {
    pub cpu_weight: String,
    pub net_weight: String,
    pub ram_bytes: Option<i64>,
}

/// Usage window for CPU (microseconds) or NET (bytes). `-1` means unlimited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLimit {
    #[serde(default, deserialize_with = "int_or_string")]
    pub used: i64,
    #[serde(default, deserialize_with = "int_or_string")]
    pub available: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub max: i64,
}

// nodeos 2.x+ may render 64-bit integers as strings
fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(v) => Ok(v),
        IntOrString::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[async_trait]
pub trait ChainApi: Send + Sync {
    async fn fetch_account(&self, account_name: &str) -> Result<AccountResources, FetchError>;
    async fn fetch_ram_market(&self) -> Result<RamMarketTable, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_market_deserialization() {
        let json = r#"{
            "rows": [{
                "supply": "10000000000.0000 RAMCORE",
                "base": { "balance": "29576462570 RAM", "weight": "0.50000000000000000" },
                "quote": { "balance": "2323462.3453 EOS", "weight": "0.50000000000000000" }
            }],
            "more": false,
            "next_key": ""
        }"#;

        let table: RamMarketTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert!(!table.more);
        assert_eq!(table.rows[0].base.balance, "29576462570 RAM");
        assert_eq!(table.rows[0].quote.balance, "2323462.3453 EOS");
        assert_eq!(
            table.rows[0].supply.as_deref(),
            Some("10000000000.0000 RAMCORE")
        );
    }

    #[test]
    fn test_account_limits_accept_numbers_and_strings() {
        let json = r#"{
            "account_name": "someaccount1",
            "total_resources": {
                "owner": "someaccount1",
                "net_weight": "10.0000 EOS",
                "cpu_weight": "100.0000 EOS",
                "ram_bytes": 8150
            },
            "cpu_limit": { "used": 120, "available": "2641380", "max": "2641500" },
            "net_limit": { "used": "0", "available": 6219520, "max": 6219520 }
        }"#;

        let account: AccountResources = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_name, "someaccount1");
        assert_eq!(account.cpu_limit.as_ref().unwrap().max, 2_641_500);
        assert_eq!(account.cpu_limit.as_ref().unwrap().available, 2_641_380);
        assert_eq!(account.net_limit.as_ref().unwrap().max, 6_219_520);
        assert_eq!(account.total_resources.unwrap().ram_bytes, Some(8150));
    }

    #[test]
    fn test_account_without_resources() {
        let json = r#"{ "account_name": "eosio.null" }"#;
        let account: AccountResources = serde_json::from_str(json).unwrap();
        assert!(account.total_resources.is_none());
        assert!(account.cpu_limit.is_none());
        assert!(account.net_limit.is_none());
    }

    #[test]
    fn test_rejects_non_numeric_limit() {
        let json = r#"{ "used": 0, "available": 0, "max": "lots" }"#;
        assert!(serde_json::from_str::<ResourceLimit>(json).is_err());
    }
}
