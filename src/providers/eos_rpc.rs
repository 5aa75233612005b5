use crate::core::chain::{AccountResources, ChainApi, RamMarketTable};
use crate::core::error::FetchError;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

pub const DEFAULT_ENDPOINT: &str = "https://eos.api.eosnation.io";

#[derive(Serialize, Debug)]
struct GetAccountRequest<'a> {
    account_name: &'a str,
}

#[derive(Serialize, Debug)]
struct GetTableRowsRequest<'a> {
    scope: &'a str,
    code: &'a str,
    table: &'a str,
    json: bool,
}

const RAM_MARKET_QUERY: GetTableRowsRequest<'static> = GetTableRowsRequest {
    scope: "eosio",
    code: "eosio",
    table: "rammarket",
    json: true,
};

/// `ChainApi` backed by a nodeos `/v1/chain` HTTP endpoint.
pub struct EosRpcProvider {
    base_url: String,
    client: reqwest::Client,
}

impl EosRpcProvider {
    pub fn new(base_url: &str, user_agent: &str) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(EosRpcProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, FetchError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Requesting chain data from {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        serde_json::from_str(&text).map_err(|source| {
            error!(
                error = ?source,
                response = %text,
                "Failed to parse chain response"
            );
            FetchError::Decode { url, source }
        })
    }
}

#[async_trait]
impl ChainApi for EosRpcProvider {
    #[instrument(name = "GetAccount", skip(self), fields(account = %account_name))]
    async fn fetch_account(&self, account_name: &str) -> Result<AccountResources, FetchError> {
        let account: AccountResources = self
            .post("/v1/chain/get_account", &GetAccountRequest { account_name })
            .await?;
        debug!(?account, "Received account");
        Ok(account)
    }

    #[instrument(name = "GetRamMarket", skip(self))]
    async fn fetch_ram_market(&self) -> Result<RamMarketTable, FetchError> {
        let table: RamMarketTable = self
            .post("/v1/chain/get_table_rows", &RAM_MARKET_QUERY)
            .await?;
        debug!(rows = table.rows.len(), more = table.more, "Received rammarket");
        Ok(table)
    }
}
