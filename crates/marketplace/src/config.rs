/// Default name of the account that holds characters while they are listed.
pub const DEFAULT_MASTER_ACCOUNT: &str = "MARKETPLACE_SYSTEM";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),
}

/// Marketplace tooling configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    /// Game server MySQL database.
    pub lineage_database_url: String,
    pub master_account: String,
}

impl MarketplaceConfig {
    /// | Env Var                      | Required | Default              |
    /// |------------------------------|----------|----------------------|
    /// | `LINEAGE_DATABASE_URL`       | **yes**  | --                   |
    /// | `MARKETPLACE_MASTER_ACCOUNT` | no       | `MARKETPLACE_SYSTEM` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            lineage_database_url: required("LINEAGE_DATABASE_URL")?,
            master_account: lookup("MARKETPLACE_MASTER_ACCOUNT")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_MASTER_ACCOUNT.to_string()),
        })
    }
}
