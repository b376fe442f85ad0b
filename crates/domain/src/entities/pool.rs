use crate::enums::Dex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    pub id: Uuid,
    pub project_id: Uuid,
    pub address: String,
    pub dex: Dex,
    pub base_symbol: String,
    pub quote_symbol: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Pool {
    /// Display label used in reports and alert messages, e.g. `SOL/USDC (raydium)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{} ({})", self.base_symbol, self.quote_symbol, self.dex.as_str())
    }
}
