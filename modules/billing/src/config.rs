use serde::Deserialize;

/// Billing module configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BillingConfig {
    /// Page size applied when a listing does not ask for one.
    pub default_page_size: u64,
    /// Upper bound any caller-supplied page size is clamped to.
    pub max_page_size: u64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            max_page_size: 500,
        }
    }
}
