use serde::Deserialize;

/// Directory module configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Page size applied when a listing does not ask for one.
    pub default_page_size: u64,
    /// Upper bound any caller-supplied page size is clamped to.
    pub max_page_size: u64,
    /// Longest accepted organization name, in bytes.
    pub max_name_length: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            max_page_size: 500,
            max_name_length: 120,
        }
    }
}
