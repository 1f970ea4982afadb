//! Registry trait for the business-registry lookup.

use async_trait::async_trait;

use crate::error::RegistryResult;

/// Identity and address data held by the public registry for one company.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyInfo {
    /// Registered legal name.
    pub legal_name: Option<String>,
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    /// Listed owners/partners, in registry order.
    pub partners: Vec<String>,
}

impl CompanyInfo {
    /// First listed partner, used to backfill a missing responsible name.
    pub fn first_partner(&self) -> Option<&str> {
        self.partners.first().map(String::as_str)
    }
}

/// Looks up supplemental company data by tax id.
///
/// Callers pass a digits-only 14-digit id; shorter ids never reach the
/// registry (the sanitize stage gates on length). `Ok(None)` means the id
/// is unknown or invalid; transport failures are errors the caller logs
/// and treats as "no data".
#[async_trait]
pub trait Registry: Send + Sync {
    async fn lookup(&self, tax_id: &str) -> RegistryResult<Option<CompanyInfo>>;
}
