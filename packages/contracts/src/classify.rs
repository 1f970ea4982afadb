//! Client classification and event pricing.
//!
//! All classification inputs live in one immutable [`ClassificationPolicy`]
//! constructed at process start and passed by reference into the importer.
//! The functions here are pure; they run only when a *new* client is being
//! created — existing clients keep their stored category.

use std::collections::HashSet;

use crate::types::{ClientCategory, NO_DISCOUNT_KIND};

/// Tax ids of known concessionaires operating inside the center.
const CONCESSIONAIRE_TAX_IDS: &[&str] = &[
    "01703922000128",
    "03370669000163",
    "04007216000130",
    "05314972000174",
    "05301393000197",
    "06935095000111",
    "08911934000197",
    "09584747000109",
    "10771790000162",
    "10882812000161",
    "12439637000168",
    "12257462000178",
    "13055903000111",
    "14876384000115",
    "16918665000119",
    "21950824000100",
    "22080376000196",
    "28207096000182",
    "29500928000117",
    "30441031000220",
    "31639572000149",
    "32860087000163",
    "37432689000133",
    "40411089000101",
    "43150497000137",
    "46731465000113",
];

/// Name fragments identifying government and public-institution clients.
/// Matched case-insensitively as substrings of the legal name.
const GOVERNMENT_KEYWORDS: &[&str] = &[
    "UNIVERSIDADE FEDERAL",
    "UFAL",
    "IFAL",
    "SECRETARIA DE ESTADO",
    "SESAU",
    "SENAI",
    "SEBRAE",
    "SENAC",
    "SESI",
    "FEPESA",
    "FUNDEPES",
    "OAB",
    "CRA/AL",
    "ASSEMBLEIA LEGISLATIVA",
];

const GOVERNMENT_DISCOUNT_RATE: f64 = 0.20;
const CONCESSIONAIRE_DISCOUNT_RATE: f64 = 0.60;

/// Immutable classification policy: membership lists and the discount rate
/// per category.
#[derive(Debug, Clone)]
pub struct ClassificationPolicy {
    concessionaire_tax_ids: HashSet<String>,
    government_keywords: Vec<String>,
    government_rate: f64,
    concessionaire_rate: f64,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self::new(
            CONCESSIONAIRE_TAX_IDS.iter().map(|s| s.to_string()),
            GOVERNMENT_KEYWORDS.iter().map(|s| s.to_string()),
        )
    }
}

impl ClassificationPolicy {
    /// Build a policy from explicit lists (tests use small ones).
    pub fn new(
        concessionaire_tax_ids: impl IntoIterator<Item = String>,
        government_keywords: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            concessionaire_tax_ids: concessionaire_tax_ids.into_iter().collect(),
            government_keywords: government_keywords
                .into_iter()
                .map(|k| k.to_uppercase())
                .collect(),
            government_rate: GOVERNMENT_DISCOUNT_RATE,
            concessionaire_rate: CONCESSIONAIRE_DISCOUNT_RATE,
        }
    }

    /// Derive the category for a new client.
    ///
    /// The allow-list wins over keywords; `tax_id` must already be in
    /// digits-only form.
    pub fn classify(&self, tax_id: &str, legal_name: Option<&str>) -> ClientCategory {
        if self.concessionaire_tax_ids.contains(tax_id) {
            return ClientCategory::Concessionaire;
        }

        if let Some(name) = legal_name {
            let upper = name.to_uppercase();
            if self
                .government_keywords
                .iter()
                .any(|keyword| upper.contains(keyword))
            {
                return ClientCategory::Government;
            }
        }

        ClientCategory::General
    }

    /// Discount rate applied to a category's events.
    pub fn discount_rate(&self, category: ClientCategory) -> f64 {
        match category {
            ClientCategory::Government => self.government_rate,
            ClientCategory::Concessionaire => self.concessionaire_rate,
            ClientCategory::General => 0.0,
        }
    }

    /// Discount kind label stored on events: the category name when a
    /// discount applied, "None" otherwise.
    pub fn discount_kind(&self, category: ClientCategory) -> &'static str {
        if self.discount_rate(category) > 0.0 {
            category.as_str()
        } else {
            NO_DISCOUNT_KIND
        }
    }
}

/// Gross value backed out from a discounted net value.
///
/// The stored net value is the amount after discount, so the pre-discount
/// value is `net / (1 - rate)`. A net of zero (free or unknown-priced
/// event) stays zero without touching the denominator.
pub fn gross_value(net_value: f64, rate: f64) -> f64 {
    if net_value <= 0.0 {
        return 0.0;
    }
    let gross = if rate > 0.0 {
        net_value / (1.0 - rate)
    } else {
        net_value
    };
    round2(gross)
}

/// Short organization names often are the responsible person's own name.
/// Use the legal name as the responsible name when it reads like one
/// (2 to 4 whitespace-delimited tokens).
pub fn responsible_name_from_legal_name(legal_name: &str) -> Option<&str> {
    let tokens = legal_name.split_whitespace().count();
    if (2..=4).contains(&tokens) {
        Some(legal_name)
    } else {
        None
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
