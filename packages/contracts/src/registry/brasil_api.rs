//! BrasilAPI implementation of the [`Registry`] trait.
//!
//! Looks up company identity, address and ownership by CNPJ. Unknown or
//! invalid ids come back as `Ok(None)`; only transport and server-side
//! failures surface as errors.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::{RegistryError, RegistryResult};
use crate::traits::{CompanyInfo, Registry};

const BRASIL_API_BASE_URL: &str = "https://brasilapi.com.br";

/// BrasilAPI CNPJ lookup client.
pub struct BrasilApi {
    client: Client,
    base_url: String,
}

impl BrasilApi {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: BRASIL_API_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (tests point this at a local server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for BrasilApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Registry for BrasilApi {
    async fn lookup(&self, tax_id: &str) -> RegistryResult<Option<CompanyInfo>> {
        let url = format!("{}/api/cnpj/v1/{}", self.base_url, tax_id);

        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RegistryError::Http(Box::new(e)))?;

        match res.status() {
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => return Ok(None),
            status if !status.is_success() => {
                let message = res.text().await.unwrap_or_default();
                return Err(RegistryError::Api {
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        let body: CnpjResponse = res
            .json()
            .await
            .map_err(|e| RegistryError::Http(Box::new(e)))?;

        Ok(Some(body.into_company_info()))
    }
}

#[derive(Debug, Deserialize)]
struct CnpjResponse {
    #[serde(default)]
    razao_social: Option<String>,
    #[serde(default)]
    cep: Option<String>,
    #[serde(default)]
    logradouro: Option<String>,
    #[serde(default)]
    numero: Option<String>,
    #[serde(default)]
    complemento: Option<String>,
    #[serde(default)]
    bairro: Option<String>,
    #[serde(default)]
    municipio: Option<String>,
    #[serde(default)]
    uf: Option<String>,
    #[serde(default)]
    qsa: Vec<CnpjPartner>,
}

#[derive(Debug, Deserialize)]
struct CnpjPartner {
    #[serde(default)]
    nome_socio: Option<String>,
}

impl CnpjResponse {
    fn into_company_info(self) -> CompanyInfo {
        CompanyInfo {
            legal_name: self.razao_social,
            postal_code: self.cep,
            street: self.logradouro,
            number: self.numero,
            complement: self.complemento,
            district: self.bairro,
            city: self.municipio,
            state_code: self.uf,
            partners: self.qsa.into_iter().filter_map(|p| p.nome_socio).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_mapping_keeps_partner_order() {
        let body = r#"{
            "razao_social": "ACME PRODUCOES LTDA",
            "cep": "57000-000",
            "logradouro": "RUA DO COMERCIO",
            "numero": "100",
            "complemento": "SALA 2",
            "bairro": "CENTRO",
            "municipio": "MACEIO",
            "uf": "AL",
            "qsa": [
                {"nome_socio": "MARIA SOUZA"},
                {"nome_socio": "JOSE SANTOS"}
            ]
        }"#;

        let response: CnpjResponse = serde_json::from_str(body).unwrap();
        let info = response.into_company_info();

        assert_eq!(info.legal_name.as_deref(), Some("ACME PRODUCOES LTDA"));
        assert_eq!(info.city.as_deref(), Some("MACEIO"));
        assert_eq!(info.first_partner(), Some("MARIA SOUZA"));
        assert_eq!(info.partners.len(), 2);
    }

    #[test]
    fn test_response_tolerates_sparse_payloads() {
        let response: CnpjResponse = serde_json::from_str(r#"{"razao_social": "X SA"}"#).unwrap();
        let info = response.into_company_info();
        assert_eq!(info.legal_name.as_deref(), Some("X SA"));
        assert!(info.partners.is_empty());
        assert_eq!(info.first_partner(), None);
    }
}
