//! NEP-9 payment request URIs
//!
//! `neo:<address>?asset=<neo|gas|asset id|token hash>&amount=<decimal>`.
//! Unknown query keys are ignored; a string without the `neo:` scheme is
//! treated as a bare address.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    data_structures::{AssetId, Fixed8, UInt160, UInt256},
    hex_utils::strip_hex_prefix,
    key_management::AddressCodec,
    WalletError, WalletResult,
};

const SCHEME: &str = "neo:";

/// Asset named by a payment request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RequestedAsset {
    Native(AssetId),
    Token(UInt160),
}

impl FromStr for RequestedAsset {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = strip_hex_prefix(s.trim());
        match trimmed.len() {
            len if len == UInt160::LEN * 2 => Ok(RequestedAsset::Token(trimmed.parse()?)),
            len if len == UInt256::LEN * 2 => {
                Ok(RequestedAsset::Native(AssetId::from_hash(trimmed.parse()?)))
            }
            _ => match trimmed.to_lowercase().as_str() {
                "neo" => Ok(RequestedAsset::Native(AssetId::Neo)),
                "gas" => Ok(RequestedAsset::Native(AssetId::Gas)),
                _ => Err(WalletError::DecodingError(format!("unknown asset '{s}'"))),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub address: String,
    pub asset: Option<RequestedAsset>,
    pub amount: Option<Fixed8>,
}

impl PaymentRequest {
    /// Parse a URI (or bare address) and check the address with `codec`
    pub fn parse(uri: &str, codec: &dyn AddressCodec) -> WalletResult<Self> {
        let uri = uri.trim();
        let body = match uri.get(..SCHEME.len()) {
            Some(scheme) if scheme.eq_ignore_ascii_case(SCHEME) => &uri[SCHEME.len()..],
            _ => uri,
        };
        let (address, query) = body.split_once('?').unwrap_or((body, ""));

        codec.decode_address(address)?;

        let mut request = PaymentRequest {
            address: address.to_string(),
            asset: None,
            amount: None,
        };
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "asset" if !value.is_empty() => request.asset = Some(value.parse()?),
                "amount" if !value.is_empty() => request.amount = Some(value.parse()?),
                _ => {}
            }
        }
        Ok(request)
    }

    pub fn to_uri(&self) -> String {
        let mut params = Vec::new();
        match self.asset {
            Some(RequestedAsset::Native(AssetId::Neo)) => params.push("asset=neo".to_string()),
            Some(RequestedAsset::Native(AssetId::Gas)) => params.push("asset=gas".to_string()),
            Some(RequestedAsset::Native(other)) => params.push(format!("asset={other}")),
            Some(RequestedAsset::Token(hash)) => params.push(format!("asset={hash}")),
            None => {}
        }
        if let Some(amount) = self.amount {
            params.push(format!("amount={amount}"));
        }
        if params.is_empty() {
            format!("{SCHEME}{}", self.address)
        } else {
            format!("{SCHEME}{}?{}", self.address, params.join("&"))
        }
    }
}
