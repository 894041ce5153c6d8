use serde::{Deserialize, Serialize};

use crate::{
    codec::MAX_PREFIXED_LEN,
    data_structures::{AssetId, Fixed8, OutputReference, UnspentOutput},
    WalletError, WalletResult,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoSelection {
    pub asset: AssetId,
    pub utxos: Vec<UnspentOutput>,
    pub total_value: Fixed8,
    pub requested: Fixed8,
}

impl UtxoSelection {
    /// Marker for a transaction that spends nothing
    pub fn empty(asset: AssetId) -> Self {
        Self {
            asset,
            utxos: Vec::new(),
            total_value: Fixed8::zero(),
            requested: Fixed8::zero(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Selected total minus the requested amount
    pub fn change(&self) -> WalletResult<Fixed8> {
        let change = self.total_value.checked_sub(self.requested).ok_or_else(|| {
            WalletError::AmountOverflow(format!(
                "{} - {}",
                self.total_value, self.requested
            ))
        })?;
        if change.is_negative() {
            return Err(WalletError::NegativeChange {
                selected: self.total_value.to_string(),
                requested: self.requested.to_string(),
            });
        }
        Ok(change)
    }

    pub fn requires_change_output(&self) -> WalletResult<bool> {
        Ok(self.change()?.is_positive())
    }

    pub fn references(&self) -> Vec<OutputReference> {
        self.utxos.iter().map(UnspentOutput::reference).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSelector {
    max_inputs: usize,
}

impl Default for InputSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSelector {
    pub fn new() -> Self {
        Self {
            max_inputs: MAX_PREFIXED_LEN,
        }
    }

    /// Cap on the number of inputs, clamped to `1..=MAX_PREFIXED_LEN`
    pub fn with_max_inputs(mut self, max_inputs: usize) -> Self {
        self.max_inputs = max_inputs.clamp(1, MAX_PREFIXED_LEN);
        self
    }

    pub fn max_inputs(&self) -> usize {
        self.max_inputs
    }

    /// Smallest-first selection until the running total covers `amount`
    pub fn select(
        &self,
        asset: AssetId,
        unspent: &[UnspentOutput],
        amount: Fixed8,
    ) -> WalletResult<UtxoSelection> {
        if amount.is_negative() {
            return Err(WalletError::InvalidAmount(format!(
                "requested amount {amount} is negative"
            )));
        }
        if amount.is_zero() {
            tracing::debug!(asset = %asset, "Zero amount requested, skipping input selection");
            return Ok(UtxoSelection::empty(asset));
        }

        if let Some(bad) = unspent.iter().find(|u| !u.value.is_positive()) {
            return Err(WalletError::InvalidAmount(format!(
                "unspent output {}:{} has non-positive value {}",
                bad.txid, bad.index, bad.value
            )));
        }

        let available = Fixed8::checked_sum(unspent.iter().map(|u| &u.value))?;
        if available < amount {
            return Err(WalletError::InsufficientBalance {
                available: available.to_string(),
                required: amount.to_string(),
            });
        }

        let mut uo = unspent.to_vec();
        // Stable sort keeps the caller's order among equal values
        uo.sort_by(|a, b| a.value.cmp(&b.value));

        let mut utxos = Vec::new();
        let mut total_value = Fixed8::zero();
        for o in uo {
            total_value = total_value
                .checked_add(o.value)
                .ok_or_else(|| WalletError::AmountOverflow(format!("{total_value} + {}", o.value)))?;
            utxos.push(o);
            if total_value >= amount {
                break;
            }
        }

        if utxos.len() > self.max_inputs {
            return Err(WalletError::EncodingError(format!(
                "{} inputs needed to cover {amount}, at most {} allowed",
                utxos.len(),
                self.max_inputs
            )));
        }

        tracing::debug!(
            asset = %asset,
            inputs = utxos.len(),
            total = %total_value,
            requested = %amount,
            "Selected inputs"
        );

        Ok(UtxoSelection {
            asset,
            utxos,
            total_value,
            requested: amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::UInt256;

    fn utxo(n: u8, units: i64) -> UnspentOutput {
        UnspentOutput::new(
            UInt256::from_wire_bytes([n; 32]),
            n as u16,
            Fixed8::from_units(units).unwrap(),
        )
    }

    fn units(n: i64) -> Fixed8 {
        Fixed8::from_units(n).unwrap()
    }

    #[test]
    fn test_exact_match_needs_no_change() {
        let unspent = vec![utxo(5, 5), utxo(1, 1), utxo(2, 2)];
        let selection = InputSelector::new()
            .select(AssetId::Neo, &unspent, units(3))
            .unwrap();
        assert_eq!(selection.utxos, vec![utxo(1, 1), utxo(2, 2)]);
        assert_eq!(selection.total_value, units(3));
        assert!(!selection.requires_change_output().unwrap());
    }

    #[test]
    fn test_change_when_overshooting() {
        let unspent = vec![utxo(1, 1), utxo(2, 2), utxo(5, 5)];
        let selection = InputSelector::new()
            .select(AssetId::Neo, &unspent, units(4))
            .unwrap();
        assert_eq!(selection.utxos.len(), 3);
        assert_eq!(selection.change().unwrap(), units(4));
        assert!(selection.requires_change_output().unwrap());
    }

    #[test]
    fn test_whole_balance() {
        let unspent = vec![utxo(1, 1), utxo(2, 2), utxo(5, 5)];
        let selection = InputSelector::new()
            .select(AssetId::Neo, &unspent, units(8))
            .unwrap();
        assert_eq!(selection.utxos.len(), 3);
        assert_eq!(selection.change().unwrap(), Fixed8::zero());
    }

    #[test]
    fn test_insufficient_balance() {
        let unspent = vec![utxo(1, 1), utxo(2, 2), utxo(5, 5)];
        let err = InputSelector::new()
            .select(AssetId::Neo, &unspent, Fixed8::from_raw(800_000_001))
            .unwrap_err();
        assert_eq!(
            err,
            WalletError::InsufficientBalance {
                available: "8".to_string(),
                required: "8.00000001".to_string(),
            }
        );
    }

    #[test]
    fn test_zero_amount_is_empty_marker() {
        let selection = InputSelector::new()
            .select(AssetId::Gas, &[utxo(1, 1)], Fixed8::zero())
            .unwrap();
        assert!(selection.is_empty());
        assert_eq!(selection, UtxoSelection::empty(AssetId::Gas));
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(matches!(
            InputSelector::new().select(AssetId::Gas, &[utxo(1, 1)], Fixed8::from_raw(-1)),
            Err(WalletError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_non_positive_unspent_rejected() {
        let mut unspent = vec![utxo(2, 2)];
        unspent.push(UnspentOutput::new(UInt256::from_wire_bytes([1; 32]), 0, Fixed8::from_raw(-1)));
        assert!(matches!(
            InputSelector::new().select(AssetId::Gas, &unspent, units(1)),
            Err(WalletError::InvalidAmount(_))
        ));

        unspent[1].value = Fixed8::zero();
        assert!(matches!(
            InputSelector::new().select(AssetId::Gas, &unspent, units(1)),
            Err(WalletError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let unspent = vec![utxo(9, 1), utxo(3, 1), utxo(7, 1)];
        let selection = InputSelector::new()
            .select(AssetId::Neo, &unspent, units(2))
            .unwrap();
        assert_eq!(selection.utxos, vec![utxo(9, 1), utxo(3, 1)]);
    }

    #[test]
    fn test_input_cap() {
        let unspent: Vec<_> = (0..4).map(|n| utxo(n, 1)).collect();
        let selector = InputSelector::new().with_max_inputs(3);
        assert!(matches!(
            selector.select(AssetId::Neo, &unspent, units(4)),
            Err(WalletError::EncodingError(_))
        ));
        assert_eq!(
            selector.select(AssetId::Neo, &unspent, units(3)).unwrap().utxos.len(),
            3
        );
    }

    #[test]
    fn test_cap_is_clamped() {
        assert_eq!(InputSelector::new().with_max_inputs(0).max_inputs(), 1);
        assert_eq!(InputSelector::new().with_max_inputs(1000).max_inputs(), 252);
    }

    #[test]
    fn test_negative_change_detected() {
        let selection = UtxoSelection {
            asset: AssetId::Gas,
            utxos: vec![utxo(1, 1)],
            total_value: units(1),
            requested: units(2),
        };
        assert!(matches!(
            selection.change(),
            Err(WalletError::NegativeChange { .. })
        ));
    }
}
