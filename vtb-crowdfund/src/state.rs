use concordium_std::*;
pub use vtb_utils::{
    error::{ContractError, ContractResult},
    types::*,
};
use vtb_utils::{MICRO_CCD_PER_CCD, ONE_VTB};

/// Funds taken in from a single buyer, accumulated over all their buys.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseState {
    /// Total CCD the buyer has paid in.
    pub value: Amount,
    /// Token units credited for those payments.
    pub tokens: ContractTokenAmount,
}

/// The sale state
#[derive(Debug, Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// The ledger contract that credits purchased tokens.
    pub(crate) token: ContractAddress,
    /// Account every payment is forwarded to in full.
    pub(crate) wallet: AccountAddress,
    /// Whole VTB granted per 1 CCD paid.
    pub(crate) rate: TokensPerCcd,
    /// Buys are rejected until the controller opens the sale.
    pub(crate) is_open: bool,
    /// Emergency stop for `buy` only; views stay available.
    pub(crate) paused: bool,
    /// Per-buyer running totals.
    pub(crate) purchases: StateMap<AccountAddress, PurchaseState, S>,
}

impl<S: HasStateApi> State<S> {
    pub(crate) fn new(
        state_builder: &mut StateBuilder<S>,
        token: ContractAddress,
        wallet: AccountAddress,
        rate: TokensPerCcd,
    ) -> Self {
        State {
            token,
            wallet,
            rate,
            is_open: false,
            paused: false,
            purchases: state_builder.new_map(),
        }
    }

    /// Token units for a payment: micro CCD times the rate, scaled from 6
    /// to 18 decimal places.
    pub(crate) fn tokens_for(&self, value: Amount) -> ContractResult<ContractTokenAmount> {
        let scale = ONE_VTB / ContractTokenAmount::from(MICRO_CCD_PER_CCD);
        ContractTokenAmount::from(value.micro_ccd)
            .checked_mul(ContractTokenAmount::from(self.rate))
            .and_then(|v| v.checked_mul(scale))
            .ok_or(ContractError::OverflowError)
    }

    pub(crate) fn record_purchase(
        &mut self,
        buyer: &AccountAddress,
        value: Amount,
        tokens: ContractTokenAmount,
    ) -> ContractResult<()> {
        let prev = self.purchases.get(buyer).map(|p| *p).unwrap_or(PurchaseState {
            value: Amount::zero(),
            tokens: 0,
        });
        let total_value = prev
            .value
            .micro_ccd
            .checked_add(value.micro_ccd)
            .ok_or(ContractError::OverflowError)?;
        let total_tokens = prev
            .tokens
            .checked_add(tokens)
            .ok_or(ContractError::OverflowError)?;

        self.purchases.insert(
            *buyer,
            PurchaseState {
                value: Amount::from_micro_ccd(total_value),
                tokens: total_tokens,
            },
        );
        Ok(())
    }

    pub(crate) fn purchase_of(&self, buyer: &AccountAddress) -> Option<PurchaseState> {
        self.purchases.get(buyer).map(|p| *p)
    }

    /// Micro CCD taken in over the whole sale so far.
    #[cfg(any(feature = "wasm-test", test))]
    pub(crate) fn total_raised(&self) -> MicroCcd {
        self.purchases.iter().map(|(_, p)| p.value.micro_ccd).sum()
    }

    /// Token units sold over the whole sale so far.
    #[cfg(any(feature = "wasm-test", test))]
    pub(crate) fn total_sold(&self) -> ContractTokenAmount {
        self.purchases.iter().map(|(_, p)| p.tokens).sum()
    }
}

#[cfg(any(feature = "wasm-test", test))]
/// implements PartialEq for `claim_eq` inside test functions.
impl<S: HasStateApi> PartialEq for State<S> {
    fn eq(&self, other: &Self) -> bool {
        if self.token != other.token {
            return false;
        }
        if self.wallet != other.wallet {
            return false;
        }
        if self.rate != other.rate {
            return false;
        }
        if self.is_open != other.is_open {
            return false;
        }
        if self.paused != other.paused {
            return false;
        }
        if self.purchases.iter().count() != other.purchases.iter().count() {
            return false;
        }
        for (buyer, purchase) in self.purchases.iter() {
            match other.purchases.get(&buyer) {
                Some(other_purchase) if *other_purchase == *purchase => (),
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_infrastructure::*;

    const TOKEN_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const WALLET_ACC: AccountAddress = AccountAddress([5u8; 32]);
    const BUYER_ACC: AccountAddress = AccountAddress([10u8; 32]);

    fn test_state<S: HasStateApi>(state_builder: &mut StateBuilder<S>) -> State<S> {
        State::new(state_builder, TOKEN_CONTRACT, WALLET_ACC, 2100)
    }

    #[test]
    fn test_tokens_for_whole_ccd() {
        let mut state_builder = TestStateBuilder::new();
        let state = test_state(&mut state_builder);

        let tokens = state.tokens_for(Amount::from_ccd(1)).unwrap();
        assert_eq!(tokens, 2100 * ONE_VTB);
    }

    #[test]
    fn test_tokens_for_fractional_ccd() {
        let mut state_builder = TestStateBuilder::new();
        let state = test_state(&mut state_builder);

        // 0.5 CCD at 2100 per CCD is 1050 whole tokens.
        let tokens = state.tokens_for(Amount::from_micro_ccd(500_000)).unwrap();
        assert_eq!(tokens, 1050 * ONE_VTB);

        // One micro CCD still resolves to a nonzero token amount.
        let tokens = state.tokens_for(Amount::from_micro_ccd(1)).unwrap();
        assert_eq!(tokens, 2100 * 1_000_000_000_000);
    }

    #[test]
    fn test_tokens_for_overflow() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = test_state(&mut state_builder);
        state.rate = u64::MAX;

        let result = state.tokens_for(Amount::from_micro_ccd(u64::MAX));
        assert_eq!(result, Err(ContractError::OverflowError));
    }

    #[test]
    fn test_record_purchase_accumulates() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = test_state(&mut state_builder);

        state
            .record_purchase(&BUYER_ACC, Amount::from_ccd(1), 2100 * ONE_VTB)
            .unwrap();
        state
            .record_purchase(&BUYER_ACC, Amount::from_ccd(2), 4200 * ONE_VTB)
            .unwrap();

        let purchase = state.purchase_of(&BUYER_ACC).unwrap();
        assert_eq!(purchase.value, Amount::from_ccd(3));
        assert_eq!(purchase.tokens, 6300 * ONE_VTB);
        assert_eq!(state.total_raised(), 3_000_000);
        assert_eq!(state.total_sold(), 6300 * ONE_VTB);
    }

    #[test]
    fn test_record_purchase_value_overflow() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = test_state(&mut state_builder);

        state
            .record_purchase(&BUYER_ACC, Amount::from_micro_ccd(u64::MAX), 1)
            .unwrap();
        let result = state.record_purchase(&BUYER_ACC, Amount::from_micro_ccd(1), 1);
        assert_eq!(result, Err(ContractError::OverflowError));

        // The failed buy left the running totals untouched.
        let purchase = state.purchase_of(&BUYER_ACC).unwrap();
        assert_eq!(purchase.value, Amount::from_micro_ccd(u64::MAX));
        assert_eq!(purchase.tokens, 1);
    }
}
