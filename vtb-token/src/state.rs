use concordium_std::*;
pub use vtb_utils::{
    error::{ContractError, ContractResult},
    types::*,
};

/// The ledger state
#[derive(Debug, Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Token balances per holder. Holders with no entry hold zero.
    pub(crate) balances: StateMap<Address, ContractTokenAmount, S>,
    /// Spending allowances, keyed by (owner, spender).
    pub(crate) allowances: StateMap<(Address, Address), ContractTokenAmount, S>,
    /// Fixed at genesis. The team release moves escrowed units into a
    /// balance, it does not inflate.
    pub(crate) total_supply: ContractTokenAmount,
    /// Account holding the foundation allotment.
    pub(crate) foundation_address: AccountAddress,
    /// Account the team allotment is released to once vesting elapses.
    pub(crate) team_address: AccountAddress,
    /// The only contract allowed to call `creditFromSale`.
    pub(crate) crowdfund: Option<ContractAddress>,
    /// Sale allotment escrowed until the crowdfund contract is registered.
    pub(crate) sale_reserve: ContractTokenAmount,
    /// Team allotment escrowed until the vesting gate opens.
    pub(crate) team_reserve: ContractTokenAmount,
    /// Earliest slot time at which the team allotment can be released.
    pub(crate) team_release_at: Timestamp,
    /// Set once `releaseVTBTeamTokens` succeeds.
    pub(crate) team_tokens_released: bool,
}

impl<S: HasStateApi> State<S> {
    pub(crate) fn new(
        state_builder: &mut StateBuilder<S>,
        foundation_address: AccountAddress,
        team_address: AccountAddress,
        foundation_supply: ContractTokenAmount,
        sale_supply: ContractTokenAmount,
        team_allotment: ContractTokenAmount,
        team_release_at: Timestamp,
    ) -> ContractResult<Self> {
        let total_supply = foundation_supply
            .checked_add(sale_supply)
            .and_then(|v| v.checked_add(team_allotment))
            .ok_or(ContractError::OverflowError)?;

        let mut balances = state_builder.new_map();
        balances.insert(Address::Account(foundation_address), foundation_supply);

        Ok(State {
            balances,
            allowances: state_builder.new_map(),
            total_supply,
            foundation_address,
            team_address,
            crowdfund: None,
            sale_reserve: sale_supply,
            team_reserve: team_allotment,
            team_release_at,
            team_tokens_released: false,
        })
    }

    pub(crate) fn balance_of(&self, address: &Address) -> ContractTokenAmount {
        self.balances.get(address).map(|v| *v).unwrap_or(0)
    }

    pub(crate) fn allowance_of(
        &self,
        owner: &Address,
        spender: &Address,
    ) -> ContractTokenAmount {
        self.allowances.get(&(*owner, *spender)).map(|v| *v).unwrap_or(0)
    }

    /// Debit `from` and credit `to`. Both balances mutate only when the
    /// precondition holds; a rejection leaves them untouched.
    pub(crate) fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: ContractTokenAmount,
    ) -> ContractResult<()> {
        let from_balance = self.balance_of(from);
        ensure!(from_balance >= amount, ContractError::InsufficientBalance);

        self.balances.insert(*from, from_balance - amount);
        // Read after the debit so a self-transfer nets to zero.
        let to_balance = self.balance_of(to);
        self.balances.insert(*to, to_balance + amount);
        Ok(())
    }

    /// Absolute set: the new allowance replaces whatever was there before.
    pub(crate) fn approve(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: ContractTokenAmount,
    ) {
        self.allowances.insert((*owner, *spender), amount);
    }

    /// Spend `spender`'s allowance on `from`'s balance. Allowance and
    /// balance are both checked before either mutates.
    pub(crate) fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: ContractTokenAmount,
    ) -> ContractResult<()> {
        let allowed = self.allowance_of(from, spender);
        ensure!(allowed >= amount, ContractError::InsufficientAllowance);
        let from_balance = self.balance_of(from);
        ensure!(from_balance >= amount, ContractError::InsufficientBalance);

        self.allowances.insert((*from, *spender), allowed - amount);
        self.transfer(from, to, amount)
    }

    /// Register the crowdfund contract and hand it the whole sale
    /// allotment as a spendable balance. One-time.
    pub(crate) fn register_crowdfund(
        &mut self,
        crowdfund: ContractAddress,
    ) -> ContractResult<()> {
        ensure!(self.crowdfund.is_none(), ContractError::AlreadySet);
        self.crowdfund = Some(crowdfund);

        let held = self.balance_of(&Address::Contract(crowdfund));
        self.balances
            .insert(Address::Contract(crowdfund), held + self.sale_reserve);
        self.sale_reserve = 0;
        Ok(())
    }

    /// Move purchased tokens from the crowdfund's balance to the buyer.
    /// The sole path by which sale tokens enter circulation.
    pub(crate) fn credit_from_sale(
        &mut self,
        buyer: &AccountAddress,
        amount: ContractTokenAmount,
    ) -> ContractResult<()> {
        let crowdfund = self.crowdfund.ok_or(ContractError::Unauthorized)?;
        self.transfer(
            &Address::Contract(crowdfund),
            &Address::Account(*buyer),
            amount,
        )
    }

    /// One-shot vesting release of the team allotment. Returns the
    /// released amount for the event log.
    pub(crate) fn release_team_tokens(
        &mut self,
        now: Timestamp,
    ) -> ContractResult<ContractTokenAmount> {
        ensure!(now >= self.team_release_at, ContractError::VestingNotElapsed);
        ensure!(!self.team_tokens_released, ContractError::AlreadyReleased);

        let amount = self.team_reserve;
        let team = Address::Account(self.team_address);
        let held = self.balance_of(&team);
        self.balances.insert(team, held + amount);
        self.team_reserve = 0;
        self.team_tokens_released = true;
        Ok(amount)
    }

    /// Every token unit the ledger knows about: circulating balances plus
    /// the two escrows. Always equals `total_supply`.
    #[cfg(any(feature = "wasm-test", test))]
    pub(crate) fn tracked_supply(&self) -> ContractTokenAmount {
        let held: ContractTokenAmount = self.balances.iter().map(|(_, v)| *v).sum();
        held + self.sale_reserve + self.team_reserve
    }
}

#[cfg(any(feature = "wasm-test", test))]
/// implements PartialEq for `claim_eq` inside test functions.
impl<S: HasStateApi> PartialEq for State<S> {
    fn eq(&self, other: &Self) -> bool {
        if self.total_supply != other.total_supply {
            return false;
        }
        if self.foundation_address != other.foundation_address {
            return false;
        }
        if self.team_address != other.team_address {
            return false;
        }
        if self.crowdfund != other.crowdfund {
            return false;
        }
        if self.sale_reserve != other.sale_reserve {
            return false;
        }
        if self.team_reserve != other.team_reserve {
            return false;
        }
        if self.team_release_at != other.team_release_at {
            return false;
        }
        if self.team_tokens_released != other.team_tokens_released {
            return false;
        }
        if self.balances.iter().count() != other.balances.iter().count() {
            return false;
        }
        for (address, amount) in self.balances.iter() {
            match other.balances.get(&address) {
                Some(other_amount) if *other_amount == *amount => (),
                _ => return false,
            }
        }
        if self.allowances.iter().count() != other.allowances.iter().count() {
            return false;
        }
        for (key, amount) in self.allowances.iter() {
            match other.allowances.get(&key) {
                Some(other_amount) if *other_amount == *amount => (),
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
    use vtb_utils::ONE_VTB;

    const FOUNDATION_ACC: AccountAddress = AccountAddress([1u8; 32]);
    const FOUNDATION_ADDR: Address = Address::Account(FOUNDATION_ACC);
    const TEAM_ACC: AccountAddress = AccountAddress([2u8; 32]);
    const HOLDER_ADDR: Address = Address::Account(AccountAddress([10u8; 32]));
    const SPENDER_ADDR: Address = Address::Account(AccountAddress([11u8; 32]));
    const DEST_ADDR: Address = Address::Account(AccountAddress([12u8; 32]));
    const CROWDFUND_CONTRACT: ContractAddress = ContractAddress {
        index: 10,
        subindex: 0,
    };

    fn test_state<S: HasStateApi>(state_builder: &mut StateBuilder<S>) -> State<S> {
        State::new(
            state_builder,
            FOUNDATION_ACC,
            TEAM_ACC,
            91 * ONE_VTB,
            117 * ONE_VTB,
            52 * ONE_VTB,
            Timestamp::from_timestamp_millis(1_000),
        )
        .unwrap_abort()
    }

    #[test]
    fn test_genesis_conservation() {
        let mut state_builder = TestStateBuilder::new();
        let state = test_state(&mut state_builder);

        assert_eq!(state.total_supply, 260 * ONE_VTB);
        assert_eq!(state.tracked_supply(), state.total_supply);
        assert_eq!(state.balance_of(&FOUNDATION_ADDR), 91 * ONE_VTB);
    }

    #[test]
    fn test_transfer_moves_balance() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = test_state(&mut state_builder);

        state.transfer(&FOUNDATION_ADDR, &HOLDER_ADDR, ONE_VTB).unwrap();
        assert_eq!(state.balance_of(&FOUNDATION_ADDR), 90 * ONE_VTB);
        assert_eq!(state.balance_of(&HOLDER_ADDR), ONE_VTB);
        assert_eq!(state.tracked_supply(), state.total_supply);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = test_state(&mut state_builder);

        let result = state.transfer(&HOLDER_ADDR, &DEST_ADDR, 1);
        assert_eq!(result, Err(ContractError::InsufficientBalance));
        assert_eq!(state.balance_of(&DEST_ADDR), 0);
        assert_eq!(state.tracked_supply(), state.total_supply);
    }

    #[test]
    fn test_self_transfer_nets_to_zero() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = test_state(&mut state_builder);

        state
            .transfer(&FOUNDATION_ADDR, &FOUNDATION_ADDR, 5 * ONE_VTB)
            .unwrap();
        assert_eq!(state.balance_of(&FOUNDATION_ADDR), 91 * ONE_VTB);
        assert_eq!(state.tracked_supply(), state.total_supply);
    }

    #[test]
    fn test_approve_is_absolute() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = test_state(&mut state_builder);

        state.approve(&HOLDER_ADDR, &SPENDER_ADDR, 300);
        assert_eq!(state.allowance_of(&HOLDER_ADDR, &SPENDER_ADDR), 300);

        // A later approve overwrites, it never accumulates.
        state.approve(&HOLDER_ADDR, &SPENDER_ADDR, 120);
        assert_eq!(state.allowance_of(&HOLDER_ADDR, &SPENDER_ADDR), 120);
    }

    #[test]
    fn test_transfer_from_checks_allowance_first() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = test_state(&mut state_builder);

        // Holder has nothing and spender has no allowance either; the
        // allowance precondition is the one reported.
        let result = state.transfer_from(&SPENDER_ADDR, &HOLDER_ADDR, &DEST_ADDR, 1);
        assert_eq!(result, Err(ContractError::InsufficientAllowance));
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = test_state(&mut state_builder);

        state.transfer(&FOUNDATION_ADDR, &HOLDER_ADDR, 300).unwrap();
        state.approve(&HOLDER_ADDR, &SPENDER_ADDR, 300);
        state
            .transfer_from(&SPENDER_ADDR, &HOLDER_ADDR, &DEST_ADDR, 300)
            .unwrap();

        assert_eq!(state.balance_of(&HOLDER_ADDR), 0);
        assert_eq!(state.balance_of(&DEST_ADDR), 300);
        assert_eq!(state.allowance_of(&HOLDER_ADDR, &SPENDER_ADDR), 0);
        assert_eq!(state.tracked_supply(), state.total_supply);
    }

    #[test]
    fn test_transfer_from_insufficient_balance_leaves_allowance() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = test_state(&mut state_builder);

        state.approve(&HOLDER_ADDR, &SPENDER_ADDR, 300);
        let result = state.transfer_from(&SPENDER_ADDR, &HOLDER_ADDR, &DEST_ADDR, 300);
        assert_eq!(result, Err(ContractError::InsufficientBalance));
        assert_eq!(state.allowance_of(&HOLDER_ADDR, &SPENDER_ADDR), 300);
    }

    #[test]
    fn test_register_crowdfund_moves_sale_reserve() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = test_state(&mut state_builder);

        state.register_crowdfund(CROWDFUND_CONTRACT).unwrap();
        assert_eq!(state.sale_reserve, 0);
        assert_eq!(
            state.balance_of(&Address::Contract(CROWDFUND_CONTRACT)),
            117 * ONE_VTB
        );
        assert_eq!(state.tracked_supply(), state.total_supply);

        let result = state.register_crowdfund(CROWDFUND_CONTRACT);
        assert_eq!(result, Err(ContractError::AlreadySet));
    }

    #[test]
    fn test_release_is_one_shot() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = test_state(&mut state_builder);

        let too_early = Timestamp::from_timestamp_millis(999);
        assert_eq!(
            state.release_team_tokens(too_early),
            Err(ContractError::VestingNotElapsed)
        );

        let due = Timestamp::from_timestamp_millis(1_000);
        assert_eq!(state.release_team_tokens(due), Ok(52 * ONE_VTB));
        assert_eq!(state.balance_of(&Address::Account(TEAM_ACC)), 52 * ONE_VTB);
        assert_eq!(state.team_reserve, 0);
        assert_eq!(state.tracked_supply(), state.total_supply);

        assert_eq!(
            state.release_team_tokens(due),
            Err(ContractError::AlreadyReleased)
        );
    }
}
