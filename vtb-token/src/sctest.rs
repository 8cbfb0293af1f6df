use crate::{test_infrastructure::*, *};
use vtb_utils::ONE_VTB;

pub(crate) const CONTROLLER_ACC: AccountAddress = AccountAddress([0u8; 32]);
pub(crate) const FOUNDATION_ACC: AccountAddress = AccountAddress([1u8; 32]);
pub(crate) const FOUNDATION_ADDR: Address = Address::Account(FOUNDATION_ACC);
pub(crate) const TEAM_ACC: AccountAddress = AccountAddress([2u8; 32]);
pub(crate) const SOME_RANDOM_GUY: AccountAddress = AccountAddress([9u8; 32]);
pub(crate) const INVESTOR1_ACC: AccountAddress = AccountAddress([10u8; 32]);
pub(crate) const INVESTOR1_ADDR: Address = Address::Account(INVESTOR1_ACC);
pub(crate) const INVESTOR2_ACC: AccountAddress = AccountAddress([11u8; 32]);
pub(crate) const INVESTOR2_ADDR: Address = Address::Account(INVESTOR2_ACC);
pub(crate) const INVESTOR3_ACC: AccountAddress = AccountAddress([12u8; 32]);
pub(crate) const INVESTOR3_ADDR: Address = Address::Account(INVESTOR3_ACC);
pub(crate) const CROWDFUND_CONTRACT: ContractAddress = ContractAddress {
    index: 10,
    subindex: 0,
};
pub(crate) const CROWDFUND_ADDR: Address = Address::Contract(CROWDFUND_CONTRACT);

/// Genesis figures of the observed deployment.
pub(crate) const SALE_SUPPLY: ContractTokenAmount = 117_000_000 * ONE_VTB;
pub(crate) const FOUNDATION_SUPPLY: ContractTokenAmount = 91_000_000 * ONE_VTB;
pub(crate) const TEAM_ALLOTMENT: ContractTokenAmount = 52_000_000 * ONE_VTB;
pub(crate) const TOTAL_SUPPLY: ContractTokenAmount = 260_000_000 * ONE_VTB;

pub(crate) fn genesis() -> Timestamp {
    Timestamp::from_timestamp_millis(1_000)
}

pub(crate) fn release_time() -> Timestamp {
    genesis().checked_add(Duration::from_days(366)).unwrap_abort()
}

pub(crate) fn vtb(n: u64) -> ContractTokenAmount {
    ContractTokenAmount::from(n) * ONE_VTB
}

pub(crate) fn init_parameter() -> InitParams {
    InitParams {
        foundation_address: FOUNDATION_ACC,
        team_address: TEAM_ACC,
        foundation_supply: FOUNDATION_SUPPLY,
        sale_supply: SALE_SUPPLY,
        team_allotment: TEAM_ALLOTMENT,
        team_vesting: Duration::from_days(366),
    }
}

pub(crate) fn initial_state<S: HasStateApi>(state_builder: &mut StateBuilder<S>) -> State<S> {
    let params = init_parameter();
    State::new(
        state_builder,
        params.foundation_address,
        params.team_address,
        params.foundation_supply,
        params.sale_supply,
        params.team_allotment,
        release_time(),
    )
    .unwrap_abort()
}

/// State as it looks after deployment scripting has registered the
/// crowdfund contract.
pub(crate) fn registered_state<S: HasStateApi>(state_builder: &mut StateBuilder<S>) -> State<S> {
    let mut state = initial_state(state_builder);
    state.register_crowdfund(CROWDFUND_CONTRACT).unwrap_abort();
    state
}

pub(crate) fn receive_ctx(
    sender: Address,
    slot_time: Timestamp,
) -> TestReceiveContext<'static> {
    let mut ctx = TestReceiveContext::empty();
    ctx.set_self_address(ContractAddress::new(0, 0));
    ctx.set_owner(CONTROLLER_ACC);
    ctx.set_sender(sender);
    ctx.set_metadata_slot_time(slot_time);
    ctx
}

mod admin;
mod crowdfund;
mod holder;
mod workflow;
