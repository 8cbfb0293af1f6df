use crate::{test_infrastructure::*, *};

pub(crate) const CONTROLLER_ACC: AccountAddress = AccountAddress([0u8; 32]);
pub(crate) const WALLET_ACC: AccountAddress = AccountAddress([5u8; 32]);
pub(crate) const SOME_RANDOM_GUY: AccountAddress = AccountAddress([9u8; 32]);
pub(crate) const BUYER1_ACC: AccountAddress = AccountAddress([10u8; 32]);
pub(crate) const BUYER2_ACC: AccountAddress = AccountAddress([11u8; 32]);
pub(crate) const TOKEN_CONTRACT: ContractAddress = ContractAddress {
    index: 1,
    subindex: 0,
};
pub(crate) const SELF_CONTRACT: ContractAddress = ContractAddress {
    index: 2,
    subindex: 0,
};

pub(crate) const RATE: TokensPerCcd = 2100;

pub(crate) fn sale_start() -> Timestamp {
    Timestamp::from_timestamp_millis(1_000)
}

pub(crate) fn init_parameter() -> InitParams {
    InitParams {
        token: TOKEN_CONTRACT,
        wallet: WALLET_ACC,
        rate: RATE,
    }
}

pub(crate) fn closed_state<S: HasStateApi>(state_builder: &mut StateBuilder<S>) -> State<S> {
    State::new(state_builder, TOKEN_CONTRACT, WALLET_ACC, RATE)
}

pub(crate) fn open_state<S: HasStateApi>(state_builder: &mut StateBuilder<S>) -> State<S> {
    let mut state = closed_state(state_builder);
    state.is_open = true;
    state
}

/// Host with an open sale and the ledger's `creditFromSale` mocked to
/// accept every call.
pub(crate) fn open_host() -> TestHost<State<TestStateApi>> {
    let mut state_builder = TestStateBuilder::new();
    let state = open_state(&mut state_builder);
    let mut host = TestHost::new(state, state_builder);
    host.setup_mock_entrypoint(
        TOKEN_CONTRACT,
        OwnedEntrypointName::new_unchecked("creditFromSale".into()),
        MockFn::returning_ok(()),
    );
    host
}

pub(crate) fn receive_ctx(
    sender: Address,
    slot_time: Timestamp,
) -> TestReceiveContext<'static> {
    let mut ctx = TestReceiveContext::empty();
    ctx.set_self_address(SELF_CONTRACT);
    ctx.set_owner(CONTROLLER_ACC);
    ctx.set_sender(sender);
    ctx.set_metadata_slot_time(slot_time);
    ctx
}

mod admin;
mod buyer;
