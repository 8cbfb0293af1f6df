use concordium_std::concordium_cfg_test;

#[concordium_cfg_test]
mod tests {
    use crate::{sctest::*, *};
    use concordium_std::test_infrastructure::*;

    #[concordium_test]
    fn test_init() {
        let params = init_parameter();
        let params_bytes = to_bytes(&params);
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(CONTROLLER_ACC);
        ctx.set_parameter(&params_bytes);
        ctx.set_metadata_slot_time(genesis());
        let mut state_builder = TestStateBuilder::new();

        let result = contract_init(&ctx, &mut state_builder);
        let state = result.expect_report("Contract initialization failed");

        claim_eq!(state.total_supply, TOTAL_SUPPLY);
        claim_eq!(state.balance_of(&FOUNDATION_ADDR), FOUNDATION_SUPPLY);
        claim_eq!(state.sale_reserve, SALE_SUPPLY);
        claim_eq!(state.team_reserve, TEAM_ALLOTMENT);
        claim_eq!(state.team_release_at, release_time());
        claim_eq!(state.crowdfund, None);
        claim!(!state.team_tokens_released);
        claim_eq!(state.tracked_supply(), state.total_supply);
    }

    #[concordium_test]
    fn test_set_crowdfund_address() {
        let params_bytes = to_bytes(&CROWDFUND_CONTRACT);
        let mut ctx = receive_ctx(Address::Account(CONTROLLER_ACC), genesis());
        ctx.set_parameter(&params_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result = contract_set_crowdfund_address(&ctx, &mut host);
        claim!(result.is_ok());

        let state = host.state();
        claim_eq!(state.crowdfund, Some(CROWDFUND_CONTRACT));
        claim_eq!(state.sale_reserve, 0);
        claim_eq!(state.balance_of(&CROWDFUND_ADDR), SALE_SUPPLY);
        claim_eq!(state.tracked_supply(), state.total_supply);
    }

    #[concordium_test]
    fn test_set_crowdfund_address_unauthorized() {
        let params_bytes = to_bytes(&CROWDFUND_CONTRACT);
        let mut ctx = receive_ctx(Address::Account(SOME_RANDOM_GUY), genesis());
        ctx.set_parameter(&params_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result = contract_set_crowdfund_address(&ctx, &mut host);
        let err = result.expect_err_report("Should reject a non-controller");
        claim_eq!(err, ContractError::Unauthorized);
        claim_eq!(host.state().crowdfund, None);
        claim_eq!(host.state().sale_reserve, SALE_SUPPLY);
    }

    #[concordium_test]
    fn test_set_crowdfund_address_twice() {
        let other_contract = ContractAddress {
            index: 99,
            subindex: 0,
        };
        let params_bytes = to_bytes(&other_contract);
        let mut ctx = receive_ctx(Address::Account(CONTROLLER_ACC), genesis());
        ctx.set_parameter(&params_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = registered_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result = contract_set_crowdfund_address(&ctx, &mut host);
        let err = result.expect_err_report("Should reject a second registration");
        claim_eq!(err, ContractError::AlreadySet);
        claim_eq!(host.state().crowdfund, Some(CROWDFUND_CONTRACT));
    }

    #[concordium_test]
    fn test_change_team_address() {
        let new_team = AccountAddress([3u8; 32]);
        let params_bytes = to_bytes(&new_team);
        let mut ctx = receive_ctx(Address::Account(CONTROLLER_ACC), genesis());
        ctx.set_parameter(&params_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result = contract_change_team_address(&ctx, &mut host);
        claim!(result.is_ok());
        claim_eq!(host.state().team_address, new_team);
    }

    #[concordium_test]
    fn test_change_team_address_unauthorized() {
        let new_team = AccountAddress([3u8; 32]);
        let params_bytes = to_bytes(&new_team);
        let mut ctx = receive_ctx(Address::Account(SOME_RANDOM_GUY), genesis());
        ctx.set_parameter(&params_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result = contract_change_team_address(&ctx, &mut host);
        let err = result.expect_err_report("Should reject a non-controller");
        claim_eq!(err, ContractError::Unauthorized);
        claim_eq!(host.state().team_address, TEAM_ACC);
    }

    #[concordium_test]
    fn test_release_team_tokens() {
        let ctx = receive_ctx(Address::Account(CONTROLLER_ACC), release_time());
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        let result = contract_release_team_tokens(&ctx, &mut host, &mut logger);
        claim!(result.is_ok());

        let state = host.state();
        claim_eq!(
            state.balance_of(&Address::Account(TEAM_ACC)),
            TEAM_ALLOTMENT
        );
        claim_eq!(state.team_reserve, 0);
        claim!(state.team_tokens_released);
        claim_eq!(state.tracked_supply(), state.total_supply);
        claim!(logger.logs.contains(&to_bytes(&VtbEvent::TeamRelease(
            TeamReleaseEvent {
                team: TEAM_ACC,
                amount: TEAM_ALLOTMENT,
            }
        ))));
    }

    #[concordium_test]
    fn test_release_team_tokens_too_early() {
        // One millisecond short of the 366 day gate.
        let almost = Timestamp::from_timestamp_millis(
            release_time().timestamp_millis() - 1,
        );
        let ctx = receive_ctx(Address::Account(CONTROLLER_ACC), almost);
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        let result = contract_release_team_tokens(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Should reject before the vesting gate");
        claim_eq!(err, ContractError::VestingNotElapsed);
        claim_eq!(host.state().team_reserve, TEAM_ALLOTMENT);
        claim_eq!(host.state().balance_of(&Address::Account(TEAM_ACC)), 0);
    }

    #[concordium_test]
    fn test_release_team_tokens_unauthorized() {
        let ctx = receive_ctx(Address::Account(SOME_RANDOM_GUY), release_time());
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        let result = contract_release_team_tokens(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Should reject a non-controller");
        claim_eq!(err, ContractError::Unauthorized);
        claim_eq!(host.state().team_reserve, TEAM_ALLOTMENT);
    }

    #[concordium_test]
    fn test_release_team_tokens_twice() {
        let ctx = receive_ctx(Address::Account(CONTROLLER_ACC), release_time());
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        contract_release_team_tokens(&ctx, &mut host, &mut logger)
            .expect_report("First release failed");

        let result = contract_release_team_tokens(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Should reject a second release");
        claim_eq!(err, ContractError::AlreadyReleased);
        claim_eq!(
            host.state().balance_of(&Address::Account(TEAM_ACC)),
            TEAM_ALLOTMENT
        );
        claim_eq!(host.state().tracked_supply(), host.state().total_supply);
    }
}
