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
        ctx.set_metadata_slot_time(sale_start());
        let mut state_builder = TestStateBuilder::new();

        let result = contract_init(&ctx, &mut state_builder);
        let state = result.expect_report("Contract initialization failed");

        claim_eq!(state.token, TOKEN_CONTRACT);
        claim_eq!(state.wallet, WALLET_ACC);
        claim_eq!(state.rate, RATE);
        claim!(!state.is_open);
        claim!(!state.paused);
    }

    #[concordium_test]
    fn test_init_rejects_zero_rate() {
        let params = InitParams {
            token: TOKEN_CONTRACT,
            wallet: WALLET_ACC,
            rate: 0,
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(CONTROLLER_ACC);
        ctx.set_parameter(&params_bytes);
        ctx.set_metadata_slot_time(sale_start());
        let mut state_builder = TestStateBuilder::new();

        let result = contract_init(&ctx, &mut state_builder);
        let err = result.expect_err_report("Should reject a zero rate");
        claim_eq!(err, ContractError::InvalidRate.into());
    }

    #[concordium_test]
    fn test_open_crowdfund() {
        let ctx = receive_ctx(Address::Account(CONTROLLER_ACC), sale_start());
        let mut state_builder = TestStateBuilder::new();
        let state = closed_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        let result = contract_open_crowdfund(&ctx, &mut host, &mut logger);
        claim!(result.is_ok());
        claim!(host.state().is_open);
        claim!(logger.logs.contains(&to_bytes(&VtbEvent::SaleOpened(
            SaleOpenedEvent {
                opened_at: sale_start(),
            }
        ))));
    }

    #[concordium_test]
    fn test_open_crowdfund_unauthorized() {
        let ctx = receive_ctx(Address::Account(SOME_RANDOM_GUY), sale_start());
        let mut state_builder = TestStateBuilder::new();
        let state = closed_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        let result = contract_open_crowdfund(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Should reject a non-controller");
        claim_eq!(err, ContractError::Unauthorized);
        claim!(!host.state().is_open);
    }

    #[concordium_test]
    fn test_open_crowdfund_twice() {
        let ctx = receive_ctx(Address::Account(CONTROLLER_ACC), sale_start());
        let mut state_builder = TestStateBuilder::new();
        let state = open_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        let result = contract_open_crowdfund(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Should reject a second open");
        claim_eq!(err, ContractError::AlreadyOpen);
    }

    #[concordium_test]
    fn test_change_wallet_address() {
        let new_wallet = AccountAddress([6u8; 32]);
        let params_bytes = to_bytes(&new_wallet);
        let mut ctx = receive_ctx(Address::Account(CONTROLLER_ACC), sale_start());
        ctx.set_parameter(&params_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = open_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result = contract_change_wallet_address(&ctx, &mut host);
        claim!(result.is_ok());
        claim_eq!(host.state().wallet, new_wallet);
    }

    #[concordium_test]
    fn test_change_wallet_address_unauthorized() {
        let new_wallet = AccountAddress([6u8; 32]);
        let params_bytes = to_bytes(&new_wallet);
        let mut ctx = receive_ctx(Address::Account(SOME_RANDOM_GUY), sale_start());
        ctx.set_parameter(&params_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = open_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result = contract_change_wallet_address(&ctx, &mut host);
        let err = result.expect_err_report("Should reject a non-controller");
        claim_eq!(err, ContractError::Unauthorized);
        claim_eq!(host.state().wallet, WALLET_ACC);
    }

    #[concordium_test]
    fn test_pause_and_unpause() {
        let ctx = receive_ctx(Address::Account(CONTROLLER_ACC), sale_start());
        let mut state_builder = TestStateBuilder::new();
        let state = open_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        contract_set_paused(&ctx, &mut host).expect_report("Pause failed");
        claim!(host.state().paused);

        contract_set_unpaused(&ctx, &mut host).expect_report("Unpause failed");
        claim!(!host.state().paused);
    }

    #[concordium_test]
    fn test_pause_unauthorized() {
        let ctx = receive_ctx(Address::Account(SOME_RANDOM_GUY), sale_start());
        let mut state_builder = TestStateBuilder::new();
        let state = open_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result = contract_set_paused(&ctx, &mut host);
        let err = result.expect_err_report("Should reject a non-controller");
        claim_eq!(err, ContractError::Unauthorized);
        claim!(!host.state().paused);
    }
}
