use concordium_std::concordium_cfg_test;

#[concordium_cfg_test]
mod tests {
    use crate::{sctest::*, *};
    use concordium_std::test_infrastructure::*;

    /// The full deployment script followed by sale activity and the team
    /// release, with the supply checked at every step. Mirrors the order
    /// the contracts are driven in on chain: init, register the
    /// crowdfund, credit purchases, holder transfers, then the vesting
    /// release a year later.
    #[concordium_test]
    fn test_full_lifecycle_conserves_supply() {
        // Deployment
        let params = init_parameter();
        let params_bytes = to_bytes(&params);
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(CONTROLLER_ACC);
        ctx.set_parameter(&params_bytes);
        ctx.set_metadata_slot_time(genesis());
        let mut state_builder = TestStateBuilder::new();
        let state = contract_init(&ctx, &mut state_builder)
            .expect_report("Contract initialization failed");
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();
        claim_eq!(host.state().tracked_supply(), TOTAL_SUPPLY);

        // Register the crowdfund contract
        let params_bytes = to_bytes(&CROWDFUND_CONTRACT);
        let mut ctx = receive_ctx(Address::Account(CONTROLLER_ACC), genesis());
        ctx.set_parameter(&params_bytes);
        contract_set_crowdfund_address(&ctx, &mut host)
            .expect_report("Crowdfund registration failed");
        claim_eq!(host.state().tracked_supply(), TOTAL_SUPPLY);

        // Two purchases: 1 CCD and 2 CCD at 2100 VTB per CCD.
        let params = CreditFromSaleParams {
            buyer: INVESTOR1_ACC,
            amount: vtb(2100),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(CROWDFUND_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        contract_credit_from_sale(&ctx, &mut host, &mut logger)
            .expect_report("First purchase credit failed");

        let params = CreditFromSaleParams {
            buyer: INVESTOR2_ACC,
            amount: vtb(4200),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(CROWDFUND_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        contract_credit_from_sale(&ctx, &mut host, &mut logger)
            .expect_report("Second purchase credit failed");

        claim_eq!(host.state().balance_of(&INVESTOR1_ADDR), vtb(2100));
        claim_eq!(host.state().balance_of(&INVESTOR2_ADDR), vtb(4200));
        claim_eq!(
            host.state().balance_of(&CROWDFUND_ADDR),
            SALE_SUPPLY - vtb(6300)
        );
        claim_eq!(host.state().tracked_supply(), TOTAL_SUPPLY);

        // Secondary trading between holders
        let params = TransferParams {
            to: INVESTOR3_ADDR,
            amount: vtb(300),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(INVESTOR1_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        contract_transfer(&ctx, &mut host, &mut logger).expect_report("Transfer failed");

        let params = ApproveParams {
            spender: INVESTOR3_ADDR,
            amount: vtb(1000),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(INVESTOR2_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        contract_approve(&ctx, &mut host, &mut logger).expect_report("Approve failed");

        let params = TransferFromParams {
            from: INVESTOR2_ADDR,
            to: INVESTOR1_ADDR,
            amount: vtb(1000),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(INVESTOR3_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        contract_transfer_from(&ctx, &mut host, &mut logger)
            .expect_report("TransferFrom failed");

        claim_eq!(host.state().balance_of(&INVESTOR1_ADDR), vtb(2800));
        claim_eq!(host.state().balance_of(&INVESTOR2_ADDR), vtb(3200));
        claim_eq!(host.state().balance_of(&INVESTOR3_ADDR), vtb(300));
        claim_eq!(
            host.state().allowance_of(&INVESTOR2_ADDR, &INVESTOR3_ADDR),
            0
        );
        claim_eq!(host.state().tracked_supply(), TOTAL_SUPPLY);

        // A year and a day later the team allotment unlocks.
        let ctx = receive_ctx(Address::Account(CONTROLLER_ACC), release_time());
        contract_release_team_tokens(&ctx, &mut host, &mut logger)
            .expect_report("Team release failed");

        claim_eq!(
            host.state().balance_of(&Address::Account(TEAM_ACC)),
            TEAM_ALLOTMENT
        );
        claim_eq!(host.state().tracked_supply(), TOTAL_SUPPLY);
        claim_eq!(host.state().total_supply, TOTAL_SUPPLY);
    }

    /// A rejected operation in the middle of the lifecycle leaves every
    /// balance and the supply exactly as they were.
    #[concordium_test]
    fn test_rejection_rolls_back_cleanly() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = registered_state(&mut state_builder);
        state
            .credit_from_sale(&INVESTOR1_ACC, vtb(2100))
            .unwrap_abort();
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        let params = TransferFromParams {
            from: INVESTOR1_ADDR,
            to: INVESTOR2_ADDR,
            amount: vtb(5000),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(INVESTOR2_ADDR, genesis());
        ctx.set_parameter(&params_bytes);

        let result = contract_transfer_from(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Should reject");
        claim_eq!(err, ContractError::InsufficientAllowance);
        claim_eq!(host.state().balance_of(&INVESTOR1_ADDR), vtb(2100));
        claim_eq!(host.state().balance_of(&INVESTOR2_ADDR), 0);
        claim_eq!(logger.logs.len(), 0);
        claim_eq!(host.state().tracked_supply(), host.state().total_supply);
    }
}
