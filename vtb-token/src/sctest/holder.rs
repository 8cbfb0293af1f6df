use concordium_std::concordium_cfg_test;

#[concordium_cfg_test]
mod tests {
    use crate::{sctest::*, *};
    use concordium_std::test_infrastructure::*;

    /// State in which investor1 already holds tokens from the sale.
    fn funded_host(
        amount: ContractTokenAmount,
    ) -> TestHost<State<TestStateApi>> {
        let mut state_builder = TestStateBuilder::new();
        let mut state = registered_state(&mut state_builder);
        state
            .credit_from_sale(&INVESTOR1_ACC, amount)
            .unwrap_abort();
        TestHost::new(state, state_builder)
    }

    #[concordium_test]
    fn test_transfer() {
        let params = TransferParams {
            to: INVESTOR3_ADDR,
            amount: vtb(300),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(INVESTOR1_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        let mut host = funded_host(vtb(2100));
        let mut logger = TestLogger::init();

        let result = contract_transfer(&ctx, &mut host, &mut logger);
        claim!(result.is_ok());

        let state = host.state();
        claim_eq!(state.balance_of(&INVESTOR1_ADDR), vtb(1800));
        claim_eq!(state.balance_of(&INVESTOR3_ADDR), vtb(300));
        claim_eq!(state.tracked_supply(), state.total_supply);
        claim!(logger.logs.contains(&to_bytes(&VtbEvent::Transfer(
            TransferEvent {
                from: INVESTOR1_ADDR,
                to: INVESTOR3_ADDR,
                amount: vtb(300),
            }
        ))));
    }

    #[concordium_test]
    fn test_transfer_insufficient_balance() {
        let params = TransferParams {
            to: INVESTOR3_ADDR,
            amount: vtb(2101),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(INVESTOR1_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        let mut host = funded_host(vtb(2100));
        let mut logger = TestLogger::init();

        let result = contract_transfer(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Should reject an overdraw");
        claim_eq!(err, ContractError::InsufficientBalance);
        claim_eq!(host.state().balance_of(&INVESTOR1_ADDR), vtb(2100));
        claim_eq!(host.state().balance_of(&INVESTOR3_ADDR), 0);
        claim_eq!(logger.logs.len(), 0);
    }

    #[concordium_test]
    fn test_approve_overwrites() {
        let mut host = funded_host(vtb(2100));
        let mut logger = TestLogger::init();

        let params = ApproveParams {
            spender: INVESTOR2_ADDR,
            amount: vtb(300),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(INVESTOR1_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        contract_approve(&ctx, &mut host, &mut logger).expect_report("Approve failed");
        claim_eq!(
            host.state().allowance_of(&INVESTOR1_ADDR, &INVESTOR2_ADDR),
            vtb(300)
        );

        let params = ApproveParams {
            spender: INVESTOR2_ADDR,
            amount: vtb(120),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(INVESTOR1_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        contract_approve(&ctx, &mut host, &mut logger).expect_report("Approve failed");
        claim_eq!(
            host.state().allowance_of(&INVESTOR1_ADDR, &INVESTOR2_ADDR),
            vtb(120)
        );
        claim!(logger.logs.contains(&to_bytes(&VtbEvent::Approval(
            ApprovalEvent {
                owner: INVESTOR1_ADDR,
                spender: INVESTOR2_ADDR,
                amount: vtb(120),
            }
        ))));
    }

    #[concordium_test]
    fn test_transfer_from_spends_exact_allowance() {
        let mut host = funded_host(vtb(2100));
        let mut logger = TestLogger::init();

        let params = ApproveParams {
            spender: INVESTOR2_ADDR,
            amount: vtb(300),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(INVESTOR1_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        contract_approve(&ctx, &mut host, &mut logger).expect_report("Approve failed");

        let params = TransferFromParams {
            from: INVESTOR1_ADDR,
            to: INVESTOR3_ADDR,
            amount: vtb(300),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(INVESTOR2_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        let result = contract_transfer_from(&ctx, &mut host, &mut logger);
        claim!(result.is_ok());

        let state = host.state();
        claim_eq!(state.balance_of(&INVESTOR1_ADDR), vtb(1800));
        claim_eq!(state.balance_of(&INVESTOR3_ADDR), vtb(300));
        claim_eq!(state.allowance_of(&INVESTOR1_ADDR, &INVESTOR2_ADDR), 0);
        claim_eq!(state.tracked_supply(), state.total_supply);
        claim!(logger.logs.contains(&to_bytes(&VtbEvent::Transfer(
            TransferEvent {
                from: INVESTOR1_ADDR,
                to: INVESTOR3_ADDR,
                amount: vtb(300),
            }
        ))));
    }

    #[concordium_test]
    fn test_transfer_from_without_allowance() {
        let params = TransferFromParams {
            from: INVESTOR1_ADDR,
            to: INVESTOR3_ADDR,
            amount: vtb(1),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(INVESTOR2_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        let mut host = funded_host(vtb(2100));
        let mut logger = TestLogger::init();

        let result = contract_transfer_from(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Should reject without an allowance");
        claim_eq!(err, ContractError::InsufficientAllowance);
        claim_eq!(host.state().balance_of(&INVESTOR1_ADDR), vtb(2100));
    }
}
