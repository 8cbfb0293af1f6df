use concordium_std::concordium_cfg_test;

#[concordium_cfg_test]
mod tests {
    use crate::{sctest::*, *};
    use concordium_std::test_infrastructure::*;

    #[concordium_test]
    fn test_credit_from_sale() {
        let params = CreditFromSaleParams {
            buyer: INVESTOR1_ACC,
            amount: vtb(2100),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(CROWDFUND_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = registered_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        let result = contract_credit_from_sale(&ctx, &mut host, &mut logger);
        claim!(result.is_ok());

        let state = host.state();
        claim_eq!(state.balance_of(&INVESTOR1_ADDR), vtb(2100));
        claim_eq!(state.balance_of(&CROWDFUND_ADDR), SALE_SUPPLY - vtb(2100));
        claim_eq!(state.tracked_supply(), state.total_supply);
        claim!(logger.logs.contains(&to_bytes(&VtbEvent::SaleCredit(
            SaleCreditEvent {
                buyer: INVESTOR1_ACC,
                amount: vtb(2100),
            }
        ))));
    }

    #[concordium_test]
    fn test_credit_from_sale_wrong_sender() {
        let params = CreditFromSaleParams {
            buyer: INVESTOR1_ACC,
            amount: vtb(2100),
        };
        let params_bytes = to_bytes(&params);
        // Neither an account nor an unregistered contract may credit.
        let impostor = Address::Contract(ContractAddress {
            index: 99,
            subindex: 0,
        });
        let mut ctx = receive_ctx(impostor, genesis());
        ctx.set_parameter(&params_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = registered_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        let result = contract_credit_from_sale(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Should reject an impostor contract");
        claim_eq!(err, ContractError::Unauthorized);
        claim_eq!(host.state().balance_of(&INVESTOR1_ADDR), 0);
    }

    #[concordium_test]
    fn test_credit_from_sale_account_sender() {
        let params = CreditFromSaleParams {
            buyer: SOME_RANDOM_GUY,
            amount: vtb(1),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(Address::Account(SOME_RANDOM_GUY), genesis());
        ctx.set_parameter(&params_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = registered_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        let result = contract_credit_from_sale(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Should reject an account sender");
        claim_eq!(err, ContractError::Unauthorized);
    }

    #[concordium_test]
    fn test_credit_from_sale_unregistered() {
        let params = CreditFromSaleParams {
            buyer: INVESTOR1_ACC,
            amount: vtb(2100),
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(CROWDFUND_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        let result = contract_credit_from_sale(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Should reject before registration");
        claim_eq!(err, ContractError::Unauthorized);
    }

    #[concordium_test]
    fn test_credit_from_sale_exceeds_allocation() {
        let params = CreditFromSaleParams {
            buyer: INVESTOR1_ACC,
            amount: SALE_SUPPLY + 1,
        };
        let params_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(CROWDFUND_ADDR, genesis());
        ctx.set_parameter(&params_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = registered_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        let result = contract_credit_from_sale(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Should reject past the sale allocation");
        claim_eq!(err, ContractError::InsufficientBalance);
        claim_eq!(host.state().balance_of(&CROWDFUND_ADDR), SALE_SUPPLY);
        claim_eq!(host.state().tracked_supply(), host.state().total_supply);
    }
}
