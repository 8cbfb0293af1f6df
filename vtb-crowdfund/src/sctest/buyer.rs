use concordium_std::concordium_cfg_test;

#[concordium_cfg_test]
mod tests {
    use crate::{sctest::*, *};
    use concordium_std::test_infrastructure::*;
    use vtb_utils::ONE_VTB;

    #[concordium_test]
    fn test_buy() {
        let ctx = receive_ctx(Address::Account(BUYER1_ACC), sale_start());
        let mut host = open_host();
        let amount = Amount::from_ccd(1);
        host.set_self_balance(amount);
        let mut logger = TestLogger::init();

        let result = contract_buy(&ctx, &mut host, amount, &mut logger);
        claim!(result.is_ok());

        let purchase = host
            .state()
            .purchase_of(&BUYER1_ACC)
            .expect_report("Purchase not recorded");
        claim_eq!(purchase.value, amount);
        claim_eq!(purchase.tokens, 2100 * ONE_VTB);
        claim_eq!(host.get_transfers(), [(WALLET_ACC, amount)]);
        claim!(logger.logs.contains(&to_bytes(&VtbEvent::Purchase(
            PurchaseEvent {
                buyer: BUYER1_ACC,
                value: amount,
                tokens: 2100 * ONE_VTB,
            }
        ))));
    }

    #[concordium_test]
    fn test_repeat_buys_accumulate() {
        let ctx = receive_ctx(Address::Account(BUYER1_ACC), sale_start());
        let mut host = open_host();
        let mut logger = TestLogger::init();

        // Two half CCD buys, then a whole one.
        let half = Amount::from_micro_ccd(500_000);
        host.set_self_balance(half);
        contract_buy(&ctx, &mut host, half, &mut logger).expect_report("First buy failed");
        host.set_self_balance(half);
        contract_buy(&ctx, &mut host, half, &mut logger).expect_report("Second buy failed");

        let purchase = host
            .state()
            .purchase_of(&BUYER1_ACC)
            .expect_report("Purchase not recorded");
        claim_eq!(purchase.value, Amount::from_ccd(1));
        claim_eq!(purchase.tokens, 2100 * ONE_VTB);

        let whole = Amount::from_ccd(1);
        host.set_self_balance(whole);
        contract_buy(&ctx, &mut host, whole, &mut logger).expect_report("Third buy failed");

        let purchase = host
            .state()
            .purchase_of(&BUYER1_ACC)
            .expect_report("Purchase not recorded");
        claim_eq!(purchase.value, Amount::from_ccd(2));
        claim_eq!(purchase.tokens, 4200 * ONE_VTB);
        claim_eq!(host.state().total_raised(), 2_000_000);
        claim_eq!(host.state().total_sold(), 4200 * ONE_VTB);
        claim_eq!(
            host.get_transfers(),
            [(WALLET_ACC, half), (WALLET_ACC, half), (WALLET_ACC, whole)]
        );
    }

    #[concordium_test]
    fn test_buy_fractional_ccd() {
        let ctx = receive_ctx(Address::Account(BUYER2_ACC), sale_start());
        let mut host = open_host();
        let amount = Amount::from_micro_ccd(500_000);
        host.set_self_balance(amount);
        let mut logger = TestLogger::init();

        contract_buy(&ctx, &mut host, amount, &mut logger).expect_report("Buy failed");

        let purchase = host
            .state()
            .purchase_of(&BUYER2_ACC)
            .expect_report("Purchase not recorded");
        claim_eq!(purchase.tokens, 1050 * ONE_VTB);
    }

    #[concordium_test]
    fn test_buy_before_open() {
        let ctx = receive_ctx(Address::Account(BUYER1_ACC), sale_start());
        let mut state_builder = TestStateBuilder::new();
        let state = closed_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let amount = Amount::from_ccd(1);
        host.set_self_balance(amount);
        let mut logger = TestLogger::init();

        let result = contract_buy(&ctx, &mut host, amount, &mut logger);
        let err = result.expect_err_report("Should reject while closed");
        claim_eq!(err, ContractError::SaleClosed);
        claim!(host.state().purchase_of(&BUYER1_ACC).is_none());
        claim_eq!(host.get_transfers(), []);
    }

    #[concordium_test]
    fn test_buy_zero_value() {
        let ctx = receive_ctx(Address::Account(BUYER1_ACC), sale_start());
        let mut host = open_host();
        let mut logger = TestLogger::init();

        let result = contract_buy(&ctx, &mut host, Amount::zero(), &mut logger);
        let err = result.expect_err_report("Should reject a zero payment");
        claim_eq!(err, ContractError::ZeroValue);
        claim!(host.state().purchase_of(&BUYER1_ACC).is_none());
    }

    #[concordium_test]
    fn test_buy_while_paused() {
        let ctx = receive_ctx(Address::Account(BUYER1_ACC), sale_start());
        let mut host = open_host();
        host.state_mut().paused = true;
        let amount = Amount::from_ccd(1);
        host.set_self_balance(amount);
        let mut logger = TestLogger::init();

        let result = contract_buy(&ctx, &mut host, amount, &mut logger);
        let err = result.expect_err_report("Should reject while paused");
        claim_eq!(err, ContractError::ContractPaused);
        claim!(host.state().purchase_of(&BUYER1_ACC).is_none());
    }

    #[concordium_test]
    fn test_buy_from_contract() {
        let impostor = Address::Contract(ContractAddress {
            index: 99,
            subindex: 0,
        });
        let ctx = receive_ctx(impostor, sale_start());
        let mut host = open_host();
        let amount = Amount::from_ccd(1);
        host.set_self_balance(amount);
        let mut logger = TestLogger::init();

        let result = contract_buy(&ctx, &mut host, amount, &mut logger);
        let err = result.expect_err_report("Should reject a contract sender");
        claim_eq!(err, ContractError::AccountOnly);
    }

    #[concordium_test]
    fn test_buy_credit_rejected() {
        let ctx = receive_ctx(Address::Account(BUYER1_ACC), sale_start());
        let mut state_builder = TestStateBuilder::new();
        let state = open_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        host.setup_mock_entrypoint(
            TOKEN_CONTRACT,
            OwnedEntrypointName::new_unchecked("creditFromSale".into()),
            MockFn::returning_err::<()>(CallContractError::Trap),
        );
        let amount = Amount::from_ccd(1);
        host.set_self_balance(amount);
        let mut logger = TestLogger::init();

        let result = contract_buy(&ctx, &mut host, amount, &mut logger);
        let err = result.expect_err_report("Should reject when the ledger rejects");
        claim_eq!(err, ContractError::Trap);
        claim_eq!(host.get_transfers(), []);
        claim_eq!(logger.logs.len(), 0);
    }

    #[concordium_test]
    fn test_buy_forward_failure() {
        let ctx = receive_ctx(Address::Account(BUYER1_ACC), sale_start());
        let mut host = open_host();
        // No balance to pay out of, so forwarding to the wallet fails.
        host.set_self_balance(Amount::zero());
        let mut logger = TestLogger::init();

        let result = contract_buy(&ctx, &mut host, Amount::from_ccd(1), &mut logger);
        let err = result.expect_err_report("Should reject when forwarding fails");
        claim_eq!(err, ContractError::ForwardFailed);
        claim_eq!(host.get_transfers(), []);
        claim_eq!(logger.logs.len(), 0);
    }
}
