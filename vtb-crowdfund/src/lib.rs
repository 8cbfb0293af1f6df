//! The VTB crowdfund sale controller.
//!
//! Buyers pay CCD into `buy`; the contract forwards the full payment to
//! the project wallet and asks the ledger contract to credit tokens at a
//! fixed rate. The sale starts closed and the controller opens it with
//! `openCrowdfund`. The contract never holds funds between transactions.
#[cfg(any(feature = "wasm-test", test))]
mod sctest;
mod state;
mod view;

use concordium_std::*;
use state::{State, *};
use vtb_utils::{PurchaseEvent, SaleOpenedEvent, VtbEvent};

/// The parameter schema for `init` function.
#[derive(Debug, Serialize, SchemaType)]
pub struct InitParams {
    /// The ledger contract that credits purchased tokens
    pub token: ContractAddress,
    /// Account every payment is forwarded to
    pub wallet: AccountAddress,
    /// Whole VTB granted per 1 CCD paid
    pub rate: TokensPerCcd,
}

/// # Init Function
/// The deployer becomes the controller. The sale starts closed.
#[init(contract = "vtb_crowdfund", parameter = "InitParams")]
fn contract_init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params: InitParams = ctx.parameter_cursor().get()?;
    ensure!(params.rate > 0, ContractError::InvalidRate.into());

    let state = State::new(state_builder, params.token, params.wallet, params.rate);
    Ok(state)
}

// ==============================================
// For the controller
// ==========================================

/// Open the sale for buyers. One-way; there is no closing entrypoint.
///
/// Caller: contract instance owner only
/// Reject if:
/// - The sender is not the contract owner.
/// - The sale is already open
#[receive(
    contract = "vtb_crowdfund",
    name = "openCrowdfund",
    error = "ContractError",
    enable_logger,
    mutable
)]
fn contract_open_crowdfund<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    ensure!(
        ctx.sender().matches_account(&ctx.owner()),
        ContractError::Unauthorized
    );
    ensure!(!host.state().is_open, ContractError::AlreadyOpen);

    host.state_mut().is_open = true;

    logger.log(&VtbEvent::SaleOpened(SaleOpenedEvent {
        opened_at: ctx.metadata().slot_time(),
    }))?;
    Ok(())
}

/// Redirect future payments to another wallet. Takes effect from the
/// next buy; funds already forwarded stay where they went.
///
/// Caller: contract instance owner only
/// Reject if:
/// - The sender is not the contract owner.
/// - Fails to parse parameter
#[receive(
    contract = "vtb_crowdfund",
    name = "changeWalletAddress",
    parameter = "AccountAddress",
    error = "ContractError",
    mutable
)]
fn contract_change_wallet_address<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    ensure!(
        ctx.sender().matches_account(&ctx.owner()),
        ContractError::Unauthorized
    );

    let addr: AccountAddress = ctx.parameter_cursor().get()?;
    host.state_mut().wallet = addr;
    Ok(())
}

/// Emergency stop for `buy`.
///
/// Caller: contract instance owner only
/// Reject if:
/// - The sender is not the contract owner.
#[receive(
    contract = "vtb_crowdfund",
    name = "setPaused",
    error = "ContractError",
    mutable
)]
fn contract_set_paused<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    ensure!(
        ctx.sender().matches_account(&ctx.owner()),
        ContractError::Unauthorized
    );
    host.state_mut().paused = true;
    Ok(())
}

/// Lift the emergency stop.
///
/// Caller: contract instance owner only
/// Reject if:
/// - The sender is not the contract owner.
#[receive(
    contract = "vtb_crowdfund",
    name = "setUnpaused",
    error = "ContractError",
    mutable
)]
fn contract_set_unpaused<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    ensure!(
        ctx.sender().matches_account(&ctx.owner()),
        ContractError::Unauthorized
    );
    host.state_mut().paused = false;
    Ok(())
}

// ==============================================
// For buyers
// ==========================================

/// Buy tokens with the attached CCD. The full payment is forwarded to
/// the project wallet and the ledger contract credits the buyer at the
/// fixed rate. Any rejection rolls the whole purchase back.
///
/// Caller: accounts only
/// Reject if:
/// - The sender is a contract
/// - Buying is paused
/// - The sale has not been opened
/// - The attached amount is zero
/// - The token amount overflows
/// - The ledger contract rejects the credit
/// - Forwarding the payment to the wallet fails
///
/// Note: host.invoke_transfer() can only transfer CCD to an AccountAddress,
/// which is why the wallet is an account and not a contract.
#[receive(
    contract = "vtb_crowdfund",
    name = "buy",
    error = "ContractError",
    enable_logger,
    mutable,
    payable
)]
fn contract_buy<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let buyer = match ctx.sender() {
        Address::Account(account) => account,
        Address::Contract(_) => bail!(ContractError::AccountOnly),
    };

    let state = host.state();
    ensure!(!state.paused, ContractError::ContractPaused);
    ensure!(state.is_open, ContractError::SaleClosed);
    ensure!(amount.micro_ccd > 0, ContractError::ZeroValue);

    let token = state.token;
    let wallet = state.wallet;
    let tokens = state.tokens_for(amount)?;

    host.state_mut().record_purchase(&buyer, amount, tokens)?;

    host.invoke_contract(
        &token,
        &CreditFromSaleParams {
            buyer,
            amount: tokens,
        },
        EntrypointName::new_unchecked("creditFromSale"),
        Amount::zero(),
    )?;

    let transfer_result = host.invoke_transfer(&wallet, amount);
    ensure!(transfer_result.is_ok(), ContractError::ForwardFailed);

    logger.log(&VtbEvent::Purchase(PurchaseEvent {
        buyer,
        value: amount,
        tokens,
    }))?;
    Ok(())
}
