//! The VTB fungible token ledger.
//!
//! Balances, allowances and the fixed genesis supply live here. The
//! crowdfund contract sells out of a pre-allocated balance through
//! `creditFromSale`; the team allotment sits in escrow until a one-shot,
//! time-gated release. All administrative entrypoints are restricted to
//! the contract instance owner.
#[cfg(any(feature = "wasm-test", test))]
mod sctest;
mod state;
mod view;

use concordium_std::*;
use state::{State, *};
use vtb_utils::{
    ApprovalEvent, SaleCreditEvent, TeamReleaseEvent, TransferEvent, VtbEvent,
};

/// The parameter schema for `init` function.
#[derive(Debug, Serialize, SchemaType)]
pub struct InitParams {
    /// Account holding the foundation allotment from genesis
    pub foundation_address: AccountAddress,
    /// Account the team allotment is released to after vesting
    pub team_address: AccountAddress,
    /// Token units credited to the foundation at genesis
    pub foundation_supply: ContractTokenAmount,
    /// Token units reserved for the crowdfund sale
    pub sale_supply: ContractTokenAmount,
    /// Token units escrowed for the team until the vesting gate
    pub team_allotment: ContractTokenAmount,
    /// Vesting gate, measured from the genesis slot time
    pub team_vesting: Duration,
}

/// # Init Function
/// The deployer becomes the controller for all administrative
/// entrypoints. Genesis allocation figures are configuration, not code.
#[init(contract = "vtb_token", parameter = "InitParams")]
fn contract_init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params: InitParams = ctx.parameter_cursor().get()?;

    let team_release_at = ctx
        .metadata()
        .slot_time()
        .checked_add(params.team_vesting)
        .ok_or(ContractError::OverflowError)?;

    let state = State::new(
        state_builder,
        params.foundation_address,
        params.team_address,
        params.foundation_supply,
        params.sale_supply,
        params.team_allotment,
        team_release_at,
    )?;

    Ok(state)
}

// ==============================================
// For the controller
// ==========================================

/// Register the crowdfund contract. The whole sale allotment becomes the
/// crowdfund's spendable balance, and only that contract may call
/// `creditFromSale` from then on.
///
/// Caller: contract instance owner only
/// Reject if:
/// - The sender is not the contract owner.
/// - Fails to parse parameter
/// - A crowdfund contract has already been registered
#[receive(
    contract = "vtb_token",
    name = "setCrowdfundAddress",
    parameter = "ContractAddress",
    error = "ContractError",
    mutable
)]
fn contract_set_crowdfund_address<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    ensure!(
        ctx.sender().matches_account(&ctx.owner()),
        ContractError::Unauthorized
    );

    let addr: ContractAddress = ctx.parameter_cursor().get()?;
    host.state_mut().register_crowdfund(addr)
}

/// Redirect the team allotment to another account. No validation beyond
/// authorization.
///
/// Caller: contract instance owner only
/// Reject if:
/// - The sender is not the contract owner.
/// - Fails to parse parameter
#[receive(
    contract = "vtb_token",
    name = "changeVTBTeamAddress",
    parameter = "AccountAddress",
    error = "ContractError",
    mutable
)]
fn contract_change_team_address<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    ensure!(
        ctx.sender().matches_account(&ctx.owner()),
        ContractError::Unauthorized
    );

    let addr: AccountAddress = ctx.parameter_cursor().get()?;
    host.state_mut().team_address = addr;
    Ok(())
}

/// Release the escrowed team allotment to the team address. One-shot and
/// irreversible; only possible once the vesting gate has elapsed.
///
/// Caller: contract instance owner only
/// Reject if:
/// - The sender is not the contract owner.
/// - The vesting gate has not elapsed yet
/// - The allotment has already been released
#[receive(
    contract = "vtb_token",
    name = "releaseVTBTeamTokens",
    error = "ContractError",
    enable_logger,
    mutable
)]
fn contract_release_team_tokens<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    ensure!(
        ctx.sender().matches_account(&ctx.owner()),
        ContractError::Unauthorized
    );

    let now = ctx.metadata().slot_time();
    let amount = host.state_mut().release_team_tokens(now)?;

    logger.log(&VtbEvent::TeamRelease(TeamReleaseEvent {
        team: host.state().team_address,
        amount,
    }))?;
    Ok(())
}

// ==============================================
// For the crowdfund contract
// ==========================================

/// Credit purchased tokens to a buyer, paid out of the crowdfund's
/// pre-allocated balance.
///
/// Caller: the registered crowdfund contract only
/// Reject if:
/// - No crowdfund contract has been registered yet
/// - The sender is not the registered crowdfund contract
/// - Fails to parse parameter
/// - The crowdfund's balance does not cover the amount
#[receive(
    contract = "vtb_token",
    name = "creditFromSale",
    parameter = "CreditFromSaleParams",
    error = "ContractError",
    enable_logger,
    mutable
)]
fn contract_credit_from_sale<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let crowdfund = host.state().crowdfund.ok_or(ContractError::Unauthorized)?;
    ensure!(
        ctx.sender() == Address::Contract(crowdfund),
        ContractError::Unauthorized
    );

    let params: CreditFromSaleParams = ctx.parameter_cursor().get()?;
    host.state_mut()
        .credit_from_sale(&params.buyer, params.amount)?;

    logger.log(&VtbEvent::SaleCredit(SaleCreditEvent {
        buyer: params.buyer,
        amount: params.amount,
    }))?;
    Ok(())
}

// ==============================================
// For token holders
// ==========================================

/// Parameter type for the contract function `transfer`.
#[derive(Debug, Serialize, SchemaType)]
pub struct TransferParams {
    /// Receiver of the tokens
    pub to: Address,
    /// Token units to move
    pub amount: ContractTokenAmount,
}

/// Parameter type for the contract function `approve`.
#[derive(Debug, Serialize, SchemaType)]
pub struct ApproveParams {
    /// Account allowed to spend on the sender's behalf
    pub spender: Address,
    /// The allowance. Replaces any previous value outright.
    pub amount: ContractTokenAmount,
}

/// Parameter type for the contract function `transferFrom`.
#[derive(Debug, Serialize, SchemaType)]
pub struct TransferFromParams {
    /// Owner whose balance is spent
    pub from: Address,
    /// Receiver of the tokens
    pub to: Address,
    /// Token units to move
    pub amount: ContractTokenAmount,
}

/// Move tokens from the sender to another holder.
///
/// Caller: any token holder
/// Reject if:
/// - Fails to parse parameter
/// - The sender's balance does not cover the amount
#[receive(
    contract = "vtb_token",
    name = "transfer",
    parameter = "TransferParams",
    error = "ContractError",
    enable_logger,
    mutable
)]
fn contract_transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: TransferParams = ctx.parameter_cursor().get()?;
    let from = ctx.sender();

    host.state_mut().transfer(&from, &params.to, params.amount)?;

    logger.log(&VtbEvent::Transfer(TransferEvent {
        from,
        to: params.to,
        amount: params.amount,
    }))?;
    Ok(())
}

/// Set the sender's allowance for a spender. Always an absolute
/// overwrite; approving zero revokes.
///
/// Caller: any account
/// Reject if:
/// - Fails to parse parameter
#[receive(
    contract = "vtb_token",
    name = "approve",
    parameter = "ApproveParams",
    error = "ContractError",
    enable_logger,
    mutable
)]
fn contract_approve<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: ApproveParams = ctx.parameter_cursor().get()?;
    let owner = ctx.sender();

    host.state_mut()
        .approve(&owner, &params.spender, params.amount);

    logger.log(&VtbEvent::Approval(ApprovalEvent {
        owner,
        spender: params.spender,
        amount: params.amount,
    }))?;
    Ok(())
}

/// Spend an allowance: the sender moves tokens out of `from`'s balance.
/// Allowance and balance are preconditions; neither mutates on failure.
///
/// Caller: any account with a sufficient allowance
/// Reject if:
/// - Fails to parse parameter
/// - The sender's allowance on `from` does not cover the amount
/// - `from`'s balance does not cover the amount
#[receive(
    contract = "vtb_token",
    name = "transferFrom",
    parameter = "TransferFromParams",
    error = "ContractError",
    enable_logger,
    mutable
)]
fn contract_transfer_from<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: TransferFromParams = ctx.parameter_cursor().get()?;
    let spender = ctx.sender();

    host.state_mut()
        .transfer_from(&spender, &params.from, &params.to, params.amount)?;

    logger.log(&VtbEvent::Transfer(TransferEvent {
        from: params.from,
        to: params.to,
        amount: params.amount,
    }))?;
    Ok(())
}
