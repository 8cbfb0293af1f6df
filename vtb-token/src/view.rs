use crate::state::{State, *};
use concordium_std::*;
use vtb_utils::{TOKEN_DECIMALS, TOKEN_NAME, TOKEN_SYMBOL};

#[derive(Debug, Serialize, SchemaType)]
struct ViewResponse {
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: ContractTokenAmount,
    foundation_address: AccountAddress,
    team_address: AccountAddress,
    crowdfund: Option<ContractAddress>,
    sale_reserve: ContractTokenAmount,
    team_reserve: ContractTokenAmount,
    team_release_at: Timestamp,
    team_tokens_released: bool,
}

#[receive(contract = "vtb_token", name = "view", return_value = "ViewResponse")]
fn contract_view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ViewResponse> {
    let state = host.state();

    Ok(ViewResponse {
        name: String::from(TOKEN_NAME),
        symbol: String::from(TOKEN_SYMBOL),
        decimals: TOKEN_DECIMALS,
        total_supply: state.total_supply,
        foundation_address: state.foundation_address,
        team_address: state.team_address,
        crowdfund: state.crowdfund,
        sale_reserve: state.sale_reserve,
        team_reserve: state.team_reserve,
        team_release_at: state.team_release_at,
        team_tokens_released: state.team_tokens_released,
    })
}

// ------------------------------------------

#[receive(contract = "vtb_token", name = "symbol", return_value = "String")]
fn contract_symbol<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    _host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<String> {
    Ok(String::from(TOKEN_SYMBOL))
}

#[receive(
    contract = "vtb_token",
    name = "totalSupply",
    return_value = "ContractTokenAmount"
)]
fn contract_total_supply<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ContractTokenAmount> {
    Ok(host.state().total_supply)
}

#[receive(
    contract = "vtb_token",
    name = "foundationAddress",
    return_value = "AccountAddress"
)]
fn contract_foundation_address<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<AccountAddress> {
    Ok(host.state().foundation_address)
}

// ------------------------------------------

#[receive(
    contract = "vtb_token",
    name = "balanceOf",
    parameter = "Address",
    return_value = "ContractTokenAmount"
)]
fn contract_balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ContractTokenAmount> {
    let address: Address = ctx.parameter_cursor().get()?;
    Ok(host.state().balance_of(&address))
}

/// Parameter type for the contract function `allowance`.
#[derive(Debug, Serialize, SchemaType)]
pub struct AllowanceParams {
    pub owner: Address,
    pub spender: Address,
}

#[receive(
    contract = "vtb_token",
    name = "allowance",
    parameter = "AllowanceParams",
    return_value = "ContractTokenAmount"
)]
fn contract_allowance<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ContractTokenAmount> {
    let params: AllowanceParams = ctx.parameter_cursor().get()?;
    Ok(host.state().allowance_of(&params.owner, &params.spender))
}
