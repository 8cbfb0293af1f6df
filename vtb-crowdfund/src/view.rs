use crate::state::{PurchaseState, State, *};
use concordium_std::*;

#[derive(Debug, Serialize, SchemaType)]
struct ViewResponse {
    token: ContractAddress,
    wallet: AccountAddress,
    rate: TokensPerCcd,
    is_open: bool,
    paused: bool,
}

#[receive(contract = "vtb_crowdfund", name = "view", return_value = "ViewResponse")]
fn contract_view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ViewResponse> {
    let state = host.state();

    Ok(ViewResponse {
        token: state.token,
        wallet: state.wallet,
        rate: state.rate,
        is_open: state.is_open,
        paused: state.paused,
    })
}

// ------------------------------------------

#[receive(contract = "vtb_crowdfund", name = "VTB", return_value = "ContractAddress")]
fn contract_token_address<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ContractAddress> {
    Ok(host.state().token)
}

#[receive(
    contract = "vtb_crowdfund",
    name = "wallet",
    return_value = "AccountAddress"
)]
fn contract_wallet<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<AccountAddress> {
    Ok(host.state().wallet)
}

#[receive(
    contract = "vtb_crowdfund",
    name = "viewPurchase",
    parameter = "AccountAddress",
    return_value = "Option<PurchaseState>"
)]
fn contract_view_purchase<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Option<PurchaseState>> {
    let buyer: AccountAddress = ctx.parameter_cursor().get()?;
    Ok(host.state().purchase_of(&buyer))
}

#[receive(
    contract = "vtb_crowdfund",
    name = "viewPurchases",
    return_value = "Vec<(AccountAddress, PurchaseState)>"
)]
fn contract_view_purchases<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Vec<(AccountAddress, PurchaseState)>> {
    let purchases = host
        .state()
        .purchases
        .iter()
        .map(|(buyer, purchase)| (*buyer, *purchase))
        .collect();
    Ok(purchases)
}
