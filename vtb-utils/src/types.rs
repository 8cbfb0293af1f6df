use concordium_std::*;

/// Smallest indivisible accounting unit of the ledger.
/// One whole VTB is 10^18 of these; `u128` keeps the conservation
/// arithmetic exact for the full genesis supply.
pub type ContractTokenAmount = u128;
/// Whole VTB granted per 1 CCD sent to the crowdfund.
pub type TokensPerCcd = u64;
pub type MicroCcd = u64;

/// Parameter for the ledger's `creditFromSale` entrypoint, shared here so
/// the crowdfund contract can build the cross-contract call.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct CreditFromSaleParams {
    /// Account to credit the purchased tokens to
    pub buyer: AccountAddress,
    /// Token units to move out of the crowdfund's balance
    pub amount: ContractTokenAmount,
}
