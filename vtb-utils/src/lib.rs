use concordium_std::{
    collections::BTreeMap, fmt::Debug, schema, AccountAddress, Address, Amount, SchemaType,
    Serial, Timestamp, Write,
};

pub mod error;
pub mod types;

use types::ContractTokenAmount;

/// Symbol reported by the ledger contract.
pub const TOKEN_SYMBOL: &str = "VTB";
pub const TOKEN_NAME: &str = "VTB Token";
/// Token amounts are fixed point with 18 decimal places.
pub const TOKEN_DECIMALS: u8 = 18;
/// Indivisible token units in one whole VTB.
pub const ONE_VTB: ContractTokenAmount = 1_000_000_000_000_000_000;
/// Micro CCD in one CCD, the value unit buyers pay with.
pub const MICRO_CCD_PER_CCD: u64 = 1_000_000;

// ---------------------------------------

/// Tag for the Transfer event.
pub const TRANSFER_EVENT_TAG: u8 = 1u8;
pub const APPROVAL_EVENT_TAG: u8 = 2u8;
pub const SALE_CREDIT_EVENT_TAG: u8 = 3u8;
pub const TEAM_RELEASE_EVENT_TAG: u8 = 4u8;
pub const SALE_OPENED_EVENT_TAG: u8 = 5u8;
pub const PURCHASE_EVENT_TAG: u8 = 6u8;

/// A TransferEvent is logged whenever token units move between holders,
/// whichever entrypoint moved them.
#[derive(Debug, Serial, SchemaType, PartialEq, Eq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: ContractTokenAmount,
}

/// An ApprovalEvent is logged when an allowance is set.
#[derive(Debug, Serial, SchemaType, PartialEq, Eq)]
pub struct ApprovalEvent {
    pub owner: Address,
    pub spender: Address,
    pub amount: ContractTokenAmount,
}

/// A SaleCreditEvent is logged when the crowdfund credits a buyer.
#[derive(Debug, Serial, SchemaType, PartialEq, Eq)]
pub struct SaleCreditEvent {
    pub buyer: AccountAddress,
    pub amount: ContractTokenAmount,
}

/// A TeamReleaseEvent is logged by the one-shot vesting release.
#[derive(Debug, Serial, SchemaType, PartialEq, Eq)]
pub struct TeamReleaseEvent {
    pub team: AccountAddress,
    pub amount: ContractTokenAmount,
}

/// A SaleOpenedEvent is logged when the crowdfund opens.
#[derive(Debug, Serial, SchemaType, PartialEq, Eq)]
pub struct SaleOpenedEvent {
    pub opened_at: Timestamp,
}

/// A PurchaseEvent is logged for every successful buy.
#[derive(Debug, Serial, SchemaType, PartialEq, Eq)]
pub struct PurchaseEvent {
    pub buyer: AccountAddress,
    pub value: Amount,
    pub tokens: ContractTokenAmount,
}

/// Tagged events to be serialized for the event log.
#[derive(Debug, PartialEq, Eq)]
pub enum VtbEvent {
    Transfer(TransferEvent),
    Approval(ApprovalEvent),
    SaleCredit(SaleCreditEvent),
    TeamRelease(TeamReleaseEvent),
    SaleOpened(SaleOpenedEvent),
    Purchase(PurchaseEvent),
}

impl Serial for VtbEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            VtbEvent::Transfer(event) => {
                out.write_u8(TRANSFER_EVENT_TAG)?;
                event.serial(out)
            }
            VtbEvent::Approval(event) => {
                out.write_u8(APPROVAL_EVENT_TAG)?;
                event.serial(out)
            }
            VtbEvent::SaleCredit(event) => {
                out.write_u8(SALE_CREDIT_EVENT_TAG)?;
                event.serial(out)
            }
            VtbEvent::TeamRelease(event) => {
                out.write_u8(TEAM_RELEASE_EVENT_TAG)?;
                event.serial(out)
            }
            VtbEvent::SaleOpened(event) => {
                out.write_u8(SALE_OPENED_EVENT_TAG)?;
                event.serial(out)
            }
            VtbEvent::Purchase(event) => {
                out.write_u8(PURCHASE_EVENT_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl schema::SchemaType for VtbEvent {
    fn get_type() -> schema::Type {
        let mut event_map = BTreeMap::new();
        event_map.insert(
            TRANSFER_EVENT_TAG,
            (
                "Transfer".to_string(),
                schema::Fields::Named(vec![
                    (String::from("from"), Address::get_type()),
                    (String::from("to"), Address::get_type()),
                    (String::from("amount"), ContractTokenAmount::get_type()),
                ]),
            ),
        );
        event_map.insert(
            APPROVAL_EVENT_TAG,
            (
                "Approval".to_string(),
                schema::Fields::Named(vec![
                    (String::from("owner"), Address::get_type()),
                    (String::from("spender"), Address::get_type()),
                    (String::from("amount"), ContractTokenAmount::get_type()),
                ]),
            ),
        );
        event_map.insert(
            SALE_CREDIT_EVENT_TAG,
            (
                "SaleCredit".to_string(),
                schema::Fields::Named(vec![
                    (String::from("buyer"), AccountAddress::get_type()),
                    (String::from("amount"), ContractTokenAmount::get_type()),
                ]),
            ),
        );
        event_map.insert(
            TEAM_RELEASE_EVENT_TAG,
            (
                "TeamRelease".to_string(),
                schema::Fields::Named(vec![
                    (String::from("team"), AccountAddress::get_type()),
                    (String::from("amount"), ContractTokenAmount::get_type()),
                ]),
            ),
        );
        event_map.insert(
            SALE_OPENED_EVENT_TAG,
            (
                "SaleOpened".to_string(),
                schema::Fields::Named(vec![(
                    String::from("opened_at"),
                    Timestamp::get_type(),
                )]),
            ),
        );
        event_map.insert(
            PURCHASE_EVENT_TAG,
            (
                "Purchase".to_string(),
                schema::Fields::Named(vec![
                    (String::from("buyer"), AccountAddress::get_type()),
                    (String::from("value"), Amount::get_type()),
                    (String::from("tokens"), ContractTokenAmount::get_type()),
                ]),
            ),
        );
        schema::Type::TaggedEnum(event_map)
    }
}
