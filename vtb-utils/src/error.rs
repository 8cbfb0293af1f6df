use concordium_std::{
    num, CallContractError, LogError, ParseError, Reject, SchemaType, Serialize, UnwrapAbort,
};

pub type ContractResult<A> = Result<A, ContractError>;

/// The different errors the contracts can produce.
/// Every rejected call leaves all state exactly as it was before the call;
/// the chain discards the mutations of a rejecting transaction.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum ContractError {
    #[from(ParseError)]
    ParseParams, //1
    Unauthorized,          //
    InsufficientBalance,   //
    InsufficientAllowance, //
    SaleClosed,            //5
    AlreadyOpen,           //
    ZeroValue,             //
    VestingNotElapsed,     //
    AlreadyReleased,       //
    ForwardFailed,         //10
    AlreadySet,            //
    InvalidRate,           //
    ContractPaused,        //
    OverflowError,         //
    AccountOnly,           //15
    InvokeContractError,   //
    AmountTooLarge,        //
    MissingAccount,        //
    MissingContract,       //
    MissingEntrypoint,     //20
    MessageFailed,         //
    Trap,                  //
    LogFull,               //
    LogMalformed,          //
}

impl<T> From<CallContractError<T>> for ContractError {
    fn from(cce: CallContractError<T>) -> Self {
        match cce {
            CallContractError::AmountTooLarge => Self::AmountTooLarge,
            CallContractError::MissingAccount => Self::MissingAccount,
            CallContractError::MissingContract => Self::MissingContract,
            CallContractError::MissingEntrypoint => Self::MissingEntrypoint,
            CallContractError::MessageFailed => Self::MessageFailed,
            CallContractError::Trap => Self::Trap,
            CallContractError::LogicReject {
                reason: _,
                return_value: _,
            } => Self::InvokeContractError,
        }
    }
}

impl From<LogError> for ContractError {
    #[inline(always)]
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}
