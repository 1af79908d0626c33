use crate::{Ethereum, EthereumError};
use ethers::{
    contract::ContractError,
    providers::{Provider, ProviderError},
    types::TxHash,
};
use gloo_storage::errors::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("No ethereum object")]
    NoEthereum,

    #[error("No connected account")]
    NoAccount,

    #[error("Invalid receiver address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Transaction {0:?} was dropped from the mempool")]
    Dropped(TxHash),

    #[error(transparent)]
    EthereumError(#[from] EthereumError),

    #[error(transparent)]
    ContractError(#[from] ContractError<Provider<Ethereum>>),

    #[error(transparent)]
    ProviderError(#[from] ProviderError),

    #[error(transparent)]
    StorageError(#[from] StorageError),
}
