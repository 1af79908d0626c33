//! Binding to the deployed `Transactions` contract.

use crate::Ethereum;
use ethers::{contract::abigen, providers::Provider, types::Address};
use std::{sync::Arc, time::Duration};

abigen!(Transactions, "abi/Transactions.json");

/// Contract driven through the injected wallet
pub type TransactionsContract = Transactions<Provider<Ethereum>>;

/// Creates the binding for the contract at `address`, signing with whatever
/// account the wallet has selected. Pending transactions are polled every
/// `poll_interval`.
pub fn create_ethereum_contract(
    ethereum: &Ethereum,
    address: Address,
    poll_interval: Duration,
) -> TransactionsContract {
    let provider = Provider::<Ethereum>::new(ethereum.clone()).interval(poll_interval);
    Transactions::new(address, Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{
        abi::{AbiDecode, Token},
        contract::EthCall,
        types::U256,
        utils::id,
    };

    #[test]
    fn selectors_match_solidity_signatures() {
        assert_eq!(GetTransactionCountCall::selector(), id("getTransactionCount()"));
        assert_eq!(GetAllTransactionsCall::selector(), id("getAllTransactions()"));
        assert_eq!(
            AddToBlockchainCall::selector(),
            id("addToBlockchain(address,uint256,string,string)")
        );
    }

    #[test]
    fn decodes_transfer_list() {
        // arrange
        let sender = Address::from_low_u64_be(1);
        let receiver = Address::from_low_u64_be(2);
        let encoded = ethers::abi::encode(&[Token::Array(vec![Token::Tuple(vec![
            Token::Address(sender),
            Token::Address(receiver),
            Token::Uint(U256::exp10(18)),
            Token::String("gm".to_string()),
            Token::Uint(U256::from(1_700_000_000u64)),
            Token::String("coffee".to_string()),
        ])])]);

        // act
        let GetAllTransactionsReturn(transfers) =
            GetAllTransactionsReturn::decode(encoded).unwrap();

        // assert
        assert_eq!(
            transfers,
            vec![TransferStruct {
                sender,
                receiver,
                amount: U256::exp10(18),
                message: "gm".to_string(),
                timestamp: U256::from(1_700_000_000u64),
                keyword: "coffee".to_string(),
            }]
        );
    }
}
