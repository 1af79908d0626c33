use crate::{
    config::TransactionsConfig,
    contract::{create_ethereum_contract, TransactionsContract},
    error::TransactionError,
    storage::store_transaction_count,
    transaction::{FormData, StructuredTransaction},
    Ethereum,
};
use ethers::{
    providers::JsonRpcClient,
    types::{Address, TxHash, U256},
};
use log::{debug, info};

/// Reads and records transfers on the `Transactions` contract through the
/// injected wallet
#[derive(Clone, Debug)]
pub struct TransactionsClient {
    ethereum: Ethereum,
    config: TransactionsConfig,
}

impl TransactionsClient {
    pub fn new(ethereum: Ethereum, config: TransactionsConfig) -> Self {
        Self { ethereum, config }
    }

    pub fn contract(&self) -> TransactionsContract {
        create_ethereum_contract(
            &self.ethereum,
            self.config.contract_address,
            self.config.poll_interval,
        )
    }

    fn ensure_wallet(&self) -> Result<(), TransactionError> {
        match self.ethereum.injected_available() {
            true => Ok(()),
            false => Err(TransactionError::NoEthereum),
        }
    }

    /// All recorded transfers, oldest first. Empty when there is no wallet.
    pub async fn get_all_transactions(&self) -> Result<Vec<StructuredTransaction>, TransactionError> {
        if !self.ethereum.injected_available() {
            info!("Ethereum is not present");
            return Ok(Vec::new());
        }

        let available = self.contract().get_all_transactions().call().await?;
        let structured: Vec<StructuredTransaction> =
            available.into_iter().map(StructuredTransaction::from).collect();
        debug!("Structured transactions {structured:?}");

        Ok(structured)
    }

    pub async fn transaction_count(&self) -> Result<u64, TransactionError> {
        self.ensure_wallet()?;
        let count = self.contract().get_transaction_count().call().await?;
        Ok(count.min(U256::from(u64::MAX)).as_u64())
    }

    /// Reads the count from the contract and mirrors it to local storage.
    /// Without a wallet there is nothing to read and `None` is returned.
    pub async fn sync_transaction_count(&self) -> Result<Option<u64>, TransactionError> {
        if !self.ethereum.injected_available() {
            debug!("Ethereum is not present, count not synced");
            return Ok(None);
        }
        self.store_count().await.map(Some)
    }

    async fn store_count(&self) -> Result<u64, TransactionError> {
        let count = self.transaction_count().await?;
        store_transaction_count(count)?;
        Ok(count)
    }

    /// Sends the ether to the receiver, records the transfer on the contract
    /// and waits for it to be mined. `on_submitted` gets the contract
    /// transaction hash as soon as the wallet broadcasts it.
    ///
    /// Returns the new transaction count.
    pub async fn send_transaction<F>(
        &self,
        from: Address,
        form: &FormData,
        on_submitted: F,
    ) -> Result<u64, TransactionError>
    where
        F: FnOnce(TxHash),
    {
        self.ensure_wallet()?;
        let transfer = form.validate()?;

        let value_hash: TxHash = self
            .ethereum
            .request("eth_sendTransaction", [transfer.value_transaction(from)])
            .await?;
        debug!("Value transfer sent {value_hash:?}");

        let contract = self.contract();
        let call = contract
            .add_to_blockchain(transfer.to, transfer.amount, transfer.message, transfer.keyword)
            .from(from);
        let pending = call.send().await?;
        let tx_hash = pending.tx_hash();

        on_submitted(tx_hash);
        info!("Loading - {tx_hash:?}");
        if pending.await?.is_none() {
            return Err(TransactionError::Dropped(tx_hash));
        }
        info!("Success - {tx_hash:?}");

        self.store_count().await
    }
}
