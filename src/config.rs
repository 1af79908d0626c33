use crate::error::TransactionError;
use ethers::types::{Address, H160};
use log::error;
use std::{str::FromStr, time::Duration};

/// First contract deployed from the default Hardhat account,
/// `0x5FbDB2315678afecb367f032d93F642f64180aa3`
pub const DEFAULT_CONTRACT_ADDRESS: Address = H160([
    0x5f, 0xbd, 0xb2, 0x31, 0x56, 0x78, 0xaf, 0xec, 0xb3, 0x67, 0xf0, 0x32, 0xd9, 0x3f, 0x64,
    0x2f, 0x64, 0x18, 0x0a, 0xa3,
]);

pub const DEFAULT_INSTALL_PROMPT: &str = "Please install MetaMask";

/// How often a submitted transfer is polled for its receipt
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(4000);

#[derive(Clone, Debug, PartialEq)]
pub struct TransactionsConfig {
    pub contract_address: Address,
    /// Reload the page once a transfer is mined
    pub reload_after_send: bool,
    /// Shown when there is no injected wallet
    pub install_prompt: String,
    pub poll_interval: Duration,
}

impl Default for TransactionsConfig {
    fn default() -> Self {
        TransactionsConfigBuilder::from_env().build()
    }
}

pub struct TransactionsConfigBuilder {
    pub contract_address: Address,
    pub reload_after_send: bool,
    pub install_prompt: String,
    pub poll_interval: Duration,
}

impl Default for TransactionsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionsConfigBuilder {
    pub fn new() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS,
            reload_after_send: true,
            install_prompt: DEFAULT_INSTALL_PROMPT.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Defaults overridden by `CONTRACT_ADDRESS` set at build time
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        if let Some(address) = std::option_env!("CONTRACT_ADDRESS") {
            if let Err(err) = builder.contract_address(address) {
                error!("Ignoring CONTRACT_ADDRESS: {err}");
            }
        }
        builder
    }

    pub fn contract_address(&mut self, address: &str) -> Result<&mut Self, TransactionError> {
        self.contract_address = Address::from_str(address.trim())
            .map_err(|_| TransactionError::InvalidAddress(address.to_string()))?;
        Ok(self)
    }

    pub fn reload_after_send(&mut self, reload: bool) -> &mut Self {
        self.reload_after_send = reload;
        self
    }

    pub fn install_prompt(&mut self, prompt: &str) -> &mut Self {
        self.install_prompt = prompt.to_string();
        self
    }

    pub fn poll_interval(&mut self, interval: Duration) -> &mut Self {
        self.poll_interval = interval;
        self
    }

    pub fn build(&self) -> TransactionsConfig {
        TransactionsConfig {
            contract_address: self.contract_address,
            reload_after_send: self.reload_after_send,
            install_prompt: self.install_prompt.clone(),
            poll_interval: self.poll_interval,
        }
    }
}
