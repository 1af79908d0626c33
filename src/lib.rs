pub mod client;
pub mod config;
pub mod contract;
pub mod eip1193;
pub mod error;
mod event;
pub mod storage;
pub mod transaction;
#[cfg(feature = "yew")]
pub mod yew;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

use async_trait::async_trait;
use eip1193::{error::Eip1193Error, Eip1193};
use ethers::{
    providers::{JsonRpcClient, JsonRpcError, ProviderError, RpcError},
    types::{Address, U256},
};
use event::WalletEvent;
use gloo_utils::format::JsValueSerdeExt;
use log::{debug, error};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use thiserror::Error;
use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    Mutex,
};

pub use client::TransactionsClient;
pub use config::{TransactionsConfig, TransactionsConfigBuilder};
pub use error::TransactionError;
pub use transaction::{FormData, FormField, StructuredTransaction};

#[derive(Error, Debug)]
pub enum EthereumError {
    #[error("Wallet unavailable")]
    Unavailable,

    #[error("No accounts found")]
    NoAccounts,

    #[error(transparent)]
    ProviderError(#[from] ProviderError),

    #[error(transparent)]
    Eip1193Error(#[from] Eip1193Error),
}

impl From<EthereumError> for ProviderError {
    fn from(src: EthereumError) -> Self {
        ProviderError::JsonRpcClientError(Box::new(src))
    }
}

impl RpcError for EthereumError {
    fn as_serde_error(&self) -> Option<&serde_json::Error> {
        match self {
            EthereumError::Eip1193Error(e) => e.as_serde_error(),
            _ => None,
        }
    }

    fn is_serde_error(&self) -> bool {
        self.as_serde_error().is_some()
    }

    fn as_error_response(&self) -> Option<&JsonRpcError> {
        match self {
            EthereumError::Eip1193Error(e) => e.as_error_response(),
            _ => None,
        }
    }

    fn is_error_response(&self) -> bool {
        self.as_error_response().is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Connected,
    Disconnected,
    ChainIdChanged(Option<u64>),
    AccountsChanged(Option<Vec<Address>>),
}

/// How the session asks the wallet for accounts
#[derive(Debug, Clone, Copy, PartialEq)]
enum AccountRequest {
    /// `eth_requestAccounts`, prompts the user
    Request,
    /// `eth_accounts`, only what the page is already authorized for
    Authorized,
}

impl AccountRequest {
    fn method(&self) -> &'static str {
        match self {
            AccountRequest::Request => "eth_requestAccounts",
            AccountRequest::Authorized => "eth_accounts",
        }
    }
}

/// Session with the injected wallet.
///
/// Clones share the wallet event channel, so a listener spawned on one clone
/// keeps receiving events while the others are moved in and out of UI state.
#[derive(Clone)]
pub struct Ethereum {
    accounts: Option<Vec<Address>>,
    chain_id: Option<u64>,
    wallet: Option<Eip1193>,

    emitter: UnboundedSender<Event>,
    events: Arc<Mutex<UnboundedReceiver<Event>>>,
    // wallet listeners live as long as the page, register them once
    subscribed: Arc<AtomicBool>,
}

impl Debug for Ethereum {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(
            f,
            "Ethereum with accounts: {:?}, chain_id: {:?} ",
            self.accounts, self.chain_id
        )
    }
}

impl PartialEq for Ethereum {
    fn eq(&self, other: &Self) -> bool {
        self.is_connected() == other.is_connected()
            && self.accounts == other.accounts
            && self.chain_id == other.chain_id
    }
}

impl Default for Ethereum {
    fn default() -> Self {
        Self::new()
    }
}

impl Ethereum {
    pub fn new() -> Self {
        let (emitter, events) = unbounded_channel();
        Ethereum {
            accounts: None,
            chain_id: None,
            wallet: None,
            emitter,
            events: Arc::new(Mutex::new(events)),
            subscribed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Checks if `window.ethereum` is present
    pub fn injected_available(&self) -> bool {
        Eip1193::is_available()
    }

    pub fn is_connected(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn accounts(&self) -> Option<&Vec<Address>> {
        self.accounts.as_ref()
    }

    /// First authorized account, the one transfers are sent from
    pub fn current_account(&self) -> Option<Address> {
        self.accounts.as_ref().and_then(|a| a.first().copied())
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// Asks the wallet for accounts, prompting the user if the page is not
    /// authorized yet. Always goes to the wallet, so it also picks up an
    /// account switched or re-authorized since the last call.
    pub async fn connect(&mut self) -> Result<(), EthereumError> {
        match self.attach(AccountRequest::Request).await? {
            true => Ok(()),
            false => Err(EthereumError::NoAccounts),
        }
    }

    /// Reconnects silently when the page is already authorized.
    /// Returns `false` when the wallet has no account for us.
    pub async fn restore(&mut self) -> Result<bool, EthereumError> {
        if self.is_connected() {
            return Ok(true);
        }
        self.attach(AccountRequest::Authorized).await
    }

    pub fn disconnect(&mut self) {
        self.wallet = None;
        self.accounts = None;
        self.chain_id = None;

        self.emit_event(Event::ChainIdChanged(None));
        self.emit_event(Event::AccountsChanged(None));
        self.emit_event(Event::Disconnected);
    }

    /// Folds a wallet event into the session. A revoked account list or a
    /// wallet disconnect drops the session, `connect` starts a fresh one.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Connected => {
                self.wallet.get_or_insert_with(Eip1193::new);
            }
            Event::Disconnected => {
                self.wallet = None;
                self.accounts = None;
                self.chain_id = None;
            }
            Event::ChainIdChanged(chain_id) => self.chain_id = *chain_id,
            Event::AccountsChanged(Some(accounts)) if !accounts.is_empty() => {
                self.accounts = Some(accounts.clone())
            }
            Event::AccountsChanged(_) => {
                self.wallet = None;
                self.accounts = None;
            }
        }
    }

    /// Waits for the next wallet event
    pub async fn next(&self) -> Option<Event> {
        self.events.lock().await.recv().await
    }

    async fn attach(&mut self, how: AccountRequest) -> Result<bool, EthereumError> {
        if !self.injected_available() {
            return Err(EthereumError::Unavailable);
        }

        let injected = Eip1193::new();
        let accounts: Vec<Address> = injected.request(how.method(), ()).await?;
        debug!("{} returned {:?}", how.method(), accounts);
        if accounts.is_empty() {
            debug!("No accounts found");
            return Ok(false);
        }
        let chain_id: U256 = injected.request("eth_chainId", ()).await?;

        if !self.subscribed.load(Ordering::Relaxed) {
            self.subscribe(&injected)?;
            self.subscribed.store(true, Ordering::Relaxed);
        }
        self.wallet = Some(injected);
        self.accounts = Some(accounts);
        self.chain_id = Some(chain_id.low_u64());

        self.emit_event(Event::Connected);
        self.emit_event(Event::ChainIdChanged(self.chain_id));
        self.emit_event(Event::AccountsChanged(self.accounts.clone()));

        Ok(true)
    }

    fn subscribe(&self, injected: &Eip1193) -> Result<(), EthereumError> {
        {
            let emitter = self.emitter.clone();
            injected.on(
                WalletEvent::Disconnect,
                Box::new(move |_| {
                    _ = emitter.send(Event::Disconnected);
                }),
            )?;
        }
        {
            let emitter = self.emitter.clone();
            injected.on(
                WalletEvent::ChainChanged,
                Box::new(move |chain_id| {
                    let chain_id = chain_id.into_serde::<U256>().ok().map(|c| c.low_u64());
                    _ = emitter.send(Event::ChainIdChanged(chain_id));
                }),
            )?;
        }
        {
            let emitter = self.emitter.clone();
            injected.on(
                WalletEvent::AccountsChanged,
                Box::new(move |accounts| {
                    let accounts = accounts.into_serde::<Vec<Address>>().ok();
                    // MetaMask reports a locked wallet as an empty account list
                    let event = match accounts {
                        Some(a) if a.is_empty() => Event::AccountsChanged(None),
                        a => Event::AccountsChanged(a),
                    };
                    _ = emitter.send(event);
                }),
            )?;
        }
        Ok(())
    }

    fn emit_event(&self, event: Event) {
        if let Err(err) = self.emitter.send(event) {
            error!("Wallet event dropped {err:?}");
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl JsonRpcClient for Ethereum {
    type Error = EthereumError;

    /// Forwards to the connected wallet. Read-only calls go through the
    /// injected object even before the user connects.
    async fn request<T, R>(&self, method: &str, params: T) -> Result<R, Self::Error>
    where
        T: Debug + Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        match &self.wallet {
            Some(provider) => Ok(provider.request(method, params).await?),
            None if self.injected_available() => Ok(Eip1193::new().request(method, params).await?),
            None => Err(EthereumError::Unavailable),
        }
    }
}
