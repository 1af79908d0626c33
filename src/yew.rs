use crate::{
    client::TransactionsClient,
    config::TransactionsConfig,
    error::TransactionError,
    storage,
    transaction::{FormData, FormField, StructuredTransaction},
    Ethereum,
};
use ethers::types::Address;
use gloo::{dialogs::alert, utils::window};
use log::{debug, error, info};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::{
    function_component, html, platform::spawn_local, prelude::*,
    Children, ContextProvider, Html, Properties,
};

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Falls back to `TransactionsConfig::default()`
    #[prop_or_default]
    pub config: Option<TransactionsConfig>,
    #[prop_or_default]
    pub children: Children,
}

/// Wrap your app in it to reach the wallet and the contract through
/// `use_context::<UseTransactions>()`
#[function_component(TransactionContextProvider)]
pub fn transaction_context_provider(props: &Props) -> Html {
    let transactions = use_transactions(props.config.clone().unwrap_or_default());

    html! {
        <ContextProvider<UseTransactions> context={transactions}>
            {for props.children.iter()}
        </ContextProvider<UseTransactions>>
    }
}

/// One edit of the transfer form
pub struct FormChange {
    pub field: FormField,
    pub value: String,
}

impl Reducible for FormData {
    type Action = FormChange;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut form = (*self).clone();
        form.set(action.field, action.value);
        Rc::new(form)
    }
}

#[derive(Clone, Debug)]
pub struct UseTransactions {
    pub ethereum: UseStateHandle<Ethereum>,
    pub current_account: UseStateHandle<Option<Address>>,
    pub chain_id: UseStateHandle<Option<u64>>,
    pub form_data: UseReducerHandle<FormData>,
    pub is_loading: UseStateHandle<bool>,
    pub transaction_count: UseStateHandle<Option<u64>>,
    pub transactions: UseStateHandle<Vec<StructuredTransaction>>,
    config: Rc<TransactionsConfig>,
}

impl PartialEq for UseTransactions {
    fn eq(&self, other: &Self) -> bool {
        self.ethereum == other.ethereum
            && self.current_account == other.current_account
            && self.chain_id == other.chain_id
            && self.form_data == other.form_data
            && self.is_loading == other.is_loading
            && self.transaction_count == other.transaction_count
            && self.transactions == other.transactions
            && self.config == other.config
    }
}

impl UseTransactions {
    pub fn config(&self) -> &TransactionsConfig {
        &self.config
    }

    /// Client bound to the current wallet session
    pub fn client(&self) -> TransactionsClient {
        TransactionsClient::new((*self.ethereum).clone(), (*self.config).clone())
    }

    /// Checks if the page has an authorized account
    pub fn is_connected(&self) -> bool {
        self.current_account.is_some()
    }

    pub fn current_account(&self) -> Option<Address> {
        *self.current_account
    }

    pub fn chain_id(&self) -> Option<u64> {
        *self.chain_id
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    /// True from the moment the transfer is broadcast until it is mined
    pub fn is_loading(&self) -> bool {
        *self.is_loading
    }

    pub fn transaction_count(&self) -> Option<u64> {
        *self.transaction_count
    }

    pub fn transactions(&self) -> &[StructuredTransaction] {
        &self.transactions
    }

    /// Replaces one field of the transfer form
    pub fn handle_change(&self, field: FormField, value: String) {
        self.form_data.dispatch(FormChange { field, value });
    }

    /// `oninput` handler bound to one field of the transfer form
    pub fn on_input(&self, field: FormField) -> Callback<InputEvent> {
        let form_data = self.form_data.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form_data.dispatch(FormChange { field, value: input.value() });
        })
    }

    /// Asks the wallet for accounts, prompting the user
    pub fn connect_wallet(&self) {
        let mut eth = (*self.ethereum).clone();
        if !eth.injected_available() {
            alert(&self.config.install_prompt);
            return;
        }

        let this = self.clone();
        spawn_local(async move {
            match eth.connect().await {
                Ok(()) => this.adopt(eth),
                Err(err) => error!("Wallet connection failed: {err}"),
            }
        });
    }

    /// Sends the form as a transfer from the current account
    pub fn send_transaction(&self) {
        let Some(from) = self.current_account() else {
            error!("{}", TransactionError::NoAccount);
            return;
        };

        let client = self.client();
        let form = (*self.form_data).clone();
        let is_loading = self.is_loading.clone();
        let transaction_count = self.transaction_count.clone();
        let reload = self.config.reload_after_send;
        spawn_local(async move {
            let loading = is_loading.clone();
            let result = client.send_transaction(from, &form, move |_| loading.set(true)).await;
            is_loading.set(false);

            match result {
                Ok(count) => {
                    transaction_count.set(Some(count));
                    if reload {
                        if let Err(err) = window().location().reload() {
                            error!("Page reload failed {err:?}");
                        }
                    }
                }
                Err(err) => error!("Transaction failed: {err}"),
            }
        });
    }

    /// Reloads the list of recorded transfers
    pub fn get_all_transactions(&self) {
        let client = self.client();
        let transactions = self.transactions.clone();
        spawn_local(async move {
            match client.get_all_transactions().await {
                Ok(list) => transactions.set(list),
                Err(err) => error!("Fetching transactions failed: {err}"),
            }
        });
    }

    fn check_if_wallet_is_connected(&self) {
        let mut eth = (*self.ethereum).clone();
        if !eth.injected_available() {
            alert(&self.config.install_prompt);
            return;
        }

        let this = self.clone();
        spawn_local(async move {
            match eth.restore().await {
                Ok(true) => {
                    this.adopt(eth.clone());
                    let client = TransactionsClient::new(eth, (*this.config).clone());
                    match client.get_all_transactions().await {
                        Ok(list) => this.transactions.set(list),
                        Err(err) => error!("Fetching transactions failed: {err}"),
                    }
                }
                Ok(false) => info!("No accounts found"),
                Err(err) => error!("Wallet check failed: {err}"),
            }
        });
    }

    fn check_if_transactions_exists(&self) {
        let client = self.client();
        spawn_local(async move {
            match client.sync_transaction_count().await {
                Ok(Some(count)) => debug!("{count} transactions recorded"),
                Ok(None) => {}
                Err(err) => error!("Reading transaction count failed: {err}"),
            }
        });
    }

    fn adopt(&self, eth: Ethereum) {
        self.current_account.set(eth.current_account());
        self.chain_id.set(eth.chain_id());
        self.ethereum.set(eth);
    }
}

#[hook]
pub fn use_transactions(config: TransactionsConfig) -> UseTransactions {
    let config = use_memo(config, |config| config.clone());
    let ethereum = use_state(Ethereum::new);
    let current_account = use_state(|| None as Option<Address>);
    let chain_id = use_state(|| None as Option<u64>);
    let form_data = use_reducer(FormData::default);
    let is_loading = use_state(|| false);
    let transaction_count = use_state(storage::load_transaction_count);
    let transactions = use_state(Vec::<StructuredTransaction>::new);

    {
        // clones share the event channel, so the initial session sees every
        // event and replaying them keeps it in step with the wallet
        let mut session = (*ethereum).clone();
        let eth = ethereum.clone();
        let acc = current_account.clone();
        let cid = chain_id.clone();
        yew_hooks::use_effect_once(move || {
            spawn_local(async move {
                while let Some(event) = session.next().await {
                    debug!("Wallet event {event:?}");
                    session.apply(&event);
                    acc.set(session.current_account());
                    cid.set(session.chain_id());
                    eth.set(session.clone());
                }
                debug!("Listener loop ended");
            });
            || {}
        });
    }

    let this = UseTransactions {
        ethereum,
        current_account,
        chain_id,
        form_data,
        is_loading,
        transaction_count,
        transactions,
        config,
    };

    {
        let this = this.clone();
        use_effect_with(*this.transaction_count, move |_| {
            this.check_if_wallet_is_connected();
            this.check_if_transactions_exists();
        });
    }

    this
}
