use crate::views::shorten_address;
use transactions_web::yew::UseTransactions;
use yew::prelude::*;

#[function_component(WalletButton)]
pub fn wallet_button() -> Html {
    let transactions = use_context::<UseTransactions>().expect(
        "No transactions context found. You must wrap your components in a <TransactionContextProvider />",
    );

    let onclick = {
        let transactions = transactions.clone();
        Callback::from(move |_: MouseEvent| transactions.connect_wallet())
    };

    match transactions.current_account() {
        Some(account) => html! {
            <p class="account">{shorten_address(&account)}</p>
        },
        None => html! {
            <button {onclick}>{"Connect wallet"}</button>
        },
    }
}
