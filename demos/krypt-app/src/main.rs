mod views;

use log::Level;
use transactions_web::yew::TransactionContextProvider;
use views::{
    button_connect::WalletButton, transaction_form::TransactionForm,
    transaction_list::TransactionList,
};
use yew::prelude::*;

#[function_component]
fn App() -> Html {
    html! {
        <TransactionContextProvider>
            <WalletButton />
            <TransactionForm />
            <TransactionList />
        </TransactionContextProvider>
    }
}

fn main() {
    _ = console_log::init_with_level(Level::Debug);
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
