use transactions_web::{yew::UseTransactions, FormField};
use yew::prelude::*;

#[function_component(TransactionForm)]
pub fn transaction_form() -> Html {
    let transactions = use_context::<UseTransactions>().expect(
        "No transactions context found. You must wrap your components in a <TransactionContextProvider />",
    );
    let form = transactions.form_data().clone();

    let onsubmit = {
        let transactions = transactions.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = transactions.form_data();
            if form.address_to.is_empty()
                || form.amount.is_empty()
                || form.keyword.is_empty()
                || form.message.is_empty()
            {
                return;
            }
            transactions.send_transaction();
        })
    };

    html! {
        <form {onsubmit}>
            <input placeholder="Address To" value={form.address_to}
                oninput={transactions.on_input(FormField::AddressTo)} />
            <input placeholder="Amount (ETH)" type="number" step="0.0001" value={form.amount}
                oninput={transactions.on_input(FormField::Amount)} />
            <input placeholder="Keyword (Gif)" value={form.keyword}
                oninput={transactions.on_input(FormField::Keyword)} />
            <input placeholder="Enter Message" value={form.message}
                oninput={transactions.on_input(FormField::Message)} />
            if transactions.is_loading() {
                <p class="loader">{"Loading..."}</p>
            } else {
                <button type="submit" disabled={!transactions.is_connected()}>{"Send now"}</button>
            }
        </form>
    }
}
