use crate::views::shorten_address;
use transactions_web::{yew::UseTransactions, StructuredTransaction};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct CardProps {
    transaction: StructuredTransaction,
}

#[function_component(TransactionCard)]
fn transaction_card(props: &CardProps) -> Html {
    let tx = &props.transaction;
    html! {
        <li class="transaction">
            <p>{format!("From: {}", shorten_address(&tx.address_from))}</p>
            <p>{format!("To: {}", shorten_address(&tx.address_to))}</p>
            <p>{format!("Amount: {} ETH", tx.amount)}</p>
            if !tx.message.is_empty() {
                <p>{format!("Message: {}", tx.message)}</p>
            }
            <p class="keyword">{tx.keyword.clone()}</p>
            <p class="timestamp">{tx.timestamp.clone()}</p>
        </li>
    }
}

#[function_component(TransactionList)]
pub fn transaction_list() -> Html {
    let transactions = use_context::<UseTransactions>().expect(
        "No transactions context found. You must wrap your components in a <TransactionContextProvider />",
    );

    let heading = if transactions.is_connected() {
        "Latest Transactions"
    } else {
        "Connect your account to see the latest transactions"
    };

    html! {
        <section>
            <h3>{heading}</h3>
            <ul>
                {for transactions.transactions().iter().rev().map(|tx| html! {
                    <TransactionCard transaction={tx.clone()} />
                })}
            </ul>
        </section>
    }
}
