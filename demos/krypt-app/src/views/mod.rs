pub mod button_connect;
pub mod transaction_form;
pub mod transaction_list;

use ethers::types::Address;

/// `0x1234...abcd`
pub(crate) fn shorten_address(address: &Address) -> String {
    let full = format!("{address:?}");
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
