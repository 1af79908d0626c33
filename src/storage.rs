//! Transaction count mirrored in `localStorage`, so a reload starts from the
//! last known value before the contract answers.

use gloo_storage::{errors::StorageError, LocalStorage, Storage};

pub const TRANSACTION_COUNT_KEY: &str = "transactionCount";

pub fn load_transaction_count() -> Option<u64> {
    LocalStorage::get(TRANSACTION_COUNT_KEY).ok()
}

pub fn store_transaction_count(count: u64) -> Result<(), StorageError> {
    LocalStorage::set(TRANSACTION_COUNT_KEY, count)
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn stored_count_is_loaded_back() {
        store_transaction_count(12).unwrap();

        assert_eq!(load_transaction_count(), Some(12));
    }

    #[wasm_bindgen_test]
    fn count_written_as_plain_string_is_readable() {
        // what a JS page writes with `localStorage.setItem(key, 7)`
        LocalStorage::raw().set_item(TRANSACTION_COUNT_KEY, "7").unwrap();

        assert_eq!(load_transaction_count(), Some(7));
    }

    #[wasm_bindgen_test]
    fn garbage_is_ignored() {
        LocalStorage::raw().set_item(TRANSACTION_COUNT_KEY, "null").unwrap();

        assert_eq!(load_transaction_count(), None);
    }
}
