pub mod error;
pub(crate) mod ethereum;
pub mod request;
#[cfg(all(test, target_arch = "wasm32"))]
pub(crate) mod test_wallet;

use crate::{
    eip1193::{error::Eip1193Error, ethereum::InjectedProvider, request::Eip1193Request},
    event::WalletEvent,
};
use async_trait::async_trait;
use ethers::providers::JsonRpcClient;
use futures::channel::oneshot;
use gloo_utils::format::JsValueSerdeExt;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use wasm_bindgen::{closure::Closure, JsValue};
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, Default)]
// The injected object is a JS value and neither Send nor Sync, while
// `JsonRpcClient` demands both. wasm is single threaded anyway, so nothing is
// stored here and `window.ethereum` is looked up on every call.
pub struct Eip1193 {}

#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl JsonRpcClient for Eip1193 {
    type Error = Eip1193Error;

    /// Sends the request via `window.ethereum`
    async fn request<T, R>(&self, method: &str, params: T) -> Result<R, Self::Error>
    where
        T: Debug + Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        let (sender, receiver) = oneshot::channel();

        let payload = Eip1193Request::new(method, parse_params(params)?);
        spawn_local(async move {
            let res = match InjectedProvider::lookup() {
                Ok(ethereum) => match ethereum.request(payload).await {
                    Ok(r) => stringify(&r),
                    Err(e) => Err(e.into()),
                },
                Err(e) => Err(e),
            };
            _ = sender.send(res);
        });

        let res = receiver.await.map_err(|_| Eip1193Error::CommunicationError)?;
        Ok(serde_json::from_str(&res?)?)
    }
}

impl Eip1193 {
    pub fn is_available() -> bool {
        InjectedProvider::lookup().is_ok()
    }

    pub fn new() -> Self {
        Eip1193 {}
    }

    pub(crate) fn on(
        &self,
        event: WalletEvent,
        callback: Box<dyn FnMut(JsValue)>,
    ) -> Result<(), Eip1193Error> {
        let ethereum = InjectedProvider::lookup()?;
        let closure = Closure::wrap(callback);
        ethereum.on(event.as_str(), &closure);
        // the wallet keeps the listener for the lifetime of the page
        closure.forget();
        Ok(())
    }
}

fn stringify(value: &JsValue) -> Result<String, Eip1193Error> {
    // `undefined` (e.g. a void RPC result) does not stringify
    if value.is_undefined() {
        return Ok("null".to_string());
    }
    match js_sys::JSON::stringify(value) {
        Ok(s) => s.as_string().ok_or(Eip1193Error::JsValueError("not a string".to_string())),
        Err(err) => Err(err.into()),
    }
}

const TYPED_TRANSACTION_KEY: &str = "type";

/// MetaMask only understands the unpadded `0x1`..`0x3` form of the typed
/// transaction marker that ethers serializes as `0x01`..`0x03`.
fn normalize_tx_type(tx_type: &str) -> Option<&'static str> {
    match tx_type {
        "0x01" => Some("0x1"),
        "0x02" => Some("0x2"),
        "0x03" => Some("0x3"),
        _ => None,
    }
}

fn parse_params<T: Serialize>(params: T) -> Result<JsValue, Eip1193Error> {
    let t_params = JsValue::from_serde(&params)?;
    if t_params.is_null() || t_params.is_undefined() {
        return Ok(js_sys::Array::new().into());
    }

    let type_key = JsValue::from_str(TYPED_TRANSACTION_KEY);
    let mut error = None;
    let params: JsValue = js_sys::Array::from(&t_params)
        .map(&mut |val, _, _| {
            let Some(object) = js_sys::Object::try_from(&val) else {
                return val;
            };
            let tx_type = js_sys::Reflect::get(object, &type_key).ok().and_then(|t| t.as_string());
            let Some(normalized) = tx_type.as_deref().and_then(normalize_tx_type) else {
                return val;
            };
            let copy = object.clone();
            match js_sys::Reflect::set(&copy, &type_key, &JsValue::from_str(normalized)) {
                Ok(_) => copy.into(),
                Err(e) => {
                    error = Some(Eip1193Error::JsValueError(format!("{:?}", e)));
                    val
                }
            }
        })
        .into();

    match error {
        Some(e) => Err(e),
        None => Ok(params),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_tx_type;

    #[test]
    fn padded_transaction_types_are_normalized() {
        assert_eq!(normalize_tx_type("0x01"), Some("0x1"));
        assert_eq!(normalize_tx_type("0x02"), Some("0x2"));
        assert_eq!(normalize_tx_type("0x03"), Some("0x3"));
        assert_eq!(normalize_tx_type("0x2"), None);
        assert_eq!(normalize_tx_type("legacy"), None);
    }
}
