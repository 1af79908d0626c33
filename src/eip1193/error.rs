use ethers::prelude::{JsonRpcError, ProviderError, RpcError};
use gloo_utils::format::JsValueSerdeExt;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while talking to the injected wallet
#[derive(Error, Debug)]
pub enum Eip1193Error {
    /// The wallet threw something that is not a JSON-RPC error object
    #[error("JsValue error: {0}")]
    JsValueError(String),

    /// No `window.ethereum` in the page
    #[error("No ethereum object")]
    JsNoEthereum,

    /// The wallet rejected the request, e.g. the user dismissed the prompt
    #[error(transparent)]
    JsonRpcError(#[from] JsonRpcError),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error("Communication error")]
    CommunicationError,
}

impl RpcError for Eip1193Error {
    fn as_error_response(&self) -> Option<&JsonRpcError> {
        match self {
            Eip1193Error::JsonRpcError(e) => Some(e),
            _ => None,
        }
    }

    fn is_error_response(&self) -> bool {
        self.as_error_response().is_some()
    }

    fn as_serde_error(&self) -> Option<&serde_json::Error> {
        match self {
            Eip1193Error::SerdeJson(e) => Some(e),
            _ => None,
        }
    }

    fn is_serde_error(&self) -> bool {
        self.as_serde_error().is_some()
    }
}

impl From<JsValue> for Eip1193Error {
    fn from(src: JsValue) -> Self {
        match src.into_serde::<JsonRpcError>() {
            Ok(rpc_error) => Eip1193Error::JsonRpcError(rpc_error),
            Err(_) => Eip1193Error::JsValueError(format!("{:?}", src)),
        }
    }
}

impl From<Eip1193Error> for ProviderError {
    fn from(src: Eip1193Error) -> Self {
        ProviderError::JsonRpcClientError(Box::new(src))
    }
}
