//! Scriptable `window.ethereum` for browser tests. Answers each method with a
//! canned value, rejects unknown ones like a wallet does, and records every
//! request it receives.

use gloo_utils::format::JsValueSerdeExt;
use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::{prelude::wasm_bindgen, JsValue};

#[wasm_bindgen(inline_js = r#"
export function install_wallet(responses) {
    window.ethereum = {
        responses,
        calls: [],
        listeners: {},
        request(args) {
            const method = args.method;
            const params = args.params === undefined ? [] : args.params;
            this.calls.push({ method, params: JSON.parse(JSON.stringify(params)) });
            if (Object.prototype.hasOwnProperty.call(this.responses, method)) {
                return Promise.resolve(this.responses[method]);
            }
            return Promise.reject({ code: 4200, message: "Unsupported method " + method });
        },
        on(event, listener) {
            (this.listeners[event] = this.listeners[event] || []).push(listener);
        },
    };
}

export function uninstall_wallet() {
    delete window.ethereum;
}

export function set_wallet_response(method, value) {
    window.ethereum.responses[method] = value;
}

export function wallet_calls() {
    return JSON.stringify(window.ethereum ? window.ethereum.calls : []);
}

export function emit_wallet_event(event, payload) {
    (window.ethereum.listeners[event] || []).forEach((listener) => listener(payload));
}
"#)]
extern "C" {
    fn install_wallet(responses: JsValue);
    fn uninstall_wallet();
    fn set_wallet_response(method: &str, value: JsValue);
    fn wallet_calls() -> String;
    fn emit_wallet_event(event: &str, payload: JsValue);
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WalletCall {
    pub method: String,
    pub params: Value,
}

/// Installed on creation, removed again when dropped
pub(crate) struct TestWallet;

impl TestWallet {
    /// `responses` maps a method name to the value the wallet resolves with
    pub fn install(responses: Value) -> Self {
        install_wallet(JsValue::from_serde(&responses).unwrap());
        TestWallet
    }

    /// Makes sure no wallet is injected
    pub fn uninstall() {
        uninstall_wallet();
    }

    pub fn respond(&self, method: &str, value: Value) {
        set_wallet_response(method, JsValue::from_serde(&value).unwrap());
    }

    pub fn calls(&self) -> Vec<WalletCall> {
        serde_json::from_str(&wallet_calls()).unwrap()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.method).collect()
    }

    /// Fires a wallet event at the registered listeners
    pub fn emit(&self, event: &str, payload: Value) {
        emit_wallet_event(event, JsValue::from_serde(&payload).unwrap());
    }
}

impl Drop for TestWallet {
    fn drop(&mut self) {
        uninstall_wallet();
    }
}
