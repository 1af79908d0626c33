use crate::eip1193::{error::Eip1193Error, request::Eip1193Request};
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsValue};

#[wasm_bindgen]
extern "C" {
    #[derive(Clone, Debug)]
    /// The object MetaMask (and compatible extensions) inject at `window.ethereum`
    pub(crate) type InjectedProvider;

    #[wasm_bindgen(catch, method)]
    pub(crate) async fn request(
        _: &InjectedProvider,
        args: Eip1193Request,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    pub(crate) fn on(
        _: &InjectedProvider,
        eventName: &str,
        listener: &Closure<dyn FnMut(JsValue)>,
    );
}

impl InjectedProvider {
    pub(crate) fn lookup() -> Result<Self, Eip1193Error> {
        match window_ethereum() {
            Ok(Some(provider)) => Ok(provider),
            _ => Err(Eip1193Error::JsNoEthereum),
        }
    }
}

#[wasm_bindgen(inline_js = "export function window_ethereum() { return window.ethereum }")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn window_ethereum() -> Result<Option<InjectedProvider>, JsValue>;
}
