use wasm_bindgen::{prelude::wasm_bindgen, JsValue};

/// `{ method, params }` argument of `window.ethereum.request`
#[wasm_bindgen]
#[derive(Debug)]
pub struct Eip1193Request {
    method: String,
    params: JsValue,
}

#[wasm_bindgen]
impl Eip1193Request {
    pub(crate) fn new(method: &str, params: JsValue) -> Eip1193Request {
        Eip1193Request { method: method.to_string(), params }
    }

    #[wasm_bindgen(getter)]
    pub fn method(&self) -> String {
        self.method.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn params(&self) -> JsValue {
        self.params.clone()
    }
}
