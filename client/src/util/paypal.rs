//! Interop with the PayPal JS SDK button widget.
//!
//! The SDK is loaded by a `<script>` tag in `index.html` and exposes
//! `window.paypal.Buttons(...)`. The widget creates and captures the order
//! itself; this module only hands it the order payload and reports the
//! captured order id (or the failure) back to Rust.

#[cfg(test)]
#[path = "paypal_test.rs"]
mod paypal_test;

/// Reference to record for a captured order: the capture id when present,
/// else the order id.
pub fn capture_reference(order: &serde_json::Value) -> Option<String> {
    let capture_id = order
        .pointer("/purchase_units/0/payments/captures/0/id")
        .and_then(serde_json::Value::as_str);
    capture_id
        .or_else(|| order.get("id").and_then(serde_json::Value::as_str))
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
}

/// Render the PayPal buttons into the element with id `container_id`.
///
/// `on_captured` receives the payment reference after a successful capture,
/// `on_cancel` runs when the guest closes the popup without paying, and
/// `on_error` receives a description of any SDK or capture failure.
///
/// # Errors
///
/// Returns an error string when the SDK is not loaded or rendering fails.
pub fn render_buttons<C, X, E>(
    container_id: &str,
    order: &serde_json::Value,
    on_captured: C,
    on_cancel: X,
    on_error: E,
) -> Result<(), String>
where
    C: Fn(String) + 'static,
    X: Fn() + 'static,
    E: Fn(String) + 'static,
{
    #[cfg(feature = "csr")]
    {
        use std::rc::Rc;

        use js_sys::{Function, JSON, Object, Promise, Reflect};
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::{JsCast, JsValue};

        let js_err = |e: JsValue| format!("{e:?}");
        let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
        let paypal = Reflect::get(&window, &JsValue::from_str("paypal")).map_err(js_err)?;
        if paypal.is_undefined() || paypal.is_null() {
            return Err("PayPal SDK is not loaded".to_owned());
        }
        let buttons: Function = Reflect::get(&paypal, &JsValue::from_str("Buttons"))
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| "paypal.Buttons is not a function".to_owned())?;
        let order_js = JSON::parse(&order.to_string()).map_err(js_err)?;

        // actions.order.<name>(arg)
        fn order_action(actions: &JsValue, name: &str, arg: &JsValue) -> Result<JsValue, JsValue> {
            let order = Reflect::get(actions, &JsValue::from_str("order"))?;
            let action: Function = Reflect::get(&order, &JsValue::from_str(name))?.dyn_into()?;
            action.call1(&order, arg)
        }

        let create_order = Closure::<dyn Fn(JsValue, JsValue) -> JsValue>::new(move |_data, actions: JsValue| {
            order_action(&actions, "create", &order_js).unwrap_or(JsValue::UNDEFINED)
        });

        let on_captured = Rc::new(on_captured);
        let on_error = Rc::new(on_error);
        let approve_error = Rc::clone(&on_error);
        let on_approve = Closure::<dyn Fn(JsValue, JsValue) -> JsValue>::new(move |_data, actions: JsValue| {
            let captured = Rc::clone(&on_captured);
            let failed = Rc::clone(&approve_error);
            let promise = match order_action(&actions, "capture", &JsValue::UNDEFINED).map(|v| v.dyn_into::<Promise>()) {
                Ok(Ok(promise)) => promise,
                _ => {
                    failed("capture could not start".to_owned());
                    return JsValue::UNDEFINED;
                }
            };
            let task = promise.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match wasm_bindgen_futures::JsFuture::from(task).await {
                    Ok(order) => {
                        let json = JSON::stringify(&order)
                            .ok()
                            .and_then(|s| s.as_string())
                            .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).ok());
                        match json.as_ref().and_then(capture_reference) {
                            Some(reference) => captured(reference),
                            None => failed("captured order has no id".to_owned()),
                        }
                    }
                    Err(e) => failed(format!("capture failed: {e:?}")),
                }
            });
            promise.into()
        });

        let on_cancel = Closure::<dyn Fn(JsValue)>::new(move |_data: JsValue| on_cancel());

        let sdk_error = Rc::clone(&on_error);
        let on_sdk_error = Closure::<dyn Fn(JsValue)>::new(move |e: JsValue| {
            sdk_error(format!("{e:?}"));
        });

        let config = Object::new();
        let style = Object::new();
        for (key, value) in [("color", "blue"), ("shape", "pill"), ("label", "pay")] {
            Reflect::set(&style, &JsValue::from_str(key), &JsValue::from_str(value)).map_err(js_err)?;
        }
        Reflect::set(&config, &JsValue::from_str("style"), &style).map_err(js_err)?;
        Reflect::set(&config, &JsValue::from_str("createOrder"), create_order.as_ref()).map_err(js_err)?;
        Reflect::set(&config, &JsValue::from_str("onApprove"), on_approve.as_ref()).map_err(js_err)?;
        Reflect::set(&config, &JsValue::from_str("onCancel"), on_cancel.as_ref()).map_err(js_err)?;
        Reflect::set(&config, &JsValue::from_str("onError"), on_sdk_error.as_ref()).map_err(js_err)?;

        // A retry after a cancelled popup renders into the same container.
        if let Some(container) = window.document().and_then(|d| d.get_element_by_id(container_id)) {
            container.set_inner_html("");
        }

        let instance = buttons.call1(&paypal, &config).map_err(js_err)?;
        let render: Function = Reflect::get(&instance, &JsValue::from_str("render"))
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| "buttons.render is not a function".to_owned())?;
        render
            .call1(&instance, &JsValue::from_str(&format!("#{container_id}")))
            .map_err(js_err)?;

        // The widget owns these callbacks for the rest of the page's life.
        create_order.forget();
        on_approve.forget();
        on_cancel.forget();
        on_sdk_error.forget();
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (container_id, order, on_captured, on_cancel, on_error);
        Err("PayPal buttons require a browser".to_owned())
    }
}
