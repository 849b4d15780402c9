//! WebAssembly core for the Loto number generator.
//!
//! Draws a configurable number of distinct balls with a staged reveal,
//! keeps a per-session ledger of draws and their win/loss outcomes, and
//! exposes it all to the JS view through wasm-bindgen. Monetary values cross
//! the boundary as plain numbers; records, stats and the form state as
//! serde-serialized objects.

pub mod config;
pub mod draw;
pub mod error;
pub mod ledger;
pub mod manifest;
pub mod money;
pub mod notify;
pub mod reveal;
pub mod rng;
pub mod session;
pub mod types;
pub mod workflow;

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use std::cell::RefCell;
    use std::fmt::Display;
    use std::future::Future;
    use std::rc::Rc;
    use std::time::Duration;

    use serde::Serialize;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;

    use crate::config::{DrawConfig, RevealTiming};
    use crate::manifest::AppManifest;
    use crate::money::Money;
    use crate::notify::IntlFormatter;
    use crate::reveal::{run_reveal, Timer};
    use crate::session::{Session, SessionStep};
    use crate::types::RecordId;
    use crate::workflow::ResultChoice;

    #[wasm_bindgen(start)]
    pub fn init() {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        console_log::init_with_level(log::Level::Debug).ok();
        log::info!("[Loto WASM] Initialized");
    }

    fn js_err<E: Display>(e: E) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(value).map_err(js_err)
    }

    fn parse_id(id: &str) -> Result<RecordId, JsValue> {
        RecordId::parse(id).ok_or_else(|| JsValue::from_str(&format!("Invalid record id: {}", id)))
    }

    /// `setTimeout` wrapped in a promise.
    struct BrowserTimer;

    impl Timer for BrowserTimer {
        fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
            let ms = duration.as_millis().min(i32::MAX as u128) as i32;
            let promise = js_sys::Promise::new(&mut |resolve, _reject| {
                let scheduled = web_sys::window().map(|w| {
                    w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                });
                if !matches!(scheduled, Some(Ok(_))) {
                    log::warn!("[Loto WASM] setTimeout unavailable, revealing without delay");
                    let _ = resolve.call0(&JsValue::NULL);
                }
            });
            async move {
                let _ = JsFuture::from(promise).await;
            }
        }
    }

    /// Session handle held by the page.
    #[wasm_bindgen]
    pub struct LotoSession {
        inner: Rc<RefCell<Session>>,
    }

    #[wasm_bindgen]
    impl LotoSession {
        #[wasm_bindgen(constructor)]
        pub fn new() -> LotoSession {
            let session = Session::new().with_formatter(Box::new(IntlFormatter::default()));
            LotoSession {
                inner: Rc::new(RefCell::new(session)),
            }
        }

        /// Session with a custom reveal interval (milliseconds).
        #[wasm_bindgen(js_name = "withRevealInterval")]
        pub fn with_reveal_interval(ms: u32) -> LotoSession {
            let session = Session::new()
                .with_timing(RevealTiming::from_millis(ms as u64))
                .with_formatter(Box::new(IntlFormatter::default()));
            LotoSession {
                inner: Rc::new(RefCell::new(session)),
            }
        }

        /// `{ count, maxNumber, wager }`
        #[wasm_bindgen(getter)]
        pub fn config(&self) -> Result<JsValue, JsValue> {
            to_js(self.inner.borrow().config())
        }

        #[wasm_bindgen(js_name = "setConfig")]
        pub fn set_config(&self, config: JsValue) -> Result<(), JsValue> {
            let config: DrawConfig = serde_wasm_bindgen::from_value(config).map_err(js_err)?;
            self.inner.borrow_mut().set_config(config).map_err(js_err)
        }

        #[wasm_bindgen(getter, js_name = "isDrawing")]
        pub fn is_drawing(&self) -> bool {
            self.inner.borrow().is_drawing()
        }

        #[wasm_bindgen(getter, js_name = "currentNumbers")]
        pub fn current_numbers(&self) -> Vec<u32> {
            self.inner.borrow().current_numbers().to_vec()
        }

        /// Run a draw with the staged reveal.
        ///
        /// `onProgress(numbers)` fires after each new number. The promise
        /// resolves to `{ record, notification }` once the draw is in the
        /// ledger, or rejects if a draw is already running.
        pub fn generate(&self, on_progress: Option<js_sys::Function>) -> js_sys::Promise {
            let inner = self.inner.clone();
            wasm_bindgen_futures::future_to_promise(async move {
                let mut finished = None;
                let record = run_reveal(&inner, &BrowserTimer, |step| match step {
                    SessionStep::Revealed { numbers, .. } => {
                        if let Some(callback) = &on_progress {
                            let arr: js_sys::Array =
                                numbers.iter().map(|&n| JsValue::from(n)).collect();
                            if let Err(e) = callback.call1(&JsValue::NULL, &arr) {
                                log::warn!("[Loto WASM] onProgress threw: {:?}", e);
                            }
                        }
                    }
                    SessionStep::Finished { notification, .. } => {
                        finished = Some(notification.clone());
                    }
                })
                .await
                .map_err(js_err)?;

                #[derive(Serialize)]
                struct Generated<'a> {
                    record: &'a crate::types::DrawRecord,
                    notification: Option<crate::notify::Notification>,
                }
                to_js(&Generated {
                    record: &record,
                    notification: finished,
                })
            })
        }

        /// Full snapshot: config, drawing flag, current numbers, records,
        /// stats and form state.
        pub fn view(&self) -> Result<JsValue, JsValue> {
            to_js(&self.inner.borrow().view())
        }

        pub fn stats(&self) -> Result<JsValue, JsValue> {
            to_js(&self.inner.borrow().stats())
        }

        #[wasm_bindgen(js_name = "openOutcome")]
        pub fn open_outcome(&self, id: &str) -> Result<(), JsValue> {
            let id = parse_id(id)?;
            self.inner.borrow_mut().open_outcome(&id).map_err(js_err)
        }

        #[wasm_bindgen(js_name = "chooseWin")]
        pub fn choose_win(&self, win: bool) -> Result<(), JsValue> {
            let choice = if win { ResultChoice::Win } else { ResultChoice::Loss };
            self.inner.borrow_mut().choose_result(choice).map_err(js_err)
        }

        #[wasm_bindgen(js_name = "setGain")]
        pub fn set_gain(&self, gain: f64) -> Result<(), JsValue> {
            let gain = Money::try_from(gain).map_err(js_err)?;
            self.inner.borrow_mut().set_gain(gain).map_err(js_err)
        }

        #[wasm_bindgen(js_name = "cancelOutcome")]
        pub fn cancel_outcome(&self) {
            self.inner.borrow_mut().cancel_outcome();
        }

        /// Resolves to the notification to show, or `null` if nothing changed.
        #[wasm_bindgen(js_name = "submitOutcome")]
        pub fn submit_outcome(&self) -> Result<JsValue, JsValue> {
            let recorded = self.inner.borrow_mut().submit_outcome().map_err(js_err)?;
            match recorded {
                Some(recorded) => to_js(&recorded.notification),
                None => Ok(JsValue::NULL),
            }
        }

        /// Format an amount the way the session does in its notifications.
        #[wasm_bindgen(js_name = "formatMoney")]
        pub fn format_money(&self, amount: f64) -> Result<String, JsValue> {
            let amount = Money::try_from(amount).map_err(js_err)?;
            Ok(self.inner.borrow().format_money(amount))
        }
    }

    impl Default for LotoSession {
        fn default() -> Self {
            Self::new()
        }
    }

    #[wasm_bindgen(js_name = "manifestJson")]
    pub fn manifest_json() -> Result<String, JsValue> {
        AppManifest::loto().to_json().map_err(js_err)
    }

    #[wasm_bindgen(js_name = "version")]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
