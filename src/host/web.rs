//! Browser host: drives animators with `window.setTimeout`.
//!
//! Each mounted animation owns one DOM element and at most one pending
//! timeout handle. The timeout callback holds only a weak reference to the
//! mount, so a dropped animation can never be ticked, and an unmounted one
//! ignores a timeout that was already queued.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;
use web_time::Duration;

use super::mount::{Mount, MountTarget};
use crate::animation::{Frame, TextAnimator};
use crate::options::{RevealOptions, TypewriterOptions};

/// Install the panic hook and console logger when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// A DOM element plus the closure every timeout calls back into.
struct DomTarget {
    element: Element,
    callback: Option<Closure<dyn FnMut()>>,
}

impl MountTarget for DomTarget {
    type Error = JsValue;

    fn render(&mut self, frame: &Frame) {
        self.element.set_text_content(Some(&frame.text));
        if let Err(e) = self
            .element
            .set_attribute("data-caret", frame.caret.as_str())
        {
            log::warn!("failed to set caret attribute: {e:?}");
        }
    }

    fn set_timeout(&mut self, delay: Duration) -> Result<i32, JsValue> {
        let callback = self
            .callback
            .as_ref()
            .ok_or_else(|| JsValue::from_str("timeout callback missing"))?;
        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis,
        )
    }

    fn clear_timeout(&mut self, handle: i32) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(handle);
        }
    }
}

/// Shared plumbing behind the exported types.
struct WebAnimation {
    mount: Rc<RefCell<Mount<DomTarget>>>,
}

impl WebAnimation {
    fn mount(
        element: Element,
        animator: Box<dyn TextAnimator>,
    ) -> Result<Self, JsValue> {
        let mount = Rc::new(RefCell::new(Mount::new(
            animator,
            DomTarget {
                element,
                callback: None,
            },
        )));

        let weak = Rc::downgrade(&mount);
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(mount) = weak.upgrade() {
                let mut m = mount.borrow_mut();
                if let Err(e) = m.on_timeout() {
                    log::error!("failed to schedule {} tick: {e:?}", m.name());
                }
            }
        });

        {
            let mut m = mount.borrow_mut();
            m.target_mut().callback = Some(callback);
            m.start()?;
            log::debug!("mounted {} animation", m.name());
        }
        Ok(Self { mount })
    }

    fn set_visible(&self, visible: bool) -> Result<(), JsValue> {
        self.mount.borrow_mut().set_visible(visible)
    }

    fn text(&self) -> String {
        self.mount.borrow().text().to_owned()
    }

    fn unmount(&self) {
        let mut m = self.mount.borrow_mut();
        if m.unmount() {
            m.target_mut().callback = None;
            log::debug!("unmounted {} animation", m.name());
        }
    }
}

fn parse_options<T>(json: &str) -> Result<T, JsValue>
where
    T: Default + serde::de::DeserializeOwned,
{
    if json.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Hero headline typewriter bound to a DOM element.
#[wasm_bindgen]
pub struct WebTypewriter {
    animation: WebAnimation,
}

#[wasm_bindgen]
impl WebTypewriter {
    /// Start typing into `element`. `options_json` is a JSON object with
    /// the `[hero]` option fields; an empty string uses the defaults.
    ///
    /// # Errors
    ///
    /// Returns a JS error if the options are not valid JSON or no window
    /// is available.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: Element,
        options_json: &str,
    ) -> Result<WebTypewriter, JsValue> {
        let options: TypewriterOptions = parse_options(options_json)?;
        Ok(Self {
            animation: WebAnimation::mount(element, options.build_animator())?,
        })
    }

    /// Text currently shown.
    #[must_use]
    pub fn text(&self) -> String {
        self.animation.text()
    }

    /// Cancel the pending timeout. Safe to call repeatedly.
    pub fn unmount(&self) {
        self.animation.unmount();
    }
}

impl Drop for WebTypewriter {
    fn drop(&mut self) {
        self.animation.unmount();
    }
}

/// About-section reveal bound to a DOM element.
#[wasm_bindgen]
pub struct WebReveal {
    animation: WebAnimation,
}

#[wasm_bindgen]
impl WebReveal {
    /// Prepare the reveal in `element`; it starts on the first
    /// `set_visible(true)`. `options_json` holds the `[about]` option
    /// fields; an empty string uses the defaults.
    ///
    /// # Errors
    ///
    /// Returns a JS error if the options are not valid JSON or no window
    /// is available.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: Element,
        options_json: &str,
    ) -> Result<WebReveal, JsValue> {
        let options: RevealOptions = parse_options(options_json)?;
        Ok(Self {
            animation: WebAnimation::mount(element, options.build_animator())?,
        })
    }

    /// Forward the viewport level, typically from an
    /// `IntersectionObserver` callback.
    ///
    /// # Errors
    ///
    /// Returns a JS error if the first tick cannot be scheduled.
    pub fn set_visible(&self, visible: bool) -> Result<(), JsValue> {
        self.animation.set_visible(visible)
    }

    /// Text currently shown.
    #[must_use]
    pub fn text(&self) -> String {
        self.animation.text()
    }

    /// Cancel the pending timeout. Safe to call repeatedly.
    pub fn unmount(&self) {
        self.animation.unmount();
    }
}

impl Drop for WebReveal {
    fn drop(&mut self) {
        self.animation.unmount();
    }
}
