//! Browser host capabilities: DOM HUD and `requestAnimationFrame` scheduling

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use super::{FrameHandle, FrameScheduler};
use crate::ui::{UiSink, format_score};

/// Class toggled on the overlay to hide it
const HIDDEN_CLASS: &str = "hidden";

/// HUD backed by the page's score, lives and overlay elements
pub struct DomUi {
    document: Document,
    score: Element,
    lives: Element,
    overlay: Element,
    title: Element,
    message: Element,
}

impl DomUi {
    /// Look up the HUD elements by id
    pub fn new(document: Document) -> Result<Self, JsValue> {
        let find = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
        };
        Ok(Self {
            score: find("score")?,
            lives: find("lives-container")?,
            overlay: find("overlay")?,
            title: find("overlay-title")?,
            message: find("overlay-msg")?,
            document,
        })
    }
}

impl UiSink for DomUi {
    fn set_score(&mut self, score: u64) {
        self.score.set_text_content(Some(&format_score(score)));
    }

    fn set_lives(&mut self, lives: u8) {
        self.lives.set_inner_html("");
        for _ in 0..lives {
            match self.document.create_element("div") {
                Ok(dot) => {
                    dot.set_class_name("life-dot");
                    let _ = self.lives.append_child(&dot);
                }
                Err(e) => log::warn!("Failed to create life dot: {:?}", e),
            }
        }
    }

    fn show_overlay(&mut self, title: &str, message: &str) {
        self.title.set_text_content(Some(title));
        self.message.set_text_content(Some(message));
        let _ = self.overlay.class_list().remove_1(HIDDEN_CLASS);
    }

    fn hide_overlay(&mut self) {
        let _ = self.overlay.class_list().add_1(HIDDEN_CLASS);
    }
}

/// Shared slot for the frame callback; filled once the game exists
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` scheduler
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            log::warn!("Frame requested before the callback was installed");
            return None;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}
