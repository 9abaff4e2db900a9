use crate::constants::START_OVERLAY_ID;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(START_OVERLAY_ID) {
        _ = el.class_list().remove_1("hidden");
        // fallback for pages without the .hidden rule
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(START_OVERLAY_ID) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}

/// A missing overlay counts as hidden.
pub fn is_hidden(document: &web::Document) -> bool {
    match document.get_element_by_id(START_OVERLAY_ID) {
        Some(el) => {
            el.class_list().contains("hidden")
                || el
                    .get_attribute("style")
                    .map(|s| s.contains("display:none"))
                    .unwrap_or(false)
        }
        None => true,
    }
}

pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}
