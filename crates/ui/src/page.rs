//! Live DOM implementation of the tracker's `Page` seam.

use std::rc::Rc;

use services::Page;
use tracing::{debug, warn};
use tracker_core::TrackerConfig;
use tracker_core::model::Progress;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, NodeList};

use crate::markup;

/// The generated resource page, addressed through the configured selectors.
#[derive(Clone)]
pub struct WebPage {
    document: Document,
    config: Rc<TrackerConfig>,
    checkbox_selector: String,
    indicator_selector: String,
}

impl WebPage {
    #[must_use]
    pub fn new(document: Document, config: Rc<TrackerConfig>) -> Self {
        let checkbox_selector = markup::class_selector(&config.classes.checkbox);
        let indicator_selector = markup::class_selector(&config.classes.indicator);
        Self {
            document,
            config,
            checkbox_selector,
            indicator_selector,
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn create<T: JsCast>(&self, tag: &str) -> Option<T> {
        match self.document.create_element(tag) {
            Ok(element) => element.dyn_into::<T>().ok(),
            Err(err) => {
                warn!(tag, error = ?err, "element creation failed");
                None
            }
        }
    }
}

fn first(scope: &Element, selector: &str) -> Option<Element> {
    match scope.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            warn!(selector, error = ?err, "invalid selector");
            None
        }
    }
}

fn all<T: JsCast>(result: Result<NodeList, JsValue>, selector: &str) -> Vec<T> {
    match result {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<T>().ok())
            .collect(),
        Err(err) => {
            warn!(selector, error = ?err, "invalid selector");
            Vec::new()
        }
    }
}

impl Page for WebPage {
    type Row = Element;
    type Section = Element;
    type Checkbox = HtmlInputElement;
    type Indicator = Element;
    type Control = HtmlButtonElement;

    fn rows(&self) -> Vec<Element> {
        let selector = &self.config.selectors.row;
        all(self.document.query_selector_all(selector), selector)
    }

    fn sections(&self) -> Vec<Element> {
        let selector = &self.config.selectors.section;
        all(self.document.query_selector_all(selector), selector)
    }

    fn row_id(&self, row: &Element) -> Option<String> {
        let id = row.id();
        (!id.is_empty()).then_some(id)
    }

    fn row_checkbox(&self, row: &Element) -> Option<HtmlInputElement> {
        first(row, &self.checkbox_selector)?.dyn_into().ok()
    }

    fn insert_checkbox(
        &self,
        row: &Element,
        element_id: &str,
        checked: bool,
    ) -> Option<HtmlInputElement> {
        let cell = first(row, &self.config.selectors.cell)?;
        let target = first(&cell, &self.config.selectors.insertion_target)?;

        let checkbox: HtmlInputElement = self.create("input")?;
        checkbox.set_type("checkbox");
        checkbox.set_class_name(&self.config.classes.checkbox);
        checkbox.set_id(element_id);
        checkbox.set_checked(checked);

        match target.insert_before(&checkbox, target.first_child().as_ref()) {
            Ok(_) => Some(checkbox),
            Err(err) => {
                warn!(element_id, error = ?err, "checkbox insertion failed");
                None
            }
        }
    }

    fn is_checked(&self, checkbox: &HtmlInputElement) -> bool {
        checkbox.checked()
    }

    fn set_checked(&self, checkbox: &HtmlInputElement, checked: bool) {
        checkbox.set_checked(checked);
    }

    fn owning_row(&self, checkbox: &HtmlInputElement) -> Option<Element> {
        checkbox.closest(&self.config.selectors.row).ok().flatten()
    }

    fn set_completed(&self, row: &Element, completed: bool) {
        let classes = row.class_list();
        let class = &self.config.classes.completed;
        let result = if completed {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        if let Err(err) = result {
            warn!(class = %class, error = ?err, "class toggle failed");
        }
    }

    fn section_checkboxes(&self, section: &Element) -> Vec<HtmlInputElement> {
        all(
            section.query_selector_all(&self.checkbox_selector),
            &self.checkbox_selector,
        )
    }

    fn all_checkboxes(&self) -> Vec<HtmlInputElement> {
        all(
            self.document.query_selector_all(&self.checkbox_selector),
            &self.checkbox_selector,
        )
    }

    fn find_indicator(&self, section: &Element) -> Option<Element> {
        first(section, &self.indicator_selector)
    }

    fn attach_indicator(&self, section: &Element) -> Option<Element> {
        let header = first(section, &self.config.selectors.section_header)?;
        let Some(next) = header.next_sibling() else {
            debug!("section header is the last child; indicator not placed");
            return None;
        };
        let parent = header.parent_node()?;

        let container: Element = self.create("div")?;
        container.set_class_name(&self.config.classes.indicator);
        container.set_inner_html(markup::INDICATOR_HTML);
        parent.insert_before(&container, Some(&next)).ok()?;
        Some(container)
    }

    fn update_indicator(&self, indicator: &Element, progress: Progress) {
        let percent = progress.percent_label();
        if let Some(fill) = first(indicator, markup::FILL_SELECTOR)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            if let Err(err) = fill.style().set_property("width", &percent) {
                warn!(error = ?err, "indicator width update failed");
            }
            fill.set_text_content(Some(&percent));
        }
        if let Some(count) = first(indicator, markup::COUNT_SELECTOR) {
            count.set_text_content(Some(&progress.count_label()));
        }
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn attach_reset_control(&self, label: &str) -> Option<HtmlButtonElement> {
        let Some(host) = self
            .document
            .get_element_by_id(&self.config.selectors.reset_container_id)
        else {
            debug!(
                id = %self.config.selectors.reset_container_id,
                "reset container missing"
            );
            return None;
        };

        let wrapper: HtmlElement = self.create("div")?;
        wrapper.style().set_css_text(markup::RESET_CONTAINER_STYLE);

        let button: HtmlButtonElement = self.create("button")?;
        button.set_text_content(Some(label));
        button.set_class_name(markup::RESET_BUTTON_CLASS);
        button.style().set_css_text(markup::RESET_BUTTON_STYLE);

        wrapper.append_child(&button).ok()?;
        host.append_child(&wrapper).ok()?;
        Some(button)
    }
}
