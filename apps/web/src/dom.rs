use std::rc::Rc;

use romi_dashboard_core::highlight::highlight_html;
use romi_dashboard_core::{navigate, ApiClient, Fragment, Node, Route, Surface};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event};

use crate::fetch::FetchSource;

/// Id of the element fragments are rendered into
pub const CONTENT_ID: &str = "content";

/// Renders fragments into `#content`. Cloning is cheap: every clone shares
/// the same document, element and client.
#[derive(Clone)]
pub struct DomSurface {
    document: Document,
    content: Element,
    client: Rc<ApiClient<FetchSource>>,
}

impl DomSurface {
    pub fn new(document: Document, client: Rc<ApiClient<FetchSource>>) -> Result<Self, JsValue> {
        let content = document
            .get_element_by_id(CONTENT_ID)
            .ok_or_else(|| JsValue::from_str("page has no #content element"))?;

        Ok(Self {
            document,
            content,
            client,
        })
    }

    /// Starts fetching `route`; the page is replaced when the response lands
    pub fn show(&self, route: Route) {
        let mut surface = self.clone();
        spawn_local(async move {
            let client = Rc::clone(&surface.client);
            // The alert has already been raised on failure
            let _ = navigate(&client, &route, &mut surface).await;
        });
    }

    fn clear(&self) {
        while let Some(child) = self.content.first_child() {
            if self.content.remove_child(&child).is_err() {
                break;
            }
        }
    }

    fn element(&self, tag: &str, class: &str) -> Result<Element, JsValue> {
        let element = self.document.create_element(tag)?;
        if !class.is_empty() {
            element.set_class_name(class);
        }
        Ok(element)
    }

    fn build(&self, node: &Node) -> Result<Element, JsValue> {
        match node {
            Node::Text { class, text } => {
                let paragraph = self.element("p", class)?;
                paragraph.set_text_content(Some(text.as_str()));
                Ok(paragraph)
            }
            Node::Link {
                class,
                label,
                target,
            } => self.link(label, target, class),
            Node::LineBreak => self.element("br", ""),
            Node::Image { class, src } => {
                let image = self.element("img", class)?;
                image.set_attribute("src", src)?;
                Ok(image)
            }
            Node::Table { rows } => {
                let table = self.element("table", "")?;
                for row in rows {
                    let tr = self.element("tr", "")?;
                    for cell in row {
                        let td = self.element("td", "")?;
                        let child: Element = self.build(cell)?;
                        td.append_child(&child)?;
                        tr.append_child(&td)?;
                    }
                    table.append_child(&tr)?;
                }
                Ok(table)
            }
            Node::Code { class, json } => {
                let pre = self.element("pre", class)?;
                pre.set_inner_html(&highlight_html(json));
                Ok(pre)
            }
        }
    }

    /// Anchor whose click fetches `target` and replaces the page
    fn link(&self, label: &str, target: &Route, class: &str) -> Result<Element, JsValue> {
        let anchor = self.element("a", class)?;
        anchor.set_attribute("href", "javascript:void(0)")?;
        anchor.set_text_content(Some(label));

        let surface = self.clone();
        let target = target.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            surface.show(target.clone());
        });
        anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        // Owned by the JS listener from here on
        on_click.forget();

        Ok(anchor)
    }

    fn render(&self, fragment: &Fragment) -> Result<(), JsValue> {
        self.clear();
        for node in fragment.nodes() {
            let child: Element = self.build(node)?;
            self.content.append_child(&child)?;
        }
        Ok(())
    }
}

impl Surface for DomSurface {
    fn replace(&mut self, fragment: Fragment) {
        if let Err(error) = self.render(&fragment) {
            web_sys::console::error_1(&error);
        }
    }

    fn alert(&mut self, message: &str) {
        let shown = web_sys::window().map(|window| window.alert_with_message(message));
        if !matches!(shown, Some(Ok(()))) {
            web_sys::console::error_1(&message.into());
        }
    }
}
