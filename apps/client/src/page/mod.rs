//! Headless page model: the elements of the cover letter page and the state
//! page scripts read and mutate (classes, attributes, values, files, checks).

pub mod effects;
pub mod form_data;
pub mod ids;
pub mod notify;
pub mod render;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::errors::PageError;
use effects::ScheduledEffect;
use form_data::{FormData, FormValue, UploadedFile};
use ids::{attributes, classes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Form,
    Button,
    Container,
    TextArea,
    TextInput,
    FileInput,
    Radio,
}

impl ElementKind {
    fn is_form_control(self) -> bool {
        matches!(
            self,
            ElementKind::TextArea | ElementKind::TextInput | ElementKind::FileInput | ElementKind::Radio
        )
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    kind: ElementKind,
    name: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    value: String,
    text: String,
    file: Option<UploadedFile>,
    checked: bool,
    disabled: bool,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            name: None,
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            value: String::new(),
            text: String::new(),
            file: None,
            checked: false,
            disabled: false,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    pub fn is_hidden(&self) -> bool {
        self.has_class(classes::HIDDEN)
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        if hidden {
            self.add_class(classes::HIDDEN);
        } else {
            self.remove_class(classes::HIDDEN);
        }
    }

    pub fn is_required(&self) -> bool {
        self.has_attribute(attributes::REQUIRED)
    }

    pub fn set_required(&mut self, required: bool) {
        if required {
            self.set_attribute(attributes::REQUIRED, "");
        } else {
            self.remove_attribute(attributes::REQUIRED);
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Text content, for non-control elements such as the error container.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn set_file(&mut self, file: Option<UploadedFile>) {
        self.file = file;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

/// The page: elements keyed by id, in document order, plus pending timed effects.
#[derive(Debug, Default)]
pub struct Document {
    order: Vec<String>,
    elements: HashMap<String, Element>,
    effects: Vec<ScheduledEffect>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cover letter page as served: text mode checked by default,
    /// loading indicator and error container hidden.
    pub fn cover_letter_page() -> Self {
        let mut doc = Self::new();

        doc.insert(ids::ERROR_CONTAINER, Element::new(ElementKind::Container).with_class(classes::HIDDEN));
        doc.insert(ids::COVER_LETTER_FORM, Element::new(ElementKind::Form));
        doc.insert(
            ids::CV_FILE,
            Element::new(ElementKind::FileInput)
                .named(ids::CV_FILE)
                .with_attribute(attributes::REQUIRED, ""),
        );
        doc.insert(
            ids::JOB_DESC_TYPE_TEXT,
            Element::new(ElementKind::Radio)
                .named(ids::JOB_DESC_TYPE)
                .with_value("text")
                .checked(),
        );
        doc.insert(
            ids::JOB_DESC_TYPE_IMAGE,
            Element::new(ElementKind::Radio)
                .named(ids::JOB_DESC_TYPE)
                .with_value("image"),
        );
        doc.insert(ids::JOB_DESC_TEXT_CONTAINER, Element::new(ElementKind::Container));
        doc.insert(
            ids::JOB_DESC_TEXT,
            Element::new(ElementKind::TextArea).named(ids::JOB_DESC_TEXT),
        );
        doc.insert(
            ids::JOB_DESC_IMAGE_CONTAINER,
            Element::new(ElementKind::Container).with_class(classes::HIDDEN),
        );
        doc.insert(
            ids::JOB_DESC_IMAGE,
            Element::new(ElementKind::FileInput).named(ids::JOB_DESC_IMAGE),
        );
        doc.insert(
            ids::COMPANY_NAME,
            Element::new(ElementKind::TextInput).named(ids::COMPANY_NAME),
        );
        doc.insert(
            ids::WORD_LIMIT,
            Element::new(ElementKind::TextInput).named(ids::WORD_LIMIT),
        );
        doc.insert(ids::GENERATE_BTN, Element::new(ElementKind::Button));
        doc.insert(
            ids::COVER_LETTER_LOADING,
            Element::new(ElementKind::Container).with_class(classes::HIDDEN),
        );
        doc.insert(ids::COVER_LETTER_EDITOR, Element::new(ElementKind::TextArea));
        doc.insert(ids::COPY_BTN, Element::new(ElementKind::Button));

        doc
    }

    /// Inserts or replaces an element. New ids go to the end of the document.
    pub fn insert(&mut self, id: &str, element: Element) {
        if self.elements.insert(id.to_string(), element).is_none() {
            self.order.push(id.to_string());
        }
    }

    #[cfg(test)]
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.order.retain(|existing| existing != id);
        self.elements.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn element(&self, id: &str) -> Result<&Element, PageError> {
        self.get(id)
            .ok_or_else(|| PageError::MissingElement(id.to_string()))
    }

    pub fn element_mut(&mut self, id: &str) -> Result<&mut Element, PageError> {
        self.get_mut(id)
            .ok_or_else(|| PageError::MissingElement(id.to_string()))
    }

    fn in_order(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.order
            .iter()
            .filter_map(|id| self.elements.get(id).map(|el| (id.as_str(), el)))
    }

    /// Value of the checked radio of group `name`, if any.
    pub fn checked_value(&self, name: &str) -> Option<&str> {
        self.in_order()
            .find(|(_, el)| el.kind == ElementKind::Radio && el.name() == Some(name) && el.checked)
            .map(|(_, el)| el.value())
    }

    /// Checks radio `id` and unchecks the other radios of its group.
    pub fn check(&mut self, id: &str) -> Result<(), PageError> {
        let target = self.element(id)?;
        if target.kind != ElementKind::Radio {
            return Err(PageError::UnexpectedKind {
                id: id.to_string(),
                expected: "radio button",
            });
        }
        let group = target.name.clone();

        for (element_id, element) in self.elements.iter_mut() {
            if element.kind == ElementKind::Radio && element.name == group {
                element.checked = element_id == id;
            }
        }
        Ok(())
    }

    /// Collects the enabled named controls of the page in document order.
    /// Unchecked radios are skipped; file inputs without a selection
    /// contribute an empty file.
    pub fn form_data(&self, form_id: &str) -> Result<FormData, PageError> {
        if self.element(form_id)?.kind != ElementKind::Form {
            return Err(PageError::UnexpectedKind {
                id: form_id.to_string(),
                expected: "form",
            });
        }

        let mut data = FormData::new();
        for (_, element) in self.in_order() {
            if !element.kind.is_form_control() || element.disabled {
                continue;
            }
            let Some(name) = element.name() else {
                continue;
            };

            let value = match element.kind {
                ElementKind::Radio if !element.checked => continue,
                ElementKind::FileInput => FormValue::File(
                    element.file.clone().unwrap_or_else(UploadedFile::empty),
                ),
                _ => FormValue::Text(element.value.clone()),
            };
            data.append(name, value);
        }
        Ok(data)
    }
}
