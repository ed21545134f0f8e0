use std::collections::BTreeMap;

/// A single markup element
///
/// Covers the subset of a markup document the widget needs: tag, id,
/// classes, inline style properties, text content and child elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub styles: BTreeMap<String, String>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Returns a new empty element with the given tag
    ///
    /// # Arguments
    ///
    /// * 'tag' - the tag name of the element
    pub fn new(tag: &str) -> Element {
        Element {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            styles: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Sets the element id, builder style
    pub fn with_id(mut self, id: &str) -> Element {
        self.id = Some(id.to_string());
        self
    }

    /// Adds a class, builder style
    pub fn with_class(mut self, class: &str) -> Element {
        self.add_class(class);
        self
    }

    /// Adds a class unless the element already carries it
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Checks whether the element carries the given class
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Sets an inline style property, replacing any previous value
    pub fn set_style(&mut self, property: &str, value: &str) {
        self.styles.insert(property.to_string(), value.to_string());
    }

    /// Returns the value of an inline style property
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(|v| v.as_str())
    }

    /// Replaces the text content of the element
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Appends a child element
    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Returns the first direct child carrying the given class, appending a
    /// new child with the given tag when none exists
    ///
    /// # Arguments
    ///
    /// * 'class' - the class to search for
    /// * 'tag' - the tag to use for a newly appended child
    pub fn child_with_class_or_append(&mut self, class: &str, tag: &str) -> &mut Element {
        let index = match self.children.iter().position(|c| c.has_class(class)) {
            Some(index) => index,
            None => {
                self.children.push(Element::new(tag));
                self.children.len() - 1
            }
        };

        &mut self.children[index]
    }

    /// Searches the subtree, including the element itself, for the element
    /// with the given id
    ///
    /// # Arguments
    ///
    /// * 'id' - the id to search for
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }

        for child in self.children.iter_mut() {
            if let Some(found) = child.find_by_id_mut(id) {
                return Some(found);
            }
        }

        None
    }

    /// Visits every element in the subtree, including the element itself,
    /// carrying the given class
    ///
    /// # Arguments
    ///
    /// * 'class' - the class to search for
    /// * 'visit' - the function applied to each matching element
    pub fn visit_class_mut<F: FnMut(&mut Element)>(&mut self, class: &str, visit: &mut F) {
        if self.has_class(class) {
            visit(self);
        }

        for child in self.children.iter_mut() {
            child.visit_class_mut(class, visit);
        }
    }

    /// Serializes the element and its subtree to markup
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);

        if let Some(id) = &self.id {
            out.push_str(&format!(" id=\"{}\"", id));
        }
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", self.classes.join(" ")));
        }
        if !self.styles.is_empty() {
            let styles = self.styles.iter()
                .map(|(property, value)| format!("{}: {}", property, value))
                .collect::<Vec<String>>()
                .join("; ");
            out.push_str(&format!(" style=\"{}\"", styles));
        }

        out.push('>');
        out.push_str(&escape_text(&self.text));

        for child in self.children.iter() {
            child.write_html(out);
        }

        out.push_str(&format!("</{}>", self.tag));
    }
}

/// Escapes markup significant characters in text content
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
