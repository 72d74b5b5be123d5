use serde::Serialize;

/// One candidate offered by a completion provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CompletionItem {
    /// Display text in the dropdown
    pub label: String,
    /// Text spliced into the buffer on accept
    pub insert_text: String,
    /// Right-aligned annotation
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
    /// Insert without a trailing space and re-run matching immediately
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub continue_completing: bool,
    /// Opaque payload (e.g. a note id distinct from the title)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Rebuild the whole line as `insert_text + rest` instead of splicing the token
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub prepend_to_line: bool,
    /// Intermediate node of a hierarchical trigger; a descend key steps into it
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub drillable: bool,
}

impl CompletionItem {
    /// An item whose insert text equals its label.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        CompletionItem {
            insert_text: label.clone(),
            label,
            ..Default::default()
        }
    }

    pub fn insert(mut self, text: impl Into<String>) -> Self {
        self.insert_text = text.into();
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn chaining(mut self) -> Self {
        self.continue_completing = true;
        self
    }

    pub fn prepend(mut self) -> Self {
        self.prepend_to_line = true;
        self
    }

    pub fn drillable(mut self, drillable: bool) -> Self {
        self.drillable = drillable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_text_defaults_to_label() {
        let item = CompletionItem::new("#project");
        assert_eq!(item.insert_text, "#project");
        assert!(!item.continue_completing);
        assert!(!item.prepend_to_line);
    }

    #[test]
    fn builder_sets_fields() {
        let item = CompletionItem::new("Web")
            .insert(">Projects/Web")
            .value("N-7")
            .detail("3 children")
            .drillable(true);
        assert_eq!(item.label, "Web");
        assert_eq!(item.insert_text, ">Projects/Web");
        assert_eq!(item.value.as_deref(), Some("N-7"));
        assert_eq!(item.detail, "3 children");
        assert!(item.drillable);
    }
}
