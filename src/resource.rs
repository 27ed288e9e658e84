use std::collections::BTreeMap;

/// Raw annotation key/value pairs as they appear on a resource.
pub type Annotations = BTreeMap<String, String>;

/// Anything that can carry annotations.
///
/// `None` means the resource has no annotation map at all, which parsers
/// treat differently from a map that merely lacks their key.
pub trait Annotated {
    /// Returns the annotation map, if the resource has one.
    fn annotations(&self) -> Option<&Annotations>;
}

/// A minimal annotated resource, identified by namespace and name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    /// Namespace the resource lives in
    pub namespace: String,
    /// Resource name
    pub name: String,
    /// Annotation map, absent when the resource declares none
    pub annotations: Option<Annotations>,
}

impl Resource {
    /// Creates a resource with no annotation map.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            annotations: None,
        }
    }

    /// Sets one annotation, creating the map if needed.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations
            .get_or_insert_with(Annotations::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replaces the annotation map.
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = Some(annotations);
        self
    }
}

impl Annotated for Resource {
    fn annotations(&self) -> Option<&Annotations> {
        self.annotations.as_ref()
    }
}

impl Annotated for Annotations {
    fn annotations(&self) -> Option<&Annotations> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_resource_has_no_map() {
        let res = Resource::new("default", "web");
        assert!(res.annotations().is_none());
    }

    #[test]
    fn empty_map_is_not_missing() {
        let res = Resource::new("default", "web").with_annotations(Annotations::new());
        assert_eq!(res.annotations().map(|a| a.len()), Some(0));
    }

    #[test]
    fn with_annotation_creates_map() {
        let res = Resource::new("default", "web")
            .with_annotation("a", "1")
            .with_annotation("b", "2");

        let anns = res.annotations().expect("map was created");
        assert_eq!(anns.get("a").map(String::as_str), Some("1"));
        assert_eq!(anns.len(), 2);
    }
}
