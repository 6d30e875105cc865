//! Attribute path and path element types.

/// AttrElement is one level of navigation inside an attribute tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrElement {
    /// Key of a mapping.
    Field(String),
    /// Position in a list.
    Index(usize),
}

impl AttrElement {
    /// Creates a new field element.
    pub fn field(name: impl Into<String>) -> Self {
        AttrElement::Field(name.into())
    }

    /// Creates a new index element.
    pub fn index(i: usize) -> Self {
        AttrElement::Index(i)
    }

    /// Returns the field name if this is a field element.
    pub fn as_field(&self) -> Option<&str> {
        match self {
            AttrElement::Field(name) => Some(name),
            _ => None,
        }
    }
}

/// AttrPath locates a node inside an attribute tree, e.g.
/// `secret[0].items[1].mode`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AttrPath {
    elements: Vec<AttrElement>,
}

impl AttrPath {
    /// Creates a new empty path.
    pub fn new() -> Self {
        AttrPath {
            elements: Vec::new(),
        }
    }

    /// Creates a path rooted at the named attribute.
    pub fn root(name: impl Into<String>) -> Self {
        AttrPath {
            elements: vec![AttrElement::field(name)],
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttrElement> {
        self.elements.iter()
    }

    /// Returns the last path element.
    pub fn last(&self) -> Option<&AttrElement> {
        self.elements.last()
    }

    /// Creates a new path with the given element appended.
    pub fn with(&self, element: AttrElement) -> Self {
        let mut new_path = self.clone();
        new_path.elements.push(element);
        new_path
    }

    /// Creates a new path descending into a mapping key.
    pub fn field(&self, name: impl Into<String>) -> Self {
        self.with(AttrElement::field(name))
    }

    /// Creates a new path descending into a list position.
    pub fn index(&self, i: usize) -> Self {
        self.with(AttrElement::index(i))
    }
}

impl std::fmt::Display for AttrPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "<root>");
        }
        for (i, element) in self.elements.iter().enumerate() {
            match element {
                AttrElement::Field(name) if i == 0 => write!(f, "{}", name)?,
                AttrElement::Field(name) => write!(f, ".{}", name)?,
                AttrElement::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_element_field() {
        let el = AttrElement::field("items");
        assert_eq!(el.as_field(), Some("items"));
        assert_eq!(AttrElement::index(3).as_field(), None);
    }

    #[test]
    fn test_path_display() {
        let path = AttrPath::root("secret").index(0).field("items").index(1).field("mode");
        assert_eq!(path.to_string(), "secret[0].items[1].mode");
        assert_eq!(path.len(), 5);
        assert_eq!(path.last(), Some(&AttrElement::field("mode")));
    }

    #[test]
    fn test_empty_path_display() {
        assert_eq!(AttrPath::new().to_string(), "<root>");
        assert_eq!(AttrPath::new().index(0).to_string(), "[0]");
    }

    #[test]
    fn test_with_does_not_modify_parent() {
        let parent = AttrPath::root("tolerations");
        let child = parent.index(2);
        assert_eq!(parent.to_string(), "tolerations");
        assert_eq!(child.to_string(), "tolerations[2]");
    }
}
