use std::fmt;

/// Location of a value inside a decoded document, rendered as a URI fragment
/// JSON pointer such as `#/ExecutionPayloadBodyV1/properties/withdrawals/type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    tokens: Vec<String>,
}

impl Pointer {
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the pointer to a child of this location.
    pub fn join<T: fmt::Display>(&self, token: T) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.push(token.to_string());
        Pointer { tokens }
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Unescaped reference tokens, outermost first.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#")?;
        for token in &self.tokens {
            write!(f, "/{}", token.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

/// Position of the decoder while walking a document.
///
/// Each level borrows its parent, so walking allocates nothing; a `Pointer`
/// is only built when a value fails to decode.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Location<'a> {
    Root,
    Property(&'a Location<'a>, &'a str),
    Item(&'a Location<'a>, usize),
}

impl<'a> Location<'a> {
    pub fn push_prop(&'a self, name: &'a str) -> Location<'a> {
        Location::Property(self, name)
    }

    pub fn push_item(&'a self, index: usize) -> Location<'a> {
        Location::Item(self, index)
    }

    pub fn to_pointer(&self) -> Pointer {
        let mut tokens = Vec::new();
        let mut at = self;
        loop {
            match *at {
                Location::Root => break,
                Location::Property(parent, name) => {
                    tokens.push(name.to_owned());
                    at = parent;
                }
                Location::Item(parent, index) => {
                    tokens.push(index.to_string());
                    at = parent;
                }
            }
        }
        tokens.reverse();
        Pointer { tokens }
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_pointer(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_as_fragment() {
        assert_eq!(Pointer::root().to_string(), "#");
        assert!(Pointer::root().is_root());
        assert!(Location::Root.to_pointer().is_root());
    }

    #[test]
    fn tokens_are_escaped() {
        let pointer = Pointer::root().join("a/b").join("m~n").join(0);
        assert_eq!(pointer.to_string(), "#/a~1b/m~0n/0");
        assert_eq!(pointer.tokens().collect::<Vec<_>>(), ["a/b", "m~n", "0"]);
        assert_eq!(pointer.last(), Some("0"));
    }

    #[test]
    fn location_builds_pointer_outermost_first() {
        let root = Location::Root;
        let defs = root.push_prop("Body");
        let props = defs.push_prop("properties");
        let name = props.push_prop("a/b");
        let item = name.push_item(2);
        assert_eq!(
            item.to_pointer(),
            Pointer::root()
                .join("Body")
                .join("properties")
                .join("a/b")
                .join(2)
        );
        assert_eq!(item.to_string(), "#/Body/properties/a~1b/2");
    }
}
