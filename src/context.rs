use serde_json::Value as JsonValue;

/// The runtime data an operand tree is evaluated against.
///
/// A context is an opaque, nested key-value document owned by the calling
/// domain. Operands only ever read from it, so a single context can be shared
/// by any number of concurrent evaluations as long as nobody mutates it while
/// they run.
///
/// # Example
/// ```
/// use operanda::context::Context;
/// use serde_json::json;
///
/// let context = Context::new(json!({ "stock": { "price": 12.5, "data": [{ "price": 11.0 }] } }));
///
/// assert_eq!(context.lookup(&["stock", "price"]), Some(&json!(12.5)));
/// assert_eq!(context.lookup(&["stock", "data", "0", "price"]), Some(&json!(11.0)));
/// assert_eq!(context.lookup(&["stock", "volume"]), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    root: JsonValue,
}

impl Context {
    /// Wraps a JSON document.
    #[must_use]
    pub const fn new(root: JsonValue) -> Self {
        Self { root }
    }

    /// Parses a context from JSON text.
    ///
    /// # Errors
    /// Returns the `serde_json` error if `text` is not valid JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self::new)
    }

    /// The whole document.
    #[must_use]
    pub const fn root(&self) -> &JsonValue {
        &self.root
    }

    /// Follows `path` from the root.
    ///
    /// Each segment is an object key, or, when the current node is an array,
    /// a decimal index into it. Returns `None` as soon as a segment does not
    /// exist.
    #[must_use]
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&JsonValue> {
        path.iter().try_fold(&self.root, |node, segment| {
                       let segment = segment.as_ref();
                       match node {
                           JsonValue::Object(map) => map.get(segment),
                           JsonValue::Array(items) => segment.parse::<usize>()
                                                             .ok()
                                                             .and_then(|i| items.get(i)),
                           _ => None,
                       }
                   })
    }
}

impl From<JsonValue> for Context {
    fn from(root: JsonValue) -> Self {
        Self::new(root)
    }
}
