//! Dependency descriptors: component identifiers, wildcards, and the
//! output/input/state declarations a callback is registered with.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

/// Wildcard field value for pattern-matching component identifiers.
///
/// A pattern identifier like `{"type": "filter", "index": All}` matches every
/// concrete component whose id has `type == "filter"`, regardless of `index`.
/// The host resolves wildcards at dispatch time; this library only carries
/// them through registration.
///
/// On the wire a wildcard is the one-element array tag the host family uses:
/// `["MATCH"]`, `["ALL"]`, `["ALLSMALLER"]`. This keeps wildcards distinct
/// from literal string field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wildcard {
    /// Bind to the single component whose wildcard fields match the one that
    /// triggered the callback.
    Match,
    /// Bind to every matching component; the bound slot becomes a group.
    All,
    /// Bind to every matching component whose field sorts before the
    /// triggering one.
    AllSmaller,
}

impl Wildcard {
    /// Wire tag for this wildcard.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Wildcard::Match => "MATCH",
            Wildcard::All => "ALL",
            Wildcard::AllSmaller => "ALLSMALLER",
        }
    }
}

impl fmt::Display for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for Wildcard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.as_tag()].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Wildcard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag: Vec<String> = Vec::deserialize(deserializer)?;
        if tag.len() != 1 {
            return Err(D::Error::invalid_length(tag.len(), &"a one-element wildcard tag"));
        }
        match tag[0].as_str() {
            "MATCH" => Ok(Wildcard::Match),
            "ALL" => Ok(Wildcard::All),
            "ALLSMALLER" => Ok(Wildcard::AllSmaller),
            other => Err(D::Error::unknown_variant(other, &["MATCH", "ALL", "ALLSMALLER"])),
        }
    }
}

/// One field value inside a pattern identifier.
///
/// Concrete dispatch-time identifiers carry booleans, numbers, and strings;
/// registration-time identifiers may also carry wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdFragment {
    /// Wildcard (registration only).
    Wild(Wildcard),
    /// Boolean field value.
    Bool(bool),
    /// Numeric field value, kept as the exact JSON number.
    Number(Number),
    /// String field value.
    Str(String),
}

impl fmt::Display for IdFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdFragment::Wild(w) => write!(f, "{w}"),
            IdFragment::Bool(b) => write!(f, "{b}"),
            IdFragment::Number(n) => write!(f, "{n}"),
            IdFragment::Str(s) => f.write_str(s),
        }
    }
}

impl From<Wildcard> for IdFragment {
    fn from(w: Wildcard) -> Self {
        IdFragment::Wild(w)
    }
}

impl From<bool> for IdFragment {
    fn from(b: bool) -> Self {
        IdFragment::Bool(b)
    }
}

impl From<i32> for IdFragment {
    fn from(n: i32) -> Self {
        IdFragment::Number(n.into())
    }
}

impl From<i64> for IdFragment {
    fn from(n: i64) -> Self {
        IdFragment::Number(n.into())
    }
}

impl From<u64> for IdFragment {
    fn from(n: u64) -> Self {
        IdFragment::Number(n.into())
    }
}

impl From<&str> for IdFragment {
    fn from(s: &str) -> Self {
        IdFragment::Str(s.to_string())
    }
}

impl From<String> for IdFragment {
    fn from(s: String) -> Self {
        IdFragment::Str(s)
    }
}

/// A pattern identifier: named fields in a sorted map.
///
/// The sorted map makes identifier equality and hashing independent of the
/// order the fields were written in.
pub type PatternId = BTreeMap<String, IdFragment>;

/// Build a [`PatternId`] from `(field, value)` pairs.
///
/// ```
/// use dict_dispatch_core::dependency::{pattern_id, Wildcard};
///
/// let a = pattern_id([("type", "filter".into()), ("index", 0.into())]);
/// let b = pattern_id([("index", 0.into()), ("type", "filter".into())]);
/// assert_eq!(a, b);
///
/// let any = pattern_id([("type", "filter".into()), ("index", Wildcard::All.into())]);
/// assert_ne!(a, any);
/// ```
pub fn pattern_id<K, I>(pairs: I) -> PatternId
where
    K: Into<String>,
    I: IntoIterator<Item = (K, IdFragment)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Identifier of a component within the page: a plain string or a
/// pattern-matching field map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentId {
    /// Plain string identifier.
    Plain(String),
    /// Pattern identifier; may contain wildcards at registration time.
    Pattern(PatternId),
}

impl ComponentId {
    /// True for pattern (field-map) identifiers.
    pub fn is_pattern(&self) -> bool {
        matches!(self, ComponentId::Pattern(_))
    }

    /// True if any field of a pattern identifier is a wildcard.
    pub fn has_wildcard(&self) -> bool {
        match self {
            ComponentId::Plain(_) => false,
            ComponentId::Pattern(id) => {
                id.values().any(|v| matches!(v, IdFragment::Wild(_)))
            }
        }
    }
}

impl fmt::Display for ComponentId {
    /// Plain ids render as themselves; pattern ids render their field values
    /// joined with `#` in field-name order (`btn#0` for
    /// `{"type": "btn", "index": 0}` sorted by field name).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::Plain(s) => f.write_str(s),
            ComponentId::Pattern(id) => {
                let mut first = true;
                for value in id.values() {
                    if !first {
                        f.write_str("#")?;
                    }
                    write!(f, "{value}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        ComponentId::Plain(s.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(s: String) -> Self {
        ComponentId::Plain(s)
    }
}

impl From<PatternId> for ComponentId {
    fn from(id: PatternId) -> Self {
        ComponentId::Pattern(id)
    }
}

/// An output declaration: the callback writes this component property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Output {
    /// Target component.
    pub id: ComponentId,
    /// Target property name.
    pub property: String,
}

impl Output {
    /// Declare an output over the given component property.
    pub fn new(id: impl Into<ComponentId>, property: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            property: property.into(),
        }
    }
}

/// An input declaration: a change to this property fires the callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Input {
    /// Watched component.
    pub id: ComponentId,
    /// Watched property name.
    pub property: String,
}

impl Input {
    /// Declare an input over the given component property.
    pub fn new(id: impl Into<ComponentId>, property: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            property: property.into(),
        }
    }
}

/// A state declaration: read when the callback fires, but never fires it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    /// Read component.
    pub id: ComponentId,
    /// Read property name.
    pub property: String,
}

impl State {
    /// Declare a state read over the given component property.
    pub fn new(id: impl Into<ComponentId>, property: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            property: property.into(),
        }
    }
}

/// Any dependency declaration, for interleaved registration lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dependency {
    /// Written property.
    Output(Output),
    /// Firing property.
    Input(Input),
    /// Read-only property.
    State(State),
}

impl Dependency {
    /// The declared component id.
    pub fn id(&self) -> &ComponentId {
        match self {
            Dependency::Output(d) => &d.id,
            Dependency::Input(d) => &d.id,
            Dependency::State(d) => &d.id,
        }
    }

    /// The declared property name.
    pub fn property(&self) -> &str {
        match self {
            Dependency::Output(d) => &d.property,
            Dependency::Input(d) => &d.property,
            Dependency::State(d) => &d.property,
        }
    }
}

impl From<Output> for Dependency {
    fn from(d: Output) -> Self {
        Dependency::Output(d)
    }
}

impl From<Input> for Dependency {
    fn from(d: Input) -> Self {
        Dependency::Input(d)
    }
}

impl From<State> for Dependency {
    fn from(d: State) -> Self {
        Dependency::State(d)
    }
}

/// The normalized dependency set a callback is registered with.
///
/// Build one with the chainable declaration methods, or normalize an
/// interleaved [`Dependency`] list:
///
/// ```
/// use dict_dispatch_core::dependency::{DependencySpec, Input, Output, State};
///
/// let spec = DependencySpec::new()
///     .output(Output::new("graph", "figure"))
///     .input(Input::new("slider", "value"))
///     .state(State::new("units", "value"));
/// assert!(spec.is_single_output());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Written properties, in declaration order.
    pub outputs: Vec<Output>,
    /// Firing properties, in declaration order.
    pub inputs: Vec<Input>,
    /// Read-only properties, in declaration order.
    pub states: Vec<State>,
}

impl DependencySpec {
    /// Empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition an interleaved dependency list by kind.
    ///
    /// Relative order within each kind is preserved; nothing is dropped.
    pub fn normalize<I>(deps: I) -> Self
    where
        I: IntoIterator<Item = Dependency>,
    {
        let mut spec = Self::new();
        for dep in deps {
            match dep {
                Dependency::Output(d) => spec.outputs.push(d),
                Dependency::Input(d) => spec.inputs.push(d),
                Dependency::State(d) => spec.states.push(d),
            }
        }
        spec
    }

    /// Add an output declaration.
    pub fn output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    /// Add an input declaration.
    pub fn input(mut self, input: Input) -> Self {
        self.inputs.push(input);
        self
    }

    /// Add a state declaration.
    pub fn state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    /// True when exactly one output was declared; the host then expects a
    /// bare value back rather than a list.
    pub fn is_single_output(&self) -> bool {
        self.outputs.len() == 1
    }
}
