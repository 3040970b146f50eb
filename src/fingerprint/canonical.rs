//! Canonical text form for hashing
//!
//! Renders a value graph as JSON text with a single, reproducible byte
//! layout: object keys sorted by UTF-16 code units, arrays in order,
//! numbers formatted the way ECMAScript `Number.prototype.toString` does.
//! The graph may share or cycle through nodes; every composite node is
//! emitted at most once per walk and later visits become [`CYCLE_SENTINEL`].

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use serde::Serialize;

use crate::Result;

/// Replacement for a composite node that was already visited in the walk
pub const CYCLE_SENTINEL: &str = "__cycle__";

type Shared<T> = Rc<RefCell<T>>;

/// Value graph accepted by [`canonicalize`]
///
/// Arrays and objects are reference-counted so that a graph can contain
/// shared and self-referential nodes. Cloning a composite node clones the
/// handle, not the contents.
#[derive(Debug, Clone)]
pub enum Node {
    /// Explicitly unset value, rendered as `null`
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Callable value; dropped from objects, `null` elsewhere
    Function,
    Array(Shared<Vec<Node>>),
    /// Entries in insertion order; keys are unique
    Object(Shared<Vec<(String, Node)>>),
}

impl Node {
    /// Build an array node
    pub fn array<I: IntoIterator<Item = Node>>(items: I) -> Self {
        Node::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Build an object node; a repeated key replaces the earlier entry
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        let node = Node::Object(Rc::new(RefCell::new(Vec::new())));
        for (key, value) in entries {
            node.insert(key, value);
        }
        node
    }

    /// Set a member on an object node. No-op for other variants.
    pub fn insert<K: Into<String>>(&self, key: K, value: Node) {
        if let Node::Object(entries) = self {
            let key = key.into();
            let mut entries = entries.borrow_mut();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }
    }

    /// Append an element to an array node. No-op for other variants.
    pub fn push(&self, value: Node) {
        if let Node::Array(items) = self {
            items.borrow_mut().push(value);
        }
    }

    /// Convert any serializable value through its JSON data model
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    fn identity(&self) -> Option<usize> {
        match self {
            Node::Array(items) => Some(Rc::as_ptr(items) as *const () as usize),
            Node::Object(entries) => Some(Rc::as_ptr(entries) as *const () as usize),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::array(items.into_iter().map(Node::from)),
            Value::Object(map) => Node::object(map.into_iter().map(|(k, v)| (k, Node::from(v)))),
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(value as f64)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

/// Render `value` in canonical form
pub fn canonicalize(value: &Node) -> String {
    let mut out = String::new();
    let mut seen = HashSet::new();
    match value {
        Node::Function => out.push_str("null"),
        other => write_node(other, &mut seen, &mut out),
    }
    out
}

fn write_node(node: &Node, seen: &mut HashSet<usize>, out: &mut String) {
    if let Some(id) = node.identity() {
        if !seen.insert(id) {
            write_string(CYCLE_SENTINEL, out);
            return;
        }
    }

    match node {
        Node::Undefined | Node::Null | Node::Function => out.push_str("null"),
        Node::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Node::Number(n) => out.push_str(&format_number(*n)),
        Node::String(s) => write_string(s, out),
        Node::Array(items) => {
            out.push('[');
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_node(item, seen, out);
            }
            out.push(']');
        }
        Node::Object(entries) => {
            let entries = entries.borrow();
            let mut members: Vec<&(String, Node)> = entries
                .iter()
                .filter(|(_, value)| !matches!(value, Node::Function))
                .collect();
            members.sort_by(|a, b| a.0.encode_utf16().cmp(b.0.encode_utf16()));

            out.push('{');
            for (i, (key, value)) in members.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_node(value, seen, out);
            }
            out.push('}');
        }
    }
}

fn write_string(s: &str, out: &mut String) {
    // serde_json escapes exactly the set JSON.stringify escapes for valid UTF-8
    match serde_json::to_string(s) {
        Ok(quoted) => out.push_str(&quoted),
        Err(_) => out.push_str("null"),
    }
}

/// Format a number the way ECMAScript `Number::toString` does
///
/// Integral values below 1e21 print without a fraction, magnitudes outside
/// `[1e-7, 1e21)` use exponent notation with an explicit sign, and
/// non-finite values become `null` as in JSON.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let sign = if n < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits, e.g. "1.2345e2"
    let sci = format!("{:e}", n.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let point = exponent + 1;

    let body = if k <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let exp = point - 1;
        let exp_sign = if exp < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, exp_sign, exp.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, exp_sign, exp.abs())
        }
    };

    format!("{}{}", sign, body)
}
