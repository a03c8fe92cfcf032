//! Formatting attribute maps.
//!
//! An [`Attributes`] value maps attribute names to open JSON values.  The
//! engine recognizes a closed key set (see [`keys`]) but passes unknown keys
//! through untouched; validation of value domains is left to the embedder.
//!
//! Overlay semantics: merging is a shallow union in which the overlay wins
//! per key.  An explicit `false` is stored like any other value, so
//! `{"bold": false}` is distinct from an absent `"bold"` key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recognized attribute names.
pub mod keys {
    pub const BOLD: &str = "bold";
    pub const ITALIC: &str = "italic";
    pub const UNDERLINE: &str = "underline";
    pub const STRIKETHROUGH: &str = "strikethrough";
    pub const FONT_SIZE: &str = "fontSize";
    pub const FONT_FAMILY: &str = "fontFamily";
    pub const FONT_WEIGHT: &str = "fontWeight";
    pub const FONT_STYLE: &str = "fontStyle";
    pub const LINE_HEIGHT: &str = "lineHeight";
    pub const COLOR: &str = "color";
    pub const VERTICAL_ALIGN: &str = "verticalAlign";
    pub const ALIGN: &str = "align";
}

// ── Attributes ────────────────────────────────────────────────────────────

/// An attribute map with structural equality.  Empty is the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Merge `overlay` into `self`; overlay keys win.
    ///
    /// # Examples
    ///
    /// ```
    /// use scribe_core::attrs;
    ///
    /// let mut a = attrs! { "bold" => true, "color" => "#333" };
    /// a.merge(&attrs! { "bold" => false });
    /// assert_eq!(a, attrs! { "bold" => false, "color" => "#333" });
    /// ```
    pub fn merge(&mut self, overlay: &Attributes) {
        for (k, v) in overlay.iter() {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Non-destructive form of [`merge`](Self::merge).
    pub fn merged(&self, overlay: &Attributes) -> Attributes {
        let mut out = self.clone();
        out.merge(overlay);
        out
    }
}

/// Build an [`Attributes`] map from `key => value` pairs.
///
/// ```
/// use scribe_core::{attrs, attributes::Align};
///
/// let a = attrs! { "italic" => true, "align" => Align::Center };
/// assert_eq!(a.get("align").and_then(|v| v.as_str()), Some("center"));
/// ```
#[macro_export]
macro_rules! attrs {
    () => { $crate::attributes::Attributes::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::attributes::Attributes::new();
        $( map.set($key, $value); )+
        map
    }};
}

// ── Closed value domains ──────────────────────────────────────────────────

/// Horizontal alignment of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
        }
    }
}

impl From<Align> for Value {
    fn from(a: Align) -> Value {
        Value::String(a.as_str().to_string())
    }
}

/// Vertical alignment of an inline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Baseline,
    Super,
    Sub,
}

impl VerticalAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            VerticalAlign::Baseline => "baseline",
            VerticalAlign::Super => "super",
            VerticalAlign::Sub => "sub",
        }
    }
}

impl From<VerticalAlign> for Value {
    fn from(v: VerticalAlign) -> Value {
        Value::String(v.as_str().to_string())
    }
}

/// Stroke style for underline / strikethrough decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Dotted,
    Dashed,
    Solid,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
}

/// Object form of the `underline` / `strikethrough` value.
///
/// Both keys also accept a plain boolean; this struct covers the
/// `{color?, style?}` shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineDecoration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<LineStyle>,
}

impl From<LineDecoration> for Value {
    fn from(d: LineDecoration) -> Value {
        serde_json::to_value(d).unwrap_or(Value::Null)
    }
}
