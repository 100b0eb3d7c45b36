//! Static schema descriptors.
//!
//! Every model declares its wire shape once as a `static` table: an ordered
//! list of fields with their wire name, kind and required flag. The decode
//! engines walk these tables; typed conversion is left to serde.

/// Whether a record tolerates undeclared keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Undeclared keys are a schema violation.
    Closed,
    /// Undeclared keys are captured into the extension bag.
    Open,
}

/// Semantic kind of a declared field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// JSON string.
    String,
    /// JSON integer.
    Integer,
    /// JSON number (integer or float).
    Number,
    /// JSON boolean.
    Boolean,
    /// RFC 3339 timestamp carried as a string.
    DateTime,
    /// Enumerated string with its documented values.
    Enum(&'static [&'static str]),
    /// Untyped JSON value, including free-form objects.
    Any,
    /// Nested model, resolved lazily so shapes may refer to themselves.
    Model(fn() -> Shape),
    /// Homogeneous list.
    List(&'static FieldKind),
}

/// A single declared field.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// JSON key.
    pub name: &'static str,
    /// Semantic kind.
    pub kind: FieldKind,
    /// Whether decode fails when the key is absent.
    pub required: bool,
}

impl Field {
    /// Declares a required field.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// Declares an optional field.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// A named record schema.
#[derive(Debug)]
pub struct Schema {
    /// Model name used in error messages.
    pub name: &'static str,
    /// Unknown-key policy.
    pub strictness: Strictness,
    /// Declared fields in wire order.
    pub fields: &'static [Field],
}

impl Schema {
    /// Declares a closed schema.
    pub const fn closed(name: &'static str, fields: &'static [Field]) -> Self {
        Self {
            name,
            strictness: Strictness::Closed,
            fields,
        }
    }

    /// Declares an open schema.
    pub const fn open(name: &'static str, fields: &'static [Field]) -> Self {
        Self {
            name,
            strictness: Strictness::Open,
            fields,
        }
    }

    /// Returns true if undeclared keys are captured rather than rejected.
    pub fn is_open(&self) -> bool {
        self.strictness == Strictness::Open
    }

    /// Looks up a declared field by wire name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if `name` is a declared wire name.
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Iterates over the required fields in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.required)
    }
}

/// One arm of a discriminated union.
#[derive(Debug)]
pub struct Variant {
    /// Discriminator value selecting this arm.
    pub tag: &'static str,
    /// Schema the object is checked against once selected.
    pub schema: &'static Schema,
}

/// A closed set of record schemas selected by a discriminator key.
#[derive(Debug)]
pub struct UnionSchema {
    /// Union name used in error messages.
    pub name: &'static str,
    /// Wire name of the discriminator key.
    pub discriminator: &'static str,
    /// Dispatch table.
    pub variants: &'static [Variant],
}

impl UnionSchema {
    /// Looks up the arm for a discriminator value.
    pub fn variant(&self, tag: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.tag == tag)
    }

    /// Iterates over every known discriminator value.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.iter().map(|v| v.tag)
    }
}

/// The wire shape of a model: a single record or a discriminated union.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// A plain record.
    Record(&'static Schema),
    /// A union of records.
    Union(&'static UnionSchema),
}

impl Shape {
    /// Returns the model or union name.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Record(schema) => schema.name,
            Shape::Union(union) => union.name,
        }
    }

    /// Returns the record schema, if this is a record shape.
    pub fn record(&self) -> Option<&'static Schema> {
        match self {
            Shape::Record(schema) => Some(schema),
            Shape::Union(_) => None,
        }
    }
}
