//! Static type shapes for GraphQL document generation.
//!
//! Every Rust type that can appear in a result schema or as an argument value
//! describes itself through [`GraphqlType::shape`]. The shape is a closed set
//! of variants ([`Shape`]) from which two things are derived:
//!
//! - the GraphQL type of an argument ([`infer`]), e.g. `String!` or `[Int]`
//! - the selection set of a result schema ([`project`] / [`selection`]),
//!   e.g. `id name server { id hostname }`
//!
//! Result structs get their shape from the [`graphql_object!`](crate::graphql_object)
//! macro, which records each field's declared name, optional GraphQL name and
//! serde rename in declaration order.
//!
//! # Field naming
//!
//! A field's GraphQL name is resolved first-match-wins:
//!
//! 1. the explicit GraphQL name (`=> "name"` in [`graphql_object!`](crate::graphql_object))
//! 2. the first comma-segment of the serde name, unless it is empty or `-`
//! 3. the declared field name
//!
//! # Recursion
//!
//! Only fields whose shape is an object, or a list of objects, get a nested
//! selection. Nullable indirection ([`Shape::Pointer`]: `Option`, `Box`, `Arc`)
//! is never followed, so `Option<Server>` is selected as a bare `server`.

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::clients::graphql::errors::TypeError;

/// Primitive kinds that map to a GraphQL scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `String` / `str` / `char`.
    String,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `isize`.
    Isize,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `usize`.
    Usize,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// `bool`.
    Bool,
}

impl ScalarKind {
    /// Returns the GraphQL scalar this kind maps to.
    #[must_use]
    pub const fn graphql_name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::I8
            | Self::I16
            | Self::I32
            | Self::I64
            | Self::Isize
            | Self::U8
            | Self::U16
            | Self::U32
            | Self::U64
            | Self::Usize => "Int",
            Self::F32 | Self::F64 => "Float",
            Self::Bool => "Boolean",
        }
    }

    /// Returns the Rust name of this kind.
    #[must_use]
    pub const fn rust_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
        }
    }
}

/// The structural shape of a Rust type as seen by the GraphQL engine.
#[derive(Clone, Debug)]
pub enum Shape {
    /// A primitive mapping to a GraphQL scalar.
    Scalar(ScalarKind),
    /// A homogeneous sequence (`Vec<T>`, `[T; N]`, `[T]`).
    List(Box<Shape>),
    /// Nullable indirection (`Option<T>`, `Box<T>`, `Arc<T>`).
    ///
    /// The target is resolved lazily so that self-referential types behind a
    /// pointer do not recurse forever.
    Pointer(fn() -> Shape),
    /// A struct with its fields in declaration order.
    Object(Vec<Field>),
    /// A kind the engine never maps (maps, unit, untyped JSON).
    Opaque(&'static str),
}

impl Shape {
    /// Returns a short name for this shape's kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(kind) => kind.rust_name(),
            Self::List(_) => "slice",
            Self::Pointer(_) => "ptr",
            Self::Object(_) => "struct",
            Self::Opaque(kind) => *kind,
        }
    }

    /// Strips every pointer and list layer, returning the innermost shape.
    #[must_use]
    pub fn into_underlying(self) -> Self {
        let mut shape = self;
        loop {
            shape = match shape {
                Self::List(element) => *element,
                Self::Pointer(target) => target(),
                other => return other,
            };
        }
    }

    /// Returns `true` for object shapes.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }
}

type NamingStrategy = fn(&Field) -> Option<&'static str>;

// Tried in order; the declared name is the fallback.
const NAMING_STRATEGIES: [NamingStrategy; 2] = [explicit_name, serde_name];

fn explicit_name(field: &Field) -> Option<&'static str> {
    field.graphql.filter(|name| !name.is_empty())
}

fn serde_name(field: &Field) -> Option<&'static str> {
    let tag = field.serde?;
    if tag.is_empty() || tag == "-" {
        return None;
    }
    tag.split(',').next().filter(|name| !name.is_empty())
}

/// A single struct field within an object shape.
#[derive(Clone, Debug)]
pub struct Field {
    declared: &'static str,
    graphql: Option<&'static str>,
    serde: Option<&'static str>,
    shape: Shape,
}

impl Field {
    /// Creates a field with its declared name and shape.
    #[must_use]
    pub const fn new(declared: &'static str, shape: Shape) -> Self {
        Self {
            declared,
            graphql: None,
            serde: None,
            shape,
        }
    }

    /// Sets the explicit GraphQL name, which takes priority over every other name.
    #[must_use]
    pub const fn graphql_name(mut self, name: &'static str) -> Self {
        self.graphql = Some(name);
        self
    }

    /// Sets the serialization name (serde rename).
    #[must_use]
    pub const fn serde_name(mut self, name: &'static str) -> Self {
        self.serde = Some(name);
        self
    }

    /// Returns the field's name in the GraphQL document.
    #[must_use]
    pub fn name(&self) -> &'static str {
        NAMING_STRATEGIES
            .iter()
            .find_map(|strategy| strategy(self))
            .unwrap_or(self.declared)
    }

    /// Returns the field's shape.
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// A Rust type with a known GraphQL shape.
///
/// Implemented for primitives, strings, sequences and pointer types. Structs
/// used as result schemas implement it through
/// [`graphql_object!`](crate::graphql_object), or by hand:
///
/// ```rust
/// use borgbase_api::clients::graphql::{Field, GraphqlType, Shape};
///
/// struct Deleted {
///     ok: bool,
/// }
///
/// impl GraphqlType for Deleted {
///     fn shape() -> Shape {
///         Shape::Object(vec![Field::new("ok", bool::shape())])
///     }
/// }
/// ```
pub trait GraphqlType {
    /// Returns the shape of this type.
    fn shape() -> Shape;
}

macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl GraphqlType for $ty {
                fn shape() -> Shape {
                    Shape::Scalar(ScalarKind::$kind)
                }
            }
        )*
    };
}

impl_scalar! {
    String => String,
    str => String,
    char => String,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

impl<T: GraphqlType + ?Sized> GraphqlType for &T {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: GraphqlType> GraphqlType for Vec<T> {
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }
}

impl<T: GraphqlType> GraphqlType for [T] {
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }
}

impl<T: GraphqlType, const N: usize> GraphqlType for [T; N] {
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }
}

impl<T: GraphqlType> GraphqlType for Option<T> {
    fn shape() -> Shape {
        Shape::Pointer(T::shape)
    }
}

impl<T: GraphqlType + ?Sized> GraphqlType for Box<T> {
    fn shape() -> Shape {
        Shape::Pointer(T::shape)
    }
}

impl<T: GraphqlType + ?Sized> GraphqlType for Arc<T> {
    fn shape() -> Shape {
        Shape::Pointer(T::shape)
    }
}

impl<K, V, S> GraphqlType for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::Opaque("map")
    }
}

impl<K, V> GraphqlType for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Opaque("map")
    }
}

impl GraphqlType for serde_json::Value {
    fn shape() -> Shape {
        Shape::Opaque("interface")
    }
}

impl GraphqlType for () {
    fn shape() -> Shape {
        Shape::Opaque("unit")
    }
}

fn is_scalar_type(graphql_type: &str) -> bool {
    matches!(graphql_type, "String" | "Int" | "Float" | "Boolean")
}

/// Infers the GraphQL type of an argument shape.
///
/// Scalars map to `String`, `Int`, `Float` or `Boolean`; lists map to
/// `[<element>]` where the element must itself be a scalar. `!` is appended
/// to the outer type when `required` is set.
///
/// # Errors
///
/// Returns [`TypeError::InvalidArgumentType`] for lists whose elements are
/// not scalars, and [`TypeError::UnsupportedType`] for every other
/// non-scalar shape.
///
/// # Example
///
/// ```rust
/// use borgbase_api::clients::graphql::{infer, GraphqlType};
///
/// assert_eq!(infer(&String::shape(), true).unwrap(), "String!");
/// assert_eq!(infer(&Vec::<u8>::shape(), false).unwrap(), "[Int]");
/// assert!(infer(&Vec::<Vec<u8>>::shape(), false).is_err());
/// ```
pub fn infer(shape: &Shape, required: bool) -> Result<String, TypeError> {
    let suffix = if required { "!" } else { "" };

    match shape {
        Shape::Scalar(kind) => Ok(format!("{}{suffix}", kind.graphql_name())),
        Shape::List(element) => match infer(element, false) {
            Ok(inner) if is_scalar_type(&inner) => Ok(format!("[{inner}]{suffix}")),
            _ => Err(TypeError::InvalidArgumentType {
                element: element.kind(),
            }),
        },
        other => Err(TypeError::UnsupportedType { kind: other.kind() }),
    }
}

/// Infers the GraphQL type of `T` without a value.
///
/// # Errors
///
/// See [`infer`].
pub fn infer_type<T: GraphqlType + ?Sized>(required: bool) -> Result<String, TypeError> {
    infer(&T::shape(), required)
}

/// Infers the GraphQL type of a live value.
///
/// # Errors
///
/// See [`infer`].
pub fn infer_value<T: GraphqlType + ?Sized>(
    _value: &T,
    required: bool,
) -> Result<String, TypeError> {
    infer_type::<T>(required)
}

/// Builds the selection set body for a schema shape.
///
/// Pointer and list layers around the schema are stripped first. The result
/// is the space-joined field list without the surrounding braces.
///
/// # Panics
///
/// Panics if the stripped shape is not an object. Passing a non-struct schema
/// is a programming error, not a runtime condition.
#[must_use]
pub fn project(shape: &Shape) -> String {
    let underlying = shape.clone().into_underlying();
    let Shape::Object(fields) = &underlying else {
        panic!("expected struct, got {}", underlying.kind());
    };

    fields
        .iter()
        .map(|field| match field.shape() {
            nested @ Shape::Object(_) => format!("{} {{ {} }}", field.name(), project(nested)),
            Shape::List(element) if element.is_object() => {
                format!("{} {{ {} }}", field.name(), project(element))
            }
            _ => field.name().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn selection_cache() -> &'static RwLock<HashMap<TypeId, Arc<str>>> {
    static CACHE: OnceLock<RwLock<HashMap<TypeId, Arc<str>>>> = OnceLock::new();
    CACHE.get_or_init(RwLock::default)
}

/// Returns the selection set body for `T`, computing it once per type.
///
/// Calling this when a schema type is first registered surfaces a malformed
/// schema immediately instead of on the first request.
///
/// # Panics
///
/// Panics if `T` is not a struct after stripping pointers and lists.
///
/// # Example
///
/// ```rust
/// use borgbase_api::clients::graphql::selection;
/// use borgbase_api::resources::SshKey;
///
/// let fields = selection::<Vec<SshKey>>();
/// assert!(fields.starts_with("id name"));
/// ```
#[must_use]
pub fn selection<T: GraphqlType + ?Sized + 'static>() -> Arc<str> {
    let id = TypeId::of::<T>();
    if let Some(cached) = selection_cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
    {
        return Arc::clone(cached);
    }

    let projected: Arc<str> = project(&T::shape()).into();
    selection_cache()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(id)
        .or_insert(projected)
        .clone()
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}
