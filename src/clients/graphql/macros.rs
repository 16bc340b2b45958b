//! The `graphql_object!` macro.

/// Declares a struct and implements [`GraphqlType`](crate::clients::graphql::GraphqlType)
/// for it, so it can be used as a result schema.
///
/// The struct is emitted unchanged, attributes included. Each field records:
///
/// - its declared name
/// - its serde name, taken from a leading `rename` in `#[serde(rename = "...")]`
/// - an optional explicit GraphQL name, written `=> "name"` after the type
///
/// Fields appear in the selection set in declaration order.
///
/// # Example
///
/// ```rust
/// use borgbase_api::graphql_object;
/// use borgbase_api::clients::graphql::selection;
/// use serde::Deserialize;
///
/// graphql_object! {
///     #[derive(Debug, Default, Deserialize)]
///     pub struct Server {
///         pub id: String,
///         #[serde(rename = "hostname")]
///         pub host: String,
///     }
/// }
///
/// graphql_object! {
///     #[derive(Debug, Default, Deserialize)]
///     pub struct Repo {
///         pub id: String,
///         pub server: Server,
///         #[serde(rename = "repoPath")]
///         pub path: String => "repoPath",
///     }
/// }
///
/// assert_eq!(&*selection::<Repo>(), "id server { id hostname } repoPath");
/// ```
#[macro_export]
macro_rules! graphql_object {
    (
        $(#[$($struct_attr:tt)*])*
        $vis:vis struct $name:ident {
            $(
                $(#[$($field_attr:tt)*])*
                $field_vis:vis $field:ident : $ty:ty $(=> $graphql:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$($struct_attr)*])*
        $vis struct $name {
            $(
                $(#[$($field_attr)*])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::clients::graphql::GraphqlType for $name {
            fn shape() -> $crate::clients::graphql::Shape {
                $crate::clients::graphql::Shape::Object(::std::vec![
                    $(
                        $crate::__graphql_field!(
                            @scan [::std::stringify!($field), $ty, [$($graphql)?]]
                            serde = []
                            $(#[$($field_attr)*])*
                        ),
                    )*
                ])
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __graphql_field {
    (@scan [$declared:expr, $ty:ty, [$($graphql:literal)?]] serde = [$($serde:literal)?]) => {{
        let field = $crate::clients::graphql::Field::new(
            $declared,
            <$ty as $crate::clients::graphql::GraphqlType>::shape(),
        );
        $(let field = field.graphql_name($graphql);)?
        $(let field = field.serde_name($serde);)?
        field
    }};
    (
        @scan $head:tt serde = [$($serde:literal)?]
        #[serde(rename = $rename:literal $(, $($_args:tt)*)?)]
        $($rest:tt)*
    ) => {
        $crate::__graphql_field!(@scan $head serde = [$rename] $($rest)*)
    };
    (
        @scan $head:tt serde = [$($serde:literal)?]
        #[$($_attr:tt)*]
        $($rest:tt)*
    ) => {
        $crate::__graphql_field!(@scan $head serde = [$($serde)?] $($rest)*)
    };
}
