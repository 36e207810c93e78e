//! Macros for building filters and defining entity schemas.

/// Builds a [`crate::Filter`] from `column = value` pairs, in order.
///
/// ```rust
/// use rowkit_db::filter;
///
/// let f = filter!(status = "done", project_id = 1);
/// assert_eq!(f.columns(), vec!["status", "project_id"]);
///
/// let all = filter!();
/// assert!(all.is_empty());
/// ```
#[macro_export]
macro_rules! filter {
    () => {
        $crate::Filter::new()
    };
    ($($col:ident = $value:expr),+ $(,)?) => {
        $crate::Filter::new()$(.eq(stringify!($col), $value))+
    };
}

/// Defines a module with typed column constants for a database table.
///
/// # Syntax
///
/// ```ignore
/// define_entity!(
///     projects {
///         table: "projects",
///         columns: {
///             ID: i64 => "id",
///             NAME: String => "name"
///         }
///     }
/// );
/// ```
///
/// This expands to:
///
/// ```ignore
/// pub mod projects {
///     pub const TABLE: &str = "projects";
///     pub const ID: rowkit_db::expr::Col<i64> = rowkit_db::expr::Col::new("id");
///     pub const NAME: rowkit_db::expr::Col<String> = rowkit_db::expr::Col::new("name");
/// }
/// ```
#[macro_export]
macro_rules! define_entity {
    (
        $entity:ident {
            table: $table:literal,
            columns: {
                $($col_name:ident: $col_type:ty => $db_col:literal),* $(,)?
            }
        }
    ) => {
        pub mod $entity {
            use $crate::expr::column::Col;

            pub const TABLE: &str = $table;

            /// Column names in declaration order.
            pub const COLUMNS: &[&str] = &[$($db_col),*];

            $(
                pub const $col_name: Col<$col_type> = Col::new($db_col);
            )*
        }
    };
}
