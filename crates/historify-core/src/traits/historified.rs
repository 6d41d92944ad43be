//! Base entity contract - what a type must expose to be audited

use crate::value_objects::FieldValue;

/// A persisted record type whose inserts and updates are recorded
///
/// The names are used to derive the history table, so they must be plain SQL
/// identifiers. This is checked when the type is registered.
///
/// ```rust,ignore
/// impl Historified for Widget {
///     const ENTITY_NAME: &'static str = "Widget";
///     const TABLE_NAME: &'static str = "widgets";
///
///     fn id(&self) -> Option<i64> {
///         self.id
///     }
///
///     fn columns(&self) -> Vec<(&'static str, FieldValue)> {
///         vec![
///             ("id", self.id.into()),
///             ("name", self.name.as_str().into()),
///             ("price", self.price.into()),
///         ]
///     }
/// }
/// ```
pub trait Historified: Send + Sync + 'static {
    /// Type name, e.g. `Widget`
    const ENTITY_NAME: &'static str;

    /// Storage table, e.g. `widgets`
    const TABLE_NAME: &'static str;

    /// Identifier column referenced by the history foreign key
    const ID_COLUMN: &'static str = "id";

    /// Identifier, `None` until the row has been inserted
    fn id(&self) -> Option<i64>;

    /// Current values of every mapped column, in column order
    fn columns(&self) -> Vec<(&'static str, FieldValue)>;

    /// Bookkeeping columns that never count as a change (e.g. `updated_at`)
    fn bookkeeping_columns() -> &'static [&'static str] {
        &[]
    }
}
