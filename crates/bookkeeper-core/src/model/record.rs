use super::value::{FieldType, Value};

/// Accessor for one persisted field of a record type
///
/// Pairs the field's name and semantic type with a getter and a setter, so
/// repositories can read and write fields by name without reflection.
pub struct Field<R> {
    name: &'static str,
    field_type: FieldType,
    get: fn(&R) -> Value,
    set: fn(&mut R, Value) -> bool,
}

impl<R> Field<R> {
    pub fn new(
        name: &'static str,
        field_type: FieldType,
        get: fn(&R) -> Value,
        set: fn(&mut R, Value) -> bool,
    ) -> Self {
        Self {
            name,
            field_type,
            get,
            set,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Read the field off a record
    pub fn get(&self, record: &R) -> Value {
        (self.get)(record)
    }

    /// Assign a value onto a record
    ///
    /// Returns `false` and leaves the record untouched when the value's
    /// semantic type differs from the field's.
    pub fn set(&self, record: &mut R, value: Value) -> bool {
        (self.set)(record, value)
    }
}

impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Field<R> {}

impl<R> std::fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .finish()
    }
}

/// A plain data record that a repository can persist
///
/// Implementors expose their type name (the table is named after it,
/// lower-cased), the ordered accessor table of their persisted fields, and
/// an integer primary key where zero means "not yet persisted".
///
/// Most types implement this through [`impl_record!`](crate::impl_record).
pub trait Record: Default {
    fn type_name() -> &'static str;

    /// Persisted fields in declaration order, excluding the primary key
    fn fields() -> Vec<Field<Self>>;

    /// Current primary key, or `None` when the type does not carry one
    fn primary_key(&self) -> Option<i64>;

    fn set_primary_key(&mut self, key: i64);
}

/// Implement [`Record`] for a struct with a `primary_key: i64` field
///
/// ```
/// use bookkeeper_core::impl_record;
/// use bookkeeper_core::model::Record;
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// pub struct Category {
///     pub primary_key: i64,
///     pub name: String,
///     pub parent: i64,
/// }
///
/// impl_record!(Category { name: String, parent: i64 });
///
/// assert_eq!(Category::type_name(), "Category");
/// assert_eq!(Category::fields().len(), 2);
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ident { $($field:ident : $fty:ty),+ $(,)? }) => {
        impl $crate::model::Record for $ty {
            fn type_name() -> &'static str {
                stringify!($ty)
            }

            fn fields() -> Vec<$crate::model::Field<Self>> {
                vec![$(
                    $crate::model::Field::new(
                        stringify!($field),
                        <$fty as $crate::model::FieldKind>::FIELD_TYPE,
                        |record: &Self| <$fty as $crate::model::FieldKind>::to_value(&record.$field),
                        |record: &mut Self, value: $crate::model::Value| {
                            match <$fty as $crate::model::FieldKind>::from_value(value) {
                                Some(v) => {
                                    record.$field = v;
                                    true
                                }
                                None => false,
                            }
                        },
                    ),
                )+]
            }

            fn primary_key(&self) -> Option<i64> {
                Some(self.primary_key)
            }

            fn set_primary_key(&mut self, key: i64) {
                self.primary_key = key;
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Expense {
        primary_key: i64,
        amount: f64,
        comment: String,
    }

    crate::impl_record!(Expense {
        amount: f64,
        comment: String,
    });

    #[test]
    fn test_fields_follow_declaration_order() {
        let fields = Expense::fields();
        let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["amount", "comment"]);
        assert_eq!(fields[0].field_type(), FieldType::Real);
        assert_eq!(fields[1].field_type(), FieldType::Text);
    }

    #[test]
    fn test_getter_and_setter_round_trip() {
        let fields = Expense::fields();
        let mut expense = Expense::default();

        assert!(fields[0].set(&mut expense, Value::Real(12.5)));
        assert!(fields[1].set(&mut expense, Value::Text("lunch".into())));

        assert_eq!(fields[0].get(&expense), Value::Real(12.5));
        assert_eq!(fields[1].get(&expense), Value::Text("lunch".into()));
    }

    #[test]
    fn test_setter_rejects_wrong_type() {
        let fields = Expense::fields();
        let mut expense = Expense::default();

        assert!(!fields[0].set(&mut expense, Value::Text("12.5".into())));
        assert_eq!(expense.amount, 0.0);
    }

    #[test]
    fn test_primary_key_accessors() {
        let mut expense = Expense::default();
        assert_eq!(expense.primary_key(), Some(0));
        expense.set_primary_key(9);
        assert_eq!(expense.primary_key, 9);
    }
}
