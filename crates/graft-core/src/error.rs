mod adhoc;
mod column_decode;
mod driver;
mod empty_list_binding;
mod entity_downcast;
mod invalid_binding;
mod invalid_mapping;
mod invalid_schema;
mod invalid_statement;
mod invalid_template;
mod key_count;
mod missing_binder;
mod missing_column;
mod type_conversion;
mod unbound_parameter;
mod unknown_parameter;

use adhoc::AdhocError;
use column_decode::ColumnDecodeError;
use driver::DriverError;
use empty_list_binding::EmptyListBindingError;
use entity_downcast::EntityDowncastError;
use invalid_binding::InvalidBindingError;
use invalid_mapping::InvalidMappingError;
use invalid_schema::InvalidSchemaError;
use invalid_statement::InvalidStatementError;
use invalid_template::InvalidTemplateError;
use key_count::KeyCountError;
use missing_binder::MissingBinderError;
use missing_column::MissingColumnError;
use type_conversion::TypeConversionError;
use unbound_parameter::UnboundParameterError;
use unknown_parameter::UnknownParameterError;

use crate::stmt::{Type, Value};

/// Helper macro for returning ad-hoc errors.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Helper macro for creating ad-hoc errors.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in Graft.
///
/// Errors fall into four families: configuration errors (the mapping or
/// statement is malformed and must be fixed by the caller), binding errors (a
/// value handed to a statement does not fit its declared type or parameter),
/// decode errors (a value read back from a row does not fit), and driver
/// errors surfaced from the statement-execution boundary. None are
/// retryable within one logical operation.
pub struct Error {
    kind: Box<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    ColumnDecode(ColumnDecodeError),
    Driver(DriverError),
    EmptyListBinding(EmptyListBindingError),
    EntityDowncast(EntityDowncastError),
    InvalidBinding(InvalidBindingError),
    InvalidMapping(InvalidMappingError),
    InvalidSchema(InvalidSchemaError),
    InvalidStatement(InvalidStatementError),
    InvalidTemplate(InvalidTemplateError),
    KeyCount(KeyCountError),
    MissingBinder(MissingBinderError),
    MissingColumn(MissingColumnError),
    TypeConversion(TypeConversionError),
    UnboundParameter(UnboundParameterError),
    UnknownParameter(UnknownParameterError),
}

impl Error {
    #[doc(hidden)]
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Self {
        Self::from(ErrorKind::Adhoc(AdhocError(args.to_string())))
    }

    /// A value read from a row does not match the column's declared type.
    pub fn column_decode(
        column: impl Into<String>,
        expected: Type,
        actual: Value,
        row: Option<usize>,
    ) -> Self {
        Self::from(ErrorKind::ColumnDecode(ColumnDecodeError {
            column: column.into(),
            expected,
            actual,
            row,
        }))
    }

    /// An error raised by the statement-execution boundary.
    pub fn driver(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::from(ErrorKind::Driver(DriverError(source.into())))
    }

    /// An empty collection was bound to an expandable parameter.
    pub fn empty_list_binding(name: impl Into<String>) -> Self {
        Self::from(ErrorKind::EmptyListBinding(EmptyListBindingError {
            name: name.into(),
        }))
    }

    /// An entity instance could not be downcast to the requested type.
    pub fn entity_downcast(expected: &'static str) -> Self {
        Self::from(ErrorKind::EntityDowncast(EntityDowncastError { expected }))
    }

    /// A value does not match the declared type of its column or parameter.
    pub fn invalid_binding(target: impl Into<String>, expected: Type, actual: Value) -> Self {
        Self::from(ErrorKind::InvalidBinding(InvalidBindingError {
            target: target.into(),
            expected,
            actual,
        }))
    }

    /// A join tree or inflater configuration is inconsistent.
    pub fn invalid_mapping(detail: impl Into<String>) -> Self {
        Self::from(ErrorKind::InvalidMapping(InvalidMappingError {
            detail: detail.into(),
        }))
    }

    /// A schema definition is inconsistent.
    pub fn invalid_schema(detail: impl Into<String>) -> Self {
        Self::from(ErrorKind::InvalidSchema(InvalidSchemaError {
            detail: detail.into(),
        }))
    }

    /// A statement is shaped in a way SQL cannot express.
    pub fn invalid_statement(detail: impl Into<String>) -> Self {
        Self::from(ErrorKind::InvalidStatement(InvalidStatementError {
            detail: detail.into(),
        }))
    }

    /// A SQL template could not be parsed.
    pub fn invalid_template(detail: impl Into<String>) -> Self {
        Self::from(ErrorKind::InvalidTemplate(InvalidTemplateError {
            detail: detail.into(),
        }))
    }

    /// The number of generated keys does not match the number of submitted
    /// rows.
    pub fn key_count(expected: usize, actual: usize) -> Self {
        Self::from(ErrorKind::KeyCount(KeyCountError { expected, actual }))
    }

    /// No binder is registered for a column's declared type.
    pub fn missing_binder(ty: Type) -> Self {
        Self::from(ErrorKind::MissingBinder(MissingBinderError { ty }))
    }

    /// A row does not carry a column label the reader expected.
    pub fn missing_column(label: impl Into<String>, row: Option<usize>) -> Self {
        Self::from(ErrorKind::MissingColumn(MissingColumnError {
            label: label.into(),
            row,
        }))
    }

    /// A value cannot be converted to the requested Rust type.
    pub fn type_conversion(value: Value, to_type: &'static str) -> Self {
        Self::from(ErrorKind::TypeConversion(TypeConversionError {
            value,
            to_type,
        }))
    }

    /// A template parameter has no binding.
    pub fn unbound_parameter(name: impl Into<String>) -> Self {
        Self::from(ErrorKind::UnboundParameter(UnboundParameterError {
            name: name.into(),
        }))
    }

    /// A binding names a parameter the template does not reference.
    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        Self::from(ErrorKind::UnknownParameter(UnknownParameterError {
            name: name.into(),
        }))
    }

    /// True if the error is a configuration error: the mapping, schema,
    /// template, or statement shape must be fixed by the caller.
    pub fn is_configuration(&self) -> bool {
        matches!(
            &*self.kind,
            ErrorKind::InvalidMapping(_)
                | ErrorKind::InvalidSchema(_)
                | ErrorKind::InvalidStatement(_)
                | ErrorKind::InvalidTemplate(_)
                | ErrorKind::MissingBinder(_)
        )
    }

    /// True if the error is a binding error: a value handed to a statement
    /// does not fit its declared type or parameter.
    pub fn is_binding(&self) -> bool {
        matches!(
            &*self.kind,
            ErrorKind::EmptyListBinding(_)
                | ErrorKind::InvalidBinding(_)
                | ErrorKind::UnboundParameter(_)
                | ErrorKind::UnknownParameter(_)
        )
    }

    /// True if the error is a row-decoding error.
    pub fn is_decode(&self) -> bool {
        matches!(
            &*self.kind,
            ErrorKind::ColumnDecode(_)
                | ErrorKind::EntityDowncast(_)
                | ErrorKind::KeyCount(_)
                | ErrorKind::MissingColumn(_)
                | ErrorKind::TypeConversion(_)
        )
    }

    /// True if the error originated at the driver boundary.
    pub fn is_driver(&self) -> bool {
        matches!(&*self.kind, ErrorKind::Driver(_))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &*self.kind {
            ErrorKind::Adhoc(e) => e.fmt(f),
            ErrorKind::ColumnDecode(e) => e.fmt(f),
            ErrorKind::Driver(e) => e.fmt(f),
            ErrorKind::EmptyListBinding(e) => e.fmt(f),
            ErrorKind::EntityDowncast(e) => e.fmt(f),
            ErrorKind::InvalidBinding(e) => e.fmt(f),
            ErrorKind::InvalidMapping(e) => e.fmt(f),
            ErrorKind::InvalidSchema(e) => e.fmt(f),
            ErrorKind::InvalidStatement(e) => e.fmt(f),
            ErrorKind::InvalidTemplate(e) => e.fmt(f),
            ErrorKind::KeyCount(e) => e.fmt(f),
            ErrorKind::MissingBinder(e) => e.fmt(f),
            ErrorKind::MissingColumn(e) => e.fmt(f),
            ErrorKind::TypeConversion(e) => e.fmt(f),
            ErrorKind::UnboundParameter(e) => e.fmt(f),
            ErrorKind::UnknownParameter(e) => e.fmt(f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Error({:?})", self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.kind {
            ErrorKind::Driver(DriverError(source)) => Some(source.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_are_disjoint() {
        let errors = [
            Error::invalid_schema("dup column"),
            Error::missing_binder(Type::Bool),
            Error::invalid_binding("users.id", Type::I64, Value::from("x")),
            Error::unbound_parameter("b"),
            Error::column_decode("users.id", Type::I64, Value::from(false), Some(3)),
            Error::driver(std::io::Error::other("boom")),
        ];

        for err in &errors {
            let families = [
                err.is_configuration(),
                err.is_binding(),
                err.is_decode(),
                err.is_driver(),
            ];
            assert_eq!(1, families.iter().filter(|f| **f).count(), "{err}");
        }
    }

    #[test]
    fn display_names_the_column() {
        let err = Error::column_decode("orders.total", Type::I64, Value::from("oops"), Some(7));
        let rendered = err.to_string();
        assert!(rendered.contains("orders.total"), "{rendered}");
        assert!(rendered.contains("row 7"), "{rendered}");
    }
}
