use std::fmt;

use crate::error::RuntimeError;

/// Canonical `true`, shared by every evaluation
pub const TRUE: Object = Object::Boolean(true);
/// Canonical `false`, shared by every evaluation
pub const FALSE: Object = Object::Boolean(false);
/// Canonical `null`, shared by every evaluation
pub const NULL: Object = Object::Null;

/// Runtime value representation
///
/// `ReturnValue` and `Error` are control-flow wrappers rather than data: they only
/// exist to be carried out of nested evaluation and are never operated on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    /// 64-bit signed integer
    Integer(i64),
    /// Boolean value
    Boolean(bool),
    /// First-class nil value
    Null,
    /// Value of a `return` statement on its way out of nested blocks
    ReturnValue(Box<Object>),
    /// Runtime fault on its way out of the evaluation
    Error(RuntimeError),
}

/// Type tag of an [`Object`], as it appears in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// `INTEGER`
    Integer,
    /// `BOOLEAN`
    Boolean,
    /// `NULL`
    Null,
    /// `RETURN_VALUE`
    ReturnValue,
    /// `ERROR`
    Error,
}

impl Object {
    /// Returns the canonical boolean object for a native bool
    pub fn from_native_bool(value: bool) -> Self {
        if value {
            TRUE
        } else {
            FALSE
        }
    }

    /// Wraps a runtime fault, logging it once at the point it is manufactured
    pub fn error(err: RuntimeError) -> Self {
        tracing::debug!(error = %err, "runtime error");
        Object::Error(err)
    }

    /// Returns the type tag of this object
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
        }
    }

    /// Canonical display string of this object
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    /// Returns true if the value is truthy in a condition or under `!`
    ///
    /// Only `false` and `null` are falsy; integer zero is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    /// Returns true for the runtime error wrapper
    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Returns true for either control-flow wrapper
    pub fn is_control_flow(&self) -> bool {
        matches!(self, Object::ReturnValue(_) | Object::Error(_))
    }

    /// Message of an error object
    pub fn error_message(&self) -> Option<String> {
        match self {
            Object::Error(err) => Some(err.to_string()),
            _ => None,
        }
    }

    /// Strips a `ReturnValue` wrapper, leaving other objects untouched
    pub fn unwrap_return(self) -> Self {
        match self {
            Object::ReturnValue(inner) => *inner,
            other => other,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{}", n),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::Null => write!(f, "null"),
            Object::ReturnValue(inner) => write!(f, "{}", inner),
            Object::Error(err) => write!(f, "Error {}", err),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ObjectType::Integer => write!(f, "INTEGER"),
            ObjectType::Boolean => write!(f, "BOOLEAN"),
            ObjectType::Null => write!(f, "NULL"),
            ObjectType::ReturnValue => write!(f, "RETURN_VALUE"),
            ObjectType::Error => write!(f, "ERROR"),
        }
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::from_native_bool(value)
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::UnaryOp;

    #[test]
    fn test_type_names() {
        assert_eq!(Object::Integer(1).object_type().to_string(), "INTEGER");
        assert_eq!(TRUE.object_type().to_string(), "BOOLEAN");
        assert_eq!(NULL.object_type().to_string(), "NULL");
        assert_eq!(
            Object::ReturnValue(Box::new(NULL)).object_type().to_string(),
            "RETURN_VALUE"
        );
        assert_eq!(
            Object::Error(RuntimeError::DivisionByZero { left: 1 })
                .object_type()
                .to_string(),
            "ERROR"
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(Object::Integer(0).is_truthy());
        assert!(Object::Integer(-3).is_truthy());
        assert!(TRUE.is_truthy());
        assert!(!FALSE.is_truthy());
        assert!(!NULL.is_truthy());
    }

    #[test]
    fn test_inspect() {
        assert_eq!(Object::Integer(-42).inspect(), "-42");
        assert_eq!(TRUE.inspect(), "true");
        assert_eq!(FALSE.inspect(), "false");
        assert_eq!(NULL.inspect(), "null");
        assert_eq!(Object::ReturnValue(Box::new(Object::Integer(7))).inspect(), "7");

        let err = Object::Error(RuntimeError::UnknownPrefixOperator {
            op: UnaryOp::Neg,
            operand: ObjectType::Boolean,
        });
        assert_eq!(err.inspect(), "Error unknown operator: -BOOLEAN");
        assert_eq!(
            err.error_message().as_deref(),
            Some("unknown operator: -BOOLEAN")
        );
    }

    #[test]
    fn test_canonical_booleans() {
        assert_eq!(Object::from_native_bool(true), TRUE);
        assert_eq!(Object::from(false), FALSE);
        assert_ne!(TRUE, FALSE);
    }

    #[test]
    fn test_control_flow_wrappers() {
        let ret = Object::ReturnValue(Box::new(Object::Integer(3)));
        assert!(ret.is_control_flow());
        assert!(!ret.is_error());
        assert_eq!(ret.unwrap_return(), Object::Integer(3));
        assert_eq!(Object::Integer(3).unwrap_return(), Object::Integer(3));
        assert!(Object::Error(RuntimeError::DivisionByZero { left: 0 }).is_control_flow());
        assert!(!NULL.is_control_flow());
    }
}
