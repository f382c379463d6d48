//! SQL literal escaping
//!
//! Every value that ends up in an INSERT statement goes through
//! [`SqlLiteral::to_sql`] exactly once. Conversion is infallible.

use crate::models::JsonBlob;
use serde_json::Value;

/// The unquoted SQL null literal
pub const NULL: &str = "NULL";

/// Wrap text in single quotes, doubling any embedded single quote.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for ch in text.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// Conversion of a field value into a literal that can be pasted into SQL.
pub trait SqlLiteral {
    fn to_sql(&self) -> String;
}

impl SqlLiteral for str {
    fn to_sql(&self) -> String {
        quote(self)
    }
}

impl SqlLiteral for String {
    fn to_sql(&self) -> String {
        quote(self)
    }
}

impl SqlLiteral for u64 {
    fn to_sql(&self) -> String {
        self.to_string()
    }
}

impl SqlLiteral for JsonBlob {
    fn to_sql(&self) -> String {
        quote(self.as_str())
    }
}

impl SqlLiteral for Value {
    fn to_sql(&self) -> String {
        match self {
            Value::Null => NULL.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => quote(s),
            Value::Bool(b) => quote(if *b { "true" } else { "false" }),
            // Display on a Value is compact JSON with non-ASCII left as-is
            nested => quote(&nested.to_string()),
        }
    }
}

impl<T: SqlLiteral + ?Sized> SqlLiteral for &T {
    fn to_sql(&self) -> String {
        (**self).to_sql()
    }
}

impl<T: SqlLiteral> SqlLiteral for Option<T> {
    fn to_sql(&self) -> String {
        match self {
            Some(value) => value.to_sql(),
            None => NULL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_and_null() {
        assert_eq!(None::<Value>.to_sql(), "NULL");
        assert_eq!(Value::Null.to_sql(), "NULL");
        assert_eq!(Some(Value::Null).to_sql(), "NULL");
    }

    #[test]
    fn test_numbers_unquoted() {
        assert_eq!(json!(42).to_sql(), "42");
        assert_eq!(json!(-7).to_sql(), "-7");
        assert_eq!(json!(0.25).to_sql(), "0.25");
        assert_eq!(17u64.to_sql(), "17");
    }

    #[test]
    fn test_apostrophe_doubled() {
        assert_eq!(json!("don't").to_sql(), "'don''t'");
        assert_eq!("it''s".to_sql(), "'it''''s'");
        assert_eq!("".to_sql(), "''");
    }

    #[test]
    fn test_nested_serialized_compactly() {
        let value = json!({"origin": "Latin", "forms": ["l'eau", "水"]});
        assert_eq!(
            value.to_sql(),
            r#"'{"origin":"Latin","forms":["l''eau","水"]}'"#
        );
    }

    #[test]
    fn test_bool_quoted() {
        assert_eq!(json!(true).to_sql(), "'true'");
        assert_eq!(json!(false).to_sql(), "'false'");
    }

    #[test]
    fn test_quote_balanced() {
        let literal = quote("a'b''c'");
        assert_eq!(literal.matches('\'').count() % 2, 0);
        assert!(literal.starts_with('\'') && literal.ends_with('\''));
    }
}
