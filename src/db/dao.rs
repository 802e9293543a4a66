//! Generic row-to-entity mapping and transactional statement helpers.
//!
//! This is the one reusable piece of the data layer: explicit transaction
//! boundaries for a lock-per-call usage pattern, a typed parameter binder
//! built on a closed kind enumeration, and a declarative row mapper that
//! populates `Default`-constructed entities from whatever columns a result
//! row happens to carry.

use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime};
use rusqlite::types::{FromSqlError, ToSqlOutput, Value, ValueRef};
use rusqlite::{Connection, Row, Statement, ToSql};
use rust_decimal::Decimal;

use crate::{Error, Result};

// ============================================================
// Transaction boundaries
// ============================================================

/// Take the connection out of autocommit mode by opening an explicit
/// transaction.
pub fn begin(conn: &Connection) -> Result<()> {
    conn.execute_batch("BEGIN")?;
    Ok(())
}

/// Commit the pending transaction.
pub fn commit(conn: &Connection) -> Result<()> {
    conn.execute_batch("COMMIT")?;
    Ok(())
}

/// Discard the pending transaction.
pub fn rollback(conn: &Connection) -> Result<()> {
    conn.execute_batch("ROLLBACK")?;
    Ok(())
}

// ============================================================
// Typed parameter binding
// ============================================================

/// The closed set of parameter kinds the data layer binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlKind {
    Integer,
    Decimal,
    Double,
    Text,
    TimeOfDay,
}

/// A statement parameter: a typed value, or a typed null that still knows
/// which kind it stands in for.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Integer(i64),
    Decimal(Decimal),
    Double(f64),
    Text(String),
    TimeOfDay(NaiveTime),
    Null(SqlKind),
}

impl SqlParam {
    pub fn kind(&self) -> SqlKind {
        match self {
            SqlParam::Integer(_) => SqlKind::Integer,
            SqlParam::Decimal(_) => SqlKind::Decimal,
            SqlParam::Double(_) => SqlKind::Double,
            SqlParam::Text(_) => SqlKind::Text,
            SqlParam::TimeOfDay(_) => SqlKind::TimeOfDay,
            SqlParam::Null(kind) => *kind,
        }
    }

    pub fn integer<T: Into<i64>>(value: Option<T>) -> Self {
        match value {
            Some(v) => SqlParam::Integer(v.into()),
            None => SqlParam::Null(SqlKind::Integer),
        }
    }

    pub fn decimal(value: Option<Decimal>) -> Self {
        match value {
            Some(v) => SqlParam::Decimal(v),
            None => SqlParam::Null(SqlKind::Decimal),
        }
    }

    pub fn double(value: Option<f64>) -> Self {
        match value {
            Some(v) => SqlParam::Double(v),
            None => SqlParam::Null(SqlKind::Double),
        }
    }

    pub fn text<S: Into<String>>(value: Option<S>) -> Self {
        match value {
            Some(v) => SqlParam::Text(v.into()),
            None => SqlParam::Null(SqlKind::Text),
        }
    }

    pub fn time_of_day(value: Option<NaiveTime>) -> Self {
        match value {
            Some(v) => SqlParam::TimeOfDay(v),
            None => SqlParam::Null(SqlKind::TimeOfDay),
        }
    }
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlParam::Integer(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            // Decimals travel as text to keep their scale out of SQLite's
            // float representation.
            SqlParam::Decimal(v) => ToSqlOutput::Owned(Value::Text(v.to_string())),
            SqlParam::Double(v) => ToSqlOutput::Owned(Value::Real(*v)),
            SqlParam::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            SqlParam::TimeOfDay(v) => {
                ToSqlOutput::Owned(Value::Text(v.format("%H:%M:%S").to_string()))
            }
            SqlParam::Null(_) => ToSqlOutput::Owned(Value::Null),
        })
    }
}

/// Bind one parameter at a 1-based index, checking the value against the
/// kind the statement declares for that position.
///
/// A kind mismatch fails with [`Error::UnsupportedType`]; nothing is ever
/// silently coerced. Typed nulls pass the check for their declared kind.
pub fn bind(stmt: &mut Statement<'_>, index: usize, param: &SqlParam, declared: SqlKind) -> Result<()> {
    let actual = param.kind();
    if actual != declared {
        return Err(Error::UnsupportedType { declared, actual });
    }
    stmt.raw_bind_parameter(index, param)?;
    Ok(())
}

/// Read back the key generated by the most recent insert on this connection.
///
/// A missing row is a fatal inconsistency, surfaced as
/// [`Error::NoGeneratedKey`] and never retried. `table` names the insert
/// target for the error message; SQLite scopes the rowid to the connection.
pub fn last_insert_id(conn: &Connection, table: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT last_insert_rowid()")?;
    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => Ok(row.get(0)?),
        None => Err(Error::NoGeneratedKey {
            table: table.to_string(),
        }),
    }
}

// ============================================================
// Row-to-entity mapping
// ============================================================

/// Declarative field-to-column mapping for one entity.
///
/// Implementors list their fields once and route column values into them;
/// [`extract`] drives the mapping so no per-query copying code is needed.
pub trait FromRow: Default {
    /// Type name used in mapping errors.
    const TARGET: &'static str;

    /// Declared field names, in declaration order. Collection fields are
    /// listed too; they never match a result column and so keep the defaults
    /// the constructor gave them.
    fn fields() -> &'static [&'static str];

    /// Assign one column value into the named field.
    fn assign(&mut self, field: &str, value: ValueRef<'_>) -> std::result::Result<(), FromSqlError>;
}

/// Populate a `T` from the row the caller has positioned the cursor on.
///
/// For each declared field the expected column name is derived with
/// [`column_name`]. Fields whose column is absent from the result set, or
/// whose value is SQL NULL, are left at their `Default` value. An
/// incompatible value fails with a single [`Error::Mapping`] naming the
/// target type. The cursor is not advanced.
pub fn extract<T: FromRow>(row: &Row<'_>) -> Result<T> {
    let mut entity = T::default();

    for field in T::fields() {
        let column = column_name(field);
        match row.get_ref(column.as_str()) {
            Ok(ValueRef::Null) => {}
            Ok(value) => entity.assign(field, value).map_err(|source| Error::Mapping {
                target: T::TARGET,
                source,
            })?,
            // Column not present in this result set: keep the default.
            Err(rusqlite::Error::InvalidColumnName(_)) => {}
            Err(err) => return Err(err.into()),
        }
    }

    Ok(entity)
}

/// Derive a column name from a field name: an underscore is inserted before
/// each interior uppercase letter and the letter lowercased, so `numRequired`
/// becomes `num_required`. Names already in snake_case pass through
/// unchanged.
pub fn column_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len() + 2);
    for ch in field.chars() {
        if ch.is_ascii_uppercase() {
            name.push('_');
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }
    name
}

/// Convert a DECIMAL column into a [`Decimal`].
///
/// SQLite's numeric affinity may hand the value back as an integer, a real,
/// or the original text, depending on what the stored literal looked like.
pub fn decimal(value: ValueRef<'_>) -> std::result::Result<Decimal, FromSqlError> {
    match value {
        ValueRef::Integer(i) => Ok(Decimal::from(i)),
        ValueRef::Real(f) => Decimal::try_from(f).map_err(|e| FromSqlError::Other(Box::new(e))),
        ValueRef::Text(_) => {
            let text = value.as_str()?;
            Decimal::from_str(text).map_err(|e| FromSqlError::Other(Box::new(e)))
        }
        _ => Err(FromSqlError::InvalidType),
    }
}

/// Convert a SQL time value into a local time-of-day.
pub fn time_of_day(value: ValueRef<'_>) -> std::result::Result<NaiveTime, FromSqlError> {
    let text = value.as_str()?;
    NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|e| FromSqlError::Other(Box::new(e)))
}

/// Convert a SQL timestamp value into a local date-time.
pub fn date_time(value: ValueRef<'_>) -> std::result::Result<NaiveDateTime, FromSqlError> {
    let text = value.as_str()?;
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|e| FromSqlError::Other(Box::new(e)))
}
