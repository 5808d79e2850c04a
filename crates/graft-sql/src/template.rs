use crate::serializer::Flavor;

use graft_core::driver::PreparedStatement;
use graft_core::graft_trace_query;
use graft_core::stmt::{Type, TypedValue, Value};
use graft_core::{Error, Result};

use indexmap::IndexMap;

/// A parsed SQL template: literal text fragments interleaved with named
/// parameter references.
///
/// Parameters are spelled `:name`. `::` (a cast) is literal text, as is
/// anything inside a single-quoted string. The same name may be referenced
/// more than once; each occurrence expands independently at bind time.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlTemplate {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Param(String),
}

impl SqlTemplate {
    pub fn parse(text: &str) -> Result<Self> {
        let mut segments = vec![];
        let mut buf = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\'' => {
                    buf.push('\'');
                    loop {
                        match chars.next() {
                            None => {
                                return Err(Error::invalid_template(
                                    "unterminated string literal",
                                ));
                            }
                            Some('\'') => {
                                buf.push('\'');
                                // `''` is an escaped quote; the string goes on
                                if chars.peek() == Some(&'\'') {
                                    buf.push('\'');
                                    chars.next();
                                } else {
                                    break;
                                }
                            }
                            Some(c) => buf.push(c),
                        }
                    }
                }
                ':' => {
                    if chars.peek() == Some(&':') {
                        buf.push_str("::");
                        chars.next();
                        continue;
                    }

                    let mut name = String::new();
                    while let Some(&c) = chars.peek() {
                        if c.is_ascii_alphanumeric() || c == '_' {
                            name.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    if name.is_empty() {
                        return Err(Error::invalid_template(
                            "`:` is not followed by a parameter name",
                        ));
                    }

                    if !buf.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut buf)));
                    }
                    segments.push(Segment::Param(name));
                }
                c => buf.push(c),
            }
        }

        if !buf.is_empty() {
            segments.push(Segment::Text(buf));
        }

        Ok(Self { segments })
    }

    /// Distinct parameter names, in first-seen order.
    pub fn param_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = vec![];
        for segment in &self.segments {
            if let Segment::Param(name) = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Materialize the template against one set of bindings.
    ///
    /// Walks the segments left to right with a running 1-based positional
    /// counter. A scalar binding emits one placeholder; a list binding of
    /// cardinality N emits N comma-separated placeholders and records N
    /// consecutive indexes. A parameter referenced more than once
    /// accumulates indexes across all its occurrences, in traversal order,
    /// so one bound collection scatters correctly to every repetition.
    ///
    /// The result is tied to this exact bind-value shape: a differently
    /// sized collection needs a fresh expansion.
    pub fn expand(&self, bindings: &Bindings, flavor: Flavor) -> Result<ExpandedSql> {
        for name in bindings.names() {
            let referenced = self
                .segments
                .iter()
                .any(|segment| matches!(segment, Segment::Param(p) if p == name));
            if !referenced {
                return Err(Error::unknown_parameter(name));
            }
        }

        let mut sql = String::new();
        let mut values = vec![];
        let mut indexes: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut next_index = 1;

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => sql.push_str(text),
                Segment::Param(name) => {
                    let binding = bindings
                        .get(name)
                        .ok_or_else(|| Error::unbound_parameter(name.clone()))?;
                    let recorded = indexes.entry(name.clone()).or_default();

                    match binding {
                        Binding::Scalar(value) => {
                            flavor.push_placeholder(&mut sql, next_index);
                            values.push(value.clone());
                            recorded.push(next_index);
                            next_index += 1;
                        }
                        Binding::List(items) => {
                            if items.is_empty() {
                                return Err(Error::empty_list_binding(name.clone()));
                            }
                            for (i, item) in items.iter().enumerate() {
                                if i > 0 {
                                    sql.push_str(", ");
                                }
                                flavor.push_placeholder(&mut sql, next_index);
                                values.push(item.clone());
                                recorded.push(next_index);
                                next_index += 1;
                            }
                        }
                    }
                }
            }
        }

        graft_trace_query!(&sql, values.len());

        Ok(ExpandedSql {
            sql,
            values,
            indexes,
        })
    }
}

/// A scalar or multi-valued value for one named parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Scalar(Value),
    List(Vec<Value>),
}

impl Binding {
    /// How many positional placeholders one occurrence of this binding
    /// expands to.
    pub fn cardinality(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::List(items) => items.len(),
        }
    }
}

/// Named-parameter bindings, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    map: IndexMap<String, Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scalar(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.map.insert(name.into(), Binding::Scalar(value.into()));
        self
    }

    pub fn list<V: Into<Value>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.map.insert(name.into(), Binding::List(values));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.map.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

/// A template materialized against one bind-value shape: the final SQL with
/// every placeholder spelled out, the bound values in placeholder order, and
/// per parameter the 1-based positional indexes it occupies across all its
/// occurrences.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedSql {
    sql: String,
    values: Vec<Value>,
    indexes: IndexMap<String, Vec<usize>>,
}

impl ExpandedSql {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn placeholder_count(&self) -> usize {
        self.values.len()
    }

    /// The positional indexes a parameter occupies, in traversal order.
    pub fn indexes(&self, name: &str) -> Option<&[usize]> {
        self.indexes.get(name).map(Vec::as_slice)
    }

    /// Every parameter with its indexes, in first-occurrence order.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.indexes
            .iter()
            .map(|(name, indexes)| (name.as_str(), indexes.as_slice()))
    }

    /// A ready-to-execute statement. Template parameters carry no declared
    /// column types, so each value binds with its own inferred type; null
    /// binds as text.
    pub fn into_prepared(self) -> PreparedStatement {
        let params = self
            .values
            .into_iter()
            .map(|value| {
                let ty = value.infer_ty().unwrap_or(Type::Text);
                TypedValue::new(value, ty)
            })
            .collect();
        PreparedStatement::new(self.sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_params_and_casts() {
        let template = SqlTemplate::parse(
            "select * from t where a = :a and b = cast(c as text)::text and d = :a",
        )
        .unwrap();
        assert_eq!(vec!["a"], template.param_names());
    }

    #[test]
    fn quoted_text_is_opaque() {
        let template = SqlTemplate::parse("select ':not_a_param' from t where a = :a").unwrap();
        assert_eq!(vec!["a"], template.param_names());

        let expanded = template
            .expand(&Bindings::new().scalar("a", 1i64), Flavor::Mysql)
            .unwrap();
        assert_eq!("select ':not_a_param' from t where a = ?", expanded.sql());
    }

    #[test]
    fn escaped_quote_stays_inside_the_string() {
        let template = SqlTemplate::parse("select 'it''s :fine' from t").unwrap();
        assert!(template.param_names().is_empty());
    }

    #[test]
    fn unterminated_string_is_a_parse_error() {
        let err = SqlTemplate::parse("select 'oops").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn bare_colon_is_a_parse_error() {
        let err = SqlTemplate::parse("select a from t where b = : 1").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn postgres_placeholders_are_numbered() {
        let template = SqlTemplate::parse("select * from t where a in (:ids)").unwrap();
        let expanded = template
            .expand(
                &Bindings::new().list("ids", [1i64, 2, 3]),
                Flavor::Postgresql,
            )
            .unwrap();
        assert_eq!("select * from t where a in ($1, $2, $3)", expanded.sql());
    }

    #[test]
    fn empty_list_binding_is_rejected() {
        let template = SqlTemplate::parse("select * from t where a in (:ids)").unwrap();
        let err = template
            .expand(
                &Bindings::new().list("ids", Vec::<Value>::new()),
                Flavor::Mysql,
            )
            .unwrap_err();
        assert!(err.is_binding());
    }

    #[test]
    fn extra_binding_is_rejected() {
        let template = SqlTemplate::parse("select * from t where a = :a").unwrap();
        let err = template
            .expand(
                &Bindings::new().scalar("a", 1i64).scalar("b", 2i64),
                Flavor::Mysql,
            )
            .unwrap_err();
        assert!(err.is_binding());
    }

    #[test]
    fn missing_binding_is_rejected() {
        let template = SqlTemplate::parse("select * from t where a = :a").unwrap();
        let err = template.expand(&Bindings::new(), Flavor::Mysql).unwrap_err();
        assert!(err.is_binding());
    }
}
