// Server-side search filters.
//
// A filter is rendered as `filter_<column>=<value>` query parameters.
// Values are converted to their wire form when the filter is built,
// so two filters compare equal exactly when they would send the same query.

use std::fmt;

use strum::{Display, EnumString, IntoStaticStr};

/// A column exposed by the table API.
///
/// Closed on purpose: a filter can only name a column the server knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Property {
    #[strum(serialize = "objid")]
    Id,
    Name,
    Type,
    #[strum(serialize = "basetype")]
    BaseType,
    #[strum(serialize = "parentid")]
    ParentId,
    Active,
    Tags,
    Status,
    Message,
    Device,
    Group,
    Probe,
    Host,
    Location,
    #[strum(serialize = "lastvalue")]
    LastValue,
    Interval,
    Priority,
    #[strum(serialize = "totalsens")]
    TotalSensors,
}

impl Property {
    /// The wire column name (`objid`, `parentid`, ...).
    pub fn column(self) -> &'static str {
        self.into()
    }
}

/// Comparison applied by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterOperator {
    #[default]
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
}

impl FilterOperator {
    fn wrap(self, value: &str) -> String {
        match self {
            Self::Equals => value.to_owned(),
            Self::NotEquals => format!("@neq({value})"),
            Self::GreaterThan => format!("@above({value})"),
            Self::LessThan => format!("@below({value})"),
            Self::Contains => format!("@sub({value})"),
        }
    }
}

/// An immutable server-side predicate: `property <operator> value[s]`.
///
/// Multiple values are sent as repeated parameters, which the server ORs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchFilter {
    property: Property,
    operator: FilterOperator,
    values: Vec<String>,
}

impl SearchFilter {
    pub fn new<I, V>(property: Property, operator: FilterOperator, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        Self {
            property,
            operator,
            values: values.into_iter().map(|v| v.to_string()).collect(),
        }
    }

    /// `property == value`.
    pub fn equals(property: Property, value: impl ToString) -> Self {
        Self::new(property, FilterOperator::Equals, [value])
    }

    /// `property ∈ values`.
    pub fn any_of<I, V>(property: Property, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        Self::new(property, FilterOperator::Equals, values)
    }

    /// Filter on the `active` flag, which the server encodes as `-1` / `0`.
    pub fn active(active: bool) -> Self {
        Self::equals(Property::Active, if active { "-1" } else { "0" })
    }

    pub fn property(&self) -> Property {
        self.property
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Render as query parameters, one pair per value.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let key = format!("filter_{}", self.property.column());
        self.values
            .iter()
            .map(|v| (key.clone(), self.operator.wrap(v)))
            .collect()
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        write!(f, "{}", rendered.join("&"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn equals_filter_is_bare_value() {
        let filter = SearchFilter::equals(Property::Name, "Probe Device");
        assert_eq!(
            filter.query_pairs(),
            vec![("filter_name".to_owned(), "Probe Device".to_owned())]
        );
    }

    #[test]
    fn operators_wrap_values() {
        let cases = [
            (FilterOperator::NotEquals, "@neq(5)"),
            (FilterOperator::GreaterThan, "@above(5)"),
            (FilterOperator::LessThan, "@below(5)"),
            (FilterOperator::Contains, "@sub(5)"),
        ];
        for (op, expected) in cases {
            let filter = SearchFilter::new(Property::Priority, op, [5]);
            assert_eq!(filter.query_pairs()[0].1, expected);
        }
    }

    #[test]
    fn multiple_values_repeat_parameter() {
        let filter = SearchFilter::any_of(Property::Id, [2001, 2002, 2003]);
        let pairs = filter.query_pairs();
        assert_eq!(pairs.len(), 3);
        assert!(pairs.iter().all(|(k, _)| k == "filter_objid"));
        assert_eq!(filter.to_string(), "filter_objid=2001&filter_objid=2002&filter_objid=2003");
    }

    #[test]
    fn active_uses_wire_encoding() {
        assert_eq!(SearchFilter::active(true).values(), ["-1"]);
        assert_eq!(SearchFilter::active(false).values(), ["0"]);
    }

    #[test]
    fn values_are_serialized_at_construction() {
        let a = SearchFilter::equals(Property::Id, 42_u32);
        let b = SearchFilter::equals(Property::Id, "42");
        assert_eq!(a, b);
    }

    #[test]
    fn property_parses_wire_names() {
        assert_eq!("objid".parse::<Property>().unwrap(), Property::Id);
        assert_eq!("ParentId".parse::<Property>().unwrap(), Property::ParentId);
        assert_eq!(Property::TotalSensors.column(), "totalsens");
    }
}
