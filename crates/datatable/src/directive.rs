//! Parsing of the `order` request parameters into validated directives.

use crate::column::ColumnRegistry;
use query_builder::ast::common::OrderDir;
use serde::{Deserialize, Deserializer, de::IgnoredAny};
use std::collections::BTreeMap;
use tracing::debug;

/// One `{column, dir}` entry exactly as the client sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawOrderEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub column: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dir: String,
}

impl RawOrderEntry {
    pub fn new(column: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            dir: dir.into(),
        }
    }
}

// Clients send `"column": "1"` as often as `"column": 1`. Objects and
// arrays become an empty string, which `parse` then drops.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Int(i64),
        Float(f64),
        Text(String),
        Flag(bool),
        Other(IgnoredAny),
    }

    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Int(n)) => n.to_string(),
        Some(Lenient::Float(n)) => n.to_string(),
        Some(Lenient::Text(s)) => s,
        Some(Lenient::Flag(b)) => b.to_string(),
        Some(Lenient::Other(_)) | None => String::new(),
    })
}

/// The ordered list of sort entries of one request.
///
/// Deserializes from the DataTables map form `{"0": {...}, "1": {...}}`
/// (entries ordered by the numeric value of their key) or from a plain
/// array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "OrderParamsRepr")]
pub struct OrderParams {
    entries: Vec<RawOrderEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OrderParamsRepr {
    List(Vec<EntryRepr>),
    Map(BTreeMap<String, EntryRepr>),
}

/// An entry that is not a `{column, dir}` object still takes its slot, as
/// an empty entry that `parse` drops.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntryRepr {
    Entry(RawOrderEntry),
    Malformed(IgnoredAny),
}

impl From<EntryRepr> for RawOrderEntry {
    fn from(repr: EntryRepr) -> Self {
        match repr {
            EntryRepr::Entry(entry) => entry,
            EntryRepr::Malformed(_) => RawOrderEntry::default(),
        }
    }
}

impl From<OrderParamsRepr> for OrderParams {
    fn from(repr: OrderParamsRepr) -> Self {
        match repr {
            OrderParamsRepr::List(entries) => {
                entries.into_iter().map(RawOrderEntry::from).collect()
            }
            OrderParamsRepr::Map(map) => {
                Self::from_keyed(map.into_iter().map(|(key, entry)| (key, entry.into())))
            }
        }
    }
}

impl OrderParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds params from `(position key, entry)` pairs such as `("0", ..)`.
    pub fn from_keyed<K: Into<String>>(
        pairs: impl IntoIterator<Item = (K, RawOrderEntry)>,
    ) -> Self {
        let mut keyed: Vec<(String, RawOrderEntry)> =
            pairs.into_iter().map(|(k, e)| (k.into(), e)).collect();
        // numeric keys first by value, anything else afterwards by text
        keyed.sort_by(|(a, _), (b, _)| {
            let a_num = a.trim().parse::<u64>().ok();
            let b_num = b.trim().parse::<u64>().ok();
            match (a_num, b_num) {
                (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.cmp(b),
            }
        });
        Self {
            entries: keyed.into_iter().map(|(_, e)| e).collect(),
        }
    }

    /// Appends an entry after the existing ones.
    pub fn push(&mut self, column: impl Into<String>, dir: impl Into<String>) -> &mut Self {
        self.entries.push(RawOrderEntry::new(column, dir));
        self
    }

    pub fn entries(&self) -> &[RawOrderEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<RawOrderEntry> for OrderParams {
    fn from_iter<I: IntoIterator<Item = RawOrderEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A validated sort instruction. Only ever refers to an orderable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDirective {
    pub column_index: usize,
    pub direction: OrderDir,
}

/// Reads a direction token. Anything other than `asc`/`desc` sorts
/// ascending.
pub fn parse_direction(token: &str) -> OrderDir {
    let token = token.trim();
    if token.eq_ignore_ascii_case("desc") {
        OrderDir::Desc
    } else if token.eq_ignore_ascii_case("asc") {
        OrderDir::Asc
    } else {
        debug!(dir = token, "unrecognized sort direction, using ascending");
        OrderDir::Asc
    }
}

/// Validates raw entries against the registry.
///
/// Entries with a non-numeric, unknown or non-orderable column are dropped;
/// the survivors keep their relative order.
pub fn parse(entries: &[RawOrderEntry], registry: &ColumnRegistry) -> Vec<OrderDirective> {
    entries
        .iter()
        .filter_map(|entry| {
            let Ok(index) = entry.column.trim().parse::<usize>() else {
                debug!(column = %entry.column, "dropping order directive: column is not an index");
                return None;
            };

            match registry.column_at(index) {
                None => {
                    debug!(column = index, "dropping order directive: unknown column");
                    None
                }
                Some(column) if !column.orderable => {
                    debug!(
                        column = index,
                        source = %column.source,
                        "dropping order directive: column is not orderable"
                    );
                    None
                }
                Some(_) => Some(OrderDirective {
                    column_index: index,
                    direction: parse_direction(&entry.dir),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::users_registry;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tracing_test::traced_test;

    fn directive(column_index: usize, direction: OrderDir) -> OrderDirective {
        OrderDirective {
            column_index,
            direction,
        }
    }

    #[test]
    fn test_parse_keeps_request_order() {
        let params: OrderParams = [RawOrderEntry::new("1", "desc"), RawOrderEntry::new("0", "asc")]
            .into_iter()
            .collect();

        let directives = parse(params.entries(), &users_registry());
        assert_eq!(
            directives,
            vec![directive(1, OrderDir::Desc), directive(0, OrderDir::Asc)]
        );
    }

    #[traced_test]
    #[test]
    fn test_parse_drops_unknown_and_unorderable_columns() {
        let params: OrderParams = [
            RawOrderEntry::new("4", "desc"),
            RawOrderEntry::new("0", "asc"),
            RawOrderEntry::new("2", "desc"),
            RawOrderEntry::new("abc", "desc"),
            RawOrderEntry::new("-1", "desc"),
            RawOrderEntry::new("1", "desc"),
        ]
        .into_iter()
        .collect();

        let directives = parse(params.entries(), &users_registry());
        assert_eq!(
            directives,
            vec![directive(0, OrderDir::Asc), directive(1, OrderDir::Desc)]
        );
        assert!(logs_contain("dropping order directive: unknown column"));
        assert!(logs_contain("dropping order directive: column is not orderable"));
        assert!(logs_contain("dropping order directive: column is not an index"));
    }

    #[traced_test]
    #[test]
    fn test_invalid_direction_defaults_to_ascending() {
        assert_eq!(parse_direction("DESC"), OrderDir::Desc);
        assert_eq!(parse_direction(" Asc "), OrderDir::Asc);
        assert_eq!(parse_direction("sideways"), OrderDir::Asc);
        assert_eq!(parse_direction(""), OrderDir::Asc);
        assert!(logs_contain("unrecognized sort direction"));
    }

    #[test]
    fn test_deserialize_keyed_map_orders_by_numeric_key() {
        let params: OrderParams = serde_json::from_value(json!({
            "10": {"column": "0", "dir": "asc"},
            "2": {"column": "1", "dir": "desc"},
            "0": {"column": 3, "dir": "asc"},
            "x": {"column": "2"},
        }))
        .unwrap();

        assert_eq!(
            params.entries(),
            &[
                RawOrderEntry::new("3", "asc"),
                RawOrderEntry::new("1", "desc"),
                RawOrderEntry::new("0", "asc"),
                RawOrderEntry::new("2", ""),
            ]
        );
    }

    #[test]
    fn test_deserialize_array_form() {
        let params: OrderParams = serde_json::from_value(json!([
            {"column": 1, "dir": "desc"},
            {"column": "0", "dir": null},
        ]))
        .unwrap();

        assert_eq!(
            params.entries(),
            &[RawOrderEntry::new("1", "desc"), RawOrderEntry::new("0", "")]
        );
    }

    #[traced_test]
    #[test]
    fn test_malformed_entries_do_not_sink_the_request() {
        let params: OrderParams = serde_json::from_value(json!({
            "0": {"column": "0", "dir": "asc"},
            "1": {"column": {"x": 1}, "dir": "desc"},
            "2": "garbage",
            "3": {"column": "1", "dir": ["desc"]},
        }))
        .unwrap();

        assert_eq!(
            params.entries(),
            &[
                RawOrderEntry::new("0", "asc"),
                RawOrderEntry::new("", "desc"),
                RawOrderEntry::default(),
                RawOrderEntry::new("1", ""),
            ]
        );
        assert_eq!(
            parse(params.entries(), &users_registry()),
            vec![directive(0, OrderDir::Asc), directive(1, OrderDir::Asc)]
        );
        assert!(logs_contain("dropping order directive: column is not an index"));

        let params: OrderParams = serde_json::from_value(json!([42, {"column": 1}])).unwrap();
        assert_eq!(
            parse(params.entries(), &users_registry()),
            vec![directive(1, OrderDir::Asc)]
        );
    }

    #[test]
    fn test_empty_params_parse_to_nothing() {
        let params: OrderParams = serde_json::from_value(json!({})).unwrap();
        assert!(params.is_empty());
        assert!(parse(params.entries(), &users_registry()).is_empty());
    }

    #[test]
    fn test_push_appends() {
        let mut params = OrderParams::new();
        params.push("0", "asc").push("1", "desc");
        assert_eq!(
            params.entries(),
            &[RawOrderEntry::new("0", "asc"), RawOrderEntry::new("1", "desc")]
        );
    }
}
