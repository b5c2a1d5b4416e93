use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::TradeRecord;
use crate::{CURSOR_KEYS, RECORD_LIST_KEYS};

/// A page response in one of the shapes the venue has served over time.
#[derive(Debug, Clone)]
pub enum Page {
    /// A bare array of trades, no cursor.
    List(Vec<TradeRecord>),
    /// An object holding the trades under one of several keys.
    Keyed(Map<String, Value>),
    /// The current envelope, `{trades: [...], next_cursor}`, decoded into
    /// named fields.
    Typed(TradePage),
    Unrecognized,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradePage {
    #[serde(default)]
    pub trades: Option<Vec<TradeRecord>>,
    #[serde(default, alias = "nextCursor")]
    pub next_cursor: Option<String>,
}

impl From<Value> for Page {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Page::List(items.into_iter().map(TradeRecord::from_value).collect()),
            Value::Object(fields) => {
                let value = Value::Object(fields);
                let typed = match value.get("trades") {
                    Some(Value::Array(_)) => TradePage::deserialize(&value).ok(),
                    _ => None,
                };
                match (typed, value) {
                    (Some(page), _) => Page::Typed(page),
                    (None, Value::Object(fields)) => Page::Keyed(fields),
                    (None, _) => Page::Unrecognized,
                }
            }
            _ => Page::Unrecognized,
        }
    }
}

impl Page {
    /// Splits the page into its trades and the cursor for the next one.
    pub fn into_parts(self) -> (Vec<TradeRecord>, Option<String>) {
        match self {
            Page::List(records) => (records, None),
            Page::Keyed(mut fields) => {
                let records: Vec<TradeRecord> = RECORD_LIST_KEYS
                    .iter()
                    .find_map(|key| match fields.remove(*key) {
                        Some(Value::Array(items)) => Some(items),
                        _ => None,
                    })
                    .unwrap_or_default()
                    .into_iter()
                    .map(TradeRecord::from_value)
                    .collect();
                let cursor = CURSOR_KEYS.iter().find_map(|key| cursor_text(fields.get(*key)));
                (records, cursor)
            }
            Page::Typed(page) => (
                page.trades.unwrap_or_default(),
                page.next_cursor.filter(|cursor| !cursor.trim().is_empty()),
            ),
            Page::Unrecognized => (Vec::new(), None),
        }
    }
}

fn cursor_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_list_has_no_cursor() {
        let (records, cursor) = Page::from(json!([{"owner": "a"}, {"owner": "b"}])).into_parts();
        assert_eq!(records.len(), 2);
        assert_eq!(cursor, None);
    }

    #[test]
    fn test_keyed_prefers_trades_then_data() {
        let page = Page::from(json!({
            "trades": [{"owner": "a"}],
            "data": [{"owner": "b"}, {"owner": "c"}],
            "next_cursor": "NQ=="
        }));
        let (records, cursor) = page.into_parts();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].owner().as_deref(), Some("a"));
        assert_eq!(cursor.as_deref(), Some("NQ=="));
    }

    #[test]
    fn test_keyed_skips_non_list_values() {
        let page = Page::from(json!({
            "trades": "unavailable",
            "data": [{"owner": "b"}],
            "nextCursor": 42
        }));
        let (records, cursor) = page.into_parts();
        assert_eq!(records.len(), 1);
        assert_eq!(cursor.as_deref(), Some("42"));
    }

    #[test]
    fn test_keyed_falls_back_to_second_cursor_key() {
        let page = Page::from(json!({"data": [], "next_cursor": "", "nextCursor": "MTAw"}));
        let (records, cursor) = page.into_parts();
        assert!(records.is_empty());
        assert_eq!(cursor.as_deref(), Some("MTAw"));
    }

    #[test]
    fn test_unrecognized_shapes_are_empty_and_final() {
        let (records, cursor) = Page::from(json!({"items": [{"owner": "a"}]})).into_parts();
        assert!(records.is_empty());
        assert_eq!(cursor, None);

        let (records, cursor) = Page::from(json!("oops")).into_parts();
        assert!(records.is_empty());
        assert_eq!(cursor, None);
    }

    #[test]
    fn test_current_envelope_decodes_as_typed() {
        let page = Page::from(json!({"trades": [{"owner": "a"}], "next_cursor": "MTAw"}));
        assert!(matches!(page, Page::Typed(_)));
        assert_eq!(page.into_parts().1.as_deref(), Some("MTAw"));

        // numeric cursors and non-object items fall back to the keyed reader
        let page = Page::from(json!({"trades": [{"owner": "a"}], "next_cursor": 7}));
        assert!(matches!(page, Page::Keyed(_)));
        assert_eq!(page.into_parts().1.as_deref(), Some("7"));

        let page = Page::from(json!({"trades": [{"owner": "a"}, 3], "nextCursor": "NQ=="}));
        assert!(matches!(page, Page::Keyed(_)));
        let (records, cursor) = page.into_parts();
        assert_eq!(records.len(), 2);
        assert_eq!(cursor.as_deref(), Some("NQ=="));
    }

    #[test]
    fn test_typed_page_reads_named_fields() {
        let typed: TradePage = serde_json::from_value(json!({
            "trades": [{"owner": "a"}],
            "nextCursor": "MjAw"
        }))
        .unwrap();
        let (records, cursor) = Page::Typed(typed).into_parts();
        assert_eq!(records.len(), 1);
        assert_eq!(cursor.as_deref(), Some("MjAw"));

        let (records, cursor) = Page::Typed(TradePage::default()).into_parts();
        assert!(records.is_empty());
        assert_eq!(cursor, None);
    }
}
