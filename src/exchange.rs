use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

lazy_static! {
    /// Display labels for the ECDICT exchange codes.
    pub static ref FORM_NAMES: HashMap<&'static str, &'static str> = {
        let mut names = HashMap::new();
        names.insert("p", "过去式");
        names.insert("d", "过去分词");
        names.insert("i", "现在分词");
        names.insert("3", "三单");
        names.insert("r", "比较级");
        names.insert("t", "最高级");
        names.insert("s", "复数");
        names.insert("0", "原型");
        names.insert("1", "变体");
        names
    };
}

/// Code whose value describes how this word relates to its lemma instead
/// of naming a literal inflected form.
const VARIANT_CODE: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeRelation {
    /// A segment without a code, or one too malformed to decode.
    Literal(String),
    Form { label: String, value: String },
}

impl fmt::Display for ExchangeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeRelation::Literal(segment) => write!(f, "{segment}"),
            ExchangeRelation::Form { label, value } => write!(f, "{label}:{value}"),
        }
    }
}

/// Decodes a `/`-separated exchange string, one relation per segment,
/// original order preserved. Unknown codes echo as their own label and
/// malformed segments pass through untouched, so decoding never fails.
pub fn decode(exchange: &str, labels: &HashMap<&str, &str>) -> Vec<ExchangeRelation> {
    if exchange.is_empty() {
        return Vec::new();
    }
    exchange
        .split('/')
        .map(|segment| decode_segment(segment, labels))
        .collect()
}

/// The formatted view of [`decode`], one `label:value` string per segment.
pub fn decode_lines(exchange: &str, labels: &HashMap<&str, &str>) -> Vec<String> {
    decode(exchange, labels)
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn decode_segment(segment: &str, labels: &HashMap<&str, &str>) -> ExchangeRelation {
    let Some((code, value)) = segment.split_once(':') else {
        return ExchangeRelation::Literal(segment.to_string());
    };
    let code = code.trim();
    let value = value.trim();
    if code.is_empty() || value.is_empty() {
        return ExchangeRelation::Literal(segment.to_string());
    }
    let label = labels.get(code).copied().unwrap_or(code);
    let value = if code == VARIANT_CODE {
        expand_variant(value, labels)
    } else {
        value.to_string()
    };
    ExchangeRelation::Form {
        label: label.to_string(),
        value,
    }
}

// A variant value is a sequence of single-character codes, each mapped
// through the label table on its own.
fn expand_variant(value: &str, labels: &HashMap<&str, &str>) -> String {
    value
        .chars()
        .map(|c| {
            let code = c.to_string();
            labels
                .get(code.as_str())
                .map(|label| label.to_string())
                .unwrap_or(code)
        })
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_value_passes_through() {
        let labels = HashMap::from([("0", "原型")]);
        assert_eq!(decode_lines("0:good", &labels), ["原型:good"]);
    }

    #[test]
    fn variant_value_expands_to_labels() {
        let labels = HashMap::from([("1", "变体"), ("s", "复数")]);
        assert_eq!(decode_lines("1:s", &labels), ["变体:复数"]);
    }

    #[test]
    fn variant_with_several_codes_joins_with_semicolon() {
        assert_eq!(decode_lines("1:sp", &FORM_NAMES), ["变体:复数;过去式"]);
    }

    #[test]
    fn full_exchange_keeps_segment_order() {
        assert_eq!(
            decode_lines("s:goods/0:good/1:s", &FORM_NAMES),
            ["复数:goods", "原型:good", "变体:复数"]
        );
    }

    #[test]
    fn unknown_code_echoes_raw() {
        assert_eq!(decode_lines("x:foo", &FORM_NAMES), ["x:foo"]);
        // unknown single-character codes inside a variant echo too
        assert_eq!(decode_lines("1:z", &FORM_NAMES), ["变体:z"]);
    }

    #[test]
    fn segment_without_colon_is_literal() {
        assert_eq!(
            decode("bare", &FORM_NAMES),
            [ExchangeRelation::Literal("bare".to_string())]
        );
    }

    #[test]
    fn malformed_segments_fall_back_to_literal() {
        assert_eq!(
            decode("p:", &FORM_NAMES),
            [ExchangeRelation::Literal("p:".to_string())]
        );
        assert_eq!(
            decode(":was", &FORM_NAMES),
            [ExchangeRelation::Literal(":was".to_string())]
        );
    }

    #[test]
    fn nested_colon_stays_in_the_value() {
        assert_eq!(decode_lines("i:0:be", &FORM_NAMES), ["现在分词:0:be"]);
    }

    #[test]
    fn empty_exchange_decodes_to_nothing() {
        assert!(decode("", &FORM_NAMES).is_empty());
    }
}
