//! Serializing typed elements back to their JSON record form.

use serde_json::{json, Map, Value};

use crate::types::*;

/// Serialize one element to its JSON record.
pub fn element_to_value(element: &Element) -> Value {
    let mut record = Map::new();
    record.insert("type".to_string(), json!(element.kind().as_str()));
    record.insert("element_id".to_string(), json!(element.id()));

    match element {
        Element::Text(e) => {
            record.insert("text".to_string(), json!(e.text));
        }
        Element::Table(e) => {
            record.insert("text".to_string(), json!(e.text));
        }
        Element::Image(e) => {
            record.insert("text".to_string(), json!(e.text));
        }
        Element::CheckBox(e) => {
            record.insert("checked".to_string(), json!(e.checked));
        }
        Element::PageBreak(_) => {
            record.insert("text".to_string(), json!(""));
        }
    }

    let metadata = serde_json::to_value(element.metadata())
        .unwrap_or_else(|_| Value::Object(Map::new()));
    record.insert("metadata".to_string(), metadata);

    Value::Object(record)
}

/// Serialize a sequence of elements to a JSON array, preserving order.
pub fn elements_to_value(elements: &[Element]) -> Value {
    Value::Array(elements.iter().map(element_to_value).collect())
}

/// Pretty-printed JSON text for a sequence of elements.
pub fn elements_to_json(elements: &[Element]) -> String {
    serde_json::to_string_pretty(&elements_to_value(elements)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::elements_from_value;

    fn sample() -> Vec<Element> {
        vec![
            Element::Text(TextElement {
                kind: ElementKind::Title,
                element_id: "t".to_string(),
                text: "Results".to_string(),
                metadata: ElementMetadata {
                    page_number: Some(2),
                    ..Default::default()
                },
            }),
            Element::Table(TableElement {
                kind: ElementKind::Table,
                element_id: "tb".to_string(),
                text: "a b".to_string(),
                metadata: ElementMetadata {
                    text_as_html: Some("<table></table>".to_string()),
                    ..Default::default()
                },
            }),
            Element::CheckBox(CheckBoxElement {
                element_id: "cb".to_string(),
                checked: true,
                metadata: ElementMetadata::default(),
            }),
            Element::PageBreak(PageBreakElement {
                element_id: "pb".to_string(),
                metadata: ElementMetadata::default(),
            }),
        ]
    }

    #[test]
    fn record_shape() {
        let value = element_to_value(&sample()[0]);
        assert_eq!(
            value,
            json!({
                "type": "Title",
                "element_id": "t",
                "text": "Results",
                "metadata": {"page_number": 2}
            })
        );
    }

    #[test]
    fn checkbox_has_checked_and_no_text() {
        let value = element_to_value(&sample()[2]);
        assert_eq!(value["checked"], json!(true));
        assert!(value.get("text").is_none());
    }

    #[test]
    fn encoded_sequence_decodes_to_the_same_elements() {
        let elements = sample();
        let decoded = elements_from_value(&elements_to_value(&elements)).unwrap();
        assert_eq!(decoded, elements);
    }

    #[test]
    fn json_text_is_an_array() {
        let text = elements_to_json(&sample());
        assert!(text.trim_start().starts_with('['));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 4);
    }
}
