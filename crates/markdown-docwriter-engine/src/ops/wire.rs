use serde::Serialize;

use super::{EditOperation, TextStyle};

/// Body of a batch update call: `{"requests": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}

impl BatchUpdateRequest {
    pub fn from_operations(ops: &[EditOperation]) -> Self {
        Self {
            requests: ops.iter().map(Request::from).collect(),
        }
    }
}

/// One request entry, externally tagged the way the remote API expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    InsertText {
        location: Location,
        text: String,
    },
    UpdateParagraphStyle {
        range: Range,
        #[serde(rename = "paragraphStyle")]
        paragraph_style: ParagraphStyle,
        fields: &'static str,
    },
    UpdateTextStyle {
        range: Range,
        #[serde(rename = "textStyle")]
        text_style: WireTextStyle,
        fields: String,
    },
    CreateParagraphBullets {
        range: Range,
        #[serde(rename = "bulletPreset")]
        bullet_preset: &'static str,
    },
    InsertTable {
        rows: usize,
        columns: usize,
        location: Location,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: usize,
    pub end_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    pub named_style_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_font_family: Option<WeightedFontFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedFontFamily {
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: &'static str,
}

impl From<&TextStyle> for WireTextStyle {
    fn from(style: &TextStyle) -> Self {
        Self {
            bold: style.bold.then_some(true),
            italic: style.italic.then_some(true),
            weighted_font_family: style.font.as_ref().map(|f| WeightedFontFamily {
                font_family: f.family.clone(),
            }),
            font_size: style.font.as_ref().map(|f| Dimension {
                magnitude: f64::from(f.size_pt),
                unit: "PT",
            }),
        }
    }
}

impl From<&EditOperation> for Request {
    fn from(op: &EditOperation) -> Self {
        match op {
            EditOperation::InsertText { index, text } => Request::InsertText {
                location: Location { index: *index },
                text: text.clone(),
            },
            EditOperation::SetParagraphStyle {
                start_index,
                end_index,
                style,
            } => Request::UpdateParagraphStyle {
                range: Range {
                    start_index: *start_index,
                    end_index: *end_index,
                },
                paragraph_style: ParagraphStyle {
                    named_style_type: style.as_str(),
                },
                fields: "namedStyleType",
            },
            EditOperation::SetTextStyle {
                start_index,
                end_index,
                style,
            } => Request::UpdateTextStyle {
                range: Range {
                    start_index: *start_index,
                    end_index: *end_index,
                },
                text_style: WireTextStyle::from(style),
                fields: style.fields(),
            },
            EditOperation::CreateBullets {
                start_index,
                end_index,
                preset,
            } => Request::CreateParagraphBullets {
                range: Range {
                    start_index: *start_index,
                    end_index: *end_index,
                },
                bullet_preset: preset.as_str(),
            },
            EditOperation::InsertTable { rows, cols, index } => Request::InsertTable {
                rows: *rows,
                columns: *cols,
                location: Location { index: *index },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{BulletPreset, FontSpec, NamedStyle};

    #[test]
    fn heading_batch_encoding() {
        let ops = vec![
            EditOperation::InsertText {
                index: 1,
                text: "Title\n".to_string(),
            },
            EditOperation::SetParagraphStyle {
                start_index: 1,
                end_index: 6,
                style: NamedStyle::Heading1,
            },
        ];
        insta::assert_json_snapshot!(BatchUpdateRequest::from_operations(&ops), @r#"
        {
          "requests": [
            {
              "insertText": {
                "location": {
                  "index": 1
                },
                "text": "Title\n"
              }
            },
            {
              "updateParagraphStyle": {
                "range": {
                  "startIndex": 1,
                  "endIndex": 6
                },
                "paragraphStyle": {
                  "namedStyleType": "HEADING_1"
                },
                "fields": "namedStyleType"
              }
            }
          ]
        }
        "#);
    }

    #[test]
    fn code_style_encoding() {
        let op = EditOperation::SetTextStyle {
            start_index: 3,
            end_index: 7,
            style: TextStyle::monospace(FontSpec::default()),
        };
        insta::assert_json_snapshot!(Request::from(&op), @r#"
        {
          "updateTextStyle": {
            "range": {
              "startIndex": 3,
              "endIndex": 7
            },
            "textStyle": {
              "weightedFontFamily": {
                "fontFamily": "Courier New"
              },
              "fontSize": {
                "magnitude": 10.0,
                "unit": "PT"
              }
            },
            "fields": "weightedFontFamily,fontSize"
          }
        }
        "#);
    }

    #[test]
    fn bullets_and_tables_use_api_names() {
        let bullets = serde_json::to_value(Request::from(&EditOperation::CreateBullets {
            start_index: 1,
            end_index: 5,
            preset: BulletPreset::DecimalAlphaRoman,
        }))
        .unwrap();
        assert_eq!(
            bullets["createParagraphBullets"]["bulletPreset"],
            "NUMBERED_DECIMAL_ALPHA_ROMAN"
        );

        let table = serde_json::to_value(Request::from(&EditOperation::InsertTable {
            rows: 2,
            cols: 3,
            index: 9,
        }))
        .unwrap();
        assert_eq!(table["insertTable"]["columns"], 3);
        assert_eq!(table["insertTable"]["location"]["index"], 9);
    }

    #[test]
    fn bold_italic_omits_font_keys() {
        let value = serde_json::to_value(Request::from(&EditOperation::SetTextStyle {
            start_index: 1,
            end_index: 2,
            style: TextStyle::bold_italic(),
        }))
        .unwrap();
        let style = &value["updateTextStyle"]["textStyle"];
        assert_eq!(style["bold"], true);
        assert_eq!(style["italic"], true);
        assert!(style.get("fontSize").is_none());
        assert_eq!(value["updateTextStyle"]["fields"], "bold,italic");
    }
}
