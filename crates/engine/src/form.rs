//! Form field extraction for form-trigger workflows.
//!
//! Form nodes declare their fields in several layouts depending on node
//! version. Each [`FormLayout`] is a typed decode attempt against the entry
//! node's `parameters`; the first one yielding a non-empty list wins. If none
//! does, the workflow still gets a single required `message` textarea so it
//! stays usable.

use serde::Deserialize;
use serde_json::{Map, Value};

use nodes::{Diagnostic, DiagnosticSink, TriggerType};

use crate::classifier::TriggerClassifier;
use crate::models::{FieldType, FormField, Workflow};

// ---------------------------------------------------------------------------
// Parameter layouts
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ValuesWrapper {
    values: Vec<Value>,
}

#[derive(Deserialize)]
struct FormFieldsList {
    #[serde(rename = "formFields")]
    form_fields: Vec<Value>,
}

#[derive(Deserialize)]
struct FieldsList {
    fields: Vec<Value>,
}

#[derive(Deserialize)]
struct NestedForm {
    form: FieldsList,
}

#[derive(Deserialize)]
struct FormFieldsValues {
    #[serde(rename = "formFields")]
    form_fields: ValuesWrapper,
}

#[derive(Deserialize)]
struct OptionsFormFieldsList {
    options: FormFieldsList,
}

#[derive(Deserialize)]
struct OptionsFormFieldsValues {
    options: FormFieldsValues,
}

/// Where a node keeps its field array, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormLayout {
    /// `parameters.formFields: [...]`
    FormFields,
    /// `parameters.fields: [...]`
    Fields,
    /// `parameters.form.fields: [...]`
    NestedFormFields,
    /// `parameters.formFields.values: [...]`
    FormFieldsValues,
    /// `parameters.options.formFields: [...]`
    OptionsFormFields,
    /// `parameters.options.formFields.values: [...]`
    OptionsFormFieldsValues,
}

impl FormLayout {
    pub const PRIORITY: [FormLayout; 6] = [
        FormLayout::FormFields,
        FormLayout::Fields,
        FormLayout::NestedFormFields,
        FormLayout::FormFieldsValues,
        FormLayout::OptionsFormFields,
        FormLayout::OptionsFormFieldsValues,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormLayout::FormFields => "formFields",
            FormLayout::Fields => "fields",
            FormLayout::NestedFormFields => "form.fields",
            FormLayout::FormFieldsValues => "formFields.values",
            FormLayout::OptionsFormFields => "options.formFields",
            FormLayout::OptionsFormFieldsValues => "options.formFields.values",
        }
    }

    /// The raw field records under this layout, if it is present and
    /// non-empty.
    pub fn decode(self, parameters: &Value) -> Option<Vec<Value>> {
        let records = match self {
            FormLayout::FormFields => FormFieldsList::deserialize(parameters).ok()?.form_fields,
            FormLayout::Fields => FieldsList::deserialize(parameters).ok()?.fields,
            FormLayout::NestedFormFields => NestedForm::deserialize(parameters).ok()?.form.fields,
            FormLayout::FormFieldsValues => {
                FormFieldsValues::deserialize(parameters).ok()?.form_fields.values
            }
            FormLayout::OptionsFormFields => {
                OptionsFormFieldsList::deserialize(parameters).ok()?.options.form_fields
            }
            FormLayout::OptionsFormFieldsValues => {
                OptionsFormFieldsValues::deserialize(parameters)
                    .ok()?
                    .options
                    .form_fields
                    .values
            }
        };
        (!records.is_empty()).then_some(records)
    }
}

// ---------------------------------------------------------------------------
// Field records
// ---------------------------------------------------------------------------

/// One raw field record. JSON `null` counts as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    field_label: Option<Value>,
    name: Option<Value>,
    field_name: Option<Value>,
    field_type: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<Value>,
    required_field: Option<Value>,
    required: Option<Value>,
    field_options: Option<Value>,
    options: Option<Value>,
    default_value: Option<Value>,
    default: Option<Value>,
}

/// Non-empty text form of a scalar.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Comma-joined text of an options value. Fixed-collection objects
/// (`{ values: [{ option: "a" }, ...] }`) contribute their option strings.
fn stringify_options(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(_) | Value::Bool(_) => value.to_string(),
        Value::Array(items) => items.iter().map(stringify_options).collect::<Vec<_>>().join(","),
        Value::Object(map) => match (map.get("option"), map.get("values")) {
            (Some(option), _) => stringify_options(option),
            (None, Some(values)) if values.is_array() => stringify_options(values),
            _ => String::new(),
        },
    }
}

fn split_options(value: &Value) -> Vec<String> {
    stringify_options(value)
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Map one raw record at `index` to a field. Unlabelled records are named
/// `field_<index>` but labelled `Field <index + 1>`.
fn map_field(index: usize, record: &Value) -> FormField {
    let raw = RawField::deserialize(record).unwrap_or_default();

    let declared_name = [&raw.field_label, &raw.name, &raw.field_name]
        .into_iter()
        .flatten()
        .find_map(text_of);

    let field_type = FieldType::normalize(
        [&raw.field_type, &raw.kind]
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .find(|s| !s.is_empty()),
    );

    FormField {
        name: declared_name
            .clone()
            .unwrap_or_else(|| format!("field_{index}")),
        label: declared_name.unwrap_or_else(|| format!("Field {}", index + 1)),
        field_type,
        required: raw.required_field.or(raw.required).as_ref().is_some_and(truthy),
        options: raw.field_options.or(raw.options).as_ref().map(split_options),
        default_value: raw.default_value.or(raw.default),
    }
}

/// The field every form workflow falls back to.
pub fn default_message_field() -> FormField {
    FormField {
        name: "message".to_owned(),
        label: "Message".to_owned(),
        field_type: FieldType::Textarea,
        required: true,
        options: None,
        default_value: None,
    }
}

/// Initial form state: each field's default, else `false` for checkboxes and
/// `""` for everything else.
pub fn initial_form_values(fields: &[FormField]) -> Map<String, Value> {
    fields
        .iter()
        .map(|field| {
            let value = field.default_value.clone().unwrap_or_else(|| {
                if field.field_type == FieldType::Checkbox {
                    Value::Bool(false)
                } else {
                    Value::String(String::new())
                }
            });
            (field.name.clone(), value)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// FormFieldExtractor
// ---------------------------------------------------------------------------

/// Extracts renderable fields from form-trigger workflows.
///
/// Re-classifies every workflow it is given rather than trusting a flag
/// computed elsewhere.
#[derive(Debug, Clone, Default)]
pub struct FormFieldExtractor {
    classifier: TriggerClassifier,
}

impl FormFieldExtractor {
    pub fn new(classifier: TriggerClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &TriggerClassifier {
        &self.classifier
    }

    /// Fields for a form workflow; `None` for any other trigger type.
    pub fn extract(&self, workflow: &Workflow) -> Option<Vec<FormField>> {
        let sink = self.classifier.sink();
        let trigger = self.classifier.classify(workflow).trigger_type;
        if trigger != TriggerType::Form {
            sink.record(&Diagnostic::NotAFormTrigger {
                workflow: workflow.name.clone(),
                trigger,
            });
            return None;
        }

        let Some(parameters) = workflow.first_node().and_then(|n| n.parameters.as_ref()) else {
            sink.record(&Diagnostic::FormLayoutFallback {
                workflow: workflow.name.clone(),
                reason: "parameters absent",
                parameters: None,
            });
            return Some(vec![default_message_field()]);
        };

        for layout in FormLayout::PRIORITY {
            if let Some(records) = layout.decode(parameters) {
                let fields: Vec<FormField> = records
                    .iter()
                    .enumerate()
                    .map(|(index, record)| map_field(index, record))
                    .collect();
                sink.record(&Diagnostic::FormLayoutMatched {
                    workflow: workflow.name.clone(),
                    layout: layout.name(),
                    fields: fields.len(),
                });
                return Some(fields);
            }
        }

        sink.record(&Diagnostic::FormLayoutFallback {
            workflow: workflow.name.clone(),
            reason: "no field layout matched",
            parameters: Some(parameters.clone()),
        });
        Some(vec![default_message_field()])
    }
}
