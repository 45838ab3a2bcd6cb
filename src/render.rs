use std::fmt::{self, Display};

use v_htmlescape::escape;

use crate::{form::FormValues, predict::Outcome, schema::FeatureSchema};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Remaining Useful Life Predictor</title>
  <style>
    body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
    .field { display: flex; justify-content: space-between; margin: 0.4rem 0; }
    .field label { margin-right: 1rem; }
    .result { margin-top: 1.5rem; font-weight: bold; }
    .result.error { color: #b00020; }
  </style>
</head>
<body>
  <h1>Remaining Useful Life Predictor</h1>
  <form method="post" action="/predict">
"#;

const TAIL: &str = r#"</body>
</html>
"#;

/// The single page of the application: one labeled input per feature, plus the outcome of the
/// last submission, if any.
pub struct Page<'a> {
    schema: &'a FeatureSchema,
    values: Option<&'a FormValues>,
    outcome: Option<&'a Outcome>,
}

impl<'a> Page<'a> {
    /// An empty form.
    pub fn blank(schema: &'a FeatureSchema) -> Self {
        Self {
            schema,
            values: None,
            outcome: None,
        }
    }

    /// A form echoing `values`, with `outcome` shown below it.
    pub fn answered(
        schema: &'a FeatureSchema,
        values: &'a FormValues,
        outcome: &'a Outcome,
    ) -> Self {
        Self {
            schema,
            values: Some(values),
            outcome: Some(outcome),
        }
    }
}

impl Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HEAD)?;

        for (id, label) in self.schema.iter() {
            let value = self.values.and_then(|v| v.get(id)).unwrap_or_default();
            writeln!(
                f,
                r#"    <div class="field"><label for="{id}">{label}</label><input type="text" id="{id}" name="{id}" value="{value}"></div>"#,
                id = escape(id),
                label = escape(label),
                value = escape(value),
            )?;
        }
        writeln!(f, r#"    <button type="submit">Predict</button>"#)?;
        writeln!(f, "  </form>")?;

        if let Some(outcome) = self.outcome {
            let class = if outcome.is_error() { "result error" } else { "result" };
            let text = outcome.to_string();
            writeln!(f, r#"  <p class="{class}">{}</p>"#, escape(&text))?;
        }

        f.write_str(TAIL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(
            vec!["s1".into(), "s2".into()],
            vec!["Sensor 1".into(), "Sensor <2>".into()],
        )
        .unwrap()
    }

    #[test]
    fn blank_page_has_one_empty_input_per_feature() {
        let schema = schema();
        let html = Page::blank(&schema).to_string();

        assert!(html.contains(r#"<label for="s1">Sensor 1</label>"#));
        assert!(html.contains(r#"<label for="s2">Sensor &lt;2&gt;</label>"#));
        assert!(html.contains(r#"name="s1" value="""#));
        assert!(html.contains(r#"name="s2" value="""#));
        assert!(!html.contains("class=\"result"));
    }

    #[test]
    fn answered_page_echoes_values_and_outcome() {
        let schema = schema();
        let values = FormValues::from_pairs([("s1", "10.5"), ("s2", "\"20\"")]);
        let outcome = Outcome::Prediction(42.125);
        let html = Page::answered(&schema, &values, &outcome).to_string();

        assert!(html.contains(r#"name="s1" value="10.5""#));
        assert!(html.contains(r#"name="s2" value="&quot;20&quot;""#));
        assert!(html.contains(r#"<p class="result">Predicted RUL: 42.13 hours</p>"#));
    }

    #[test]
    fn errors_are_marked_and_escaped() {
        let schema = schema();
        let values = FormValues::from_pairs([("s1", "<b>")]);
        let outcome = Outcome::Error("could not convert string to float: '<b>'".into());
        let html = Page::answered(&schema, &values, &outcome).to_string();

        assert!(html.contains(r#"name="s1" value="&lt;b&gt;""#));
        assert!(html.contains(r#"name="s2" value="""#));
        assert!(html.contains(
            r#"<p class="result error">Error: could not convert string to float: &#x27;&lt;b&gt;&#x27;</p>"#
        ));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn slashes_cannot_close_tags() {
        let schema = schema();
        let values = FormValues::from_pairs([("s1", "</p><script>")]);
        let outcome = Outcome::Prediction(1.0);
        let html = Page::answered(&schema, &values, &outcome).to_string();

        assert!(html.contains(r#"name="s1" value="&lt;&#x2f;p&gt;&lt;script&gt;""#));
        assert!(!html.contains("<script>"));
    }
}
