//! Result summaries sent to a participant when they complete an assessment.

use serde::Serialize;
use tera::{Context, Tera};

use huddle_core::models::assessment::{Assessment, ResultCallToAction};
use huddle_core::models::participation::Participation;

use crate::error::ServiceError;

const PLAIN_TEXT_TEMPLATE: &str = "\
Thanks for taking {{ assessment_name }}.

{% for line in lines %}{{ line.question }}
Your answer: {{ line.answer }}
{{ line.description }}

{% endfor %}{% if call_to_action %}{{ call_to_action.heading }}
{{ call_to_action.copy }}
{{ call_to_action.buttonText }}: {{ call_to_action.url }}

{% endif %}View your results online: {{ permalink }}
";

const HTML_TEMPLATE: &str = r#"<h2>Thanks for taking {{ assessment_name }}</h2>
{% for line in lines %}<div class="result">
  <h3>{{ line.question }}</h3>
  <p><strong>{{ line.answer }}</strong></p>
  {% if line.image %}<img src="{{ line.image }}" alt="{{ line.answer }}">{% endif %}
  <p>{{ line.description }}</p>
</div>
{% endfor %}{% if call_to_action %}<div class="call-to-action">
  <h3>{{ call_to_action.heading }}</h3>
  <p>{{ call_to_action.copy }}</p>
  <a href="{{ call_to_action.url }}">{{ call_to_action.buttonText }}</a>
</div>
{% endif %}<p><a href="{{ permalink }}">View your results online</a></p>
"#;

#[derive(Serialize)]
struct ResultLine<'a> {
    question: &'a str,
    answer: &'a str,
    description: &'a str,
    image: &'a str,
}

#[derive(Serialize)]
struct ResultsView<'a> {
    assessment_name: &'a str,
    lines: Vec<ResultLine<'a>>,
    call_to_action: Option<&'a ResultCallToAction>,
    permalink: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsFormat {
    PlainText,
    Html,
}

impl ResultsFormat {
    fn template_name(self) -> &'static str {
        // Tera autoescapes by extension, so the HTML name must end in .html.
        match self {
            ResultsFormat::PlainText => "results.txt",
            ResultsFormat::Html => "results.html",
        }
    }

    fn template(self) -> &'static str {
        match self {
            ResultsFormat::PlainText => PLAIN_TEXT_TEMPLATE,
            ResultsFormat::Html => HTML_TEMPLATE,
        }
    }
}

/// Render a participation's answers as a results summary.
///
/// `assessment` supplies the result call to action; it may be `None` when
/// the assessment has been deleted since, in which case only the
/// participation's own snapshot is used.
pub fn render_results(
    format: ResultsFormat,
    participation: &Participation,
    assessment: Option<&Assessment>,
    permalink: &str,
) -> Result<String, ServiceError> {
    let view = ResultsView {
        assessment_name: &participation.assessment_name,
        lines: participation
            .questions_answered
            .iter()
            .map(|qa| ResultLine {
                question: &qa.question_text,
                answer: &qa.answer_text,
                description: &qa.result_description,
                image: &qa.result_image,
            })
            .collect(),
        call_to_action: assessment
            .and_then(|a| a.result_call_to_action.as_ref())
            .filter(|cta| !cta.heading.is_empty() || !cta.url.is_empty()),
        permalink,
    };

    let mut tera = Tera::default();
    tera.add_raw_template(format.template_name(), format.template())?;
    let context = Context::from_serialize(&view)?;
    Ok(tera.render(format.template_name(), &context)?)
}
