use crate::error::Error;
use crate::routes;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

pub const INDEX: &str = "polls/index.html";
pub const DETAIL: &str = "polls/detail.html";
pub const RESULTS: &str = "polls/results.html";

const TEMPLATES: [(&str, &str); 4] = [
    ("polls/base.html", include_str!("../templates/polls/base.html")),
    (INDEX, include_str!("../templates/polls/index.html")),
    (DETAIL, include_str!("../templates/polls/detail.html")),
    (RESULTS, include_str!("../templates/polls/results.html")),
];

/// `{{ url(name="polls:detail", question_id=question.id) }}`
fn url(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let name = args
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("url() requires a string `name` argument"))?;
    let params: Vec<(&str, String)> = args
        .iter()
        .filter(|(k, _)| k.as_str() != "name")
        .map(|(k, v)| {
            let v = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.as_str(), v)
        })
        .collect();
    routes::reverse(name, &params).map(Value::String).map_err(|e| tera::Error::msg(e.to_string()))
}

pub fn build() -> Result<Tera, Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;
    tera.register_function("url", url);
    Ok(tera)
}

pub fn render(tera: &Tera, name: &str, context: &Context, status: StatusCode) -> Result<HttpResponse, Error> {
    let body = tera.render(name, context)?;
    Ok(HttpResponse::build(status).content_type("text/html; charset=utf-8").body(body))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_index() {
        let tera = build().unwrap();
        let mut ctx = Context::new();
        ctx.insert("latest_question_list", &Vec::<String>::new());
        let html = tera.render(INDEX, &ctx).unwrap();
        assert!(html.contains("No polls are available."));
    }

    #[test]
    fn test_url_function() {
        let tera = build().unwrap();
        let mut ctx = Context::new();
        ctx.insert("latest_question_list", &vec![serde_json::json!({"id": 7, "question_text": "Who?", "was_published_last_hour": false})]);
        let html = tera.render(INDEX, &ctx).unwrap();
        assert!(html.contains(r#"<a href="/polls/7/">Who?</a>"#));
    }

    #[test]
    fn test_question_text_is_escaped() {
        let tera = build().unwrap();
        let mut ctx = Context::new();
        ctx.insert("latest_question_list", &vec![serde_json::json!({"id": 1, "question_text": "<b>bold</b>", "was_published_last_hour": true})]);
        let html = tera.render(INDEX, &ctx).unwrap();
        assert!(!html.contains("<b>bold</b>"));
        assert!(html.contains("&lt;b&gt;bold&lt;&#x2F;b&gt;"));
        assert!(html.contains("<small>new</small>"));
    }
}
