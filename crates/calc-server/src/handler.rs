use serde_json::{Value, json};

pub struct Request {
    pub method: String,
    pub path: String,
    pub body: String,
}

pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Routes one parsed request to a response. Pure: no state beyond the
/// configured expression cap, so one handler value serves every connection.
#[derive(Debug, Clone, Copy)]
pub struct CalcHandler {
    max_expression_len: usize,
}

impl CalcHandler {
    #[must_use]
    pub const fn new(max_expression_len: usize) -> Self {
        Self { max_expression_len }
    }

    #[must_use]
    pub fn handle(&self, request: &Request) -> Response {
        if request.method == "OPTIONS" {
            return Response {
                status: 200,
                body: String::new(),
            };
        }
        if request.method == "POST" && request.path == "/calculate" {
            return self.calculate_response(&request.body);
        }
        Response {
            status: 404,
            body: json!({ "error": "Not found" }).to_string(),
        }
    }

    fn calculate_response(&self, body: &str) -> Response {
        // An empty body counts as an empty object, not malformed JSON.
        let body = if body.is_empty() { "{}" } else { body };
        let parsed: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                return Response {
                    status: 500,
                    body: json!({
                        "error": "Internal server error",
                        "message": e.to_string(),
                    })
                    .to_string(),
                };
            }
        };

        let Some(expression) = parsed.get("expression").and_then(Value::as_str) else {
            return Response {
                status: 400,
                body: json!({ "error": "Expression must be a string" }).to_string(),
            };
        };

        // Evaluation errors still produce a 200: the result field carries
        // the error string, exactly as the calculator frontend expects.
        let result = if expression.chars().count() > self.max_expression_len {
            "Error: Invalid expression".to_string()
        } else {
            calc_engine::calculate(expression)
        };
        Response {
            status: 200,
            body: json!({ "result": result }).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> CalcHandler {
        CalcHandler::new(4096)
    }

    fn post(body: &str) -> Request {
        Request {
            method: "POST".to_string(),
            path: "/calculate".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_calculate_ok() {
        let response = handler().handle(&post(r#"{"expression": "2+2"}"#));
        assert_eq!(response.status, 200);
        let value: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(value["result"], "4");
    }

    #[test]
    fn test_display_symbols_accepted() {
        let response = handler().handle(&post(r#"{"expression": "2 × 3"}"#));
        assert_eq!(response.status, 200);
        let value: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(value["result"], "6");
    }

    #[test]
    fn test_error_strings_ride_status_200() {
        for (expression, expected) in [
            ("5/0", "Error: Invalid result"),
            ("abc", "Error: Invalid characters"),
            ("", "Error: Empty expression"),
            ("2+", "Error: Invalid expression"),
        ] {
            let body = json!({ "expression": expression }).to_string();
            let response = handler().handle(&post(&body));
            assert_eq!(response.status, 200);
            let value: Value = serde_json::from_str(&response.body).unwrap();
            assert_eq!(value["result"], expected);
        }
    }

    #[test]
    fn test_missing_expression() {
        let response = handler().handle(&post("{}"));
        assert_eq!(response.status, 400);
        let value: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(value["error"], "Expression must be a string");
    }

    #[test]
    fn test_non_string_expression() {
        for body in [
            r#"{"expression": 5}"#,
            r#"{"expression": null}"#,
            r#"{"expression": ["2+2"]}"#,
            "[1, 2]",
        ] {
            let response = handler().handle(&post(body));
            assert_eq!(response.status, 400);
            let value: Value = serde_json::from_str(&response.body).unwrap();
            assert_eq!(value["error"], "Expression must be a string");
        }
    }

    #[test]
    fn test_malformed_json() {
        for body in ["{not json", " "] {
            let response = handler().handle(&post(body));
            assert_eq!(response.status, 500);
            let value: Value = serde_json::from_str(&response.body).unwrap();
            assert_eq!(value["error"], "Internal server error");
            assert!(value["message"].as_str().is_some_and(|m| !m.is_empty()));
        }
    }

    #[test]
    fn test_empty_body() {
        let response = handler().handle(&post(""));
        assert_eq!(response.status, 400);
        let value: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(value["error"], "Expression must be a string");
    }

    #[test]
    fn test_options_preflight() {
        let request = Request {
            method: "OPTIONS".to_string(),
            path: "/calculate".to_string(),
            body: String::new(),
        };
        let response = handler().handle(&request);
        assert_eq!(response.status, 200);
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_unknown_route() {
        for (method, path) in [("GET", "/calculate"), ("POST", "/other"), ("GET", "/")] {
            let request = Request {
                method: method.to_string(),
                path: path.to_string(),
                body: String::new(),
            };
            let response = handler().handle(&request);
            assert_eq!(response.status, 404);
            let value: Value = serde_json::from_str(&response.body).unwrap();
            assert_eq!(value["error"], "Not found");
        }
    }

    #[test]
    fn test_expression_length_cap() {
        let capped = CalcHandler::new(10);

        let body = json!({ "expression": "1+1+1+1+1+1+1" }).to_string();
        let response = capped.handle(&post(&body));
        assert_eq!(response.status, 200);
        let value: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(value["result"], "Error: Invalid expression");

        let body = json!({ "expression": "1+1" }).to_string();
        let response = capped.handle(&post(&body));
        let value: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(value["result"], "2");
    }
}
