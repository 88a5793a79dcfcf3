use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

/// Cost at or above which a task is rendered as expensive.
pub const EXPENSIVE_THRESHOLD: f64 = 1000.0;

/// A task as returned by `GET /api/tarefas`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Task {
    pub id: i64,
    pub nome: String,
    #[serde(deserialize_with = "deserialize_cost")]
    pub custo: f64,
    pub data_limite: String,
    #[serde(default)]
    pub ordem: i64,
}

impl Task {
    pub fn is_expensive(&self) -> bool {
        self.custo >= EXPENSIVE_THRESHOLD
    }

    /// The due date, if the backend sent something parseable.
    pub fn due_date(&self) -> Option<NaiveDate> {
        parse_date(&self.data_limite)
    }
}

/// Body of `POST /api/tarefas` and `PUT /api/tarefas/{id}`.
///
/// `custo` and `data_limite` are forwarded as typed; the backend parses them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPayload {
    pub nome: String,
    pub custo: String,
    pub data_limite: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    #[serde(rename = "cima")]
    Up,
    #[serde(rename = "baixo")]
    Down,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "cima",
            Direction::Down => "baixo",
        }
    }
}

/// Body of `POST /api/tarefas/mover`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveRequest {
    pub id: i64,
    pub direcao: Direction,
}

/// Error body sent alongside non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Name sanitization used when adding: trim, then keep only ASCII letters,
/// digits and whitespace.
pub fn sanitize_new_name(raw: &str) -> String {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    let re = DISALLOWED.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("static regex"));
    re.replace_all(raw.trim(), "").into_owned()
}

/// Name sanitization used when saving an edit: trim only.
pub fn sanitize_edited_name(raw: &str) -> String {
    raw.trim().to_string()
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part only).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn deserialize_cost<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCost {
        Number(f64),
        Text(String),
    }

    match RawCost::deserialize(deserializer)? {
        RawCost::Number(n) => Ok(n),
        RawCost::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid custo {s:?}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_cost() {
        let json = r#"{"id": 3, "nome": "Pintar", "custo": 250.5, "data_limite": "2030-05-01", "ordem": 2}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 3);
        assert_eq!(task.custo, 250.5);
        assert_eq!(task.ordem, 2);
        assert!(!task.is_expensive());
    }

    #[test]
    fn test_parse_string_cost() {
        let json = r#"{"id": 1, "nome": "Comprar", "custo": "1500.00", "data_limite": "2099-01-01", "ordem": 1}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.custo, 1500.0);
        assert!(task.is_expensive());
        assert_eq!(task.due_date(), NaiveDate::from_ymd_opt(2099, 1, 1));
    }

    #[test]
    fn test_rejects_garbage_cost() {
        let json = r#"{"id": 1, "nome": "X", "custo": "caro", "data_limite": "2099-01-01", "ordem": 1}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn test_expensive_boundary() {
        let mut task = Task {
            id: 1,
            nome: "Limite".into(),
            custo: 999.99,
            data_limite: "2030-01-01".into(),
            ordem: 1,
        };
        assert!(!task.is_expensive());
        task.custo = 1000.00;
        assert!(task.is_expensive());
    }

    #[test]
    fn test_sanitize_new_name_strips_symbols() {
        assert_eq!(sanitize_new_name("  Café & pão! 2x  "), "Caf  po 2x");
        assert_eq!(sanitize_new_name("   "), "");
        assert_eq!(sanitize_new_name("!!!"), "");
    }

    #[test]
    fn test_sanitize_edited_name_only_trims() {
        assert_eq!(sanitize_edited_name("  Café & pão!  "), "Café & pão!");
        assert_eq!(sanitize_edited_name(" \t "), "");
    }

    #[test]
    fn test_move_request_wire_shape() {
        let body = serde_json::to_value(MoveRequest { id: 7, direcao: Direction::Down }).unwrap();
        assert_eq!(body, serde_json::json!({"id": 7, "direcao": "baixo"}));
    }

    #[test]
    fn test_parse_date_variants() {
        assert_eq!(parse_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(
            parse_date("2024-03-01T10:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_date("01/03/2024"), None);
    }
}
