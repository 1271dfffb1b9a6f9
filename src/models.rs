use crate::schema::*;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::TryFrom;

#[derive(Queryable, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(Queryable, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Insertable, Clone, Debug)]
#[table_name = "questions"]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

/// Body of `POST /questions`. Numbers are kept wide so out-of-range values
/// reach validation instead of failing to parse.
#[derive(Deserialize)]
pub struct NewQuestionBody {
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub category: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub difficulty: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    pub search_term: Option<String>,
}

#[derive(Deserialize)]
pub struct QuizBody {
    pub previous_questions: Option<Vec<i32>>,
    pub quiz_category: Option<QuizCategory>,
}

#[derive(Deserialize)]
pub struct QuizCategory {
    #[serde(deserialize_with = "lenient_i32")]
    pub id: i32,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuery {
    pub search_term: Option<String>,
}

/// Accepts `3` as well as `"3"`; browser clients often send select values as strings.
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {}", n))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected an integer, got {:?}", s))),
        other => Err(de::Error::custom(format!("expected an integer, got {}", other))),
    }
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = lenient_i64(deserializer)?;
    i32::try_from(n).map_err(|_| de::Error::custom(format!("{} is out of range", n)))
}
