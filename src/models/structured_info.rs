//! 简历结构化信息
//!
//! 第一次 LLM 调用要求模型输出 JSON，但模型不一定听话。
//! 解析只尝试一次：成功得到 [`Extraction::Structured`]，否则原样保留为
//! [`Extraction::RawFallback`]，渲染层直接 match，不需要处理错误。

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// 缺失字段的占位值
pub const UNKNOWN: &str = "unknown";

/// 技能字段为字符串时使用的分隔符
const SKILL_SEPARATORS: &[char] = &[',', '，', '、', ';', '；'];

/// 结构化信息提取结果
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// 解析成功
    Structured(StructuredInfo),
    /// 解析失败，保留模型原文
    RawFallback(String),
}

impl Extraction {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Extraction::RawFallback(_))
    }

    pub fn structured(&self) -> Option<&StructuredInfo> {
        match self {
            Extraction::Structured(info) => Some(info),
            Extraction::RawFallback(_) => None,
        }
    }
}

/// 展示用的简历信息，四个字段总是存在
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredInfo {
    pub name: String,
    pub education: String,
    pub years: String,
    pub skills: Vec<String>,
    /// 模型返回的原始对象（可能包含额外字段）
    #[serde(skip)]
    pub raw: Map<String, Value>,
}

impl StructuredInfo {
    /// 解析第一次调用的回复
    ///
    /// 只接受顶层为 JSON 对象的回复；合法 JSON 但不是对象（数组、字符串等）
    /// 同样按解析失败处理。
    pub fn parse_reply(reply: &str) -> Extraction {
        match serde_json::from_str::<Value>(reply) {
            Ok(Value::Object(map)) => {
                let info = Self::from_map(map);
                debug!(
                    "结构化信息解析成功: name={}, years={}, skills={}",
                    info.name,
                    info.years,
                    info.skills.len()
                );
                Extraction::Structured(info)
            }
            Ok(other) => {
                warn!("⚠️ 模型返回的 JSON 不是对象 ({}), 直接显示原文", json_kind(&other));
                Extraction::RawFallback(reply.to_string())
            }
            Err(e) => {
                warn!("⚠️ JSON 解析失败: {}, 直接显示原文", e);
                Extraction::RawFallback(reply.to_string())
            }
        }
    }

    /// 从 JSON 对象派生展示字段，缺失的字段使用默认值
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self {
            name: scalar_field(&map, "name"),
            education: scalar_field(&map, "education"),
            years: scalar_field(&map, "years"),
            skills: skills_field(&map),
            raw: map,
        }
    }

    /// 四个展示字段组成的 JSON 对象
    pub fn display_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::from(self.name.clone()));
        map.insert("education".to_string(), Value::from(self.education.clone()));
        map.insert("skills".to_string(), Value::from(self.skills.clone()));
        map.insert("years".to_string(), Value::from(self.years.clone()));
        map
    }
}

fn scalar_field(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn skills_field(map: &Map<String, Value>) -> Vec<String> {
    match map.get("skills") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(s)) => s
            .split(SKILL_SEPARATORS)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect(),
        Some(other) => vec![other.to_string()],
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
