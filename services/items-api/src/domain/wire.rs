/// ワイヤー表現の正規化
///
/// 内部フィールド名（snake_case）と外部フィールド名（camelCase）の対応表を
/// スキーマごとに持ち、デコード時にどちらの名前でも受け付ける。
/// - 出力は常にcamelCase（各スキーマの`#[serde(rename_all = "camelCase")]`）
/// - 入力はsnake_case / camelCaseのどちらでも可
/// - 同一フィールドが両方の名前で指定された場合はcamelCase側の値を採用する
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::validation::{Constraint, FieldViolation, ValidationError, check_length};

/// ボディ全体に関する違反で使用する疑似フィールド名
pub const BODY_FIELD: &str = "body";

/// ワイヤースキーマの1フィールド
///
/// 内部名（snake_case）、値の型、必須・null可否、文字数制約を持つ。
#[derive(Clone, Copy)]
pub struct WireField {
    /// 内部（snake_case）フィールド名
    pub name: &'static str,
    required: bool,
    nullable: bool,
    length: Option<(usize, usize)>,
    check_type: fn(&Value) -> Result<(), serde_json::Error>,
}

impl WireField {
    /// 型`T`として解釈できる任意フィールド（nullを許可）
    pub const fn new<T: DeserializeOwned>(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            nullable: true,
            length: None,
            check_type: check_type::<T>,
        }
    }

    /// 存在し、かつnullでないこと
    pub const fn required(mut self) -> Self {
        self.required = true;
        self.nullable = false;
        self
    }

    /// 任意だが、指定する場合はnullを許可しない
    pub const fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// 文字列値の文字数制約
    pub const fn length(mut self, min: usize, max: usize) -> Self {
        self.length = Some((min, max));
        self
    }
}

impl std::fmt::Debug for WireField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WireField")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("nullable", &self.nullable)
            .field("length", &self.length)
            .finish()
    }
}

fn check_type<T: DeserializeOwned>(value: &Value) -> Result<(), serde_json::Error> {
    T::deserialize(value).map(|_| ())
}

/// ワイヤースキーマ
///
/// フィールドの対応表を明示的に宣言する。外部名は`to_camel_case`で導出する。
pub trait WireSchema: DeserializeOwned {
    /// フィールド定義の一覧（違反はこの順に報告される）
    const FIELDS: &'static [WireField];
}

/// snake_caseをcamelCaseに変換する
///
/// 先頭のアンダースコアは保持し、以降の区切りの直後の文字を大文字にする。
/// 連続するアンダースコアは1つの区切りとして扱う。
pub fn to_camel_case(name: &str) -> String {
    let trimmed = name.trim_start_matches('_');
    let mut out = String::with_capacity(name.len());
    out.push_str(&name[..name.len() - trimmed.len()]);

    let mut upper_next = false;
    for c in trimmed.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// スキーマの対応表に従ってキーを外部名（camelCase）に寄せる
///
/// 外部名のキーが既に存在する場合、内部名のキーは破棄する。
/// 対応表にないキーはそのまま残す（デコード時に無視される）。
pub fn normalize_keys<S: WireSchema>(mut body: Map<String, Value>) -> Map<String, Value> {
    for field in S::FIELDS {
        let external = to_camel_case(field.name);
        if external == field.name {
            continue;
        }
        if let Some(value) = body.remove(field.name) {
            if !body.contains_key(&external) {
                body.insert(external, value);
            }
        }
    }
    body
}

/// JSON値をスキーマにデコードする
///
/// 1. オブジェクトであることを確認
/// 2. キーを外部名に正規化
/// 3. フィールドごとに必須・null・型を確認
/// 4. serdeで型付き構造体に変換
///
/// 3で違反がある場合は型付きの値を構築できないため、残りのフィールドの
/// 文字数・null制約の違反も合わせて1つの`ValidationError`で返す。
/// 構築できた場合の制約検証は各スキーマの`validate`で行う。
pub fn decode<S: WireSchema>(body: Value) -> Result<S, ValidationError> {
    let Value::Object(map) = body else {
        return Err(ValidationError::single(FieldViolation::new(
            BODY_FIELD,
            Constraint::Type,
            "request body must be a JSON object",
        )));
    };

    let map = normalize_keys::<S>(map);

    let mut violations = Vec::new();
    let mut malformed = false;
    for field in S::FIELDS {
        let external = to_camel_case(field.name);
        match map.get(&external) {
            None if field.required => {
                malformed = true;
                violations.push(FieldViolation::required(&external));
            }
            None => {}
            Some(Value::Null) if field.required => {
                malformed = true;
                violations.push(FieldViolation::not_null(&external));
            }
            Some(Value::Null) if !field.nullable => {
                violations.push(FieldViolation::not_null(&external));
            }
            Some(Value::Null) => {}
            Some(value) => match (field.check_type)(value) {
                Err(e) => {
                    malformed = true;
                    violations.push(FieldViolation::new(&external, Constraint::Type, e.to_string()));
                }
                Ok(()) => {
                    if let (Some((min, max)), Value::String(s)) = (field.length, value) {
                        check_length(&external, s, min, max, &mut violations);
                    }
                }
            },
        }
    }
    if malformed {
        if let Some(error) = ValidationError::from_violations(violations) {
            return Err(error);
        }
    }

    serde_json::from_value(Value::Object(map)).map_err(|e| {
        ValidationError::single(FieldViolation::new(BODY_FIELD, Constraint::Type, e.to_string()))
    })
}

/// バイト列（リクエストボディ）をスキーマにデコードする
pub fn decode_slice<S: WireSchema>(bytes: &[u8]) -> Result<S, ValidationError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        ValidationError::single(FieldViolation::new(
            BODY_FIELD,
            Constraint::Type,
            format!("invalid JSON: {}", e),
        ))
    })?;
    decode(value)
}
