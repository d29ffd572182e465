/// 入力値バリデーション
///
/// リクエストボディの検証結果を、どのフィールドがどの制約に違反したかという
/// 構造化された形で表現する。違反は最初の1件で打ち切らず、すべて収集する。
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 違反した制約の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// 必須フィールドが欠落
    Required,
    /// nullが許可されないフィールドにnullが指定された
    NotNull,
    /// 文字数が最小値未満
    MinLength,
    /// 文字数が最大値超過
    MaxLength,
    /// 型が不正（JSONとして解釈できない、オブジェクトでない等）
    Type,
}

/// 1フィールド分の違反情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// 外部（camelCase）フィールド名。ボディ全体の問題は"body"
    pub field: String,
    /// 違反した制約
    pub constraint: Constraint,
    /// 人間向けメッセージ
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, constraint: Constraint, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            constraint,
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::new(field, Constraint::Required, format!("{} is required", field))
    }

    pub fn not_null(field: &str) -> Self {
        Self::new(field, Constraint::NotNull, format!("{} must not be null", field))
    }
}

/// バリデーションエラー
///
/// 1件以上の`FieldViolation`を保持する。空の違反リストでは構築しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// 違反リストからエラーを作成
    ///
    /// 違反が1件もなければ`None`を返す。
    pub fn from_violations(violations: Vec<FieldViolation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    /// 単一の違反からエラーを作成
    pub fn single(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    /// 指定フィールドの違反が含まれるか
    pub fn has_violation(&self, field: &str, constraint: Constraint) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.constraint == constraint)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.violations.iter().map(|v| v.message.as_str()).collect();
        write!(f, "validation failed: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// 文字数（Unicodeスカラー値の数）の範囲チェック
///
/// 違反があれば`violations`に追加する。
pub fn check_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
    violations: &mut Vec<FieldViolation>,
) {
    let len = value.chars().count();
    if len < min {
        violations.push(FieldViolation::new(
            field,
            Constraint::MinLength,
            format!("{} must be at least {} characters", field, min),
        ));
    } else if len > max {
        violations.push(FieldViolation::new(
            field,
            Constraint::MaxLength,
            format!("{} must be at most {} characters", field, max),
        ));
    }
}
