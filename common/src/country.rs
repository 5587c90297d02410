//! 国番号と電話番号桁数のルール

use serde::Serialize;

/// 国ごとの電話番号ルール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryPhoneRule {
    pub name: &'static str,
    pub code: &'static str,
    pub digits: usize,
}

pub const COUNTRIES: &[CountryPhoneRule] = &[
    CountryPhoneRule { name: "India", code: "+91", digits: 10 },
    CountryPhoneRule { name: "USA", code: "+1", digits: 10 },
    CountryPhoneRule { name: "UK", code: "+44", digits: 10 },
    CountryPhoneRule { name: "Australia", code: "+61", digits: 9 },
    CountryPhoneRule { name: "Canada", code: "+1", digits: 10 },
    CountryPhoneRule { name: "UAE", code: "+971", digits: 9 },
    CountryPhoneRule { name: "Germany", code: "+49", digits: 11 },
    CountryPhoneRule { name: "France", code: "+33", digits: 9 },
    CountryPhoneRule { name: "Japan", code: "+81", digits: 10 },
];

impl CountryPhoneRule {
    /// 初期選択（India）
    pub fn default_rule() -> &'static CountryPhoneRule {
        &COUNTRIES[0]
    }

    /// セレクトボックス表示用 "India (+91)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

/// 国名（大文字小文字無視）で検索
pub fn find_by_name(name: &str) -> Option<&'static CountryPhoneRule> {
    let name = name.trim();
    COUNTRIES.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// 国番号で検索（"+1" のように重複する場合は先頭を返す）
pub fn find_by_code(code: &str) -> Option<&'static CountryPhoneRule> {
    let code = code.trim();
    let code = code.strip_prefix('+').unwrap_or(code);
    COUNTRIES
        .iter()
        .find(|c| c.code.trim_start_matches('+') == code)
}

/// 国名または国番号で検索
pub fn lookup(query: &str) -> Option<&'static CountryPhoneRule> {
    find_by_name(query).or_else(|| find_by_code(query))
}

/// 表の位置で検索（Webのセレクト値）
pub fn by_index(index: usize) -> Option<&'static CountryPhoneRule> {
    COUNTRIES.get(index)
}

/// 表の位置を取得
pub fn index_of(rule: &CountryPhoneRule) -> usize {
    COUNTRIES.iter().position(|c| c == rule).unwrap_or(0)
}

/// 電話番号入力バッファ
///
/// 数字以外は捨て、選択中の国の桁数で切り詰める。国を変えるとバッファは空になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneInput {
    country: &'static CountryPhoneRule,
    digits: String,
}

impl Default for PhoneInput {
    fn default() -> Self {
        Self::new(CountryPhoneRule::default_rule())
    }
}

impl PhoneInput {
    pub fn new(country: &'static CountryPhoneRule) -> Self {
        Self {
            country,
            digits: String::new(),
        }
    }

    pub fn country(&self) -> &'static CountryPhoneRule {
        self.country
    }

    pub fn select_country(&mut self, country: &'static CountryPhoneRule) {
        self.country = country;
        self.digits.clear();
    }

    pub fn set_input(&mut self, raw: &str) {
        self.digits = raw
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(self.country.digits)
            .collect();
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn required_digits(&self) -> usize {
        self.country.digits
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() == self.country.digits
    }

    /// 国番号 + 数字
    pub fn full_number(&self) -> String {
        format!("{}{}", self.country.code, self.digits)
    }

    /// 入力欄のプレースホルダ
    pub fn placeholder(&self) -> String {
        format!("Enter {} digit phone", self.country.digits)
    }
}
