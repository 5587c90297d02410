//! 患者フォームの状態と送信前バリデーション

use crate::country::{CountryPhoneRule, PhoneInput};
use crate::types::{Gender, PatientInfo};
use thiserror::Error;

/// 年齢欄の最大桁数
pub const MAX_AGE_DIGITS: usize = 3;

/// 送信前バリデーションのエラー
///
/// チェック順に並んでおり、最初に失敗したものだけが返る。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill all patient details")]
    MissingPatientDetails,

    #[error("Please enter phone number")]
    MissingPhone,

    #[error("Phone number must be exactly {required} digits for {country}")]
    PhoneLength { required: usize, country: &'static str },

    #[error("Please select an image first.")]
    MissingImage,
}

impl ValidationError {
    /// フォーム下のエラー欄にも表示するか（トーストのみではない）
    pub fn shows_inline(&self) -> bool {
        matches!(self, ValidationError::MissingImage)
    }
}

/// 患者フォーム
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientForm {
    name: String,
    age: String,
    gender: Gender,
    phone: PhoneInput,
}

impl PatientForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn phone(&self) -> &PhoneInput {
        &self.phone
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// 数字のみ、最大3桁
    pub fn set_age(&mut self, raw: &str) {
        self.age = raw
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(MAX_AGE_DIGITS)
            .collect();
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    pub fn select_country(&mut self, country: &'static CountryPhoneRule) {
        self.phone.select_country(country);
    }

    pub fn set_phone(&mut self, raw: &str) {
        self.phone.set_input(raw);
    }

    /// 入力中の値をそのまま患者情報にする（検証なし）
    pub fn snapshot(&self) -> PatientInfo {
        PatientInfo {
            name: self.name.clone(),
            age: self.age.clone(),
            gender: self.gender,
            phone: self.phone.full_number(),
        }
    }

    /// 送信前チェック
    ///
    /// 1. 氏名・年齢・性別 2. 電話番号の有無 3. 桁数 4. 画像選択 の順に検査する。
    pub fn validate(&self, file_selected: bool) -> Result<PatientInfo, ValidationError> {
        if self.name.is_empty() || self.age.is_empty() || self.gender.is_unspecified() {
            return Err(ValidationError::MissingPatientDetails);
        }

        if self.phone.digits().is_empty() {
            return Err(ValidationError::MissingPhone);
        }

        if !self.phone.is_complete() {
            return Err(ValidationError::PhoneLength {
                required: self.phone.required_digits(),
                country: self.phone.country().name,
            });
        }

        if !file_selected {
            return Err(ValidationError::MissingImage);
        }

        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::find_by_name;

    fn filled_form() -> PatientForm {
        let mut form = PatientForm::new();
        form.set_name("Asha");
        form.set_age("42");
        form.set_gender(Gender::Female);
        form.set_phone("9876543210");
        form
    }

    #[test]
    fn test_valid_form_produces_patient_info() {
        let patient = filled_form().validate(true).unwrap();
        assert_eq!(patient.name, "Asha");
        assert_eq!(patient.phone, "+919876543210");
        assert_eq!(patient.gender, Gender::Female);
    }

    #[test]
    fn test_missing_details_wins_over_everything() {
        let mut form = PatientForm::new();
        form.set_name("Asha");
        // 電話番号も画像も無いが、最初の失敗だけが返る
        assert_eq!(form.validate(false), Err(ValidationError::MissingPatientDetails));

        let mut form = filled_form();
        form.set_gender(Gender::Unspecified);
        assert_eq!(form.validate(true), Err(ValidationError::MissingPatientDetails));

        let mut form = filled_form();
        form.set_age("abc");
        assert_eq!(form.validate(true), Err(ValidationError::MissingPatientDetails));
    }

    #[test]
    fn test_missing_phone_before_length_and_file() {
        let mut form = filled_form();
        form.set_phone("");
        assert_eq!(form.validate(false), Err(ValidationError::MissingPhone));
    }

    #[test]
    fn test_phone_length_message_names_country() {
        let mut form = filled_form();
        form.select_country(find_by_name("Germany").unwrap());
        form.set_phone("12345");
        let err = form.validate(false).unwrap_err();
        assert_eq!(
            err,
            ValidationError::PhoneLength { required: 11, country: "Germany" }
        );
        assert_eq!(err.to_string(), "Phone number must be exactly 11 digits for Germany");
    }

    #[test]
    fn test_missing_image_is_last_and_inline() {
        let err = filled_form().validate(false).unwrap_err();
        assert_eq!(err, ValidationError::MissingImage);
        assert!(err.shows_inline());
        assert!(!ValidationError::MissingPhone.shows_inline());
    }

    #[test]
    fn test_age_is_digits_only_and_three_long() {
        let mut form = PatientForm::new();
        form.set_age("1a2b3c4");
        assert_eq!(form.age(), "123");
    }

    #[test]
    fn test_country_change_clears_phone() {
        let mut form = filled_form();
        form.select_country(find_by_name("France").unwrap());
        assert_eq!(form.phone().digits(), "");
        assert_eq!(form.validate(true), Err(ValidationError::MissingPhone));
    }
}
