use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Target languages offered for notice translation.
///
/// The fixed set mirrors the languages most requested by multicultural
/// families in Korean schools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "vi")]
    Vi,
    #[serde(rename = "th")]
    Th,
    #[serde(rename = "fil")]
    Fil,
    #[serde(rename = "ru")]
    Ru,
    #[serde(rename = "mn")]
    Mn,
    #[serde(rename = "km")]
    Km,
    #[serde(rename = "uz")]
    Uz,
}

impl LanguageCode {
    /// Every supported target language, in the order the batch runs.
    pub fn all() -> &'static [LanguageCode] {
        use LanguageCode::*;
        &[En, ZhCn, Ja, Vi, Th, Fil, Ru, Mn, Km, Uz]
    }

    /// The wire code, also used in export filenames.
    pub fn code(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::ZhCn => "zh-CN",
            LanguageCode::Ja => "ja",
            LanguageCode::Vi => "vi",
            LanguageCode::Th => "th",
            LanguageCode::Fil => "fil",
            LanguageCode::Ru => "ru",
            LanguageCode::Mn => "mn",
            LanguageCode::Km => "km",
            LanguageCode::Uz => "uz",
        }
    }

    /// English language name, used inside the translation prompt.
    pub fn english_name(&self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::ZhCn => "Simplified Chinese",
            LanguageCode::Ja => "Japanese",
            LanguageCode::Vi => "Vietnamese",
            LanguageCode::Th => "Thai",
            LanguageCode::Fil => "Filipino",
            LanguageCode::Ru => "Russian",
            LanguageCode::Mn => "Mongolian",
            LanguageCode::Km => "Khmer",
            LanguageCode::Uz => "Uzbek",
        }
    }

    /// Korean label shown in the editor UI.
    pub fn korean_label(&self) -> &'static str {
        match self {
            LanguageCode::En => "영어",
            LanguageCode::ZhCn => "중국어",
            LanguageCode::Ja => "일본어",
            LanguageCode::Vi => "베트남어",
            LanguageCode::Th => "태국어",
            LanguageCode::Fil => "필리핀어",
            LanguageCode::Ru => "러시아어",
            LanguageCode::Mn => "몽골어",
            LanguageCode::Km => "캄보디아어",
            LanguageCode::Uz => "우즈베크어",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageCode::all()
            .iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unrecognized language code: {s}"))
    }
}
