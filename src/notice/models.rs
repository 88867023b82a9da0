use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Format current date in Korean format (e.g., "2026년 8월 29일").
pub fn format_korean_date() -> String {
    let now = Local::now().date_naive();
    format!("{}년 {}월 {}일", now.year(), now.month(), now.day())
}

/// A single school notice document (가정통신문).
///
/// There is exactly one in-memory notice per server; it is replaced wholesale
/// by the editor and is not persisted (settings are, the notice body is not).
/// Every displayed field defaults to placeholder text so the rendered
/// document never shows an empty slot.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct NoticeData {
    #[schema(example = "2026학년도")]
    pub year: String,
    #[schema(example = "서울사랑초등학교")]
    pub school: String,
    #[schema(example = "체육대회 안내")]
    pub title: String,
    #[schema(example = "발행인: 교장 김선미")]
    pub publisher: String,
    #[schema(example = "담당자: 교무부장 이정훈")]
    pub manager: String,
    #[schema(example = "서울특별시 강서구 화곡로 123")]
    pub address: String,
    #[schema(example = "02-1234-5678")]
    pub phone: String,
    pub logo_url: String,
    #[schema(example = "학부모님 가정에 건강과 행복이 가득하시길 기원합니다.")]
    pub intro_text: String,
    /// HTML body produced by the rich-text editor. Must pass the HTML safety
    /// gate before being accepted into state.
    #[schema(example = "<p>오는 10월 15일 가을 체육대회를 개최합니다.</p>")]
    pub content: String,
    pub attachment_description: String,
    pub attachments: Vec<String>,
    pub notice: String,
    pub additional_info: String,
    #[schema(example = "2026년 8월 29일")]
    pub date: String,
    #[schema(example = "서울사랑초등학교장")]
    pub signature: String,
}

impl Default for NoticeData {
    fn default() -> Self {
        let year = Local::now().year();
        Self {
            year: format!("{year}학년도"),
            school: "OO초등학교".to_string(),
            title: "가정통신문".to_string(),
            publisher: "발행인: 교장".to_string(),
            manager: "담당자: 교무부장".to_string(),
            address: "학교 주소를 입력하세요".to_string(),
            phone: "02-0000-0000".to_string(),
            logo_url: "/assets/logo.png".to_string(),
            intro_text: "학부모님께 드리는 안내 말씀입니다.".to_string(),
            content: "<p>내용을 입력하세요.</p>".to_string(),
            attachment_description: "붙임 자료를 확인해 주세요.".to_string(),
            attachments: Vec::new(),
            notice: "자세한 사항은 학교로 문의해 주시기 바랍니다.".to_string(),
            additional_info: "기타 안내 사항".to_string(),
            date: format_korean_date(),
            signature: "OO초등학교장".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_notice_has_no_empty_display_fields() {
        let notice = NoticeData::default();
        for (name, value) in [
            ("year", &notice.year),
            ("school", &notice.school),
            ("title", &notice.title),
            ("publisher", &notice.publisher),
            ("manager", &notice.manager),
            ("address", &notice.address),
            ("phone", &notice.phone),
            ("intro_text", &notice.intro_text),
            ("content", &notice.content),
            ("notice", &notice.notice),
            ("date", &notice.date),
            ("signature", &notice.signature),
        ] {
            assert!(!value.trim().is_empty(), "field {name} should have a placeholder");
        }
    }

    #[test]
    fn test_format_korean_date_shape() {
        let date = format_korean_date();
        assert!(date.contains('년'));
        assert!(date.contains('월'));
        assert!(date.ends_with('일'));
    }

    #[test]
    fn test_notice_round_trips_through_json() {
        let notice = NoticeData::default();
        let json = serde_json::to_string(&notice).unwrap();
        let parsed: NoticeData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, notice);
    }
}
