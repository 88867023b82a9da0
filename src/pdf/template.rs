//! HTML rendering of a notice document.
//!
//! Produces the standalone page the rasterizer screenshots. Layout is kept to
//! simple block elements; `content` is inserted as-is because it has already
//! passed the HTML safety gate, every other field is escaped.

use crate::notice::models::NoticeData;

/// Escape text for safe embedding in HTML.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the notice to a complete HTML document sized for A4.
pub fn render_notice_html(notice: &NoticeData) -> String {
    let mut html = String::new();
    html.push_str(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><style>\
         body { font-family: 'Malgun Gothic', 'Noto Sans KR', sans-serif; \
         width: 794px; margin: 0; padding: 48px 56px; box-sizing: border-box; }\
         .header { border-bottom: 3px solid #1a1a1a; padding-bottom: 12px; }\
         .header .year { font-size: 14px; color: #555; }\
         .header h1 { font-size: 28px; margin: 8px 0; text-align: center; }\
         .header .school-info { font-size: 12px; color: #555; display: flex; \
         justify-content: space-between; }\
         .intro { margin: 24px 0 12px; }\
         .content { line-height: 1.7; }\
         .attachments { margin-top: 16px; font-size: 14px; }\
         .notice { margin-top: 24px; font-size: 13px; color: #444; }\
         .footer { margin-top: 48px; text-align: center; }\
         .footer .date { font-size: 14px; margin-bottom: 16px; }\
         .footer .signature { font-size: 22px; font-weight: bold; letter-spacing: 8px; }\
         </style></head><body>",
    );

    html.push_str("<div class=\"header\">");
    html.push_str(&format!(
        "<div class=\"year\">{}</div>",
        escape_html(&notice.year)
    ));
    html.push_str(&format!("<h1>{}</h1>", escape_html(&notice.title)));
    html.push_str(&format!(
        "<div class=\"school-info\"><span>{}</span><span>{} | {}</span></div>",
        escape_html(&notice.school),
        escape_html(&notice.publisher),
        escape_html(&notice.manager),
    ));
    html.push_str(&format!(
        "<div class=\"school-info\"><span>{}</span><span>{}</span></div>",
        escape_html(&notice.address),
        escape_html(&notice.phone),
    ));
    html.push_str("</div>");

    html.push_str(&format!(
        "<p class=\"intro\">{}</p>",
        escape_html(&notice.intro_text)
    ));

    // Already sanitized at the state boundary
    html.push_str(&format!("<div class=\"content\">{}</div>", notice.content));

    if !notice.attachments.is_empty() {
        html.push_str("<div class=\"attachments\">");
        html.push_str(&format!(
            "<div>{}</div><ol>",
            escape_html(&notice.attachment_description)
        ));
        for attachment in &notice.attachments {
            html.push_str(&format!("<li>{}</li>", escape_html(attachment)));
        }
        html.push_str("</ol></div>");
    }

    html.push_str(&format!(
        "<div class=\"notice\">{}</div>",
        escape_html(&notice.notice)
    ));
    html.push_str(&format!(
        "<div class=\"notice\">{}</div>",
        escape_html(&notice.additional_info)
    ));

    html.push_str("<div class=\"footer\">");
    html.push_str(&format!(
        "<div class=\"date\">{}</div>",
        escape_html(&notice.date)
    ));
    html.push_str(&format!(
        "<div class=\"signature\">{}</div>",
        escape_html(&notice.signature)
    ));
    html.push_str("</div></body></html>");

    html
}
