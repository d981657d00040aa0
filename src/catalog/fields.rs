//! Built-in field table and page layout for the product catalog.

use super::extract::{FieldRule, FieldSpec, PageLayout, QuestionMatch};

/// Output column holding the product name.
pub const NAME_FIELD: &str = "Name";

/// The fixed product columns, in output order.
pub fn product_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(NAME_FIELD, FieldRule::Text("h1".into())),
        FieldSpec::new(
            "Description",
            FieldRule::Text(".ProductOverview_wysiwyg-text__qyaAp p".into()),
        ),
        FieldSpec::new(
            "Features",
            FieldRule::List(".FeaturesSection_feature-list__hS9Jh li span:nth-of-type(2)".into()),
        ),
        FieldSpec::new("Deployment Types", FieldRule::Detail("Deployment Types".into())),
        FieldSpec::new("Operating Systems", FieldRule::Detail("Operating Systems".into())),
        FieldSpec::new("Mobile Application", FieldRule::Detail("Mobile Application".into())),
        FieldSpec::new("Pricing", FieldRule::Faq(QuestionMatch::keywords(["cost"]))),
        FieldSpec::new(
            "Top Competitors",
            FieldRule::Faq(QuestionMatch::keywords(["competitors"])),
        ),
    ]
}

pub fn product_layout() -> PageLayout {
    PageLayout {
        details_row: ".TechnicalDetails_table__fL19a tr".into(),
        details_key: "th".into(),
        details_value: "td".into(),
        faq_section: ".FaqQuestion_toggle-section__MKGEp".into(),
        faq_question: "button > span".into(),
        faq_answer: ".FaqQuestion_answer__TcR_e".into(),
        identity_field: NAME_FIELD.into(),
    }
}
